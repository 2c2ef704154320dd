use portrait_verify::ContentHash;
use serde::{Deserialize, Serialize};

use super::sources::ArchiveTags;

/// Number of candidates requested per index page. A page holding exactly
/// this many entries may have a successor.
pub const PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Opaque continuation token issued by the archive index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(pub String);

impl Cursor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One index search result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Transaction id; the object is retrieved by it.
    pub id: String,
    pub cursor: Cursor,
    /// Tags as reported by the index. Untrusted.
    pub tags: Vec<Tag>,
}

impl Candidate {
    /// Returns `true` if the index reported a tag that conflicts with `filter`.
    ///
    /// Missing tags are not a conflict; only a filtered tag name carrying a
    /// different value is.
    pub fn contradicts(&self, filter: &SearchFilter) -> bool {
        filter.tags().iter().any(|wanted| {
            let mut reported = self.tags.iter().filter(|t| t.name == wanted.name).peekable();
            reported.peek().is_some() && !reported.any(|t| t.value == wanted.value)
        })
    }
}

/// Static filter narrowing the archive index for one search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchFilter {
    pub protocol: Tag,
    pub hash: Tag,
    pub author: Option<Tag>,
    expected: ContentHash,
}

impl SearchFilter {
    pub fn new(tags: &ArchiveTags, hash: &ContentHash, author: Option<&str>) -> Self {
        Self {
            protocol: Tag::new(&tags.protocol_name, &tags.protocol_value),
            hash: Tag::new(&tags.hash_name, hash.as_str()),
            author: author.map(|a| Tag::new(&tags.author_name, a)),
            expected: hash.clone(),
        }
    }

    /// The identifier every candidate must verify against.
    pub fn expected(&self) -> &ContentHash {
        &self.expected
    }

    /// All tag constraints in query order.
    pub fn tags(&self) -> Vec<&Tag> {
        let mut tags = vec![&self.protocol, &self.hash];
        tags.extend(self.author.as_ref());
        tags
    }
}
