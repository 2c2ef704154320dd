use serde::{Deserialize, Serialize};

/// Upper bound on archive index pages walked by a single search.
pub const DEFAULT_MAX_PAGES: u32 = 32;

/// Where portraits may be retrieved from.
///
/// Passed explicitly into every fetch; there is no process-wide default
/// beyond what [`SourceConfig::default`] returns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Gateway base URLs, each ending in the path prefix the hash is appended to.
    pub mirrors: Vec<String>,

    /// Archive index and object endpoints.
    pub archive: ArchiveEndpoint,

    /// Tag names and protocol value used to filter the archive index.
    pub tags: ArchiveTags,

    /// Maximum number of index pages a single archive search may request.
    pub max_pages: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            mirrors: vec![
                "https://ipfs.io/ipfs/".to_string(),
                "https://dweb.link/ipfs/".to_string(),
                "https://cloudflare-ipfs.com/ipfs/".to_string(),
                "https://gateway.pinata.cloud/ipfs/".to_string(),
            ],
            archive: ArchiveEndpoint::default(),
            tags: ArchiveTags::default(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl SourceConfig {
    /// Replace the mirror list.
    #[must_use]
    pub fn mirrors<I, S>(mut self, mirrors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mirrors = mirrors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn archive(mut self, archive: ArchiveEndpoint) -> Self {
        self.archive = archive;
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: ArchiveTags) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// The archival network: a GraphQL search index plus an object store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveEndpoint {
    /// GraphQL endpoint receiving the index query.
    pub index_url: String,

    /// Base URL objects are fetched from by transaction id.
    pub object_base_url: String,
}

impl Default for ArchiveEndpoint {
    fn default() -> Self {
        Self {
            index_url: "https://arweave.net/graphql".to_string(),
            object_base_url: "https://arweave.net".to_string(),
        }
    }
}

impl ArchiveEndpoint {
    pub fn new(index_url: impl Into<String>, object_base_url: impl Into<String>) -> Self {
        Self {
            index_url: index_url.into(),
            object_base_url: object_base_url.into(),
        }
    }
}

/// Tag vocabulary of portrait uploads on the archive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveTags {
    pub protocol_name: String,
    pub protocol_value: String,
    pub hash_name: String,
    pub author_name: String,
}

impl Default for ArchiveTags {
    fn default() -> Self {
        Self {
            protocol_name: "App-Name".to_string(),
            protocol_value: "Portrait".to_string(),
            hash_name: "IPFS-Hash".to_string(),
            author_name: "Author".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: SourceConfig = serde_json::from_str(
            r#"{"mirrors": ["http://localhost:8080/ipfs/"], "archive": {"index_url": "http://idx/graphql"}}"#,
        )
        .unwrap();

        assert_eq!(config.mirrors, vec!["http://localhost:8080/ipfs/"]);
        assert_eq!(config.archive.index_url, "http://idx/graphql");
        assert_eq!(config.archive.object_base_url, "https://arweave.net");
        assert_eq!(config.tags, ArchiveTags::default());
        assert_eq!(config.max_pages, DEFAULT_MAX_PAGES);
    }

    #[test]
    fn test_builder() {
        let config = SourceConfig::default()
            .mirrors(["http://a/", "http://b/"])
            .archive(ArchiveEndpoint::new("http://idx", "http://obj"))
            .max_pages(3);

        assert_eq!(config.mirrors.len(), 2);
        assert_eq!(config.archive.object_base_url, "http://obj");
        assert_eq!(config.max_pages, 3);
    }
}
