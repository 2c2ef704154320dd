use serde::Deserialize;
use serde_json::{Value, json};

use crate::data::{Candidate, Cursor, PAGE_SIZE, SearchFilter, Tag};

const TRANSACTIONS_QUERY: &str = "query($tags: [TagFilter!], $first: Int, $after: String) {
  transactions(tags: $tags, first: $first, after: $after, sort: HEIGHT_ASC) {
    edges { cursor node { id tags { name value } } }
  }
}";

/// Reasons an index response could not be turned into candidates.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("malformed index response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("index reported errors: {0}")]
    Rejected(String),

    #[error("index response has no transactions")]
    MissingData,
}

/// GraphQL request body for one page of candidates matching `filter`.
///
/// Filter values are passed as variables; nothing is spliced into the query text.
pub fn index_query(filter: &SearchFilter, after: Option<&Cursor>) -> Value {
    let tags: Vec<Value> = filter
        .tags()
        .into_iter()
        .map(|t| json!({ "name": t.name, "values": [t.value] }))
        .collect();

    json!({
        "query": TRANSACTIONS_QUERY,
        "variables": {
            "tags": tags,
            "first": PAGE_SIZE,
            "after": after.map(Cursor::as_str),
        }
    })
}

#[derive(Deserialize)]
struct Response {
    data: Option<Data>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct Data {
    transactions: Option<Transactions>,
}

#[derive(Deserialize)]
struct Transactions {
    edges: Vec<Edge>,
}

#[derive(Deserialize)]
struct Edge {
    cursor: String,
    node: Node,
}

#[derive(Deserialize)]
struct Node {
    id: String,
    #[serde(default)]
    tags: Vec<Tag>,
}

/// Decode an index response into candidates, preserving index order.
pub fn decode_page(body: &[u8]) -> Result<Vec<Candidate>, PageError> {
    let response: Response = serde_json::from_slice(body)?;

    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(PageError::Rejected(messages.join("; ")));
    }

    let transactions = response
        .data
        .and_then(|d| d.transactions)
        .ok_or(PageError::MissingData)?;

    Ok(transactions
        .edges
        .into_iter()
        .map(|edge| Candidate {
            id: edge.node.id,
            cursor: Cursor(edge.cursor),
            tags: edge.node.tags,
        })
        .collect())
}

/// Cursor for the following page, if `page` may have a successor.
///
/// Only a full page can be followed; a short page ends the candidate space.
pub fn next_cursor(page: &[Candidate]) -> Option<Cursor> {
    if page.len() == PAGE_SIZE {
        page.last().map(|c| c.cursor.clone())
    } else {
        None
    }
}
