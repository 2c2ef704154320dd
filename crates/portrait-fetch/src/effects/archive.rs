//! Paginated search of the archival network.

use portrait_verify::{ContentHash, verify};
use tracing::{debug, warn};

use crate::core::{decode_page, index_query, is_success, next_cursor, object_url};
use crate::data::{ArchiveEndpoint, Candidate, Cursor, Document, Origin, SearchFilter};
use crate::effects::http::HttpClient;
use crate::error::SourceError;

/// Walk the archive index for entries matching `filter` and return the first
/// one whose payload verifies.
///
/// Pages are requested in ascending block height and candidates are tried in
/// the order received, so the earliest verifying upload wins. A page with
/// fewer than [`PAGE_SIZE`](crate::PAGE_SIZE) entries ends the search with
/// [`SourceError::NotFound`]. At most `max_pages` pages are requested; running
/// out of budget on a full page fails with
/// [`SourceError::PageBudgetExceeded`].
///
/// A candidate that cannot be fetched or does not verify is skipped. A page
/// that cannot be fetched or decoded ends the search.
#[tracing::instrument(level = "debug", skip_all, fields(hash = %filter.expected(), index = %endpoint.index_url))]
pub async fn search_archive<C: HttpClient>(
    client: &C,
    endpoint: &ArchiveEndpoint,
    filter: &SearchFilter,
    max_pages: u32,
) -> Result<Document, SourceError> {
    let hash = filter.expected();
    let mut cursor: Option<Cursor> = None;
    let mut pages = 0u32;

    loop {
        if pages >= max_pages {
            warn!(pages, "archive page budget exhausted");
            return Err(SourceError::PageBudgetExceeded {
                hash: hash.clone(),
                pages,
            });
        }

        let page = query_page(client, endpoint, filter, cursor.as_ref()).await?;
        pages += 1;
        debug!(page = pages, candidates = page.len(), "archive page received");

        for candidate in &page {
            if candidate.contradicts(filter) {
                debug!(id = %candidate.id, "candidate tags contradict filter, skipped");
                continue;
            }
            match fetch_candidate(client, endpoint, candidate, hash).await {
                Ok(document) => {
                    debug!(id = %candidate.id, page = pages, "archive candidate verified");
                    return Ok(document);
                }
                Err(e) => debug!(id = %candidate.id, error = %e, "archive candidate rejected"),
            }
        }

        match next_cursor(&page) {
            Some(next) => cursor = Some(next),
            None => {
                return Err(SourceError::NotFound {
                    hash: hash.clone(),
                    pages,
                });
            }
        }
    }
}

async fn query_page<C: HttpClient>(
    client: &C,
    endpoint: &ArchiveEndpoint,
    filter: &SearchFilter,
    after: Option<&Cursor>,
) -> Result<Vec<Candidate>, SourceError> {
    let url = &endpoint.index_url;
    let response = client
        .post_json(url, &index_query(filter, after))
        .await
        .map_err(|e| SourceError::network(url, e))?;

    if !is_success(response.status) {
        return Err(SourceError::HttpStatus {
            url: url.clone(),
            status: response.status,
        });
    }

    decode_page(&response.body).map_err(|source| SourceError::Index {
        url: url.clone(),
        source,
    })
}

async fn fetch_candidate<C: HttpClient>(
    client: &C,
    endpoint: &ArchiveEndpoint,
    candidate: &Candidate,
    hash: &ContentHash,
) -> Result<Document, SourceError> {
    let url = object_url(&endpoint.object_base_url, &candidate.id);
    let response = client
        .get(&url)
        .await
        .map_err(|e| SourceError::network(&url, e))?;

    if !is_success(response.status) {
        return Err(SourceError::HttpStatus {
            url,
            status: response.status,
        });
    }

    if !verify(hash, &response.body) {
        warn!(%url, "archive object does not match its hash tag");
        return Err(SourceError::HashMismatch {
            url,
            expected: hash.clone(),
        });
    }

    match serde_json::from_slice(&response.body) {
        Ok(value) => Ok(Document::verified(
            value,
            response.body,
            Origin::Archive {
                transaction: candidate.id.clone(),
            },
        )),
        Err(source) => Err(SourceError::Parse { url, source }),
    }
}
