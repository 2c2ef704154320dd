use portrait_verify::{ContentHash, verify};
use tracing::{debug, warn};

use crate::core::{gateway_url, is_success};
use crate::data::{Document, Origin};
use crate::effects::http::HttpClient;
use crate::error::SourceError;

/// Fetch `hash` from a single gateway and verify it.
///
/// The body is parsed as JSON to reject non-documents early. The digest is
/// taken over the bytes exactly as received, never over a re-serialization.
#[tracing::instrument(level = "debug", skip_all, fields(mirror = mirror, hash = %hash))]
pub async fn fetch_from_gateway<C: HttpClient>(
    client: &C,
    mirror: &str,
    hash: &ContentHash,
) -> Result<Document, SourceError> {
    let url = gateway_url(mirror, hash);
    let response = client
        .get(&url)
        .await
        .map_err(|e| SourceError::network(&url, e))?;

    if !is_success(response.status) {
        debug!(status = response.status, "gateway refused");
        return Err(SourceError::HttpStatus {
            url,
            status: response.status,
        });
    }

    let value: serde_json::Value = match serde_json::from_slice(&response.body) {
        Ok(value) => value,
        Err(source) => return Err(SourceError::Parse { url, source }),
    };

    if !verify(hash, &response.body) {
        warn!(%url, "gateway served content that does not match its hash");
        return Err(SourceError::HashMismatch {
            url,
            expected: hash.clone(),
        });
    }

    debug!(bytes = response.body.len(), "gateway content verified");
    Ok(Document::verified(value, response.body, Origin::Mirror { url }))
}
