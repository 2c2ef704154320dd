//! Racing every gateway of the content-addressed network.

use portrait_verify::ContentHash;
use tracing::{debug, info};

use crate::data::Document;
use crate::effects::gateway::fetch_from_gateway;
use crate::effects::http::HttpClient;
use crate::effects::race::first_success;
use crate::error::SourceError;

/// Query all `mirrors` at once and return the first verified document.
///
/// Gateways are independent; completion order decides, not list order. When
/// every gateway fails the result is an [`SourceError::Aggregate`] holding
/// one error per mirror. An empty list yields an empty aggregate.
#[tracing::instrument(level = "debug", skip_all, fields(hash = %hash, mirrors = mirrors.len()))]
pub async fn fetch_from_mirrors<C: HttpClient>(
    client: &C,
    mirrors: &[String],
    hash: &ContentHash,
) -> Result<Document, SourceError> {
    let attempts = mirrors
        .iter()
        .map(|mirror| fetch_from_gateway(client, mirror, hash));

    match first_success(attempts).await {
        Ok(document) => {
            info!(origin = %document.origin(), "mirror race won");
            Ok(document)
        }
        Err(errors) => {
            debug!(failed = errors.len(), "every mirror failed");
            Err(SourceError::Aggregate(errors))
        }
    }
}
