use futures_util::{FutureExt, TryFutureExt};
use portrait_verify::ContentHash;
use tracing::info;

use crate::data::{Document, SearchFilter, SourceConfig};
use crate::effects::archive::search_archive;
use crate::effects::cancel::Cancellation;
use crate::effects::http::HttpClient;
use crate::effects::mirrors::fetch_from_mirrors;
use crate::effects::race::first_success;
use crate::error::{FetchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Branch {
    Mirrors,
    Archive,
}

/// Race the gateway network against the archive for `hash`.
///
/// Returns the first verified document from either side and drops the other.
/// If both fail, [`FetchError::AllSourcesFailed`] carries every leaf error,
/// mirrors first. Raising `cancel` ends the call with
/// [`FetchError::Cancelled`] and abandons all outstanding requests.
#[tracing::instrument(level = "debug", skip_all, fields(hash = %hash, author = author))]
pub async fn fetch_portrait<C: HttpClient>(
    client: &C,
    config: &SourceConfig,
    hash: &ContentHash,
    author: Option<&str>,
    cancel: &Cancellation,
) -> Result<Document> {
    let filter = SearchFilter::new(&config.tags, hash, author);

    let mirrors = fetch_from_mirrors(client, &config.mirrors, hash)
        .map_err(|e| (Branch::Mirrors, e))
        .boxed();
    let archive = search_archive(client, &config.archive, &filter, config.max_pages)
        .map_err(|e| (Branch::Archive, e))
        .boxed();

    match cancel.run(first_success([mirrors, archive])).await {
        None => {
            info!("portrait fetch cancelled");
            Err(FetchError::Cancelled)
        }
        Some(Ok(document)) => {
            info!(origin = %document.origin(), "portrait verified");
            Ok(document)
        }
        Some(Err(mut failures)) => {
            failures.sort_by_key(|(branch, _)| *branch);
            let errors = failures
                .into_iter()
                .flat_map(|(_, e)| e.flatten())
                .collect();
            Err(FetchError::AllSourcesFailed {
                hash: hash.clone(),
                errors,
            })
        }
    }
}

/// Client plus source configuration, ready to fetch portraits.
pub struct PortraitFetcher<C: HttpClient> {
    client: C,
    config: SourceConfig,
}

impl<C: HttpClient> PortraitFetcher<C> {
    pub fn new(client: C, config: SourceConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// See [`fetch_portrait`].
    pub async fn fetch_portrait(
        &self,
        hash: &ContentHash,
        author: Option<&str>,
        cancel: &Cancellation,
    ) -> Result<Document> {
        fetch_portrait(&self.client, &self.config, hash, author, cancel).await
    }
}
