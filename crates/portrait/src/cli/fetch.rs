use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use portrait_fetch::{Cancellation, ContentHash, FetchError, PortraitFetcher, ReqwestClient};
use tracing::{info, warn};

use super::Global;
use crate::config::Settings;

/// Conventional status for termination by SIGINT.
const EXIT_CANCELLED: u8 = 130;

#[derive(Clone, Debug, Args)]
pub struct FetchArg {
    /// Content hash (CID) of the portrait
    pub hash: String,

    /// Only accept archive entries tagged with this author
    #[arg(short, long)]
    pub author: Option<String>,

    /// Gateway base URL; repeat to race several. Replaces configured mirrors.
    #[arg(short, long = "mirror")]
    pub mirrors: Vec<String>,

    /// Upper bound on archive index pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Give up on the whole fetch after this many seconds
    #[arg(long)]
    pub deadline: Option<u64>,
}

impl FetchArg {
    pub fn run(&self, global: &Global) -> anyhow::Result<ExitCode> {
        let hash = ContentHash::parse(&self.hash)?;
        let settings = self.apply(Settings::load(global.config.as_deref())?);

        let client = ReqwestClient::new(&settings.http).context("failed to build HTTP client")?;
        let fetcher = PortraitFetcher::new(client, settings.sources);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("failed to start async runtime")?;

        let result = runtime.block_on(async {
            let cancel = Cancellation::new();
            let trigger = cancel.clone();
            let deadline = self.deadline.map(Duration::from_secs);
            tokio::spawn(async move {
                match deadline {
                    Some(limit) => {
                        tokio::select! {
                            _ = tokio::signal::ctrl_c() => {}
                            _ = tokio::time::sleep(limit) => warn!(?limit, "deadline reached"),
                        }
                    }
                    None => {
                        let _ = tokio::signal::ctrl_c().await;
                    }
                }
                trigger.cancel();
            });

            fetcher.fetch_portrait(&hash, self.author.as_deref(), &cancel).await
        });

        match result {
            Ok(document) => {
                info!(origin = %document.origin(), "verified {}", hash);
                let mut stdout = std::io::stdout().lock();
                serde_json::to_writer_pretty(&mut stdout, document.value())?;
                writeln!(stdout)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => match exit_status(&err) {
                Some(code) => {
                    eprintln!("fetch of {hash}: {err}");
                    Ok(ExitCode::from(code))
                }
                None => {
                    for source in err.errors() {
                        warn!("{source}");
                    }
                    Err(err.into())
                }
            },
        }
    }

    fn apply(&self, mut settings: Settings) -> Settings {
        if !self.mirrors.is_empty() {
            settings.sources.mirrors = self.mirrors.clone();
        }
        if let Some(max_pages) = self.max_pages {
            settings.sources.max_pages = max_pages;
        }
        if let Some(secs) = self.timeout {
            settings.http.timeout = Duration::from_secs(secs);
        }
        settings
    }
}

/// Status for a fetch that ended without a document. `None` means the error
/// is reported through the normal error path.
fn exit_status(err: &FetchError) -> Option<u8> {
    match err {
        FetchError::Cancelled => Some(EXIT_CANCELLED),
        FetchError::AllSourcesFailed { .. } => None,
    }
}
