use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use portrait_fetch::{HttpOptions, SourceConfig};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG: &str = "portrait.toml";
const ENV_PREFIX: &str = "PORTRAIT_";

/// Everything the CLI reads from configuration.
///
/// ```toml
/// [sources]
/// mirrors = ["https://ipfs.io/ipfs/"]
/// max_pages = 16
///
/// [sources.archive]
/// index_url = "https://arweave.net/graphql"
///
/// [http]
/// timeout_secs = 10
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sources: SourceConfig,
    pub http: HttpOptions,
}

impl Settings {
    /// Defaults, then the TOML file, then `PORTRAIT_*` variables
    /// (`PORTRAIT_SOURCES__MAX_PAGES=8`).
    ///
    /// An explicit `path` must exist; the default `portrait.toml` is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file: PathBuf = match path {
            Some(p) if !p.exists() => bail!("config file {} does not exist", p.display()),
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG),
        };

        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(&file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("invalid configuration (file {})", file.display()))
    }
}
