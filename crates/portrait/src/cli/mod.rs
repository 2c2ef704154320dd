use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

pub mod fetch;
pub mod hash;

#[derive(Clone, Debug, Parser)]
#[command(name = "portrait", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(flatten)]
    pub global: Global,

    /// Increase log verbosity (-v, -vv). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Args)]
pub struct Global {
    /// Configuration file (default: ./portrait.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch a portrait by content hash and print the verified JSON
    #[command(alias = "f", name = "fetch")]
    Fetch(fetch::FetchArg),

    /// Print the content hash of a file
    #[command(alias = "h", name = "hash")]
    Hash(hash::HashArg),

    /// Check that a file hashes to the given content hash
    #[command(alias = "v", name = "verify")]
    Verify(hash::VerifyArg),
}

impl Commands {
    pub fn run(&self, global: &Global) -> anyhow::Result<ExitCode> {
        match self {
            Commands::Fetch(arg) => arg.run(global),
            Commands::Hash(arg) => arg.run(),
            Commands::Verify(arg) => arg.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch() {
        let app = App::try_parse_from([
            "portrait",
            "-v",
            "fetch",
            "bafkreiablk6x6xgfpiw5ss3vsdyevwaiijzzaxxdh3c45pvomitwvf7ymi",
            "--author",
            "0xabc",
            "--mirror",
            "http://a/ipfs/",
            "--mirror",
            "http://b/ipfs/",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(app.verbose, 1);
        assert_eq!(app.global.config, Some(PathBuf::from("custom.toml")));
        match app.cmd {
            Commands::Fetch(arg) => {
                assert_eq!(arg.author.as_deref(), Some("0xabc"));
                assert_eq!(arg.mirrors, vec!["http://a/ipfs/", "http://b/ipfs/"]);
                assert_eq!(arg.max_pages, None);
            }
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_verify_alias() {
        let app = App::try_parse_from(["portrait", "v", "bafkrei", "doc.json"]).unwrap();
        assert!(matches!(app.cmd, Commands::Verify(_)));
    }
}
