use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use portrait_verify::{ContentHash, VerificationError, verify_strict};

#[derive(Clone, Debug, Args)]
pub struct HashArg {
    /// File to hash
    pub file: PathBuf,
}

impl HashArg {
    pub fn run(&self) -> anyhow::Result<ExitCode> {
        println!("{}", hash_file(&self.file)?);
        Ok(ExitCode::SUCCESS)
    }
}

#[derive(Clone, Debug, Args)]
pub struct VerifyArg {
    /// Expected content hash (CID)
    pub hash: String,

    /// File to check
    pub file: PathBuf,
}

impl VerifyArg {
    pub fn run(&self) -> anyhow::Result<ExitCode> {
        self.status().map(ExitCode::from)
    }

    /// 0 when the file verifies, 1 when it hashes to something else.
    fn status(&self) -> anyhow::Result<u8> {
        match self.check()? {
            None => {
                println!("{}: ok", self.file.display());
                Ok(0)
            }
            Some(actual) => {
                eprintln!("{}: hashes to {actual}, not {}", self.file.display(), self.hash.trim());
                Ok(1)
            }
        }
    }

    /// `None` if the file verifies, otherwise the identifier it actually has.
    fn check(&self) -> anyhow::Result<Option<String>> {
        let expected = ContentHash::parse(&self.hash)?;
        match verify_strict(&expected, &read(&self.file)?) {
            Ok(()) => Ok(None),
            Err(VerificationError::Mismatch { actual, .. }) => Ok(Some(actual)),
            Err(e) => Err(e.into()),
        }
    }
}

fn hash_file(path: &Path) -> anyhow::Result<ContentHash> {
    Ok(ContentHash::of(&read(path)?))
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
