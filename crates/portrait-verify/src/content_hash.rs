use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use cid::Cid;
use cid::multihash::Multihash;

use crate::{Hasher, Result, Sha256Hasher, VerificationError};

/// Multicodec code for opaque bytes.
pub const RAW_CODEC: u64 = 0x55;

/// A content identifier as handed to us by the registry.
///
/// The text the caller supplied is kept verbatim, because gateways and the
/// archive index are addressed with it. Comparison ignores it: two hashes are
/// equal when their identifiers agree after normalising to CIDv1, so base32,
/// base58btc and upper-case renderings of one digest are the same value.
#[derive(Clone)]
pub struct ContentHash {
    text: String,
    cid:  Cid,
}

impl ContentHash {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let cid = Cid::try_from(trimmed).map_err(|e| VerificationError::InvalidHash {
            input:  input.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { text: trimmed.to_string(), cid })
    }

    /// Identifier of `bytes` under the fixed scheme: CIDv1, raw codec, sha2-256.
    pub fn of(bytes: &[u8]) -> Self {
        let cid = raw_sha256_cid(bytes);
        Self { text: cid.to_string(), cid }
    }

    pub fn as_str(&self) -> &str { &self.text }

    pub fn cid(&self) -> &Cid { &self.cid }

    /// Canonical (CIDv1, base32) rendering, independent of the input encoding.
    pub fn canonical(&self) -> String {
        match normalized(&self.cid) {
            Some(cid) => cid.to_string(),
            None => self.text.clone(),
        }
    }

    /// Returns `true` iff `bytes` hash to this identifier.
    pub fn verify(&self, bytes: &[u8]) -> bool { verify(self, bytes) }
}

/// Recomputes the identifier of `raw` and compares it with `expected`.
///
/// Any structural mismatch (other codec, other hash function, digest length)
/// is simply `false`.
pub fn verify(expected: &ContentHash, raw: &[u8]) -> bool {
    let Some(expected) = normalized(&expected.cid) else {
        return false;
    };
    if expected.codec() != RAW_CODEC || expected.hash().code() != Sha256Hasher::CODE {
        return false;
    }
    raw_sha256_cid(raw) == expected
}

/// Like [`verify`] but reports the identifier that was actually computed.
pub fn verify_strict(expected: &ContentHash, raw: &[u8]) -> Result<()> {
    if verify(expected, raw) {
        return Ok(());
    }
    Err(VerificationError::Mismatch {
        expected: expected.canonical(),
        actual:   raw_sha256_cid(raw).to_string(),
    })
}

fn raw_sha256_cid(bytes: &[u8]) -> Cid {
    let digest = Sha256Hasher::digest(bytes);
    // a 32 byte digest always fits the 64 byte multihash buffer
    match Multihash::<64>::wrap(Sha256Hasher::CODE, &digest) {
        Ok(mh) => Cid::new_v1(RAW_CODEC, mh),
        Err(_) => unreachable!("sha2-256 digest exceeds multihash capacity"),
    }
}

fn normalized(cid: &Cid) -> Option<Cid> { (*cid).into_v1().ok() }

impl PartialEq for ContentHash {
    fn eq(&self, other: &Self) -> bool {
        match (normalized(&self.cid), normalized(&other.cid)) {
            (Some(a), Some(b)) => a == b,
            _ => self.cid == other.cid,
        }
    }
}

impl Eq for ContentHash {}

impl Hash for ContentHash {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Hash::hash(&normalized(&self.cid).unwrap_or(self.cid), state);
    }
}

impl FromStr for ContentHash {
    type Err = VerificationError;

    fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.text) }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContentHash").field(&self.text).finish()
    }
}
