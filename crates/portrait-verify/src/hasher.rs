use sha2::Digest;

/// Incremental digest over bytes arriving in chunks.
pub trait Hasher: Send {
    /// Multihash code of the produced digest.
    const CODE: u64;

    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;

    /// Digest of `data` in one call.
    fn digest(data: &[u8]) -> Vec<u8>
    where
        Self: Default + Sized,
    {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }
}

pub struct Sha256Hasher(sha2::Sha256);

impl Hasher for Sha256Hasher {
    const CODE: u64 = 0x12;

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self) -> Vec<u8> {
        Digest::finalize(self.0).to_vec()
    }
}

impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256Hasher {
    pub fn new() -> Self {
        Self(sha2::Sha256::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_WORLD: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_sha256_hasher() {
        let mut hasher = Sha256Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        let hash = hasher.finalize();

        assert_eq!(hash, hex::decode(HELLO_WORLD).unwrap());
    }

    #[test]
    fn test_one_shot_matches_chunked() {
        let data = vec![0x5au8; 10_000];
        let mut hasher = Sha256Hasher::new();
        for chunk in data.chunks(333) {
            hasher.update(chunk);
        }
        assert_eq!(Sha256Hasher::digest(&data), hasher.finalize());
        assert_eq!(Sha256Hasher::digest(b"hello world"), hex::decode(HELLO_WORLD).unwrap());
    }
}
