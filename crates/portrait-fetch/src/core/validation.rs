use portrait_verify::ContentHash;

/// Returns `true` for 2xx status codes.
///
/// # Examples
///
/// ```
/// use portrait_fetch::core::is_success;
///
/// assert!(is_success(200));
/// assert!(is_success(204));
/// assert!(!is_success(304));
/// assert!(!is_success(404));
/// ```
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Gateway URL for `hash`: the mirror base with the hash text appended.
///
/// Mirror bases carry their own path prefix (`https://ipfs.io/ipfs/`), so no
/// separator is inserted.
pub fn gateway_url(mirror: &str, hash: &ContentHash) -> String {
    format!("{mirror}{hash}")
}

/// Object URL for an archive transaction, with exactly one `/` between base and id.
pub fn object_url(base: &str, id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id.trim_start_matches('/'))
}
