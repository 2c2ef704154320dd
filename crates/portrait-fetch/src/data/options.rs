use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Transport settings for the production HTTP client.
///
/// # Examples
///
/// ```
/// use portrait_fetch::HttpOptions;
/// use std::time::Duration;
///
/// let options = HttpOptions::default()
///     .timeout(Duration::from_secs(10))
///     .user_agent("portrait-tests/0.1")
///     .header("Authorization", "Bearer token");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpOptions {
    /// Proxies applied by scheme: `https` proxies for secure requests, any
    /// other scheme for plain ones.
    pub proxies: Vec<Url>,

    /// Per-request timeout, covering connect and body.
    ///
    /// Default: 30s
    #[serde(rename = "timeout_secs", with = "secs")]
    pub timeout: Duration,

    /// Default: `portrait/<version>`
    pub user_agent: String,

    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            proxies: Vec::new(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("portrait/", env!("CARGO_PKG_VERSION")).to_string(),
            headers: Vec::new(),
        }
    }
}

impl HttpOptions {
    #[must_use]
    pub fn proxy(mut self, proxy: Url) -> Self {
        self.proxies.push(proxy);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = HttpOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert!(options.user_agent.starts_with("portrait/"));
        assert!(options.proxies.is_empty());
    }

    #[test]
    fn test_deserialize_secs() {
        let options: HttpOptions = serde_json::from_str(
            r#"{"timeout_secs": 5, "proxies": ["http://proxy.local:3128"]}"#,
        )
        .unwrap();
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.proxies[0].host_str(), Some("proxy.local"));
        assert!(options.headers.is_empty());
    }
}
