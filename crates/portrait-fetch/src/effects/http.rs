use std::future::Future;

use bytes::Bytes;
use serde_json::Value;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Asynchronous HTTP client abstraction.
///
/// The minimal surface the fetchers need: a GET for gateway and archive
/// objects and a JSON POST for the archive index. Non-2xx responses are
/// returned as values; only transport failures are errors.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Transport error (DNS, connect, TLS, timeout, truncated body).
    type Error: std::error::Error + Send + Sync + 'static;

    /// GET `url` and collect the body.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;

    /// POST `body` as `application/json` to `url` and collect the response body.
    fn post_json(
        &self,
        url: &str,
        body: &Value,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::HttpOptions;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use reqwest::{Client, Proxy};

    #[derive(Debug, thiserror::Error)]
    pub enum ClientBuildError {
        #[error("invalid proxy URL {url}: {source}")]
        Proxy {
            url: String,
            #[source]
            source: reqwest::Error,
        },

        #[error("invalid header {name:?}")]
        Header { name: String },

        #[error("failed to build client: {0}")]
        Build(#[from] reqwest::Error),
    }

    /// Production HTTP client implementation using reqwest.
    #[derive(Clone, Debug)]
    pub struct ReqwestClient {
        client: Client,
    }

    impl ReqwestClient {
        /// Build a client from transport settings.
        pub fn new(options: &HttpOptions) -> Result<Self, ClientBuildError> {
            let mut cb = Client::builder()
                .timeout(options.timeout)
                .user_agent(options.user_agent.clone())
                .default_headers(header_map(&options.headers)?);

            let (secure, insecure): (Vec<_>, Vec<_>) =
                options.proxies.iter().partition(|u| u.scheme() == "https");

            for u in secure {
                cb = cb.proxy(Proxy::https(u.as_str()).map_err(|source| {
                    ClientBuildError::Proxy {
                        url: u.to_string(),
                        source,
                    }
                })?);
            }

            for u in insecure {
                cb = cb.proxy(Proxy::http(u.as_str()).map_err(|source| {
                    ClientBuildError::Proxy {
                        url: u.to_string(),
                        source,
                    }
                })?);
            }

            Ok(Self { client: cb.build()? })
        }

        /// Wrap an already configured reqwest client.
        pub fn from_client(client: Client) -> Self {
            Self { client }
        }
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, ClientBuildError> {
        let mut map = HeaderMap::new();
        for (key, value) in headers {
            let invalid = || ClientBuildError::Header { name: key.clone() };
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            map.append(name, value);
        }
        Ok(map)
    }

    async fn collect(response: reqwest::Response) -> Result<HttpResponse, reqwest::Error> {
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Ok(HttpResponse::new(status, Bytes::new()));
        }
        let body = response.bytes().await?;
        Ok(HttpResponse { status, body })
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(&self, url: &str) -> Result<HttpResponse, Self::Error> {
            let response = self.client.get(url).send().await?;
            collect(response).await
        }

        async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, Self::Error> {
            let response = self.client.post(url).json(body).send().await?;
            collect(response).await
        }
    }

}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientBuildError, ReqwestClient};
