//! I/O operations for portrait retrieval.
//!
//! Every suspension point of a fetch is an [`HttpClient`] call made from one
//! of these functions. Races are polled in place rather than spawned, so
//! dropping a race future stops all of its outstanding requests.

mod archive;
mod cancel;
mod gateway;
mod http;
mod mirrors;
mod portrait;
mod race;

pub use archive::search_archive;
pub use cancel::Cancellation;
pub use gateway::fetch_from_gateway;
pub use http::{HttpClient, HttpResponse};
pub use mirrors::fetch_from_mirrors;
pub use portrait::{PortraitFetcher, fetch_portrait};
pub use race::first_success;

#[cfg(feature = "reqwest")]
pub use http::{ClientBuildError, ReqwestClient};
