//! Verified retrieval of content-addressed portraits.
//!
//! A portrait is a JSON document addressed by the CID of its bytes. It is
//! replicated on two mutually untrusted networks: IPFS, reached through a list
//! of interchangeable gateways, and Arweave, reached through a tag-filtered
//! GraphQL index. Both are raced; the first response that hashes to the
//! requested identifier wins and everything else is dropped.
//!
//! # Architecture
//!
//! - [`data`] - Immutable configuration and value types
//! - [`core`] - Pure transformations (URLs, index queries, pagination)
//! - [`effects`] - I/O behind the [`HttpClient`] trait, plus the races
//!
//! # Guarantees
//!
//! - A [`Document`] is only ever returned after its exact bytes verified
//! - A failing or lying source never fails the fetch while another may succeed
//! - Winning a race drops every sibling request; nothing is spawned

pub mod core;
pub mod data;
mod effects;
mod error;

pub use data::{
    ArchiveEndpoint, ArchiveTags, Candidate, Cursor, Document, HttpOptions, Origin, PAGE_SIZE,
    SearchFilter, SourceConfig, Tag,
};
pub use effects::{
    Cancellation, HttpClient, HttpResponse, PortraitFetcher, fetch_from_gateway,
    fetch_from_mirrors, fetch_portrait, first_success, search_archive,
};
pub use error::{ErrorKind, FetchError, Result, SourceError};
pub use portrait_verify::ContentHash;

#[cfg(feature = "reqwest")]
pub use effects::{ClientBuildError, ReqwestClient};
