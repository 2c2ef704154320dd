//! Immutable data types for portrait retrieval.
//!
//! Configuration, search filters and fetched documents. Nothing here performs
//! I/O; values are built once per call and passed down by reference.

pub mod archive;
pub mod document;
pub mod options;
pub mod sources;

pub use archive::{Candidate, Cursor, PAGE_SIZE, SearchFilter, Tag};
pub use document::{Document, Origin};
pub use options::HttpOptions;
pub use sources::{ArchiveEndpoint, ArchiveTags, DEFAULT_MAX_PAGES, SourceConfig};
