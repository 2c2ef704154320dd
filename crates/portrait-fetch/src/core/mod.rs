//! Pure transformations for portrait retrieval.
//!
//! URL construction, index query encoding, page decoding and the pagination
//! decision. No I/O happens here, so every rule is testable without a
//! transport.

mod query;
mod validation;

pub use query::{PageError, decode_page, index_query, next_cursor};
pub use validation::{gateway_url, is_success, object_url};
