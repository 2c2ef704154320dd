//! Content identifiers and integrity verification for fetched portraits.
//!
//! A portrait is addressed by the CID of its exact bytes. Whatever source
//! served those bytes, they are only trusted once [`verify`] recomputes the
//! identifier and finds it equal to the one requested.
//!
//! # Example
//!
//! ```
//! use portrait_verify::ContentHash;
//!
//! let body = br#"{"a":1}"#;
//! let hash: ContentHash = "bafkreiablk6x6xgfpiw5ss3vsdyevwaiijzzaxxdh3c45pvomitwvf7ymi"
//!     .parse()
//!     .unwrap();
//!
//! assert!(hash.verify(body));
//! assert!(!hash.verify(br#"{"a":2}"#));
//! ```

pub use self::content_hash::{ContentHash, RAW_CODEC, verify, verify_strict};
pub use self::error::{Result, VerificationError};
pub use self::hasher::{Hasher, Sha256Hasher};

mod content_hash;
mod error;
mod hasher;
