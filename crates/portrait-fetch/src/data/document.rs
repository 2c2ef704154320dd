use std::fmt;

use bytes::Bytes;
use serde::de::DeserializeOwned;

/// Where a verified document was served from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// A gateway of the content-addressed network.
    Mirror { url: String },
    /// An archive transaction.
    Archive { transaction: String },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Mirror { url } => write!(f, "mirror {url}"),
            Origin::Archive { transaction } => write!(f, "archive transaction {transaction}"),
        }
    }
}

/// A JSON document whose bytes hashed to the requested identifier.
///
/// Only constructed after verification succeeded.
#[derive(Clone, Debug)]
pub struct Document {
    value: serde_json::Value,
    bytes: Bytes,
    origin: Origin,
}

impl Document {
    pub(crate) fn verified(value: serde_json::Value, bytes: Bytes, origin: Origin) -> Self {
        Self { value, bytes, origin }
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// The exact bytes that were verified.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn into_value(self) -> serde_json::Value {
        self.value
    }

    /// Deserialize the verified bytes into a typed structure.
    pub fn deserialize<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.bytes)
    }
}
