//! Book identifiers.
//!
//! Clients see a 24-character lowercase hex string; the store keeps the
//! 12-byte BSON `ObjectId` behind it. Both refer to the same value.

use mongodb::bson::oid::ObjectId;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Length of the external (hex) representation
pub const BOOK_ID_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(ObjectId);

impl BookId {
    /// Fresh identifier: 4-byte timestamp, 5-byte process-unique value, 3-byte counter.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Shape check applied to path parameters.
    ///
    /// Only the length is checked, so a 24-character string with non-hex
    /// characters passes here and is later reported as not found.
    pub fn is_well_formed(id: &str) -> bool {
        id.len() == BOOK_ID_LEN
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for BookId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<BookId> for ObjectId {
    fn from(id: BookId) -> Self {
        id.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl std::str::FromStr for BookId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| format!("Invalid book id: {}", s))
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Decode an optional id where `null`, `""` and an absent field all mean "no id".
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<BookId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}
