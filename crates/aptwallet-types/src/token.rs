//! Token (v1) identifiers as they appear in token store events and table keys.

use serde::{Deserialize, Serialize};

/// Identifies a token definition: creator, collection and token name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDataId {
    pub creator: String,
    pub collection: String,
    pub name: String,
}

/// Identifies a token position: a token definition at a property version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId {
    pub token_data_id: TokenDataId,
    /// u64 rendered as a decimal string, as the node does.
    pub property_version: String,
}

impl TokenId {
    pub fn new(creator: &str, collection: &str, name: &str, property_version: u64) -> Self {
        Self {
            token_data_id: TokenDataId {
                creator: creator.to_string(),
                collection: collection.to_string(),
                name: name.to_string(),
            },
            property_version: property_version.to_string(),
        }
    }

    /// Deterministic compact JSON form used as a map key.
    ///
    /// Field order is fixed (`token_data_id{creator,collection,name}`,
    /// `property_version`), so two identifiers share a key iff all four parts
    /// are equal.
    pub fn canonical_key(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
