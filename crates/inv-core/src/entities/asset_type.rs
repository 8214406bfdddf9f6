use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Identified;

/// An asset category (computers, furniture, equipment, ...).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssetType {
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Lightweight type embed carried by asset rows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TypeRef {
    pub id: i64,
    pub name: String,
    pub category: String,
}

impl Identified for AssetType {
    fn id(&self) -> i64 {
        self.id
    }
}
