use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Identified;

/// A physical location assets are assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Lightweight location embed carried by asset rows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LocationRef {
    pub id: i64,
    pub name: String,
}

impl Identified for Location {
    fn id(&self) -> i64 {
        self.id
    }
}
