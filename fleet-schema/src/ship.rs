use serde::{Deserialize, Serialize};

/// A vessel as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub id: i64,
    pub name: String,
    pub displacement: i64,
}

/// Request body for creating or updating a vessel.
///
/// Updates only ever touch `name` and `displacement`; the server ignores
/// any other field it finds in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipDraft {
    pub name: String,
    pub displacement: i64,
}

impl Default for ShipDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            displacement: 51,
        }
    }
}
