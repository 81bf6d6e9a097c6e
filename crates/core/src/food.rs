use serde::{Deserialize, Serialize};

/// Request payload for creating a food revue. The server validates the
/// fields; nothing is enforced client-side.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct FoodRecord {
    pub name: String,
    pub description: String,
    pub url: String,
}

impl FoodRecord {
    /// A well-formed record the server accepts.
    pub fn sample() -> Self {
        Self {
            name: "Test Food".to_string(),
            description: "Test Description".to_string(),
            url: String::new(),
        }
    }

    /// A degenerate record the server must reject with 400.
    pub fn invalid() -> Self {
        Self::default()
    }
}

/// A single field-level edit instruction. The edit endpoint takes an
/// ordered JSON array of these.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PatchOperation {
    pub path: String,
    pub op: PatchOp,
    pub value: String,
}

impl PatchOperation {
    pub fn replace(path: &str, value: &str) -> Self {
        Self {
            path: path.to_string(),
            op: PatchOp::Replace,
            value: value.to_string(),
        }
    }
}

/// Supported patch verbs (serialized as lowercase strings).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Replace,
}

impl PatchOp {
    pub fn as_str(&self) -> &'static str {
        match &self {
            PatchOp::Replace => "replace",
        }
    }
}

/// Server reply to a successful create.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedFood {
    #[serde(rename = "foodId")]
    pub food_id: String,
}
