//! Stage model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::StageType;

/// Opaque stage identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub String);

impl StageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A named, ordered column that partitions items of one kind within a
/// project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stage {
    /// Unique identifier for the stage
    pub id: StageId,

    /// Project the stage belongs to
    pub project_id: u64,

    /// Column heading
    pub name: String,

    /// Display color, usually a hex string such as `#4f46e5`
    pub color: String,

    /// Position within the stage type (0-indexed, contiguous)
    pub order: u32,

    /// Which board this stage belongs to
    pub stage_type: StageType,

    /// Timestamp when the stage was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the stage was last updated (UTC)
    pub updated_at: Timestamp,
}

/// A single `{stage_id, order}` pair sent to the backend when reordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOrder {
    pub stage_id: StageId,
    pub order: u32,
}

impl StageOrder {
    pub fn new(stage_id: StageId, order: u32) -> Self {
        Self { stage_id, order }
    }
}
