//! Item model definition and stage placement.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{ItemKind, Priority, StageId};

/// Where an item currently sits on its board.
///
/// On the wire this is an optional stage id: `null` means unassigned. Keeping
/// the unassigned bucket as its own variant means no real stage id can ever
/// be mistaken for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<StageId>", into = "Option<StageId>")]
pub enum Placement {
    /// Item belongs to the given stage
    Assigned(StageId),

    /// Item has no stage
    #[default]
    Unassigned,
}

impl Placement {
    /// Shorthand for `Placement::Assigned(id.into())`.
    pub fn assigned(id: impl Into<StageId>) -> Self {
        Placement::Assigned(id.into())
    }

    /// The stage id, if assigned.
    pub fn stage_id(&self) -> Option<&StageId> {
        match self {
            Placement::Assigned(id) => Some(id),
            Placement::Unassigned => None,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, Placement::Unassigned)
    }
}

impl From<Option<StageId>> for Placement {
    fn from(value: Option<StageId>) -> Self {
        value.map_or(Placement::Unassigned, Placement::Assigned)
    }
}

impl From<Placement> for Option<StageId> {
    fn from(value: Placement) -> Self {
        match value {
            Placement::Assigned(id) => Some(id),
            Placement::Unassigned => None,
        }
    }
}

/// A task, incident or resource request: the draggable unit of a board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique identifier for the item
    pub id: u64,

    /// Project the item belongs to
    pub project_id: u64,

    /// Which board the item lives on
    pub kind: ItemKind,

    /// Card title
    pub title: String,

    /// People the item is assigned to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,

    /// Priority (severity for incidents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Due date, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,

    /// Current stage, serialized as `stage_id`
    #[serde(rename = "stage_id")]
    pub placement: Placement,

    /// Timestamp when the item was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the item was last updated (UTC)
    pub updated_at: Timestamp,
}
