//! Parameter structures for board operations
//!
//! These structures are shared by every interface (CLI today, an HTTP front
//! end tomorrow) and carry no framework-specific derives. Interface layers
//! define their own argument types and convert into these with `From`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │ BoardController │
//! │  (clap derives) │───▶│ (serde derives) │───▶│  / Backend      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BoardError, Result},
    models::{ItemKind, Placement, Priority, StageId, StageType},
};

/// Parameters for moving an item to another stage (or out of every stage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveItem {
    /// Board the item lives on
    pub kind: ItemKind,
    /// Item to move
    pub item_id: u64,
    /// Destination; `Unassigned` removes the item from its stage
    pub target: Placement,
}

/// Parameters for reordering the stages of one stage type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderStages {
    /// The stage type being reordered
    pub stage_type: StageType,
    /// Every stage of that type, in the desired order
    pub ordered: Vec<StageId>,
}

/// Parameters for creating a stage at the end of its stage type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStage {
    /// Project to add the stage to
    pub project_id: u64,
    /// Column heading (required)
    pub name: String,
    /// Stage type the column belongs to
    pub stage_type: StageType,
    /// Display color; a neutral grey is used when absent
    pub color: Option<String>,
}

/// Default stage color when none is given.
pub const DEFAULT_STAGE_COLOR: &str = "#6b7280";

impl CreateStage {
    /// Validate the stage parameters and return the trimmed name and the
    /// color to store.
    ///
    /// ```rust
    /// use stageboard_core::params::CreateStage;
    ///
    /// let params = CreateStage {
    ///     project_id: 1,
    ///     name: "  Review ".to_string(),
    ///     color: Some("#22c55e".to_string()),
    ///     ..Default::default()
    /// };
    /// let (name, color) = params.validate()?;
    /// assert_eq!(name, "Review");
    /// assert_eq!(color, "#22c55e");
    /// # Ok::<(), stageboard_core::BoardError>(())
    /// ```
    pub fn validate(&self) -> Result<(String, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(BoardError::invalid_input("name").with_reason("Stage name cannot be empty"));
        }

        let color = match &self.color {
            Some(color) => {
                let color = color.trim();
                if !is_hex_color(color) {
                    return Err(BoardError::invalid_input("color").with_reason(format!(
                        "Invalid color: {color}. Expected a hex value such as '#4f46e5'"
                    )));
                }
                color.to_string()
            }
            None => DEFAULT_STAGE_COLOR.to_string(),
        };

        Ok((name.to_string(), color))
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Parameters for creating an item on a board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateItem {
    /// Project to add the item to
    pub project_id: u64,
    /// Board the item lives on
    pub kind: ItemKind,
    /// Card title (required)
    pub title: String,
    /// Initial stage, unassigned when absent
    pub stage_id: Option<StageId>,
    /// Assignee names
    #[serde(default)]
    pub assignees: Vec<String>,
    /// Priority ('low', 'medium', 'high' or 'critical')
    pub priority: Option<String>,
    /// Due date as `YYYY-MM-DD`
    pub due_date: Option<String>,
}

/// Validated [`CreateItem`] fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedItem {
    pub title: String,
    pub assignees: Vec<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Date>,
}

impl CreateItem {
    /// Validate item parameters, parsing priority and due date.
    ///
    /// # Errors
    ///
    /// * `BoardError::InvalidInput` - When the title is blank
    /// * `BoardError::InvalidInput` - When priority or due date do not parse
    pub fn validate(&self) -> Result<ValidatedItem> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(BoardError::invalid_input("title").with_reason("Title cannot be empty"));
        }

        let priority = self
            .priority
            .as_deref()
            .map(|p| {
                Priority::from_str(p).map_err(|_| {
                    BoardError::invalid_input("priority").with_reason(format!(
                        "Invalid priority: {p}. Must be 'low', 'medium', 'high', or 'critical'"
                    ))
                })
            })
            .transpose()?;

        let due_date = self
            .due_date
            .as_deref()
            .map(|d| {
                d.parse::<Date>().map_err(|e| {
                    BoardError::invalid_input("due_date")
                        .with_reason(format!("Invalid date '{d}': {e}. Expected YYYY-MM-DD"))
                })
            })
            .transpose()?;

        let assignees = self
            .assignees
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(String::from)
            .collect();

        Ok(ValidatedItem {
            title: title.to_string(),
            assignees,
            priority,
            due_date,
        })
    }
}
