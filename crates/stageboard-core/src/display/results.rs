//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Item, Placement, Stage, StageType};

/// Wrapper type for displaying the result of create operations.
///
/// ```rust
/// use jiff::Timestamp;
/// use stageboard_core::{display::CreateResult, models::{Stage, StageType}};
///
/// let stage = Stage {
///     id: "task-1".into(),
///     project_id: 1,
///     name: "Backlog".to_string(),
///     color: "#6b7280".to_string(),
///     order: 0,
///     stage_type: StageType::Task,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(stage).to_string();
/// assert!(output.starts_with("Created task stage with ID: task-1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Stage> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created {} stage with ID: {}",
            self.resource.stage_type, self.resource.id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", self.resource.kind, self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// A stored item together with where it was before the move.
pub struct MoveResult {
    pub item: Item,
    pub from: Placement,
}

impl MoveResult {
    pub fn new(item: Item, from: Placement) -> Self {
        Self { item, from }
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Moved {} {} from {} to {}",
            self.item.kind, self.item.id, self.from, self.item.placement
        )?;
        writeln!(f)?;
        write!(f, "{}", self.item)
    }
}

/// Stages of one type after a reorder, in their new order.
pub struct ReorderResult {
    pub stage_type: StageType,
    pub stages: Vec<Stage>,
}

impl ReorderResult {
    pub fn new(stage_type: StageType, stages: Vec<Stage>) -> Self {
        Self { stage_type, stages }
    }
}

impl fmt::Display for ReorderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reordered {} {} stage(s):", self.stages.len(), self.stage_type)?;
        writeln!(f)?;
        for stage in &self.stages {
            writeln!(f, "{}. {} (`{}`)", stage.order, stage.name, stage.id)?;
        }
        Ok(())
    }
}
