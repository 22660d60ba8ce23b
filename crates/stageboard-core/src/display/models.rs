//! Display implementations for domain models.
//!
//! Identifiers and enumerations render as their plain string form; stages
//! and items render as markdown blocks.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    board::InsertSide,
    models::{Item, ItemKind, Placement, Priority, Stage, StageId, StageType},
};

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for StageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InsertSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Assigned(id) => write!(f, "stage {id}"),
            Placement::Unassigned => f.write_str("unassigned"),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Type**: {}", self.stage_type)?;
        writeln!(f, "- **Order**: {}", self.order)?;
        writeln!(f, "- **Color**: {}", self.color)?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl Item {
    /// One-line card summary used inside board columns.
    pub(crate) fn fmt_card(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **#{}** {}", self.id, self.title)?;
        if let Some(priority) = self.priority {
            write!(f, " ({})", priority.with_icon())?;
        }
        if let Some(due) = self.due_date {
            write!(f, " · due {due}")?;
        }
        if !self.assignees.is_empty() {
            write!(f, " · @{}", self.assignees.join(" @"))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Kind: {}", self.kind)?;
        match &self.placement {
            Placement::Assigned(id) => writeln!(f, "- Stage: {id}")?,
            Placement::Unassigned => writeln!(f, "- Stage: none")?,
        }
        if let Some(priority) = self.priority {
            writeln!(f, "- Priority: {}", priority.with_icon())?;
        }
        if !self.assignees.is_empty() {
            writeln!(f, "- Assignees: {}", self.assignees.join(", "))?;
        }
        if let Some(due) = self.due_date {
            writeln!(f, "- Due: {due}")?;
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        Ok(())
    }
}
