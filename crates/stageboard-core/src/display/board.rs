//! Board and stage list rendering.

use std::fmt;

use crate::{board::Board, models::Stage};

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.kind.label())?;

        if self.columns.is_empty() {
            writeln!(f)?;
            writeln!(f, "No {} stages yet.", self.kind.stage_type())?;
        }

        for column in &self.columns {
            writeln!(f)?;
            writeln!(f, "## {} ({})", column.stage.name, column.items.len())?;
            writeln!(f)?;
            if column.items.is_empty() {
                writeln!(f, "No items.")?;
            }
            for item in &column.items {
                item.fmt_card(f)?;
            }
        }

        if !self.unassigned.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Unassigned ({})", self.unassigned.len())?;
            writeln!(f)?;
            for item in &self.unassigned {
                item.fmt_card(f)?;
            }
        }

        Ok(())
    }
}

/// Newtype wrapper for displaying a list of stages.
pub struct Stages(pub Vec<Stage>);

impl Stages {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Stages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No stages found.");
        }
        for stage in &self.0 {
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}
