//! Pure helpers for stage reordering.

use serde::{Deserialize, Serialize};

use crate::models::{StageId, StageOrder};

/// Which side of the target stage a dragged stage is inserted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertSide {
    Before,
    After,
}

impl InsertSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertSide::Before => "before",
            InsertSide::After => "after",
        }
    }

    /// Side picked from the pointer position over a target header.
    ///
    /// The left half of the header (strictly before the midpoint) means
    /// `Before`; the midpoint and everything right of it means `After`.
    ///
    /// ```rust
    /// use stageboard_core::board::InsertSide;
    ///
    /// assert_eq!(InsertSide::from_pointer(110.0, 100.0, 40.0), InsertSide::Before);
    /// assert_eq!(InsertSide::from_pointer(120.0, 100.0, 40.0), InsertSide::After);
    /// ```
    pub fn from_pointer(pointer_x: f64, left: f64, width: f64) -> Self {
        if pointer_x < left + width / 2.0 {
            InsertSide::Before
        } else {
            InsertSide::After
        }
    }
}

impl std::str::FromStr for InsertSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" | "left" => Ok(InsertSide::Before),
            "after" | "right" => Ok(InsertSide::After),
            _ => Err(format!("Invalid insert side: {s}")),
        }
    }
}

/// Moves `dragged` next to `target` in `ordered`.
///
/// The dragged stage is removed first and then inserted before or after the
/// target's position in the shortened list. Returns `None` when either id is
/// missing or both are the same stage.
pub fn move_stage(
    ordered: &[StageId],
    dragged: &StageId,
    target: &StageId,
    side: InsertSide,
) -> Option<Vec<StageId>> {
    if dragged == target || !ordered.contains(target) {
        return None;
    }

    let mut ids = ordered.to_vec();
    let from = ids.iter().position(|id| id == dragged)?;
    let moved = ids.remove(from);

    let target_index = ids.iter().position(|id| id == target)?;
    let insert_at = match side {
        InsertSide::Before => target_index,
        InsertSide::After => target_index + 1,
    };
    ids.insert(insert_at, moved);

    Some(ids)
}

/// Assigns every stage its zero-based list position as its order.
pub fn renumber(ordered: &[StageId]) -> Vec<StageOrder> {
    ordered
        .iter()
        .enumerate()
        .map(|(position, id)| StageOrder::new(id.clone(), position as u32))
        .collect()
}
