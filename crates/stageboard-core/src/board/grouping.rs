//! Grouping items into stage columns.

use std::{cmp::Reverse, collections::HashMap, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::{Item, ItemKind, Placement, Stage, StageId};

/// How items are ordered inside a single bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketOrder {
    /// Keep the order the items were fetched in
    #[default]
    Insertion,
    /// Earliest due date first, undated items last
    DueDate,
    /// Most urgent first, items without a priority last
    Priority,
}

impl FromStr for BucketOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "insertion" => Ok(BucketOrder::Insertion),
            "due_date" | "due-date" | "due" => Ok(BucketOrder::DueDate),
            "priority" => Ok(BucketOrder::Priority),
            _ => Err(format!("Invalid bucket order: {s}")),
        }
    }
}

impl BucketOrder {
    /// Sort a bucket in place. Every ordering is stable.
    fn apply(self, items: &mut [Item]) {
        match self {
            BucketOrder::Insertion => {}
            BucketOrder::DueDate => items.sort_by_key(|item| (item.due_date.is_none(), item.due_date)),
            BucketOrder::Priority => {
                items.sort_by_key(|item| (item.priority.is_none(), Reverse(item.priority)));
            }
        }
    }
}

/// One stage and the items currently placed in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub stage: Stage,
    pub items: Vec<Item>,
}

/// Items of one kind grouped by stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    /// Kind of item on this board
    pub kind: ItemKind,
    /// Columns in ascending stage order
    pub columns: Vec<Column>,
    /// Items without a known stage
    pub unassigned: Vec<Item>,
}

impl Board {
    /// Column for a stage id.
    pub fn column(&self, stage_id: &StageId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.stage.id == stage_id)
    }

    /// Items in the bucket a placement refers to. `None` when the placement
    /// names a stage that is not on this board.
    pub fn bucket(&self, placement: &Placement) -> Option<&[Item]> {
        match placement {
            Placement::Assigned(id) => self.column(id).map(|c| c.items.as_slice()),
            Placement::Unassigned => Some(&self.unassigned),
        }
    }

    /// Ids of the items in a bucket, in display order.
    pub fn item_ids(&self, placement: &Placement) -> Vec<u64> {
        self.bucket(placement)
            .map(|items| items.iter().map(|i| i.id).collect())
            .unwrap_or_default()
    }

    /// Stage ids in column order.
    pub fn stage_ids(&self) -> Vec<StageId> {
        self.columns.iter().map(|c| c.stage.id.clone()).collect()
    }

    /// Number of items across all buckets.
    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum::<usize>() + self.unassigned.len()
    }
}

/// Group `items` of `kind` into the columns formed by the matching stages.
///
/// Columns are created for every stage of `kind.stage_type()`, in ascending
/// `order`, before any item is looked at, so empty stages still get a column.
/// An item whose placement does not resolve to one of those stages lands in
/// the unassigned bucket. Items of other kinds are skipped.
///
/// ```rust
/// use stageboard_core::board::{group_by_stage, BucketOrder};
/// use stageboard_core::models::ItemKind;
///
/// let board = group_by_stage(&[], &[], ItemKind::Task, BucketOrder::Insertion);
/// assert!(board.columns.is_empty());
/// assert_eq!(board.total(), 0);
/// ```
pub fn group_by_stage(items: &[Item], stages: &[Stage], kind: ItemKind, order: BucketOrder) -> Board {
    let stage_type = kind.stage_type();

    let mut board_stages: Vec<&Stage> = stages.iter().filter(|s| s.stage_type == stage_type).collect();
    board_stages.sort_by_key(|s| s.order);

    let index: HashMap<&StageId, usize> = board_stages
        .iter()
        .enumerate()
        .map(|(position, stage)| (&stage.id, position))
        .collect();

    let mut columns: Vec<Column> = board_stages
        .iter()
        .map(|stage| Column {
            stage: (*stage).clone(),
            items: Vec::new(),
        })
        .collect();
    let mut unassigned = Vec::new();

    for item in items.iter().filter(|item| item.kind == kind) {
        match item.placement.stage_id().and_then(|id| index.get(id)) {
            Some(&position) => columns[position].items.push(item.clone()),
            None => unassigned.push(item.clone()),
        }
    }

    for column in &mut columns {
        order.apply(&mut column.items);
    }
    order.apply(&mut unassigned);

    Board {
        kind,
        columns,
        unassigned,
    }
}
