//! Subcommands and their argument wrappers
//!
//! Each wrapper carries the clap attributes for one command and converts into
//! the matching core parameter type, so the core stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → BoardController / Store
//! ```
//!
//! Commands that need the global `--project` value take it in
//! `into_params`; the rest convert with `From`.

use clap::{Args, Subcommand};
use stageboard_core::{
    board::{BucketOrder, InsertSide},
    models::{ItemKind, StageId, StageType},
    params::{CreateItem, CreateStage, MoveItem, ReorderStages},
};

/// Show a board
#[derive(Args, Default)]
pub struct BoardArgs {
    /// Which board to show: task, incident or resource
    #[arg(short, long, default_value = "task")]
    pub kind: ItemKind,
    /// Ordering inside each column: insertion, due-date or priority
    #[arg(short, long, default_value = "insertion")]
    pub order: BucketOrder,
    /// Print the grouped board as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

/// Stage management commands
#[derive(Subcommand)]
pub enum StageCommands {
    /// Add a stage at the end of its board
    Add(AddStageArgs),
    /// List stages in board order
    #[command(alias = "ls")]
    List(ListStagesArgs),
    /// Put every stage of a board in the given order
    Reorder(ReorderStagesArgs),
    /// Drop a stage on one side of another stage's header
    Drag(DragStageArgs),
}

/// Item management commands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add an item to a board
    Add(AddItemArgs),
    /// Move an item to another stage
    #[command(alias = "mv")]
    Move(MoveItemArgs),
}

/// Add a stage
#[derive(Args)]
pub struct AddStageArgs {
    /// Column heading
    pub name: String,
    /// Board the stage belongs to: task, incident or resource
    #[arg(short = 't', long = "type", default_value = "task")]
    pub stage_type: StageType,
    /// Hex color such as '#4f46e5'
    #[arg(short, long)]
    pub color: Option<String>,
}

impl AddStageArgs {
    pub fn into_params(self, project_id: u64) -> CreateStage {
        CreateStage {
            project_id,
            name: self.name,
            stage_type: self.stage_type,
            color: self.color,
        }
    }
}

/// List stages
#[derive(Args)]
pub struct ListStagesArgs {
    /// Only list stages of this type
    #[arg(short = 't', long = "type")]
    pub stage_type: Option<StageType>,
}

/// Reorder stages
#[derive(Args)]
pub struct ReorderStagesArgs {
    /// Every stage ID of the board, in the new order
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
    /// Board being reordered: task, incident or resource
    #[arg(short = 't', long = "type", default_value = "task")]
    pub stage_type: StageType,
}

impl From<ReorderStagesArgs> for ReorderStages {
    fn from(val: ReorderStagesArgs) -> Self {
        ReorderStages {
            stage_type: val.stage_type,
            ordered: val.ids.into_iter().map(StageId::from).collect(),
        }
    }
}

/// Drag a stage header
#[derive(Args)]
pub struct DragStageArgs {
    /// Stage being dragged
    pub id: String,
    /// Stage whose header it is dropped on
    #[arg(long)]
    pub over: String,
    /// Side of the target header: before or after
    #[arg(long, default_value = "before")]
    pub side: InsertSide,
}

/// Add an item
#[derive(Args)]
pub struct AddItemArgs {
    /// Card title
    pub title: String,
    /// Board the item lives on: task, incident or resource
    #[arg(short, long, default_value = "task")]
    pub kind: ItemKind,
    /// Initial stage ID
    #[arg(short, long)]
    pub stage: Option<String>,
    /// Priority: low, medium, high or critical
    #[arg(short, long)]
    pub priority: Option<String>,
    /// Comma-separated assignee names
    #[arg(short, long, value_delimiter = ',')]
    pub assignee: Vec<String>,
    /// Due date as YYYY-MM-DD
    #[arg(short, long)]
    pub due: Option<String>,
}

impl AddItemArgs {
    pub fn into_params(self, project_id: u64) -> CreateItem {
        CreateItem {
            project_id,
            kind: self.kind,
            title: self.title,
            stage_id: self.stage.map(StageId::from),
            assignees: self.assignee,
            priority: self.priority,
            due_date: self.due,
        }
    }
}

/// Move an item
#[derive(Args)]
pub struct MoveItemArgs {
    /// Item ID
    pub id: u64,
    /// Board the item lives on: task, incident or resource
    #[arg(short, long, default_value = "task")]
    pub kind: ItemKind,
    /// Destination stage ID
    #[arg(long, required_unless_present = "unassign", conflicts_with = "unassign")]
    pub to: Option<String>,
    /// Take the item out of every stage
    #[arg(long)]
    pub unassign: bool,
}

impl From<MoveItemArgs> for MoveItem {
    fn from(val: MoveItemArgs) -> Self {
        MoveItem {
            kind: val.kind,
            item_id: val.id,
            target: val.to.map(StageId::from).into(),
        }
    }
}
