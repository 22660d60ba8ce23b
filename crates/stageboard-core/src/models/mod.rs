//! Data models for stages and items.
//!
//! This module contains the domain records a board works on. Display
//! implementations live in [`crate::display::models`] so presentation stays
//! out of the data definitions.
//!
//! # Overview
//!
//! - [`Stage`]: an ordered column of one [`StageType`] within a project
//! - [`Item`]: a task, incident or resource request placed in a stage
//! - [`Placement`]: either `Assigned(StageId)` or `Unassigned`
//! - [`StageOrder`]: the `{stage_id, order}` pair used when reordering
//!
//! Every item kind maps onto exactly one stage type, so a task can only be
//! placed in a task stage:
//!
//! ```rust
//! use stageboard_core::models::{ItemKind, StageType};
//!
//! assert_eq!(ItemKind::Task.stage_type(), StageType::Task);
//! assert_eq!(ItemKind::ResourceRequest.stage_type(), StageType::Resource);
//! assert_eq!(StageType::Incident.item_kind(), ItemKind::Incident);
//! ```

pub mod item;
pub mod kind;
pub mod stage;


pub use item::{Item, Placement};
pub use kind::{ItemKind, Priority, StageType};
pub use stage::{Stage, StageId, StageOrder};
