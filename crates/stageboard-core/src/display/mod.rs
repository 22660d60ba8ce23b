//! Markdown rendering for boards, records and operation results.
//!
//! Domain records implement `Display` directly; boards, stage lists and
//! operation outcomes get wrapper types. Everything renders as markdown so
//! a terminal front end can style it and tests can match on plain text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Board & Result  │    │    Markdown     │
//! │ (Stage, Item)   │───▶│    Wrappers     │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`board`]: [`crate::board::Board`] and the [`Stages`] list
//! - [`results`]: [`CreateResult`], [`MoveResult`], [`ReorderResult`]
//! - [`status`]: rendering of [`crate::board::Notification`]
//! - [`datetime`]: local time formatting
//! - [`models`]: display implementations for domain models
//!
//! ```rust
//! use stageboard_core::board::Notification;
//!
//! let failure = Notification::error("Stage is locked");
//! assert_eq!(failure.to_string(), "Error: Stage is locked\n");
//! ```

pub mod board;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use board::Stages;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, MoveResult, ReorderResult};
