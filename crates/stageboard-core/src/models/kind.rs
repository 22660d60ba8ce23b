//! Discriminator enumerations for stages and items.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of stage types.
///
/// A stage only ever partitions items of the matching [`ItemKind`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StageType {
    /// Columns of the task board
    #[default]
    Task,

    /// Columns of the incident board
    Incident,

    /// Columns of the resource request board
    Resource,
}

impl FromStr for StageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(StageType::Task),
            "incident" => Ok(StageType::Incident),
            "resource" | "resource_request" => Ok(StageType::Resource),
            _ => Err(format!("Invalid stage type: {s}")),
        }
    }
}

impl StageType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StageType::Task => "task",
            StageType::Incident => "incident",
            StageType::Resource => "resource",
        }
    }

    /// The item kind whose board this stage type partitions.
    pub fn item_kind(&self) -> ItemKind {
        match self {
            StageType::Task => ItemKind::Task,
            StageType::Incident => ItemKind::Incident,
            StageType::Resource => ItemKind::ResourceRequest,
        }
    }
}

/// Type-safe enumeration of the draggable item kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[default]
    Task,
    Incident,
    ResourceRequest,
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "task" => Ok(ItemKind::Task),
            "incident" => Ok(ItemKind::Incident),
            "resource" | "resource_request" | "resourcerequest" => Ok(ItemKind::ResourceRequest),
            _ => Err(format!("Invalid item kind: {s}")),
        }
    }
}

impl ItemKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Task => "task",
            ItemKind::Incident => "incident",
            ItemKind::ResourceRequest => "resource_request",
        }
    }

    /// Human readable, pluralised label used for board headings.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Task => "Tasks",
            ItemKind::Incident => "Incidents",
            ItemKind::ResourceRequest => "Resource Requests",
        }
    }

    /// The stage type whose columns hold items of this kind.
    pub fn stage_type(&self) -> StageType {
        match self {
            ItemKind::Task => StageType::Task,
            ItemKind::Incident => StageType::Incident,
            ItemKind::ResourceRequest => StageType::Resource,
        }
    }

    /// All kinds, in tab order.
    pub fn all() -> [ItemKind; 3] {
        [ItemKind::Task, ItemKind::Incident, ItemKind::ResourceRequest]
    }
}

/// Item priority; doubles as incident severity.
///
/// Variants are declared from least to most urgent so the derived `Ord`
/// sorts by urgency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "normal" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" | "urgent" => Ok(Priority::Critical),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    /// Priority with a leading marker for compact card display.
    ///
    /// ```rust
    /// use stageboard_core::models::Priority;
    ///
    /// assert_eq!(Priority::Critical.with_icon(), "‼ Critical");
    /// assert_eq!(Priority::Low.with_icon(), "↓ Low");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            Priority::Low => "↓ Low",
            Priority::Medium => "• Medium",
            Priority::High => "↑ High",
            Priority::Critical => "‼ Critical",
        }
    }
}
