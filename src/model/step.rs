//! Flow step types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a flow step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Params,
    Select,
    Insert,
    Update,
    Delete,
    If,
    Else,
    Return,
}

impl StepType {
    /// Step type for an uppercase statement keyword.
    ///
    /// `BEGIN`, `END` and anything unknown map to `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "SELECT" => Some(StepType::Select),
            "INSERT" => Some(StepType::Insert),
            "UPDATE" => Some(StepType::Update),
            "DELETE" => Some(StepType::Delete),
            "IF" => Some(StepType::If),
            "ELSE" => Some(StepType::Else),
            "RETURN" => Some(StepType::Return),
            _ => None,
        }
    }

    /// Lowercase name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Params => "params",
            StepType::Select => "select",
            StepType::Insert => "insert",
            StepType::Update => "update",
            StepType::Delete => "delete",
            StepType::If => "if",
            StepType::Else => "else",
            StepType::Return => "return",
        }
    }

    /// Whether steps of this type touch tables (SELECT/INSERT/UPDATE/DELETE)
    pub fn references_tables(&self) -> bool {
        matches!(
            self,
            StepType::Select | StepType::Insert | StepType::Update | StepType::Delete
        )
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed unit of procedure logic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStep {
    /// `step_<n>`, unique and increasing in source order within one parse
    pub id: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    /// Keyword plus trailing SQL, or the comma-joined names for `params`
    pub content: String,
    /// Referenced tables, brackets stripped, first-seen order
    #[serde(default)]
    pub tables: Vec<String>,
    /// Following step; `None` on the last step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Vec<String>>,
}

impl FlowStep {
    pub fn new(id: impl Into<String>, step_type: StepType, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            step_type,
            content: content.into(),
            tables: Vec::new(),
            next: None,
        }
    }
}
