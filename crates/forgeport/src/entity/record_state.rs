//! State enum shared by merge requests and issues.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an imported merge request or issue.
///
/// `Merged` only ever applies to merge requests; issues use `Opened` and
/// `Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum RecordState {
    #[sea_orm(string_value = "opened")]
    Opened,
    #[sea_orm(string_value = "closed")]
    Closed,
    #[sea_orm(string_value = "merged")]
    Merged,
}

impl RecordState {
    /// Whether the record is still open.
    pub fn is_open(self) -> bool {
        matches!(self, RecordState::Opened)
    }
}

impl std::fmt::Display for RecordState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordState::Opened => write!(f, "opened"),
            RecordState::Closed => write!(f, "closed"),
            RecordState::Merged => write!(f, "merged"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_open() {
        assert!(RecordState::Opened.is_open());
        assert!(!RecordState::Closed.is_open());
        assert!(!RecordState::Merged.is_open());
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordState::Opened.to_string(), "opened");
        assert_eq!(RecordState::Closed.to_string(), "closed");
        assert_eq!(RecordState::Merged.to_string(), "merged");
    }
}
