//! Milestone state enum.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// State of an imported milestone.
///
/// The remote platform reports `open`/`closed`; locally an open milestone is
/// stored as `active`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum MilestoneState {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "closed")]
    Closed,
}

impl std::fmt::Display for MilestoneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MilestoneState::Active => write!(f, "active"),
            MilestoneState::Closed => write!(f, "closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(MilestoneState::Active.to_string(), "active");
        assert_eq!(MilestoneState::Closed.to_string(), "closed");
    }
}
