//! 学习计划核心：重要度 → 频次分配 → 按天抽取 → 手动调整

pub mod assigner;
pub mod frequency;
pub mod horizon;
pub mod plan;
pub mod session;
pub mod types;

use thiserror::Error;

pub use plan::{DayPlan, MoveCapacityPolicy, MoveOutcome, StudyPlan};
pub use session::{PlannerSession, SessionSettings};
pub use types::{Importance, ImportanceMap};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("day index {index} out of bounds (plan has {len} days)")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("day {day} already holds {capacity} subjects")]
    CapacityExceeded { day: usize, capacity: u32 },
}

impl PlannerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
