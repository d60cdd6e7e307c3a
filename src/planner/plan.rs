use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::planner::PlannerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub date: NaiveDate,
    pub day_number: u32,
    pub subjects: Vec<String>,
}

impl DayPlan {
    pub fn contains(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// e.g. `Oct 15 (Thu)`
    pub fn display_label(&self) -> String {
        self.date.format("%b %-d (%a)").to_string()
    }
}

/// Whether a manual move may grow a day past the capacity the plan was generated with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCapacityPolicy {
    #[default]
    Unbounded,
    Enforce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub removed: bool,
    pub added: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub daily_capacity: u32,
    pub days: Vec<DayPlan>,
}

impl StudyPlan {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, index: usize) -> Option<&DayPlan> {
        self.days.get(index)
    }

    /// Moves `subject` from day `from` to day `to` (0-based indices).
    ///
    /// A subject missing from the source day is simply not removed, and one
    /// already on the target day is not added twice. Nothing is mutated when
    /// the call fails.
    pub fn move_subject(
        &mut self,
        from: usize,
        to: usize,
        subject: &str,
        policy: MoveCapacityPolicy,
    ) -> Result<MoveOutcome, PlannerError> {
        self.check_index(from)?;
        self.check_index(to)?;

        if from == to {
            return Ok(MoveOutcome {
                removed: false,
                added: false,
            });
        }

        let already_there = self.days[to].contains(subject);
        if !already_there
            && policy == MoveCapacityPolicy::Enforce
            && self.days[to].subjects.len() >= self.daily_capacity as usize
        {
            return Err(PlannerError::CapacityExceeded {
                day: to,
                capacity: self.daily_capacity,
            });
        }

        let source = &mut self.days[from].subjects;
        let before = source.len();
        source.retain(|s| s != subject);
        let removed = source.len() != before;

        if !already_there {
            self.days[to].subjects.push(subject.to_string());
        }

        Ok(MoveOutcome {
            removed,
            added: !already_there,
        })
    }

    fn check_index(&self, index: usize) -> Result<(), PlannerError> {
        if index >= self.days.len() {
            return Err(PlannerError::IndexOutOfBounds {
                index,
                len: self.days.len(),
            });
        }
        Ok(())
    }
}
