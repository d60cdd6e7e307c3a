use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_PICK_ATTEMPTS, MAX_SUBJECTS_PER_SESSION};
use crate::planner::assigner::assign_days;
use crate::planner::frequency::{allocate_frequencies, build_subject_pool};
use crate::planner::plan::{MoveCapacityPolicy, MoveOutcome, StudyPlan};
use crate::planner::types::{Importance, ImportanceMap};
use crate::planner::PlannerError;
use crate::validation::normalize_subject_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    pub max_pick_attempts: u32,
    pub max_subjects: usize,
    pub move_policy: MoveCapacityPolicy,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_pick_attempts: MAX_PICK_ATTEMPTS,
            max_subjects: MAX_SUBJECTS_PER_SESSION,
            move_policy: MoveCapacityPolicy::Unbounded,
        }
    }
}

/// One planning context: selected subjects, their ratings, the current plan
/// and the random source used to generate it.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    importance: ImportanceMap,
    plan: Option<StudyPlan>,
    settings: SessionSettings,
    rng: StdRng,
}

impl PlannerSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    pub fn with_seed(settings: SessionSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(settings: SessionSettings, rng: StdRng) -> Self {
        Self {
            importance: ImportanceMap::new(),
            plan: None,
            settings,
            rng,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn importance(&self) -> &ImportanceMap {
        &self.importance
    }

    pub fn plan(&self) -> Option<&StudyPlan> {
        self.plan.as_ref()
    }

    /// Selects a subject with the default rating. Returns `false` if it was
    /// already selected. A new subject past `max_subjects` is rejected.
    pub fn add_subject(&mut self, subject: &str) -> Result<bool, PlannerError> {
        let name = normalize_subject_name(subject).map_err(PlannerError::invalid)?;
        if self.importance.contains(&name) {
            return Ok(false);
        }
        if self.importance.len() >= self.settings.max_subjects {
            return Err(PlannerError::InvalidInput(format!(
                "at most {} subjects can be selected",
                self.settings.max_subjects
            )));
        }
        Ok(self.importance.insert(&name, Importance::default()))
    }

    /// Deselects a subject. An existing plan is left as is.
    pub fn remove_subject(&mut self, subject: &str) -> bool {
        self.importance.remove(subject.trim()).is_some()
    }

    pub fn set_importance(&mut self, subject: &str, rating: u8) -> Result<(), PlannerError> {
        let importance = Importance::new(rating)?;
        self.importance.set(subject.trim(), importance)
    }

    /// Builds a fresh plan, discarding the previous one and its manual edits.
    /// On error the previous plan is kept.
    pub fn generate_plan(
        &mut self,
        start_date: NaiveDate,
        horizon_days: u32,
        daily_capacity: u32,
    ) -> Result<&StudyPlan, PlannerError> {
        let frequencies = allocate_frequencies(&self.importance, horizon_days, daily_capacity)?;
        let pool = build_subject_pool(&frequencies);
        let plan = assign_days(
            &pool,
            start_date,
            horizon_days,
            daily_capacity,
            self.settings.max_pick_attempts,
            &mut self.rng,
        )?;

        tracing::info!(
            subjects = self.importance.len(),
            horizon_days,
            daily_capacity,
            pool_size = pool.len(),
            "Study plan generated"
        );

        let plan = self.plan.insert(plan);
        Ok(&*plan)
    }

    pub fn move_plan_subject(
        &mut self,
        from_day: usize,
        to_day: usize,
        subject: &str,
    ) -> Result<MoveOutcome, PlannerError> {
        let policy = self.settings.move_policy;
        let plan = self
            .plan
            .as_mut()
            .ok_or_else(|| PlannerError::invalid("no plan has been generated"))?;
        plan.move_subject(from_day, to_day, subject, policy)
    }

    pub fn reset_plan(&mut self) {
        self.plan = None;
    }
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}
