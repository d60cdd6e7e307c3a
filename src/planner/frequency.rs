//! 频次分配：按重要度占比把总时段数摊到各科目

use serde::Serialize;

use crate::planner::types::ImportanceMap;
use crate::planner::PlannerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectFrequency {
    pub subject: String,
    pub frequency: u32,
}

/// `max(1, round(total_slots * weight / sum(weights)))` per subject, in map order.
///
/// The result is not renormalised: rounding and the floor of one may make the
/// sum drift away from `horizon_days * daily_capacity` in either direction.
pub fn allocate_frequencies(
    weights: &ImportanceMap,
    horizon_days: u32,
    daily_capacity: u32,
) -> Result<Vec<SubjectFrequency>, PlannerError> {
    if weights.is_empty() {
        return Err(PlannerError::invalid("no subjects selected"));
    }
    if horizon_days == 0 {
        return Err(PlannerError::invalid("horizon must be at least one day"));
    }
    if daily_capacity == 0 {
        return Err(PlannerError::invalid("daily capacity must be at least one"));
    }
    if let Some((subject, _)) = weights.iter().find(|(_, w)| w.weight() == 0) {
        return Err(PlannerError::invalid(format!(
            "subject '{subject}' has a non-positive weight"
        )));
    }

    let total_slots = f64::from(horizon_days) * f64::from(daily_capacity);
    let total_weight = f64::from(weights.total_weight());

    let frequencies = weights
        .iter()
        .map(|(subject, importance)| {
            let share = f64::from(importance.weight()) / total_weight;
            let raw = (share * total_slots).round();
            SubjectFrequency {
                subject: subject.to_string(),
                frequency: (raw as u32).max(1),
            }
        })
        .collect();

    Ok(frequencies)
}

/// Expands frequencies into the multiset each day draws from.
pub fn build_subject_pool(frequencies: &[SubjectFrequency]) -> Vec<String> {
    let capacity = frequencies.iter().map(|f| f.frequency as usize).sum();
    let mut pool = Vec::with_capacity(capacity);
    for entry in frequencies {
        pool.extend(std::iter::repeat(entry.subject.clone()).take(entry.frequency as usize));
    }
    pool
}
