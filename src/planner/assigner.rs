//! 按天分配：每天从完整科目池的副本中无放回抽取，不保证各科均匀

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::planner::plan::{DayPlan, StudyPlan};
use crate::planner::PlannerError;

/// Draws a random index into `pool` whose subject is not already in `chosen`.
///
/// Gives up after `max_attempts` draws so a pool dominated by one subject
/// cannot stall generation; the caller then leaves the slot empty.
pub fn pick_distinct<R: Rng>(
    pool: &[String],
    chosen: &[String],
    max_attempts: u32,
    rng: &mut R,
) -> Option<usize> {
    if pool.is_empty() {
        return None;
    }
    (0..max_attempts.max(1))
        .map(|_| rng.gen_range(0..pool.len()))
        .find(|&idx| !chosen.contains(&pool[idx]))
}

pub fn assign_days<R: Rng>(
    pool: &[String],
    start_date: NaiveDate,
    horizon_days: u32,
    daily_capacity: u32,
    max_attempts: u32,
    rng: &mut R,
) -> Result<StudyPlan, PlannerError> {
    if horizon_days == 0 {
        return Err(PlannerError::invalid("horizon must be at least one day"));
    }
    if daily_capacity == 0 {
        return Err(PlannerError::invalid("daily capacity must be at least one"));
    }
    let last_offset = Days::new(u64::from(horizon_days - 1));
    if start_date.checked_add_days(last_offset).is_none() {
        return Err(PlannerError::invalid("plan would run past the last representable date"));
    }

    let mut days = Vec::with_capacity(horizon_days as usize);
    for day in 0..horizon_days {
        let date = start_date + Days::new(u64::from(day));
        let subjects = fill_day(pool, daily_capacity, max_attempts, rng);
        days.push(DayPlan {
            date,
            day_number: day + 1,
            subjects,
        });
    }

    tracing::debug!(
        horizon_days,
        daily_capacity,
        pool_size = pool.len(),
        "Assigned subjects to days"
    );

    Ok(StudyPlan {
        daily_capacity,
        days,
    })
}

fn fill_day<R: Rng>(
    pool: &[String],
    daily_capacity: u32,
    max_attempts: u32,
    rng: &mut R,
) -> Vec<String> {
    // 每天都从完整池子重新开始：跨天重复是预期行为，只禁止同一天重复
    let mut remaining = pool.to_vec();
    let mut subjects: Vec<String> = Vec::with_capacity(daily_capacity as usize);

    for _ in 0..daily_capacity {
        if remaining.is_empty() {
            break;
        }
        if let Some(idx) = pick_distinct(&remaining, &subjects, max_attempts, rng) {
            subjects.push(remaining.swap_remove(idx));
        }
    }
    subjects
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn pool(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pick_distinct_returns_none_when_only_duplicates_remain() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = pool(&["Math", "Math"]);
        let chosen = pool(&["Math"]);
        assert_eq!(pick_distinct(&p, &chosen, 10, &mut rng), None);
        assert_eq!(pick_distinct(&[], &[], 10, &mut rng), None);
    }

    #[test]
    fn pick_distinct_finds_the_only_fresh_subject() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = pool(&["Art"]);
        assert_eq!(pick_distinct(&p, &[], 1, &mut rng), Some(0));
    }

    #[test]
    fn plan_has_one_entry_per_day_with_consecutive_dates() {
        let mut rng = StdRng::seed_from_u64(42);
        let p = pool(&["Math", "Math", "Art", "History"]);
        let plan = assign_days(&p, start(), 5, 2, 10, &mut rng).unwrap();

        assert_eq!(plan.len(), 5);
        for (i, day) in plan.days.iter().enumerate() {
            assert_eq!(day.day_number, i as u32 + 1);
            assert_eq!(day.date, start() + Days::new(i as u64));
            assert!(day.subjects.len() <= 2);
        }
    }

    #[test]
    fn no_day_repeats_a_subject() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = pool(&["Math", "Math", "Math", "Math", "Art", "Art", "Music"]);
        let plan = assign_days(&p, start(), 30, 3, 10, &mut rng).unwrap();
        for day in &plan.days {
            let mut seen = day.subjects.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), day.subjects.len());
        }
    }

    #[test]
    fn single_subject_pool_yields_one_subject_per_day() {
        let mut rng = StdRng::seed_from_u64(9);
        let p = pool(&["Math", "Math", "Math"]);
        let plan = assign_days(&p, start(), 3, 3, 10, &mut rng).unwrap();
        for day in &plan.days {
            assert_eq!(day.subjects, vec!["Math"]);
        }
    }

    #[test]
    fn empty_pool_yields_empty_days() {
        let mut rng = StdRng::seed_from_u64(0);
        let plan = assign_days(&[], start(), 3, 2, 10, &mut rng).unwrap();
        assert_eq!(plan.len(), 3);
        assert!(plan.days.iter().all(|d| d.subjects.is_empty()));
    }

    #[test]
    fn same_seed_reproduces_plan() {
        let p = pool(&["Math", "Math", "Art", "History", "Music"]);
        let a = assign_days(&p, start(), 7, 3, 10, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = assign_days(&p, start(), 7, 3, 10, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_zero_horizon_or_capacity() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            assign_days(&[], start(), 0, 2, 10, &mut rng),
            Err(PlannerError::InvalidInput(_))
        ));
        assert!(matches!(
            assign_days(&[], start(), 2, 0, 10, &mut rng),
            Err(PlannerError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_date_overflow() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(assign_days(&[], NaiveDate::MAX, 2, 1, 10, &mut rng).is_err());
    }
}
