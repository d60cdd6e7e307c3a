use chrono::NaiveDate;

/// Whole days from `start` until `exam`; `None` when the exam is not after `start`.
pub fn horizon_days(start: NaiveDate, exam: NaiveDate) -> Option<u32> {
    let days = exam.signed_duration_since(start).num_days();
    if days <= 0 {
        return None;
    }
    u32::try_from(days).ok()
}
