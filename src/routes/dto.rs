use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::planner::types::ImportanceMap;
use crate::planner::{PlannerSession, SessionSettings, StudyPlan};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
    pub subject: String,
    /// `None` for subjects deselected after generation or dropped in by hand.
    pub importance: Option<u8>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: NaiveDate,
    pub day_number: u32,
    pub label: String,
    pub subjects: Vec<SubjectView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    pub daily_capacity: u32,
    pub days: Vec<DayView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub subjects: Vec<SubjectView>,
    pub settings: SessionSettings,
    pub plan: Option<PlanView>,
}

impl PlanView {
    pub fn build(plan: &StudyPlan, importance: &ImportanceMap) -> Self {
        let days = plan
            .days
            .iter()
            .map(|day| DayView {
                date: day.date,
                day_number: day.day_number,
                label: day.display_label(),
                subjects: day
                    .subjects
                    .iter()
                    .map(|subject| SubjectView {
                        subject: subject.clone(),
                        importance: importance.get(subject).map(u8::from),
                    })
                    .collect(),
            })
            .collect();

        Self {
            daily_capacity: plan.daily_capacity,
            days,
        }
    }
}

impl SessionView {
    pub fn build(id: Uuid, session: &PlannerSession) -> Self {
        let importance = session.importance();
        Self {
            id,
            subjects: subject_views(importance),
            settings: *session.settings(),
            plan: session.plan().map(|plan| PlanView::build(plan, importance)),
        }
    }
}

pub fn subject_views(importance: &ImportanceMap) -> Vec<SubjectView> {
    importance
        .iter()
        .map(|(subject, rating)| SubjectView {
            subject: subject.to_string(),
            importance: Some(rating.into()),
        })
        .collect()
}
