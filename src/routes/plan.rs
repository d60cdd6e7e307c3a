use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::extractors::{JsonBody, QueryParams};
use crate::planner::horizon::horizon_days;
use crate::response::{ok, AppError};
use crate::routes::dto::PlanView;
use crate::routes::sessions::parse_session_id;
use crate::state::AppState;
use crate::validation::{validate_daily_capacity, validate_horizon_days};

/// Plan routes, mounted next to the session routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/:id/plan",
            get(get_plan).post(generate_plan).delete(reset_plan),
        )
        .route("/:id/plan/moves", post(move_subject))
}

/// `GET /api/horizon?startDate=&examDate=`
pub fn horizon_router() -> Router<AppState> {
    Router::new().route("/", get(get_horizon))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratePlanRequest {
    start_date: Option<NaiveDate>,
    exam_date: Option<NaiveDate>,
    horizon_days: Option<u32>,
    daily_capacity: Option<u32>,
}

async fn generate_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<GeneratePlanRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_session_id(&id)?;
    let planner_cfg = &state.config().planner;

    let start_date = req.start_date.unwrap_or_else(|| Utc::now().date_naive());
    let horizon = match (req.horizon_days, req.exam_date) {
        (Some(days), _) => days,
        (None, Some(exam)) => horizon_days(start_date, exam).ok_or_else(|| {
            AppError::bad_request("VALIDATION_ERROR", "examDate must be after startDate")
        })?,
        (None, None) => {
            return Err(AppError::bad_request(
                "VALIDATION_ERROR",
                "either horizonDays or examDate is required",
            ))
        }
    };
    let daily_capacity = req
        .daily_capacity
        .unwrap_or(planner_cfg.default_daily_subjects);

    validate_horizon_days(horizon, planner_cfg.max_horizon_days)
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", &msg))?;
    validate_daily_capacity(daily_capacity, planner_cfg.max_daily_subjects)
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", &msg))?;

    let shared = state.sessions().get(id).await?;
    let mut session = shared.lock().await;
    session.generate_plan(start_date, horizon, daily_capacity)?;

    let view = session
        .plan()
        .map(|plan| PlanView::build(plan, session.importance()))
        .ok_or_else(|| AppError::internal("plan missing right after generation"))?;
    tracing::info!(session_id = %id, horizon, daily_capacity, "Plan generated for session");

    Ok(ok(view))
}

async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_session_id(&id)?;
    let shared = state.sessions().get(id).await?;
    let session = shared.lock().await;

    let view = session
        .plan()
        .map(|plan| PlanView::build(plan, session.importance()))
        .ok_or_else(|| AppError::not_found("no plan has been generated"))?;
    Ok(ok(view))
}

async fn reset_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_session_id(&id)?;
    let shared = state.sessions().get(id).await?;
    shared.lock().await.reset_plan();
    Ok(ok(serde_json::json!({ "reset": true })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveSubjectRequest {
    from_day: usize,
    to_day: usize,
    subject: String,
}

async fn move_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<MoveSubjectRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_session_id(&id)?;
    let shared = state.sessions().get(id).await?;
    let mut session = shared.lock().await;

    let outcome = session.move_plan_subject(req.from_day, req.to_day, &req.subject)?;
    tracing::debug!(
        session_id = %id,
        from_day = req.from_day,
        to_day = req.to_day,
        subject = %req.subject,
        removed = outcome.removed,
        added = outcome.added,
        "Subject moved"
    );

    let plan = session
        .plan()
        .map(|plan| PlanView::build(plan, session.importance()));
    Ok(ok(serde_json::json!({
        "outcome": outcome,
        "plan": plan,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HorizonQuery {
    start_date: Option<NaiveDate>,
    exam_date: NaiveDate,
}

async fn get_horizon(
    QueryParams(query): QueryParams<HorizonQuery>,
) -> impl axum::response::IntoResponse {
    let start = query.start_date.unwrap_or_else(|| Utc::now().date_naive());
    ok(serde_json::json!({
        "startDate": start,
        "examDate": query.exam_date,
        "daysLeft": horizon_days(start, query.exam_date),
    }))
}
