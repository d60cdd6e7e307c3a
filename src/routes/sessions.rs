use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::extractors::{JsonBody, OptionalJsonBody};
use crate::planner::{MoveCapacityPolicy, PlannerSession};
use crate::response::{created, ok, AppError};
use crate::routes::dto::{subject_views, SessionView};
use crate::routes::plan;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_session).delete(delete_session))
        .route("/:id/subjects", post(add_subject))
        .route("/:id/subjects/:subject", delete(remove_subject))
        .route("/:id/subjects/:subject/importance", put(set_importance))
        .merge(plan::router())
}

pub(crate) fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found("session not found"))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CreateSessionRequest {
    seed: Option<u64>,
    enforce_capacity_on_move: Option<bool>,
}

async fn create_session(
    State(state): State<AppState>,
    OptionalJsonBody(req): OptionalJsonBody<CreateSessionRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut settings = state.config().planner.session_settings();
    if let Some(enforce) = req.enforce_capacity_on_move {
        settings.move_policy = if enforce {
            MoveCapacityPolicy::Enforce
        } else {
            MoveCapacityPolicy::Unbounded
        };
    }

    let session = match req.seed {
        Some(seed) => PlannerSession::with_seed(settings, seed),
        None => PlannerSession::new(settings),
    };
    let view_session = session.clone();
    let id = state.sessions().create(session).await?;

    Ok(created(SessionView::build(id, &view_session)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_session_id(&id)?;
    let shared = state.sessions().get(id).await?;
    let session = shared.lock().await;
    Ok(ok(SessionView::build(id, &session)))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_session_id(&id)?;
    state.sessions().remove(id).await?;
    Ok(ok(serde_json::json!({ "deleted": true })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddSubjectRequest {
    subject: String,
}

async fn add_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<AddSubjectRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_session_id(&id)?;
    let shared = state.sessions().get(id).await?;
    let mut session = shared.lock().await;

    let added = session.add_subject(&req.subject)?;
    tracing::debug!(session_id = %id, subject = %req.subject.trim(), added, "Subject selected");

    Ok(ok(serde_json::json!({
        "added": added,
        "subjects": subject_views(session.importance()),
    })))
}

async fn remove_subject(
    State(state): State<AppState>,
    Path((id, subject)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_session_id(&id)?;
    let shared = state.sessions().get(id).await?;
    let mut session = shared.lock().await;

    let removed = session.remove_subject(&subject);
    Ok(ok(serde_json::json!({
        "removed": removed,
        "subjects": subject_views(session.importance()),
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetImportanceRequest {
    rating: u8,
}

async fn set_importance(
    State(state): State<AppState>,
    Path((id, subject)): Path<(String, String)>,
    JsonBody(req): JsonBody<SetImportanceRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_session_id(&id)?;
    let shared = state.sessions().get(id).await?;
    let mut session = shared.lock().await;

    session.set_importance(&subject, req.rating)?;
    Ok(ok(serde_json::json!({
        "subjects": subject_views(session.importance()),
    })))
}
