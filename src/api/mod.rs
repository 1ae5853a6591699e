use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::patch;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::models::timestamp::parse_timestamp;
use crate::models::*;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoQueryParams {
    completed: Option<bool>,
    priority: Option<Priority>,
    due_before: Option<String>,
    due_after: Option<String>,
    search: Option<String>,
}

impl TodoQueryParams {
    fn into_filter(self) -> Result<TodoFilter, AppError> {
        Ok(TodoFilter {
            completed: self.completed,
            priority: self.priority,
            due_before: parse_bound("dueBefore", self.due_before)?,
            due_after: parse_bound("dueAfter", self.due_after)?,
            search: self.search,
        })
    }
}

fn parse_bound(
    name: &str,
    raw: Option<String>,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, AppError> {
    raw.map(|raw| {
        parse_timestamp(&raw)
            .ok_or_else(|| AppError::Validation(format!("{} is not a valid timestamp: {}", name, raw)))
    })
    .transpose()
}

/// Ids that don't parse can't exist, so they get the same 404 as a missing todo.
fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/{id}/complete", patch(toggle_complete))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn list_todos(
    State(state): State<AppState>,
    user: CurrentUser,
    params: Result<Query<TodoQueryParams>, QueryRejection>,
) -> Result<Json<Vec<TodoSummary>>, AppError> {
    let Query(params) = params?;
    let filter = params.into_filter()?;
    debug!(?filter, "listing todos");

    let todos = state.todos.list(&user.user_id, &filter).await;
    Ok(Json(todos.into_iter().map(TodoSummary::from).collect()))
}

async fn get_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<TodoDetail>, AppError> {
    let id = parse_id(&id)?;
    let todo = state
        .todos
        .find(id, &user.user_id)
        .await
        .ok_or(AppError::NotFound)?;
    Ok(Json(todo.into()))
}

async fn create_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let todo = state.todos.insert(&user.user_id, req).await;
    let location = format!("/todos/{}", todo.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TodoDetail::from(todo)),
    ))
}

async fn update_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<Json<TodoDetail>, AppError> {
    let Json(req) = payload?;
    req.validate()?;
    let id = parse_id(&id)?;

    let todo = state
        .todos
        .update(id, &user.user_id, req)
        .await
        .ok_or(AppError::NotFound)?;
    Ok(Json(todo.into()))
}

async fn delete_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    if state.todos.delete(id, &user.user_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn toggle_complete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<TodoDetail>, AppError> {
    let id = parse_id(&id)?;
    let todo = state
        .todos
        .toggle_complete(id, &user.user_id)
        .await
        .ok_or(AppError::NotFound)?;
    Ok(Json(todo.into()))
}
