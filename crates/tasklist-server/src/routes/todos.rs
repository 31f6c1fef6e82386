use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tasklist_core::task::CreateTask;
use tasklist_db::DbError;
use tracing::{info, warn};

use super::AppState;

type ApiError = (StatusCode, Json<Value>);

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", delete(delete_todo))
        .route("/api/todos/{id}/toggle", put(toggle_todo))
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state
        .db
        .list_tasks()
        .await
        .map(|t| Json(json!(t)))
        .map_err(to_error)
}

async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<CreateTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Ok(Json(input)) = body else {
        return Err(title_required());
    };
    let title = input.validated_title().map_err(|_| title_required())?;
    let task = state
        .db
        .create_task(&CreateTask { title })
        .await
        .map_err(to_error)?;
    info!("created task {}", task.id);
    Ok((StatusCode::CREATED, Json(json!(task))))
}

async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state
        .db
        .toggle_task(id)
        .await
        .map(|t| Json(json!(t)))
        .map_err(to_error)
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state.db.delete_task(id).await.map_err(to_error)?;
    info!("deleted task {id}");
    Ok(Json(json!({ "message": "Deleted" })))
}

fn title_required() -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Title required" })),
    )
}

fn to_error(e: DbError) -> ApiError {
    match e {
        DbError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Not found" })),
        ),
        other => {
            warn!("database error: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": other.to_string() })),
            )
        }
    }
}
