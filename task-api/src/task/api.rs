use crate::task::{Task, TaskPayload, TaskState, TaskStoreError};
use crate::web::api::ErrorResponse;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

/// Error type for task handler operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskApiError {
    /// The requested task does not exist.
    #[error("Task with ID {0} not found")]
    NotFound(i64),
    /// The store failed while serving the request.
    #[error("Task store error")]
    Store(#[from] TaskStoreError),
}

impl IntoResponse for TaskApiError {
    fn into_response(self) -> Response {
        match self {
            TaskApiError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            TaskApiError::Store(err) => {
                tracing::error!("Task store failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(
                        "INTERNAL_ERROR",
                        "An unexpected error occurred while processing your request",
                    )),
                )
                    .into_response()
            }
        }
    }
}

/// Handler for GET /api/tasks - Returns every task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = [Task]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn list_tasks_handler(
    State(state): State<TaskState>,
) -> Result<Json<Vec<Task>>, TaskApiError> {
    let tasks = state.store.list().await?;
    Ok(Json(tasks))
}

/// Handler for POST /api/tasks - Creates a task with a fresh ID.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = TaskPayload,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<TaskState>,
    Json(payload): Json<TaskPayload>,
) -> Result<(StatusCode, Json<Task>), TaskApiError> {
    let task = state.store.create(payload).await?;
    tracing::info!("Created task with ID {}", task.id);
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for GET /api/tasks/{id} - Returns a single task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(
        ("id" = i64, Path, description = "ID of the task")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, TaskApiError> {
    let task = state
        .store
        .get(id)
        .await?
        .ok_or(TaskApiError::NotFound(id))?;
    Ok(Json(task))
}

/// Handler for PUT /api/tasks/{id} - Replaces title, description and completed.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(
        ("id" = i64, Path, description = "ID of the task")
    ),
    request_body = TaskPayload,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<i64>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<Task>, TaskApiError> {
    let task = state
        .store
        .update(id, payload)
        .await?
        .ok_or(TaskApiError::NotFound(id))?;
    Ok(Json(task))
}

/// Handler for DELETE /api/tasks/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(
        ("id" = i64, Path, description = "ID of the task")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, TaskApiError> {
    if state.store.delete(id).await? {
        tracing::info!("Deleted task with ID {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(TaskApiError::NotFound(id))
    }
}

/// Creates and returns the tasks router.
pub fn create_task_router(state: TaskState) -> Router {
    Router::new()
        .route(
            "/api/tasks",
            get(list_tasks_handler).post(create_task_handler),
        )
        .route(
            "/api/tasks/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(state)
}
