//! Task API endpoints
//!
//! RESTful API for task CRUD and search operations under `/tasks`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use task_core::task::Task;
use task_core::Error;

use crate::state::AppState;

// ============================================================================
// Response types
// ============================================================================

/// Collection envelope: list of tasks plus their count.
///
/// `count` and `taskList` are populated only when the list is non-empty;
/// an empty collection serializes as `{"count": 0, "taskList": null}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse {
    pub count: usize,
    pub task_list: Option<Vec<Task>>,
}

impl From<Vec<Task>> for TaskListResponse {
    fn from(tasks: Vec<Task>) -> Self {
        if tasks.is_empty() {
            Self {
                count: 0,
                task_list: None,
            }
        } else {
            Self {
                count: tasks.len(),
                task_list: Some(tasks),
            }
        }
    }
}

/// Hypermedia link to a related resource
#[derive(Debug, Serialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// Single-task representation with a link back to the collection
#[derive(Debug, Serialize)]
pub struct TaskModel {
    #[serde(flatten)]
    pub task: Task,
    pub links: Vec<Link>,
}

impl From<Task> for TaskModel {
    fn from(task: Task) -> Self {
        Self {
            task,
            links: vec![Link {
                rel: "all-tasks".to_string(),
                href: "/tasks/".to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

fn error_response(err: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        Error::TaskNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            status: status.as_u16(),
            message: err.to_string(),
        }),
    )
}

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

// ============================================================================
// Handlers
// ============================================================================

/// GET /tasks/ - List all tasks with their count
async fn get_all_tasks(State(state): State<AppState>) -> ApiResult<Json<TaskListResponse>> {
    let tasks = state
        .task_service()
        .get_all_tasks()
        .await
        .map_err(error_response)?;
    Ok(Json(TaskListResponse::from(tasks)))
}

/// GET /tasks/{id} - Get a single task with an all-tasks link
async fn get_one_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TaskModel>> {
    let task = state
        .task_service()
        .find_task_by_id(id)
        .await
        .map_err(error_response)?;
    Ok(Json(TaskModel::from(task)))
}

/// POST /tasks/addTask - Add a single task
async fn add_task(State(state): State<AppState>, Json(task): Json<Task>) -> ApiResult<Json<Task>> {
    let saved = state
        .task_service()
        .save_task(task)
        .await
        .map_err(error_response)?;
    Ok(Json(saved))
}

/// POST /tasks/addTasks - Add a batch of tasks
async fn add_tasks(
    State(state): State<AppState>,
    Json(tasks): Json<Vec<Task>>,
) -> ApiResult<Json<Vec<Task>>> {
    let saved = state
        .task_service()
        .save_tasks(tasks)
        .await
        .map_err(error_response)?;
    Ok(Json(saved))
}

/// PUT /tasks/{id} - Full-replace update; creates the row when the id is
/// absent
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(task): Json<Task>,
) -> ApiResult<Json<Task>> {
    let updated = state
        .task_service()
        .update_task(id, task)
        .await
        .map_err(error_response)?;
    Ok(Json(updated))
}

/// PATCH /tasks/{id} - Partial update; 404 when the id is absent
async fn patch_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(task): Json<Task>,
) -> ApiResult<Json<Task>> {
    let patched = state
        .task_service()
        .patch_task(id, task)
        .await
        .map_err(error_response)?;
    Ok(Json(patched))
}

/// DELETE /tasks/{id} - Delete a task; 200 with a confirmation string
/// regardless of prior existence
async fn delete_task(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<String> {
    let message = state
        .task_service()
        .delete_task_by_id(id)
        .await
        .map_err(error_response)?;
    Ok(message)
}

/// GET /tasks/search/{status} - Tasks whose status matches exactly
async fn search_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state
        .task_service()
        .search_by_task_status(&status)
        .await
        .map_err(error_response)?;
    Ok(Json(tasks))
}

/// GET /tasks/search/user/{userName} - Tasks owned by the given user
async fn search_by_user_name(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state
        .task_service()
        .search_by_user_name(&user_name)
        .await
        .map_err(error_response)?;
    Ok(Json(tasks))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks/", get(get_all_tasks))
        .route("/tasks/addTask", post(add_task))
        .route("/tasks/addTasks", post(add_tasks))
        .route(
            "/tasks/{id}",
            get(get_one_task)
                .put(update_task)
                .patch(patch_task)
                .delete(delete_task),
        )
        .route("/tasks/search/{status}", get(search_by_status))
        .route("/tasks/search/user/{userName}", get(search_by_user_name))
}
