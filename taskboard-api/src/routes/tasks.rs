/// Task resource endpoints
///
/// Explicit CRUD handlers for the `/tasks` collection. Task representations
/// carry the derived read-only `user_name` field, resolved by joining the
/// owning user at read time so it always shows the owner's current name.
///
/// # Endpoints
///
/// - `GET /tasks` - List tasks, newest first
/// - `POST /tasks` - Create task
/// - `GET /tasks/:id` - Retrieve task
/// - `PUT/PATCH /tasks/:id` - Update task
/// - `DELETE /tasks/:id` - Delete task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::models::task::{
    CreateTask, Task, TaskPriority, TaskStatus, TaskWithOwner, UpdateTask,
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Owning user ID
    pub user: Uuid,

    /// Task description
    #[validate(length(min = 3, max = 255, message = "Description must be 3-255 characters"))]
    pub description: String,

    /// Sector name
    #[validate(length(min = 2, max = 120, message = "Sector name must be 2-120 characters"))]
    pub sector_name: String,

    /// Priority: LOW, MED, or HIGH
    ///
    /// No default; omission is rejected with a per-field error
    pub priority: Option<TaskPriority>,

    /// Status: TODO, DOING, or DONE (TODO when omitted)
    pub status: Option<TaskStatus>,
}

/// Update task request
///
/// Both PUT and PATCH accept this payload; only provided fields are written.
/// There is deliberately no `created_at` field — the creation timestamp has
/// no update path.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// Reassign the task to another user
    pub user: Option<Uuid>,

    /// New description
    #[validate(length(min = 3, max = 255, message = "Description must be 3-255 characters"))]
    pub description: Option<String>,

    /// New sector name
    #[validate(length(min = 2, max = 120, message = "Sector name must be 2-120 characters"))]
    pub sector_name: Option<String>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New status
    pub status: Option<TaskStatus>,
}

/// Task representation
///
/// All stored fields, verbatim, plus the derived `user_name` — the current
/// name of the owning user, resolved at read time.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// Task ID
    pub id: Uuid,

    /// Owning user ID
    pub user: Uuid,

    /// Task description
    pub description: String,

    /// Sector name
    pub sector_name: String,

    /// Priority
    pub priority: TaskPriority,

    /// Status
    pub status: TaskStatus,

    /// Creation timestamp (write-once)
    pub created_at: DateTime<Utc>,

    /// Current name of the owning user (read-only, derived)
    pub user_name: String,
}

impl From<TaskWithOwner> for TaskResponse {
    fn from(task: TaskWithOwner) -> Self {
        Self {
            id: task.id,
            user: task.user_id,
            description: task.description,
            sector_name: task.sector_name,
            priority: task.priority,
            status: task.status,
            created_at: task.created_at,
            user_name: task.user_name,
        }
    }
}

/// Delete confirmation response
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    /// Whether the task was deleted
    pub deleted: bool,
}

/// Fetches the owner-joined representation of a task that must exist
async fn task_representation(state: &AppState, id: Uuid) -> ApiResult<TaskResponse> {
    let task = Task::find_with_owner(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(task.into())
}

/// List tasks
///
/// Returns every task joined with its owner's name, ordered by creation
/// timestamp descending (newest first).
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// ```
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = Task::list_with_owner(&state.db).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Create task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Content-Type: application/json
///
/// {
///   "user": "uuid",
///   "description": "Fix pipeline",
///   "sector_name": "Ops",
///   "priority": "HIGH"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: field validation failed, priority missing,
///   or the referenced user does not exist
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let priority = req
        .priority
        .ok_or_else(|| ApiError::field_error("priority", "This field is required"))?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: req.user,
            description: req.description,
            sector_name: req.sector_name,
            priority,
            status: req.status,
        },
    )
    .await?;

    let response = task_representation(&state, task.id).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Retrieve a single task
///
/// # Errors
///
/// - `404 Not Found`: no task with this ID
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let response = task_representation(&state, id).await?;

    Ok(Json(response))
}

/// Update a task (PUT or PATCH)
///
/// Only the provided fields are written; `created_at` is never touched. The
/// response is the updated owner-joined representation.
///
/// # Errors
///
/// - `404 Not Found`: no task with this ID
/// - `422 Unprocessable Entity`: validation failed or reassignment points at
///   a nonexistent user
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            user_id: req.user,
            description: req.description,
            sector_name: req.sector_name,
            priority: req.priority,
            status: req.status,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let response = task_representation(&state, task.id).await?;

    Ok(Json(response))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: no task with this ID
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let deleted = Task::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(DeleteTaskResponse { deleted }))
}
