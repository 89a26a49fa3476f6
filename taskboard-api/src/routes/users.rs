/// User resource endpoints
///
/// Explicit CRUD handlers for the `/usuarios` collection. Each handler
/// validates its payload, executes one storage operation, and maps the row
/// through the response representation.
///
/// # Endpoints
///
/// - `GET /usuarios` - List users, ordered by name
/// - `POST /usuarios` - Create user
/// - `GET /usuarios/:id` - Retrieve user
/// - `PUT/PATCH /usuarios/:id` - Update user
/// - `DELETE /usuarios/:id` - Delete user (cascades to their tasks)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::models::user::{CreateUser, UpdateUser, User};
use uuid::Uuid;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 2, max = 150, message = "Name must be 2-150 characters"))]
    pub name: String,

    /// Email address (must be unique)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Update user request
///
/// Both PUT and PATCH accept this payload; only provided fields are written.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 2, max = 150, message = "Name must be 2-150 characters"))]
    pub name: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// User representation
///
/// All stored fields, verbatim.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Delete confirmation response
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    /// Whether the user was deleted
    pub deleted: bool,
}

/// List users
///
/// Returns every user, ordered by name ascending.
///
/// # Endpoint
///
/// ```text
/// GET /usuarios
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = User::list(&state.db).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create user
///
/// # Endpoint
///
/// ```text
/// POST /usuarios
/// Content-Type: application/json
///
/// {
///   "name": "Ana Silva",
///   "email": "ana@example.com"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: name/email validation failed, or the email
///   is already taken
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Retrieve a single user
///
/// # Errors
///
/// - `404 Not Found`: no user with this ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Update a user (PUT or PATCH)
///
/// Only the provided fields are written; the response is the updated
/// representation.
///
/// # Errors
///
/// - `404 Not Found`: no user with this ID
/// - `422 Unprocessable Entity`: validation failed or email already taken
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate()?;

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            name: req.name,
            email: req.email,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Delete a user
///
/// All tasks owned by the user are deleted in the same transaction via the
/// CASCADE foreign key.
///
/// # Errors
///
/// - `404 Not Found`: no user with this ID
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteUserResponse>> {
    let deleted = User::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(DeleteUserResponse { deleted }))
}
