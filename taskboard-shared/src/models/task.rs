/// Task model and database operations
///
/// Tasks always reference an owning user. The owner's name is never stored
/// on the task row; reads that need it (`find_with_owner`, `list_with_owner`)
/// join against `users` so the value always reflects the current owner.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('LOW', 'MED', 'HIGH');
/// CREATE TYPE task_status AS ENUM ('TODO', 'DOING', 'DONE');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     description VARCHAR(255) NOT NULL CHECK (char_length(description) >= 3),
///     sector_name VARCHAR(120) NOT NULL CHECK (char_length(sector_name) >= 2),
///     priority task_priority NOT NULL,
///     status task_status NOT NULL DEFAULT 'TODO',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{Task, CreateTask, TaskPriority};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     user_id: Uuid::new_v4(),
///     description: "Fix pipeline".to_string(),
///     sector_name: "Ops".to_string(),
///     priority: TaskPriority::High,
///     status: None, // defaults to TODO
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task priority
///
/// No default: creating a task without a priority is a validation error.
/// Medium keeps the short code `MED` used by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    Low,

    #[sqlx(rename = "MED")]
    #[serde(rename = "MED")]
    Medium,

    High,
}

impl TaskPriority {
    /// Converts priority to its short code for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MED",
            TaskPriority::High => "HIGH",
        }
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Not started yet (the default for new tasks)
    #[default]
    Todo,

    /// In progress
    Doing,

    /// Finished
    Done,
}

impl TaskStatus {
    /// Converts status to its short code for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::Doing => "DOING",
            TaskStatus::Done => "DONE",
        }
    }
}

/// Task model representing a tracked task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning user (never null; cascade-deleted with the user)
    pub user_id: Uuid,

    /// What needs to be done, 3 to 255 characters
    pub description: String,

    /// Sector the task belongs to, 2 to 120 characters
    pub sector_name: String,

    /// Task priority
    pub priority: TaskPriority,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created
    ///
    /// Set by the database at insert and never written again
    pub created_at: DateTime<Utc>,
}

/// Task row joined with its owner's current name
///
/// `user_name` is computed by the query, not stored, so it tracks renames of
/// the owning user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskWithOwner {
    /// Unique task ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// What needs to be done
    pub description: String,

    /// Sector the task belongs to
    pub sector_name: String,

    /// Task priority
    pub priority: TaskPriority,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// Current name of the owning user
    pub user_name: String,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user
    pub user_id: Uuid,

    /// Task description
    pub description: String,

    /// Sector name
    pub sector_name: String,

    /// Priority (required, no default)
    pub priority: TaskPriority,

    /// Status (TODO when omitted)
    pub status: Option<TaskStatus>,
}

/// Input for updating a task
///
/// All fields are optional. Only non-None fields are written; `created_at`
/// has no update path at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// Reassign the task to another user
    pub user_id: Option<Uuid>,

    /// New description
    pub description: Option<String>,

    /// New sector name
    pub sector_name: Option<String>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New status
    pub status: Option<TaskStatus>,
}

impl Task {
    /// Creates a new task
    ///
    /// # Returns
    ///
    /// The newly created task with generated ID and creation timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The referenced user does not exist (foreign key violation)
    /// - A CHECK constraint is violated
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let status = data.status.unwrap_or_default();

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, description, sector_name, priority, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, description, sector_name, priority, status, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.description)
        .bind(data.sector_name)
        .bind(data.priority)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, description, sector_name, priority, status, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, joined with its owner's current name
    pub async fn find_with_owner(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<TaskWithOwner>, sqlx::Error> {
        let task = sqlx::query_as::<_, TaskWithOwner>(
            r#"
            SELECT t.id, t.user_id, t.description, t.sector_name, t.priority,
                   t.status, t.created_at, u.name AS user_name
            FROM tasks t
            JOIN users u ON u.id = t.user_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks joined with owner names, newest first
    pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<TaskWithOwner>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithOwner>(
            r#"
            SELECT t.id, t.user_id, t.description, t.sector_name, t.priority,
                   t.status, t.created_at, u.name AS user_name
            FROM tasks t
            JOIN users u ON u.id = t.user_id
            ORDER BY t.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates an existing task
    ///
    /// Only non-None fields in `data` are written. The creation timestamp is
    /// not touched by any update.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if a reassignment points at a nonexistent user or a
    /// CHECK constraint is violated
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.user_id.is_none()
            && data.description.is_none()
            && data.sector_name.is_none()
            && data.priority.is_none()
            && data.status.is_none()
        {
            return Self::find_by_id(pool, id).await;
        }

        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE tasks SET id = id");
        let mut bind_count = 1;

        if data.user_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", user_id = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.sector_name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", sector_name = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, user_id, description, sector_name, priority, status, created_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(user_id) = data.user_id {
            q = q.bind(user_id);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(sector_name) = data.sector_name {
            q = q.bind(sector_name);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts tasks owned by a user
    pub async fn count_by_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_short_codes() {
        assert_eq!(TaskPriority::Low.as_str(), "LOW");
        assert_eq!(TaskPriority::Medium.as_str(), "MED");
        assert_eq!(TaskPriority::High.as_str(), "HIGH");
    }

    #[test]
    fn test_status_short_codes() {
        assert_eq!(TaskStatus::Todo.as_str(), "TODO");
        assert_eq!(TaskStatus::Doing.as_str(), "DOING");
        assert_eq!(TaskStatus::Done.as_str(), "DONE");
    }

    #[test]
    fn test_status_defaults_to_todo() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
    }

    #[test]
    fn test_priority_serde_uses_med_code() {
        // Medium transmits the short code, never the display label
        let json = serde_json::to_value(TaskPriority::Medium).unwrap();
        assert_eq!(json, "MED");

        let parsed: TaskPriority = serde_json::from_value(serde_json::json!("MED")).unwrap();
        assert_eq!(parsed, TaskPriority::Medium);
    }

    #[test]
    fn test_priority_rejects_unknown_code() {
        let result: Result<TaskPriority, _> =
            serde_json::from_value(serde_json::json!("URGENT"));
        assert!(result.is_err());

        // The display label is not a valid wire value either
        let result: Result<TaskPriority, _> =
            serde_json::from_value(serde_json::json!("MEDIUM"));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_task_default_is_empty() {
        let update = UpdateTask::default();
        assert!(update.user_id.is_none());
        assert!(update.description.is_none());
        assert!(update.sector_name.is_none());
        assert!(update.priority.is_none());
        assert!(update.status.is_none());
    }

    // Integration tests for database operations are in tests/model_tests.rs
}
