/// Database models for Taskboard
///
/// This module contains the persisted entities and their CRUD operations.
///
/// # Models
///
/// - `user`: registered users, each owning zero or more tasks
/// - `task`: tasks with sector, priority, and status, always referencing an
///   owning user
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{User, CreateUser};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     name: "Ana Silva".to_string(),
///     email: "ana@example.com".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
