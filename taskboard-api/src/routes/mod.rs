/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User resource at `/usuarios`
/// - `tasks`: Task resource at `/tasks`

pub mod health;
pub mod tasks;
pub mod users;
