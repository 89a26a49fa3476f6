/// Integration tests for the Taskboard API
///
/// These tests drive the router end-to-end against a real database:
/// - CRUD surface for both resources
/// - field-level validation (lengths, email syntax, enum membership)
/// - email uniqueness
/// - status default and priority required-ness
/// - cascade delete of tasks with their owner
/// - write-once created_at
/// - list orderings
/// - the derived user_name field tracking the owner's current name
///
/// They require a running PostgreSQL database (DATABASE_URL), and should be
/// run single-threaded since each test wipes the tables:
/// cargo test --test integration_test -- --test-threads=1

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_create_user_returns_created_representation() {
    let mut ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(
            "POST",
            "/usuarios",
            Some(json!({ "name": "Ana Silva", "email": "ana@x.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_string());
    assert_eq!(body["name"], "Ana Silva");
    assert_eq!(body["email"], "ana@x.com");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_and_collection_unchanged() {
    let mut ctx = TestContext::new().await.unwrap();

    let (status, _) = ctx
        .send(
            "POST",
            "/usuarios",
            Some(json!({ "name": "First", "email": "taken@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx
        .send(
            "POST",
            "/usuarios",
            Some(json!({ "name": "Second", "email": "taken@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "email");

    // The failed create left the collection unchanged
    let (status, body) = ctx.send("GET", "/usuarios", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "First");
}

#[tokio::test]
async fn test_short_user_name_is_rejected() {
    let mut ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(
            "POST",
            "/usuarios",
            Some(json!({ "name": "A", "email": "a@x.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "name");
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let mut ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(
            "POST",
            "/usuarios",
            Some(json!({ "name": "Ana Silva", "email": "not-an-email" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "email");
}

#[tokio::test]
async fn test_short_task_fields_are_rejected() {
    let mut ctx = TestContext::new().await.unwrap();
    let user_id = common::create_test_user(&mut ctx, "Owner").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/tasks",
            Some(json!({
                "user": user_id,
                "description": "ab",
                "sector_name": "Ops",
                "priority": "LOW"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "description");

    let (status, body) = ctx
        .send(
            "POST",
            "/tasks",
            Some(json!({
                "user": user_id,
                "description": "Valid description",
                "sector_name": "X",
                "priority": "LOW"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "sector_name");
}

#[tokio::test]
async fn test_task_status_defaults_to_todo() {
    let mut ctx = TestContext::new().await.unwrap();
    let user_id = common::create_test_user(&mut ctx, "Owner").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/tasks",
            Some(json!({
                "user": user_id,
                "description": "No status given",
                "sector_name": "Ops",
                "priority": "MED"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "TODO");
    assert_eq!(body["priority"], "MED");
}

#[tokio::test]
async fn test_missing_priority_is_a_field_error() {
    let mut ctx = TestContext::new().await.unwrap();
    let user_id = common::create_test_user(&mut ctx, "Owner").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/tasks",
            Some(json!({
                "user": user_id,
                "description": "No priority given",
                "sector_name": "Ops"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "priority");
}

#[tokio::test]
async fn test_unknown_priority_code_is_rejected() {
    let mut ctx = TestContext::new().await.unwrap();
    let user_id = common::create_test_user(&mut ctx, "Owner").await;

    for bad in ["URGENT", "MEDIUM", "low"] {
        let (status, _) = ctx
            .send(
                "POST",
                "/tasks",
                Some(json!({
                    "user": user_id,
                    "description": "Bad priority",
                    "sector_name": "Ops",
                    "priority": bad
                })),
            )
            .await;
        assert_eq!(
            status,
            StatusCode::UNPROCESSABLE_ENTITY,
            "priority {:?} should be rejected",
            bad
        );
    }

    let (_, body) = ctx.send("GET", "/tasks", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_task_with_dangling_owner_is_rejected() {
    let mut ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(
            "POST",
            "/tasks",
            Some(json!({
                "user": "00000000-0000-0000-0000-000000000001",
                "description": "Orphan task",
                "sector_name": "Ops",
                "priority": "LOW"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "user");
}

#[tokio::test]
async fn test_deleting_user_cascades_to_tasks() {
    let mut ctx = TestContext::new().await.unwrap();
    let user_id = common::create_test_user(&mut ctx, "Doomed").await;
    let task_a = common::create_test_task(&mut ctx, user_id, "First task").await;
    let task_b = common::create_test_task(&mut ctx, user_id, "Second task").await;

    let (status, body) = ctx
        .send("DELETE", &format!("/usuarios/{}", user_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    for task_id in [task_a, task_b] {
        let (status, _) = ctx.send("GET", &format!("/tasks/{}", task_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let (_, body) = ctx.send("GET", "/tasks", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_created_at_is_immutable_via_updates() {
    let mut ctx = TestContext::new().await.unwrap();
    let user_id = common::create_test_user(&mut ctx, "Owner").await;
    let task_id = common::create_test_task(&mut ctx, user_id, "Timestamp check").await;

    let (_, before) = ctx.send("GET", &format!("/tasks/{}", task_id), None).await;
    let original = before["created_at"].as_str().unwrap().to_string();

    // A caller trying to set created_at is silently ignored; the status
    // change still applies
    let (status, body) = ctx
        .send(
            "PATCH",
            &format!("/tasks/{}", task_id),
            Some(json!({
                "status": "DOING",
                "created_at": "1999-01-01T00:00:00Z"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "DOING");
    assert_eq!(body["created_at"], original.as_str());
}

#[tokio::test]
async fn test_list_orderings() {
    let mut ctx = TestContext::new().await.unwrap();

    let carol = common::create_test_user(&mut ctx, "Carol").await;
    let alice = common::create_test_user(&mut ctx, "Alice").await;
    let bob = common::create_test_user(&mut ctx, "Bob").await;

    // Users come back ordered by name ascending
    let (_, body) = ctx.send("GET", "/usuarios", None).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

    let first = common::create_test_task(&mut ctx, alice, "Oldest task").await;
    let second = common::create_test_task(&mut ctx, bob, "Middle task").await;
    let third = common::create_test_task(&mut ctx, carol, "Newest task").await;

    // Tasks come back newest first
    let (_, body) = ctx.send("GET", "/tasks", None).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![third.to_string(), second.to_string(), first.to_string()]
    );
}

#[tokio::test]
async fn test_missing_resources_return_not_found() {
    let mut ctx = TestContext::new().await.unwrap();

    let missing = "00000000-0000-0000-0000-000000000042";

    for uri in [format!("/usuarios/{}", missing), format!("/tasks/{}", missing)] {
        let (status, body) = ctx.send("GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    let (status, _) = ctx
        .send(
            "PATCH",
            &format!("/usuarios/{}", missing),
            Some(json!({ "name": "Nobody" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .send("DELETE", &format!("/tasks/{}", missing), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// The worked scenario: create user and task, rename the user, watch
/// user_name follow, delete the user, watch the task disappear.
#[tokio::test]
async fn test_user_name_tracks_owner_through_rename_and_delete() {
    let mut ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(
            "POST",
            "/usuarios",
            Some(json!({ "name": "Ana Silva", "email": "ana@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = ctx
        .send(
            "POST",
            "/tasks",
            Some(json!({
                "user": user_id,
                "description": "Fix pipeline",
                "sector_name": "Ops",
                "priority": "HIGH"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "TODO");
    assert_eq!(body["user_name"], "Ana Silva");
    let task_id = body["id"].as_str().unwrap().to_string();

    // Rename the owner; the task representation follows immediately
    let (status, _) = ctx
        .send(
            "PATCH",
            &format!("/usuarios/{}", user_id),
            Some(json!({ "name": "Ana S." })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = ctx.send("GET", &format!("/tasks/{}", task_id), None).await;
    assert_eq!(body["user_name"], "Ana S.");

    // Deleting the owner removes the task
    let (status, _) = ctx
        .send("DELETE", &format!("/usuarios/{}", user_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx.send("GET", &format!("/tasks/{}", task_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_returns_updated_representation() {
    let mut ctx = TestContext::new().await.unwrap();
    let user_id = common::create_test_user(&mut ctx, "Before Rename").await;

    let (status, body) = ctx
        .send(
            "PUT",
            &format!("/usuarios/{}", user_id),
            Some(json!({ "name": "After Rename" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "After Rename");
    assert_eq!(body["id"], user_id.to_string());
}

#[tokio::test]
async fn test_health_check() {
    let mut ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send("GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}
