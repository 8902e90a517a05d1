//! BDD-style behavior tests for the Todo feature
//!
//! These tests verify todo-related business behaviors work correctly.
//! Focus on workflows and business rules, not implementation details.

use sqlx::PgPool;
use time::macros::{date, time};
use todo_feature::{Field, PhotoStore, TodoFeatureError, TodoInput, TodoService};
use user_feature::{Credentials, UserService};

/// Helper to create a test user (todos belong to a user)
async fn create_test_user(pool: &PgPool, username: &str) -> i64 {
    let user = UserService::register(
        pool,
        Credentials {
            username: username.to_string(),
            password: "secret".to_string(),
        },
    )
    .await
    .expect("Failed to create test user");
    user.id
}

fn photo_store() -> (tempfile::TempDir, PhotoStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = PhotoStore::new(dir.path());
    (dir, store)
}

fn titled(title: &str) -> TodoInput {
    TodoInput {
        title: Field::Value(title.to_string()),
        ..Default::default()
    }
}

// =============================================================================
// Todo Creation Behaviors
// =============================================================================

#[sqlx::test(migrations = "../../../migrations")]
async fn user_can_create_todo_with_only_a_title(pool: PgPool) -> Result<(), TodoFeatureError> {
    // Given a registered user
    let user_id = create_test_user(&pool, "create-todo").await;
    let (_dir, photos) = photo_store();

    // When creating a todo with a padded title
    let todo = TodoService::create(&pool, &photos, user_id, titled(" Buy milk ")).await?;

    // Then the title is trimmed and every other field has its default
    assert_eq!(todo.user_id, Some(user_id));
    assert_eq!(todo.title, "Buy milk");
    assert!(!todo.is_completed);
    assert_eq!(todo.details, "");
    assert!(todo.photo.is_none());
    assert!(todo.alarm_time.is_none());
    assert!(todo.repeat_days.is_empty());
    assert!(todo.due_date.is_none());
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn user_can_create_todo_with_schedule(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "scheduled").await;
    let (_dir, photos) = photo_store();

    let todo = TodoService::create(
        &pool,
        &photos,
        user_id,
        TodoInput {
            title: Field::Value("Gym".to_string()),
            details: Field::Value("Leg day".to_string()),
            alarm_time: Field::Value("09:30".to_string()),
            repeat_days: Field::Value(vec!["Mon".to_string(), "Wed".to_string()]),
            due_date: Field::Value("2025-03-14".to_string()),
            ..Default::default()
        },
    )
    .await?;

    assert_eq!(todo.details, "Leg day");
    assert_eq!(todo.alarm_time, Some(time!(09:30)));
    assert_eq!(todo.repeat_days.as_slice(), ["Mon", "Wed"]);
    assert_eq!(todo.due_date, Some(date!(2025 - 03 - 14)));
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn blank_title_is_rejected(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "blank-title").await;
    let (_dir, photos) = photo_store();

    let blank = TodoService::create(&pool, &photos, user_id, titled("   ")).await;
    let missing = TodoService::create(&pool, &photos, user_id, TodoInput::default()).await;

    assert!(matches!(blank, Err(TodoFeatureError::Validation(_))));
    assert!(matches!(missing, Err(TodoFeatureError::Validation(_))));
    assert!(TodoService::list_for_user(&pool, user_id).await?.is_empty());
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn unparseable_alarm_time_is_stored_as_null(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "bad-alarm").await;
    let (_dir, photos) = photo_store();

    let todo = TodoService::create(
        &pool,
        &photos,
        user_id,
        TodoInput {
            alarm_time: Field::Value("25:99".to_string()),
            ..titled("Sleep in")
        },
    )
    .await?;

    assert!(todo.alarm_time.is_none());
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn malformed_due_date_is_rejected(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "bad-date").await;
    let (_dir, photos) = photo_store();

    let result = TodoService::create(
        &pool,
        &photos,
        user_id,
        TodoInput {
            due_date: Field::Value("next tuesday".to_string()),
            ..titled("Someday")
        },
    )
    .await;

    assert!(matches!(result, Err(TodoFeatureError::Validation(_))));
    Ok(())
}

// =============================================================================
// Todo Query Behaviors
// =============================================================================

#[sqlx::test(migrations = "../../../migrations")]
async fn todo_can_be_found_by_owner(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "get-todo").await;
    let (_dir, photos) = photo_store();
    let created = TodoService::create(&pool, &photos, user_id, titled("Find Me")).await?;

    let found = TodoService::get(&pool, user_id, created.id).await?;

    assert_eq!(found.id, created.id);
    assert_eq!(found.title, "Find Me");
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn querying_nonexistent_todo_returns_not_found(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "nothing-here").await;

    let result = TodoService::get(&pool, user_id, 424242).await;

    assert!(matches!(result, Err(TodoFeatureError::NotFound(424242))));
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn user_lists_their_todos_newest_first(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "list-todos").await;
    let (_dir, photos) = photo_store();

    for title in ["Task 1", "Task 2", "Task 3"] {
        TodoService::create(&pool, &photos, user_id, titled(title)).await?;
    }

    let todos = TodoService::list_for_user(&pool, user_id).await?;

    let titles: Vec<_> = todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Task 3", "Task 2", "Task 1"]);
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn listing_todos_when_none_exist_returns_empty(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "empty-todos").await;

    let todos = TodoService::list_for_user(&pool, user_id).await?;

    assert!(todos.is_empty());
    Ok(())
}

// =============================================================================
// Ownership Behaviors
// =============================================================================

#[sqlx::test(migrations = "../../../migrations")]
async fn other_users_cannot_see_or_touch_a_todo(pool: PgPool) -> Result<(), TodoFeatureError> {
    // Given a todo owned by user A
    let user_a = create_test_user(&pool, "user-a").await;
    let user_b = create_test_user(&pool, "user-b").await;
    let (_dir, photos) = photo_store();
    let todo = TodoService::create(&pool, &photos, user_a, titled("A's secret")).await?;

    // Then user B cannot list, get, update or delete it
    assert!(TodoService::list_for_user(&pool, user_b).await?.is_empty());
    assert!(matches!(
        TodoService::get(&pool, user_b, todo.id).await,
        Err(TodoFeatureError::NotFound(_))
    ));
    assert!(matches!(
        TodoService::update(&pool, &photos, user_b, todo.id, titled("Mine now")).await,
        Err(TodoFeatureError::NotFound(_))
    ));
    assert!(matches!(
        TodoService::delete(&pool, &photos, user_b, todo.id).await,
        Err(TodoFeatureError::NotFound(_))
    ));

    // And user A's todo is untouched
    let still_there = TodoService::get(&pool, user_a, todo.id).await?;
    assert_eq!(still_there.title, "A's secret");
    Ok(())
}

// =============================================================================
// Todo Update Behaviors
// =============================================================================

#[sqlx::test(migrations = "../../../migrations")]
async fn omitted_fields_are_left_unchanged(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "partial").await;
    let (_dir, photos) = photo_store();
    let created = TodoService::create(
        &pool,
        &photos,
        user_id,
        TodoInput {
            details: Field::Value("Two litres".to_string()),
            alarm_time: Field::Value("07:15".to_string()),
            ..titled("Buy milk")
        },
    )
    .await?;

    // When only completion is patched
    let updated = TodoService::update(
        &pool,
        &photos,
        user_id,
        created.id,
        TodoInput {
            is_completed: Field::Value(true),
            ..Default::default()
        },
    )
    .await?;

    // Then everything else survives
    assert!(updated.is_completed);
    assert_eq!(updated.title, "Buy milk");
    assert_eq!(updated.details, "Two litres");
    assert_eq!(updated.alarm_time, Some(time!(07:15)));
    assert!(updated.updated_at > created.updated_at);
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn repeat_days_round_trip_through_update(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "repeat").await;
    let (_dir, photos) = photo_store();
    let created = TodoService::create(&pool, &photos, user_id, titled("Stretch")).await?;

    TodoService::update(
        &pool,
        &photos,
        user_id,
        created.id,
        TodoInput {
            repeat_days: Field::Value(vec!["Mon".to_string(), "Wed".to_string()]),
            ..Default::default()
        },
    )
    .await?;

    let found = TodoService::get(&pool, user_id, created.id).await?;
    assert_eq!(found.repeat_days.as_slice(), ["Mon", "Wed"]);
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn null_fields_clear_their_values(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "clear").await;
    let (_dir, photos) = photo_store();
    let created = TodoService::create(
        &pool,
        &photos,
        user_id,
        TodoInput {
            details: Field::Value("notes".to_string()),
            alarm_time: Field::Value("06:00".to_string()),
            repeat_days: Field::Value(vec!["Fri".to_string()]),
            due_date: Field::Value("2025-12-24".to_string()),
            ..titled("Everything set")
        },
    )
    .await?;

    let updated = TodoService::update(
        &pool,
        &photos,
        user_id,
        created.id,
        TodoInput {
            details: Field::Null,
            alarm_time: Field::Null,
            repeat_days: Field::Null,
            due_date: Field::Null,
            ..Default::default()
        },
    )
    .await?;

    assert_eq!(updated.details, "");
    assert!(updated.alarm_time.is_none());
    assert!(updated.repeat_days.is_empty());
    assert!(updated.due_date.is_none());
    assert_eq!(updated.title, "Everything set");
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn updating_title_to_blank_is_rejected(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "blank-update").await;
    let (_dir, photos) = photo_store();
    let created = TodoService::create(&pool, &photos, user_id, titled("Keep me")).await?;

    let result = TodoService::update(&pool, &photos, user_id, created.id, titled("  ")).await;

    assert!(matches!(result, Err(TodoFeatureError::Validation(_))));
    let found = TodoService::get(&pool, user_id, created.id).await?;
    assert_eq!(found.title, "Keep me");
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn updating_nonexistent_todo_returns_not_found(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "update-missing").await;
    let (_dir, photos) = photo_store();

    let result = TodoService::update(&pool, &photos, user_id, 424242, titled("Ghost")).await;

    assert!(matches!(result, Err(TodoFeatureError::NotFound(_))));
    Ok(())
}

// =============================================================================
// Todo Deletion Behaviors
// =============================================================================

#[sqlx::test(migrations = "../../../migrations")]
async fn deleted_todo_is_gone(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "delete-todo").await;
    let (_dir, photos) = photo_store();
    let created = TodoService::create(&pool, &photos, user_id, titled("Delete Me")).await?;

    TodoService::delete(&pool, &photos, user_id, created.id).await?;

    assert!(matches!(
        TodoService::get(&pool, user_id, created.id).await,
        Err(TodoFeatureError::NotFound(_))
    ));
    assert!(matches!(
        TodoService::delete(&pool, &photos, user_id, created.id).await,
        Err(TodoFeatureError::NotFound(_))
    ));
    Ok(())
}

#[sqlx::test(migrations = "../../../migrations")]
async fn deleting_user_deletes_their_todos(pool: PgPool) -> Result<(), TodoFeatureError> {
    let user_id = create_test_user(&pool, "leaving").await;
    let (_dir, photos) = photo_store();
    TodoService::create(&pool, &photos, user_id, titled("Left behind")).await?;

    UserService::delete(&pool, user_id)
        .await
        .expect("Failed to delete user");

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
        .fetch_one(&pool)
        .await
        .map_err(domain::DomainError::from)?;
    assert_eq!(remaining, 0);
    Ok(())
}
