use domain::{Todo, TodoRepository};
use sqlx::PgPool;
use tracing::info;

use crate::error::TodoFeatureError;
use crate::input::TodoInput;
use crate::photo::PhotoStore;

/// Service for todo-related operations.
///
/// Every operation is scoped to the calling user: a todo owned by someone
/// else behaves exactly like one that does not exist.
pub struct TodoService;

impl TodoService {
    /// List todos for a user, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Todo>, TodoFeatureError> {
        Ok(TodoRepository::list_by_user(pool, user_id).await?)
    }

    /// Create a new todo for a user
    pub async fn create(
        pool: &PgPool,
        photos: &PhotoStore,
        user_id: i64,
        input: TodoInput,
    ) -> Result<Todo, TodoFeatureError> {
        let (mut new_todo, upload) = input.into_new_todo(Some(user_id))?;

        if let Some(upload) = upload {
            new_todo.photo = Some(photos.save(&upload).await?);
        }
        let saved_photo = new_todo.photo.clone();

        match TodoRepository::create(pool, new_todo).await {
            Ok(todo) => {
                info!(todo_id = todo.id, user_id, "Todo created");
                Ok(todo)
            }
            Err(e) => {
                if let Some(path) = saved_photo {
                    photos.remove(&path).await;
                }
                Err(e.into())
            }
        }
    }

    /// Get a todo by ID
    pub async fn get(pool: &PgPool, user_id: i64, id: i64) -> Result<Todo, TodoFeatureError> {
        TodoRepository::find_for_user(pool, id, user_id)
            .await?
            .ok_or(TodoFeatureError::NotFound(id))
    }

    /// Apply a partial update. The photo is replaced only when a new file is supplied.
    pub async fn update(
        pool: &PgPool,
        photos: &PhotoStore,
        user_id: i64,
        id: i64,
        input: TodoInput,
    ) -> Result<Todo, TodoFeatureError> {
        let existing = Self::get(pool, user_id, id).await?;
        let (mut changes, upload) = input.into_changes()?;

        let new_photo = match upload {
            Some(upload) => Some(photos.save(&upload).await?),
            None => None,
        };
        if let Some(path) = &new_photo {
            changes.photo = Some(Some(path.clone()));
        }

        let updated = match TodoRepository::update_for_user(pool, id, user_id, changes).await {
            Ok(Some(todo)) => todo,
            other => {
                if let Some(path) = &new_photo {
                    photos.remove(path).await;
                }
                return Err(match other {
                    Err(e) => e.into(),
                    Ok(_) => TodoFeatureError::NotFound(id),
                });
            }
        };

        if new_photo.is_some() {
            if let Some(old) = existing.photo {
                photos.remove(&old).await;
            }
        }

        Ok(updated)
    }

    /// Delete a todo and its photo
    pub async fn delete(
        pool: &PgPool,
        photos: &PhotoStore,
        user_id: i64,
        id: i64,
    ) -> Result<(), TodoFeatureError> {
        let existing = Self::get(pool, user_id, id).await?;

        if !TodoRepository::delete_for_user(pool, id, user_id).await? {
            return Err(TodoFeatureError::NotFound(id));
        }

        if let Some(path) = existing.photo {
            photos.remove(&path).await;
        }

        info!(todo_id = id, user_id, "Todo deleted");
        Ok(())
    }
}
