use sea_query::{Expr, Iden, Order, PostgresQueryBuilder, Query, SimpleExpr};
use sea_query_binder::SqlxBinder;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime, Time};

use crate::{DomainError, RepeatDays};

/// Schema definition for the todos table
#[derive(Iden, Clone, Copy)]
pub enum Todos {
    Table,
    Id,
    UserId,
    Title,
    IsCompleted,
    Details,
    Photo,
    CreatedAt,
    UpdatedAt,
    AlarmTime,
    RepeatDays,
    DueDate,
}

impl Todos {
    fn all() -> [Todos; 11] {
        [
            Todos::Id,
            Todos::UserId,
            Todos::Title,
            Todos::IsCompleted,
            Todos::Details,
            Todos::Photo,
            Todos::CreatedAt,
            Todos::UpdatedAt,
            Todos::AlarmTime,
            Todos::RepeatDays,
            Todos::DueDate,
        ]
    }
}

/// Raw todo row from database
#[derive(Debug, Clone, FromRow)]
struct TodoRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub title: String,
    pub is_completed: bool,
    pub details: String,
    pub photo: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub alarm_time: Option<Time>,
    pub repeat_days: String,
    pub due_date: Option<Date>,
}

/// Todo entity
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub user_id: Option<i64>,
    pub title: String,
    pub is_completed: bool,
    pub details: String,
    /// Path relative to the upload directory
    pub photo: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub alarm_time: Option<Time>,
    pub repeat_days: RepeatDays,
    pub due_date: Option<Date>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            is_completed: row.is_completed,
            details: row.details,
            photo: row.photo,
            created_at: row.created_at,
            updated_at: row.updated_at,
            alarm_time: row.alarm_time,
            repeat_days: RepeatDays::from_stored(&row.repeat_days),
            due_date: row.due_date,
        }
    }
}

/// Values for a todo about to be inserted
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub user_id: Option<i64>,
    pub title: String,
    pub details: String,
    pub photo: Option<String>,
    pub alarm_time: Option<Time>,
    pub repeat_days: RepeatDays,
    pub due_date: Option<Date>,
}

/// Column changes for a partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub is_completed: Option<bool>,
    pub details: Option<String>,
    pub photo: Option<Option<String>>,
    pub alarm_time: Option<Option<Time>>,
    pub repeat_days: Option<RepeatDays>,
    pub due_date: Option<Option<Date>>,
}

impl TodoChanges {
    fn into_values(self) -> Vec<(Todos, SimpleExpr)> {
        let mut values: Vec<(Todos, SimpleExpr)> = Vec::new();

        if let Some(title) = self.title {
            values.push((Todos::Title, title.into()));
        }
        if let Some(is_completed) = self.is_completed {
            values.push((Todos::IsCompleted, is_completed.into()));
        }
        if let Some(details) = self.details {
            values.push((Todos::Details, details.into()));
        }
        if let Some(photo) = self.photo {
            values.push((Todos::Photo, photo.into()));
        }
        if let Some(alarm_time) = self.alarm_time {
            values.push((Todos::AlarmTime, alarm_time.into()));
        }
        if let Some(repeat_days) = self.repeat_days {
            values.push((Todos::RepeatDays, repeat_days.to_stored().into()));
        }
        if let Some(due_date) = self.due_date {
            values.push((Todos::DueDate, due_date.into()));
        }

        values.push((Todos::UpdatedAt, OffsetDateTime::now_utc().into()));
        values
    }
}

/// Repository for Todo operations
pub struct TodoRepository;

impl TodoRepository {
    /// Create a new todo
    pub async fn create(pool: &PgPool, todo: NewTodo) -> Result<Todo, DomainError> {
        let now = OffsetDateTime::now_utc();

        let (sql, values) = Query::insert()
            .into_table(Todos::Table)
            .columns([
                Todos::UserId,
                Todos::Title,
                Todos::IsCompleted,
                Todos::Details,
                Todos::Photo,
                Todos::CreatedAt,
                Todos::UpdatedAt,
                Todos::AlarmTime,
                Todos::RepeatDays,
                Todos::DueDate,
            ])
            .values_panic([
                todo.user_id.into(),
                todo.title.into(),
                false.into(),
                todo.details.into(),
                todo.photo.into(),
                now.into(),
                now.into(),
                todo.alarm_time.into(),
                todo.repeat_days.to_stored().into(),
                todo.due_date.into(),
            ])
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, TodoRow, _>(&sql, values)
            .fetch_one(pool)
            .await?;

        Ok(row.into())
    }

    /// Find a todo by ID, only if `user_id` owns it
    pub async fn find_for_user(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Todo>, DomainError> {
        let (sql, values) = Query::select()
            .columns(Todos::all())
            .from(Todos::Table)
            .and_where(Expr::col(Todos::Id).eq(id))
            .and_where(Expr::col(Todos::UserId).eq(user_id))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, TodoRow, _>(&sql, values)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List todos for a user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Todo>, DomainError> {
        let (sql, values) = Query::select()
            .columns(Todos::all())
            .from(Todos::Table)
            .and_where(Expr::col(Todos::UserId).eq(user_id))
            .order_by(Todos::Id, Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, TodoRow, _>(&sql, values)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Apply `changes` to a todo owned by `user_id`. Always bumps `updated_at`.
    pub async fn update_for_user(
        pool: &PgPool,
        id: i64,
        user_id: i64,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, DomainError> {
        let (sql, values) = Query::update()
            .table(Todos::Table)
            .values(changes.into_values())
            .and_where(Expr::col(Todos::Id).eq(id))
            .and_where(Expr::col(Todos::UserId).eq(user_id))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, TodoRow, _>(&sql, values)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Delete a todo owned by `user_id`
    pub async fn delete_for_user(pool: &PgPool, id: i64, user_id: i64) -> Result<bool, DomainError> {
        let (sql, values) = Query::delete()
            .from_table(Todos::Table)
            .and_where(Expr::col(Todos::Id).eq(id))
            .and_where(Expr::col(Todos::UserId).eq(user_id))
            .build_sqlx(PostgresQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(pool).await?;

        Ok(result.rows_affected() > 0)
    }
}
