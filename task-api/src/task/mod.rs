use crate::entities::*;
use async_trait::async_trait;
use sea_orm::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

pub mod api;

pub use api::create_task_router;

/// A stored task.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Identifier assigned by the store on creation
    pub id: i64,
    /// Short title of the task
    pub title: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Whether the task is done
    pub completed: bool,
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
        }
    }
}

/// Body accepted when creating or replacing a task.
///
/// Unknown fields, including any `id` sent by the client, are ignored.
/// Missing or `null` text fields are stored as `null`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl TaskPayload {
    pub fn new(title: impl Into<String>, description: impl Into<String>, completed: bool) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            completed,
        }
    }
}

/// Error type for TaskStore operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskStoreError {
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Persistence operations for tasks.
///
/// A missing task is never an error: lookups return `None` and deletes
/// return `false`. Errors are reserved for the storage layer failing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every stored task ordered by id.
    async fn list(&self) -> Result<Vec<Task>, TaskStoreError>;

    /// Returns the task with the given id, if any.
    async fn get(&self, id: i64) -> Result<Option<Task>, TaskStoreError>;

    /// Stores a new task and returns it with its assigned id.
    async fn create(&self, payload: TaskPayload) -> Result<Task, TaskStoreError>;

    /// Overwrites title, description and completed of an existing task.
    ///
    /// Returns `None` without writing anything when the task does not exist.
    async fn update(&self, id: i64, payload: TaskPayload) -> Result<Option<Task>, TaskStoreError>;

    /// Removes a task. Returns `false` when there was nothing to remove.
    async fn delete(&self, id: i64) -> Result<bool, TaskStoreError>;

    /// Reports whether a task with the given id is stored.
    async fn exists(&self, id: i64) -> Result<bool, TaskStoreError>;
}

/// TaskStore backed by a SeaORM database connection.
#[derive(Clone)]
pub struct DatabaseTaskStore {
    db: DatabaseConnection,
}

impl DatabaseTaskStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskStore for DatabaseTaskStore {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Task>, TaskStoreError> {
        let tasks = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Option<Task>, TaskStoreError> {
        let task_model = task::Entity::find_by_id(id).one(&self.db).await?;
        Ok(task_model.map(Task::from))
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, payload: TaskPayload) -> Result<Task, TaskStoreError> {
        let active_model = task::ActiveModel {
            title: ActiveValue::Set(payload.title),
            description: ActiveValue::Set(payload.description),
            completed: ActiveValue::Set(payload.completed),
            ..Default::default()
        };
        let created_model = active_model.insert(&self.db).await?;
        tracing::debug!("Created task {}", created_model.id);
        Ok(Task::from(created_model))
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: i64, payload: TaskPayload) -> Result<Option<Task>, TaskStoreError> {
        let active_model = task::ActiveModel {
            id: ActiveValue::Unchanged(id),
            title: ActiveValue::Set(payload.title),
            description: ActiveValue::Set(payload.description),
            completed: ActiveValue::Set(payload.completed),
        };

        match active_model.update(&self.db).await {
            Ok(updated_model) => Ok(Some(Task::from(updated_model))),
            // No row matched the id, either never stored or deleted meanwhile.
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool, TaskStoreError> {
        let result = task::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, id: i64) -> Result<bool, TaskStoreError> {
        let existing_task = task::Entity::find_by_id(id).one(&self.db).await?;
        Ok(existing_task.is_some())
    }
}

/// Shared state for the task routes.
#[derive(Clone)]
pub struct TaskState {
    pub store: Arc<dyn TaskStore>,
}

impl TaskState {
    pub fn new(store: impl TaskStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
