use std::sync::Arc;

use tracing::instrument;

use models::task;

use crate::errors::ServiceError;
use crate::store::{TaskInput, TaskStore};

/// Task business service independent of the web framework. Holds one store
/// reference and no other state.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn get_tasks(&self) -> Result<Vec<task::Model>, ServiceError> {
        self.store.get_all().await
    }

    pub async fn get_task_by_id(&self, id: i32) -> Result<task::Model, ServiceError> {
        self.store.get_by_id(id).await
    }

    /// Create a task after checking the title rule.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_task(&self, input: TaskInput) -> Result<task::Model, ServiceError> {
        if input.title.is_empty() {
            return Err(ServiceError::Validation("title is required".into()));
        }
        self.store.create(input).await
    }

    /// Replace every stored field of `id` with `input`, same title rule.
    #[instrument(skip(self, input))]
    pub async fn update_task(&self, id: i32, input: TaskInput) -> Result<task::Model, ServiceError> {
        if input.title.is_empty() {
            return Err(ServiceError::Validation("title is required".into()));
        }
        self.store.update(id, input).await
    }

    pub async fn delete_task(&self, id: i32) -> Result<(), ServiceError> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::SeaOrmTaskStore;
    use crate::test_support::get_db;

    async fn service() -> anyhow::Result<TaskService> {
        Ok(TaskService::new(Arc::new(SeaOrmTaskStore::new(get_db().await?))))
    }

    fn input(title: &str, description: &str, completed: bool) -> TaskInput {
        TaskInput {
            title: title.into(),
            description: description.into(),
            completed,
        }
    }

    #[tokio::test]
    async fn create_rejects_empty_title() -> anyhow::Result<()> {
        let svc = service().await?;
        let err = svc.create_task(input("", "d", false)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.to_string(), "validation error: title is required");
        // nothing persisted
        assert!(svc.get_tasks().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_empty_title_and_keeps_row() -> anyhow::Result<()> {
        let svc = service().await?;
        let created = svc.create_task(input("T", "D", false)).await?;

        let err = svc.update_task(created.id, input("", "", true)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let found = svc.get_task_by_id(created.id).await?;
        assert_eq!(found.title, "T");
        assert_eq!(found.description, "D");
        assert!(!found.completed);
        Ok(())
    }

    #[tokio::test]
    async fn lifecycle_create_update_delete() -> anyhow::Result<()> {
        let svc = service().await?;

        let created = svc.create_task(input("Buy milk", "2%", false)).await?;
        assert!(created.id > 0);

        let updated = svc.update_task(created.id, input("Buy milk", "2%", true)).await?;
        assert_eq!(updated.id, created.id);
        assert!(updated.completed);

        svc.delete_task(created.id).await?;
        assert!(matches!(
            svc.get_task_by_id(created.id).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_id_is_ok() -> anyhow::Result<()> {
        let svc = service().await?;
        svc.delete_task(7).await?;
        Ok(())
    }
}
