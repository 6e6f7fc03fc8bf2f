use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::debug;

use models::task;

use crate::errors::ServiceError;

/// Field set a caller supplies for create/update; ids are always store-assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Persistence contract for tasks. Implementations own the durable
/// representation; callers never see connection details.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<task::Model>, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<task::Model, ServiceError>;
    async fn create(&self, input: TaskInput) -> Result<task::Model, ServiceError>;
    async fn update(&self, id: i32, input: TaskInput) -> Result<task::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// SeaORM-backed store implementation.
pub struct SeaOrmTaskStore {
    db: DatabaseConnection,
}

impl SeaOrmTaskStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskStore for SeaOrmTaskStore {
    async fn get_all(&self) -> Result<Vec<task::Model>, ServiceError> {
        task::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn get_by_id(&self, id: i32) -> Result<task::Model, ServiceError> {
        task::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("task"))
    }

    async fn create(&self, input: TaskInput) -> Result<task::Model, ServiceError> {
        let am = task::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            completed: Set(input.completed),
            ..Default::default()
        };
        am.insert(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, id: i32, input: TaskInput) -> Result<task::Model, ServiceError> {
        // One UPDATE filtered on id; a missing row affects zero rows and is not an error.
        let res = task::Entity::update_many()
            .set(task::ActiveModel {
                title: Set(input.title.clone()),
                description: Set(input.description.clone()),
                completed: Set(input.completed),
                ..Default::default()
            })
            .filter(task::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        debug!(id, rows = res.rows_affected, "task update");
        Ok(task::Model {
            id,
            title: input.title,
            description: input.description,
            completed: input.completed,
        })
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        task::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(title: &str, description: &str, completed: bool) -> TaskInput {
        TaskInput {
            title: title.into(),
            description: description.into(),
            completed,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trip() -> anyhow::Result<()> {
        let store = SeaOrmTaskStore::new(get_db().await?);

        let created = store.create(input("T", "D", false)).await?;
        assert!(created.id > 0);

        let found = store.get_by_id(created.id).await?;
        assert_eq!(found.title, "T");
        assert_eq!(found.description, "D");
        assert!(!found.completed);
        Ok(())
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids() -> anyhow::Result<()> {
        let store = SeaOrmTaskStore::new(get_db().await?);
        let a = store.create(input("a", "", false)).await?;
        let b = store.create(input("b", "", true)).await?;
        assert_ne!(a.id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn get_by_id_missing_is_not_found() -> anyhow::Result<()> {
        let store = SeaOrmTaskStore::new(get_db().await?);
        let err = store.get_by_id(42).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn get_all_returns_every_row() -> anyhow::Result<()> {
        let store = SeaOrmTaskStore::new(get_db().await?);
        assert!(store.get_all().await?.is_empty());

        for i in 0..3 {
            store.create(input(&format!("task {}", i), "", i % 2 == 0)).await?;
        }
        assert_eq!(store.get_all().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_every_field() -> anyhow::Result<()> {
        let store = SeaOrmTaskStore::new(get_db().await?);
        let created = store.create(input("old", "old desc", false)).await?;

        let updated = store.update(created.id, input("A", "", true)).await?;
        assert_eq!(updated.id, created.id);

        let found = store.get_by_id(created.id).await?;
        assert_eq!(found.title, "A");
        assert_eq!(found.description, "");
        assert!(found.completed);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_id_is_a_no_op() -> anyhow::Result<()> {
        let store = SeaOrmTaskStore::new(get_db().await?);
        let returned = store.update(99, input("ghost", "", true)).await?;
        assert_eq!(returned.id, 99);
        assert!(store.get_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> anyhow::Result<()> {
        let store = SeaOrmTaskStore::new(get_db().await?);
        let kept = store.create(input("keep", "", false)).await?;

        store.delete(12345).await?;
        let all = store.get_all().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, kept.id);

        store.delete(kept.id).await?;
        store.delete(kept.id).await?;
        assert!(store.get_all().await?.is_empty());
        assert!(matches!(
            store.get_by_id(kept.id).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }
}
