//! Chore instance repository for database operations.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::chore_instance::ChoreInstance;
use domain::services::store::{ChoreInstanceStore, NewChoreInstance, StoreError};

use crate::entities::{ChoreInstanceEntity, InstanceStatusDb};
use crate::metrics::QueryTimer;
use crate::repositories::map_store_error;

/// Repository for chore-instance-related database operations.
#[derive(Clone)]
pub struct ChoreInstanceRepository {
    pool: PgPool,
}

impl ChoreInstanceRepository {
    /// Creates a new ChoreInstanceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ChoreInstanceStore for ChoreInstanceRepository {
    async fn exists(
        &self,
        chore_id: Uuid,
        family_id: Uuid,
        due_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("chore_instance_exists");
        let result = sqlx::query_as::<_, (bool,)>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM chore_instances
                WHERE chore_id = $1 AND family_id = $2 AND due_date = $3
            )
            "#,
        )
        .bind(chore_id)
        .bind(family_id)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        result
            .map(|row| row.0)
            .map_err(|err| map_store_error("chore instance", err))
    }

    async fn insert(&self, new_instance: NewChoreInstance) -> Result<ChoreInstance, StoreError> {
        let timer = QueryTimer::new("insert_chore_instance");
        let result = sqlx::query_as::<_, ChoreInstanceEntity>(
            r#"
            INSERT INTO chore_instances (chore_id, family_id, assignee_id, due_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(new_instance.chore_id)
        .bind(new_instance.family_id)
        .bind(new_instance.assignee_id)
        .bind(new_instance.due_date)
        .bind(InstanceStatusDb::Pending)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        let context = format!(
            "instance for chore {} on {}",
            new_instance.chore_id, new_instance.due_date
        );
        result
            .map(ChoreInstance::from)
            .map_err(|err| map_store_error(&context, err))
    }

    async fn find_by_id(&self, id: Uuid, family_id: Uuid) -> Result<ChoreInstance, StoreError> {
        let timer = QueryTimer::new("find_chore_instance_by_id");
        let result = sqlx::query_as::<_, ChoreInstanceEntity>(
            r#"
            SELECT * FROM chore_instances WHERE id = $1 AND family_id = $2
            "#,
        )
        .bind(id)
        .bind(family_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        result
            .map_err(|err| map_store_error("chore instance", err))?
            .map(ChoreInstance::from)
            .ok_or_else(|| StoreError::NotFound(format!("chore instance {}", id)))
    }

    async fn list_by_chore(
        &self,
        chore_id: Uuid,
        family_id: Uuid,
    ) -> Result<Vec<ChoreInstance>, StoreError> {
        let timer = QueryTimer::new("list_chore_instances_by_chore");
        let result = sqlx::query_as::<_, ChoreInstanceEntity>(
            r#"
            SELECT * FROM chore_instances
            WHERE chore_id = $1 AND family_id = $2
            ORDER BY due_date ASC
            "#,
        )
        .bind(chore_id)
        .bind(family_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();

        let entities = result.map_err(|err| map_store_error("chore instances", err))?;
        Ok(entities.into_iter().map(ChoreInstance::from).collect())
    }

    async fn list_by_due_date(
        &self,
        family_id: Uuid,
        due_date: NaiveDate,
    ) -> Result<Vec<ChoreInstance>, StoreError> {
        let timer = QueryTimer::new("list_chore_instances_by_due_date");
        let result = sqlx::query_as::<_, ChoreInstanceEntity>(
            r#"
            SELECT * FROM chore_instances
            WHERE family_id = $1 AND due_date = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(family_id)
        .bind(due_date)
        .fetch_all(&self.pool)
        .await;
        timer.record();

        let entities = result.map_err(|err| map_store_error("chore instances", err))?;
        Ok(entities.into_iter().map(ChoreInstance::from).collect())
    }

    async fn list_by_assignee(
        &self,
        assignee_id: Uuid,
        family_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ChoreInstance>, StoreError> {
        let timer = QueryTimer::new("list_chore_instances_by_assignee");
        let result = sqlx::query_as::<_, ChoreInstanceEntity>(
            r#"
            SELECT * FROM chore_instances
            WHERE assignee_id = $1 AND family_id = $2
              AND due_date BETWEEN $3 AND $4
            ORDER BY due_date ASC
            "#,
        )
        .bind(assignee_id)
        .bind(family_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await;
        timer.record();

        let entities = result.map_err(|err| map_store_error("chore instances", err))?;
        Ok(entities.into_iter().map(ChoreInstance::from).collect())
    }

    async fn update(&self, instance: &ChoreInstance) -> Result<ChoreInstance, StoreError> {
        let timer = QueryTimer::new("update_chore_instance");
        let result = sqlx::query_as::<_, ChoreInstanceEntity>(
            r#"
            UPDATE chore_instances SET
                status = $3,
                completed_at = $4,
                verified_by = $5,
                notes = $6,
                updated_at = NOW()
            WHERE id = $1 AND family_id = $2
            RETURNING *
            "#,
        )
        .bind(instance.id)
        .bind(instance.family_id)
        .bind(InstanceStatusDb::from(instance.status))
        .bind(instance.completed_at)
        .bind(instance.verified_by)
        .bind(&instance.notes)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        result
            .map_err(|err| map_store_error("chore instance", err))?
            .map(ChoreInstance::from)
            .ok_or_else(|| StoreError::NotFound(format!("chore instance {}", instance.id)))
    }
}
