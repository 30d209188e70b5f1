//! Chore repository for database operations.

use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use domain::models::chore::Chore;
use domain::services::store::{ChoreStore, NewChore, StoreError};

use crate::entities::{ChoreEntity, OccurrenceTypeDb};
use crate::metrics::QueryTimer;
use crate::repositories::map_store_error;

/// Repository for chore-related database operations.
#[derive(Clone)]
pub struct ChoreRepository {
    pool: PgPool,
}

impl ChoreRepository {
    /// Creates a new ChoreRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Decodes a row, surfacing corrupt occurrence_data as a backend error.
    fn decode(entity: ChoreEntity) -> Result<Chore, StoreError> {
        let id = entity.id;
        Chore::try_from(entity).map_err(|err| {
            error!(chore_id = %id, error = %err, "Corrupt occurrence data in chores row");
            StoreError::Backend(format!("corrupt occurrence data for chore {}", id))
        })
    }

    /// Decodes a listing, dropping corrupt rows instead of failing the
    /// whole list.
    fn decode_all(entities: Vec<ChoreEntity>) -> Vec<Chore> {
        entities
            .into_iter()
            .filter_map(|entity| Self::decode(entity).ok())
            .collect()
    }
}

#[async_trait::async_trait]
impl ChoreStore for ChoreRepository {
    async fn insert(&self, new_chore: NewChore) -> Result<Chore, StoreError> {
        let occurrence_data = serde_json::to_value(&new_chore.occurrence_data)
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        let timer = QueryTimer::new("insert_chore");
        let result = sqlx::query_as::<_, ChoreEntity>(
            r#"
            INSERT INTO chores (family_id, creator_id, assignee_id, name, description,
                                points, occurrence_type, occurrence_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new_chore.family_id)
        .bind(new_chore.creator_id)
        .bind(new_chore.assignee_id)
        .bind(&new_chore.name)
        .bind(&new_chore.description)
        .bind(new_chore.points)
        .bind(OccurrenceTypeDb::from(new_chore.occurrence_type))
        .bind(occurrence_data)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        Self::decode(result.map_err(|err| map_store_error("chore", err))?)
    }

    async fn find_by_id(&self, id: Uuid, family_id: Uuid) -> Result<Chore, StoreError> {
        let timer = QueryTimer::new("find_chore_by_id");
        let result = sqlx::query_as::<_, ChoreEntity>(
            r#"
            SELECT * FROM chores WHERE id = $1 AND family_id = $2
            "#,
        )
        .bind(id)
        .bind(family_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        let entity = result
            .map_err(|err| map_store_error("chore", err))?
            .ok_or_else(|| StoreError::NotFound(format!("chore {}", id)))?;
        Self::decode(entity)
    }

    async fn list_by_family(&self, family_id: Uuid) -> Result<Vec<Chore>, StoreError> {
        let timer = QueryTimer::new("list_chores_by_family");
        let result = sqlx::query_as::<_, ChoreEntity>(
            r#"
            SELECT * FROM chores WHERE family_id = $1 ORDER BY created_at ASC
            "#,
        )
        .bind(family_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();

        Ok(Self::decode_all(
            result.map_err(|err| map_store_error("chores", err))?,
        ))
    }

    async fn list_by_assignee(
        &self,
        assignee_id: Uuid,
        family_id: Uuid,
    ) -> Result<Vec<Chore>, StoreError> {
        let timer = QueryTimer::new("list_chores_by_assignee");
        let result = sqlx::query_as::<_, ChoreEntity>(
            r#"
            SELECT * FROM chores
            WHERE assignee_id = $1 AND family_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(assignee_id)
        .bind(family_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();

        Ok(Self::decode_all(
            result.map_err(|err| map_store_error("chores", err))?,
        ))
    }

    async fn update(&self, chore: &Chore) -> Result<Chore, StoreError> {
        let occurrence_data = serde_json::to_value(&chore.occurrence_data)
            .map_err(|err| StoreError::Backend(err.to_string()))?;

        let timer = QueryTimer::new("update_chore");
        let result = sqlx::query_as::<_, ChoreEntity>(
            r#"
            UPDATE chores SET
                assignee_id = $3,
                name = $4,
                description = $5,
                points = $6,
                occurrence_type = $7,
                occurrence_data = $8,
                updated_at = NOW()
            WHERE id = $1 AND family_id = $2
            RETURNING *
            "#,
        )
        .bind(chore.id)
        .bind(chore.family_id)
        .bind(chore.assignee_id)
        .bind(&chore.name)
        .bind(&chore.description)
        .bind(chore.points)
        .bind(OccurrenceTypeDb::from(chore.occurrence_type))
        .bind(occurrence_data)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        let entity = result
            .map_err(|err| map_store_error("chore", err))?
            .ok_or_else(|| StoreError::NotFound(format!("chore {}", chore.id)))?;
        Self::decode(entity)
    }

    async fn delete(&self, id: Uuid, family_id: Uuid) -> Result<(), StoreError> {
        let timer = QueryTimer::new("delete_chore");
        let result = sqlx::query(
            r#"
            DELETE FROM chores WHERE id = $1 AND family_id = $2
            "#,
        )
        .bind(id)
        .bind(family_id)
        .execute(&self.pool)
        .await;
        timer.record();

        let done = result.map_err(|err| map_store_error("chore", err))?;
        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("chore {}", id)));
        }
        Ok(())
    }

    async fn family_ids_with_chores(&self) -> Result<Vec<Uuid>, StoreError> {
        let timer = QueryTimer::new("family_ids_with_chores");
        let result = sqlx::query_as::<_, (Uuid,)>(
            r#"
            SELECT DISTINCT family_id FROM chores ORDER BY family_id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();

        let rows = result.map_err(|err| map_store_error("families", err))?;
        Ok(rows.into_iter().map(|row| row.0).collect())
    }
}
