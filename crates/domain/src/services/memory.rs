//! In-memory store implementations for development and testing.
//!
//! These mirror the behavior of the database-backed repositories,
//! including family scoping and the `(chore_id, due_date)` uniqueness
//! constraint on instances.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::models::chore::Chore;
use crate::models::chore_instance::{ChoreInstance, InstanceStatus};
use crate::services::store::{
    ChoreInstanceStore, ChoreStore, NewChore, NewChoreInstance, StoreError,
};

/// In-memory chore store.
#[derive(Debug, Default)]
pub struct InMemoryChoreStore {
    chores: RwLock<HashMap<Uuid, Chore>>,
}

impl InMemoryChoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ChoreStore for InMemoryChoreStore {
    async fn insert(&self, new_chore: NewChore) -> Result<Chore, StoreError> {
        let now = Utc::now();
        let chore = Chore {
            id: Uuid::new_v4(),
            family_id: new_chore.family_id,
            creator_id: new_chore.creator_id,
            assignee_id: new_chore.assignee_id,
            name: new_chore.name,
            description: new_chore.description,
            points: new_chore.points,
            occurrence_type: new_chore.occurrence_type,
            occurrence_data: new_chore.occurrence_data,
            created_at: now,
            updated_at: now,
        };
        self.chores.write().unwrap().insert(chore.id, chore.clone());
        Ok(chore)
    }

    async fn find_by_id(&self, id: Uuid, family_id: Uuid) -> Result<Chore, StoreError> {
        self.chores
            .read()
            .unwrap()
            .get(&id)
            .filter(|c| c.family_id == family_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("chore {}", id)))
    }

    async fn list_by_family(&self, family_id: Uuid) -> Result<Vec<Chore>, StoreError> {
        let mut chores: Vec<Chore> = self
            .chores
            .read()
            .unwrap()
            .values()
            .filter(|c| c.family_id == family_id)
            .cloned()
            .collect();
        chores.sort_by_key(|c| (c.created_at, c.id));
        Ok(chores)
    }

    async fn list_by_assignee(
        &self,
        assignee_id: Uuid,
        family_id: Uuid,
    ) -> Result<Vec<Chore>, StoreError> {
        let mut chores: Vec<Chore> = self
            .chores
            .read()
            .unwrap()
            .values()
            .filter(|c| c.family_id == family_id && c.assignee_id == assignee_id)
            .cloned()
            .collect();
        chores.sort_by_key(|c| (c.created_at, c.id));
        Ok(chores)
    }

    async fn update(&self, chore: &Chore) -> Result<Chore, StoreError> {
        let mut chores = self.chores.write().unwrap();
        match chores.get_mut(&chore.id) {
            Some(existing) if existing.family_id == chore.family_id => {
                let mut updated = chore.clone();
                updated.updated_at = Utc::now();
                *existing = updated.clone();
                Ok(updated)
            }
            _ => Err(StoreError::NotFound(format!("chore {}", chore.id))),
        }
    }

    async fn delete(&self, id: Uuid, family_id: Uuid) -> Result<(), StoreError> {
        let mut chores = self.chores.write().unwrap();
        match chores.get(&id) {
            Some(c) if c.family_id == family_id => {
                chores.remove(&id);
                Ok(())
            }
            _ => Err(StoreError::NotFound(format!("chore {}", id))),
        }
    }

    async fn family_ids_with_chores(&self) -> Result<Vec<Uuid>, StoreError> {
        let mut ids: Vec<Uuid> = self
            .chores
            .read()
            .unwrap()
            .values()
            .map(|c| c.family_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        ids.sort();
        Ok(ids)
    }
}

/// In-memory chore instance store.
#[derive(Debug, Default)]
pub struct InMemoryChoreInstanceStore {
    instances: RwLock<HashMap<Uuid, ChoreInstance>>,
    failing_chores: RwLock<HashSet<Uuid>>,
}

impl InMemoryChoreInstanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent inserts for one chore fail, for exercising
    /// partial-batch behavior in tests.
    pub fn simulate_insert_failure_for(&self, chore_id: Uuid) {
        self.failing_chores.write().unwrap().insert(chore_id);
    }
}

#[async_trait::async_trait]
impl ChoreInstanceStore for InMemoryChoreInstanceStore {
    async fn exists(
        &self,
        chore_id: Uuid,
        family_id: Uuid,
        due_date: NaiveDate,
    ) -> Result<bool, StoreError> {
        Ok(self.instances.read().unwrap().values().any(|i| {
            i.chore_id == chore_id && i.family_id == family_id && i.due_date == due_date
        }))
    }

    async fn insert(&self, new_instance: NewChoreInstance) -> Result<ChoreInstance, StoreError> {
        if self
            .failing_chores
            .read()
            .unwrap()
            .contains(&new_instance.chore_id)
        {
            return Err(StoreError::Backend("simulated insert failure".to_string()));
        }

        let mut instances = self.instances.write().unwrap();
        let duplicate = instances
            .values()
            .any(|i| i.chore_id == new_instance.chore_id && i.due_date == new_instance.due_date);
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "instance for chore {} on {}",
                new_instance.chore_id, new_instance.due_date
            )));
        }

        let now = Utc::now();
        let instance = ChoreInstance {
            id: Uuid::new_v4(),
            chore_id: new_instance.chore_id,
            family_id: new_instance.family_id,
            assignee_id: new_instance.assignee_id,
            due_date: new_instance.due_date,
            status: InstanceStatus::Pending,
            completed_at: None,
            verified_by: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        instances.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn find_by_id(&self, id: Uuid, family_id: Uuid) -> Result<ChoreInstance, StoreError> {
        self.instances
            .read()
            .unwrap()
            .get(&id)
            .filter(|i| i.family_id == family_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("chore instance {}", id)))
    }

    async fn list_by_chore(
        &self,
        chore_id: Uuid,
        family_id: Uuid,
    ) -> Result<Vec<ChoreInstance>, StoreError> {
        let mut instances: Vec<ChoreInstance> = self
            .instances
            .read()
            .unwrap()
            .values()
            .filter(|i| i.chore_id == chore_id && i.family_id == family_id)
            .cloned()
            .collect();
        instances.sort_by_key(|i| i.due_date);
        Ok(instances)
    }

    async fn list_by_due_date(
        &self,
        family_id: Uuid,
        due_date: NaiveDate,
    ) -> Result<Vec<ChoreInstance>, StoreError> {
        let mut instances: Vec<ChoreInstance> = self
            .instances
            .read()
            .unwrap()
            .values()
            .filter(|i| i.family_id == family_id && i.due_date == due_date)
            .cloned()
            .collect();
        instances.sort_by_key(|i| (i.created_at, i.id));
        Ok(instances)
    }

    async fn list_by_assignee(
        &self,
        assignee_id: Uuid,
        family_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ChoreInstance>, StoreError> {
        let mut instances: Vec<ChoreInstance> = self
            .instances
            .read()
            .unwrap()
            .values()
            .filter(|i| {
                i.assignee_id == assignee_id
                    && i.family_id == family_id
                    && i.due_date >= start
                    && i.due_date <= end
            })
            .cloned()
            .collect();
        instances.sort_by_key(|i| (i.due_date, i.id));
        Ok(instances)
    }

    async fn update(&self, instance: &ChoreInstance) -> Result<ChoreInstance, StoreError> {
        let mut instances = self.instances.write().unwrap();
        match instances.get_mut(&instance.id) {
            Some(existing) if existing.family_id == instance.family_id => {
                let mut updated = instance.clone();
                updated.updated_at = Utc::now();
                *existing = updated.clone();
                Ok(updated)
            }
            _ => Err(StoreError::NotFound(format!(
                "chore instance {}",
                instance.id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chore::{OccurrenceData, OccurrenceType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_chore(family_id: Uuid) -> NewChore {
        NewChore {
            family_id,
            creator_id: Uuid::new_v4(),
            assignee_id: Uuid::new_v4(),
            name: "Dishes".to_string(),
            description: None,
            points: 5,
            occurrence_type: OccurrenceType::Daily,
            occurrence_data: OccurrenceData::daily(date(2024, 1, 1)),
        }
    }

    #[tokio::test]
    async fn test_chore_lookup_is_family_scoped() {
        let store = InMemoryChoreStore::new();
        let family_id = Uuid::new_v4();
        let chore = store.insert(new_chore(family_id)).await.unwrap();

        assert!(store.find_by_id(chore.id, family_id).await.is_ok());

        let other_family = Uuid::new_v4();
        let err = store.find_by_id(chore.id, other_family).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_instance_insert_conflicts() {
        let store = InMemoryChoreInstanceStore::new();
        let new_instance = NewChoreInstance {
            chore_id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            assignee_id: Uuid::new_v4(),
            due_date: date(2024, 3, 4),
        };

        store.insert(new_instance.clone()).await.unwrap();
        let err = store.insert(new_instance).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_by_assignee_range_is_inclusive() {
        let store = InMemoryChoreInstanceStore::new();
        let family_id = Uuid::new_v4();
        let assignee_id = Uuid::new_v4();

        for day in [1, 5, 10] {
            store
                .insert(NewChoreInstance {
                    chore_id: Uuid::new_v4(),
                    family_id,
                    assignee_id,
                    due_date: date(2024, 2, day),
                })
                .await
                .unwrap();
        }

        let instances = store
            .list_by_assignee(assignee_id, family_id, date(2024, 2, 1), date(2024, 2, 10))
            .await
            .unwrap();
        assert_eq!(instances.len(), 3);
        assert_eq!(instances[0].due_date, date(2024, 2, 1));
        assert_eq!(instances[2].due_date, date(2024, 2, 10));

        let instances = store
            .list_by_assignee(assignee_id, family_id, date(2024, 2, 2), date(2024, 2, 9))
            .await
            .unwrap();
        assert_eq!(instances.len(), 1);
    }

    #[tokio::test]
    async fn test_exists_ignores_status() {
        let store = InMemoryChoreInstanceStore::new();
        let chore_id = Uuid::new_v4();
        let family_id = Uuid::new_v4();

        let mut instance = store
            .insert(NewChoreInstance {
                chore_id,
                family_id,
                assignee_id: Uuid::new_v4(),
                due_date: date(2024, 3, 4),
            })
            .await
            .unwrap();

        instance.status = InstanceStatus::Verified;
        store.update(&instance).await.unwrap();

        assert!(store.exists(chore_id, family_id, date(2024, 3, 4)).await.unwrap());
        assert!(!store.exists(chore_id, family_id, date(2024, 3, 5)).await.unwrap());
    }
}
