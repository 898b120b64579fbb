use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::domain::{Teacher, TeacherFilter, TeacherInput};
use crate::errors::ServiceError;
use crate::storage::TeacherBackend;

/// Record store for teachers.
///
/// Nothing is cached between calls: each operation loads the full collection
/// from the backend and mutating operations write the full collection back.
/// Writers hold the exclusive side of `gate` across load, transform and save,
/// so two concurrent adds in one process can never hand out the same id or
/// drop each other's record. Readers hold the shared side and see a
/// consistent snapshot.
#[derive(Clone)]
pub struct TeacherStore {
    backend: Arc<dyn TeacherBackend>,
    gate: Arc<RwLock<()>>,
}

impl TeacherStore {
    pub fn new(backend: Arc<dyn TeacherBackend>) -> Self {
        Self { backend, gate: Arc::new(RwLock::new(())) }
    }

    /// Full collection in persisted order.
    pub async fn list(&self) -> Result<Vec<Teacher>, ServiceError> {
        let _read = self.gate.read().await;
        self.backend.load().await
    }

    /// Validate, assign `max(id) + 1`, append and persist.
    pub async fn add(&self, input: TeacherInput) -> Result<Teacher, ServiceError> {
        let new = input.validate()?;
        let _write = self.gate.write().await;
        let mut teachers = self.backend.load().await?;
        let id = next_id(&teachers);
        let teacher = new.into_teacher(id);
        teachers.push(teacher.clone());
        self.backend.save(&teachers).await?;
        info!(teacher_id = id, count = teachers.len(), "teacher added");
        Ok(teacher)
    }

    /// Remove the record with `id` and return it.
    pub async fn delete(&self, id: i64) -> Result<Teacher, ServiceError> {
        let _write = self.gate.write().await;
        let mut teachers = self.backend.load().await?;
        let pos = teachers
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ServiceError::not_found("teacher"))?;
        let removed = teachers.remove(pos);
        self.backend.save(&teachers).await?;
        info!(teacher_id = id, count = teachers.len(), "teacher deleted");
        Ok(removed)
    }

    /// Replace every field of record `id` with the candidate's. The record
    /// keeps its id and its position in the collection.
    pub async fn update(&self, id: i64, input: TeacherInput) -> Result<Teacher, ServiceError> {
        let new = input.validate()?;
        let _write = self.gate.write().await;
        let mut teachers = self.backend.load().await?;
        let slot = teachers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ServiceError::not_found("teacher"))?;
        *slot = new.into_teacher(id);
        let updated = slot.clone();
        self.backend.save(&teachers).await?;
        info!(teacher_id = id, "teacher updated");
        Ok(updated)
    }

    /// First record whose `full_name` is exactly `full_name`.
    pub async fn find_by_name(&self, full_name: &str) -> Result<Option<Teacher>, ServiceError> {
        let found = self.list().await?.into_iter().find(|t| t.full_name == full_name);
        debug!(full_name, found = found.is_some(), "teacher lookup by name");
        Ok(found)
    }

    /// Records matching every supplied criterion. At least one is required.
    pub async fn filter_by(&self, filter: TeacherFilter) -> Result<Vec<Teacher>, ServiceError> {
        if filter.is_empty() {
            return Err(ServiceError::Validation(
                "At least one filter parameter (age or num_classes) is required".into(),
            ));
        }
        let matched: Vec<Teacher> = self.list().await?.into_iter().filter(|t| filter.matches(t)).collect();
        debug!(age = ?filter.age, num_classes = ?filter.num_classes, count = matched.len(), "teachers filtered");
        Ok(matched)
    }
}

fn next_id(teachers: &[Teacher]) -> i64 {
    teachers.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryBackend, JsonFileBackend};

    fn input(name: &str, age: i64, dob: &str, num_classes: i64) -> TeacherInput {
        TeacherInput {
            full_name: Some(name.into()),
            age: Some(age),
            dob: Some(dob.into()),
            num_classes: Some(num_classes),
        }
    }

    fn ann() -> Teacher {
        Teacher { id: 1, full_name: "Ann".into(), age: 30, dob: "1994-01-01".into(), num_classes: 3 }
    }

    fn memory_store() -> (Arc<InMemoryBackend>, TeacherStore) {
        let backend = Arc::new(InMemoryBackend::new());
        (backend.clone(), TeacherStore::new(backend))
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase_without_gaps() -> Result<(), anyhow::Error> {
        let (_, store) = memory_store();
        assert!(store.list().await?.is_empty());
        for expected in 1..=5 {
            let t = store.add(input(&format!("t{expected}"), 30, "2000-01-01", 1)).await?;
            assert_eq!(t.id, expected);
        }
        let ids: Vec<i64> = store.list().await?.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        Ok(())
    }

    #[tokio::test]
    async fn add_round_trips_fields() -> Result<(), anyhow::Error> {
        let (_, store) = memory_store();
        let created = store.add(input("Ann", 30, "1994-01-01", 3)).await?;
        assert_eq!(created, ann());
        assert_eq!(store.list().await?, vec![ann()]);
        Ok(())
    }

    #[tokio::test]
    async fn add_rejects_incomplete_input_without_writing() -> Result<(), anyhow::Error> {
        let (backend, store) = memory_store();
        let partial = TeacherInput { full_name: Some("Ann".into()), age: Some(30), ..Default::default() };
        assert!(matches!(store.add(partial).await, Err(ServiceError::Validation(_))));
        assert!(backend.snapshot().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn ids_not_reused_after_deleting_a_lower_id() -> Result<(), anyhow::Error> {
        let (_, store) = memory_store();
        store.add(input("a", 1, "d", 1)).await?;
        store.add(input("b", 1, "d", 1)).await?;
        store.add(input("c", 1, "d", 1)).await?;
        store.delete(2).await?;
        let d = store.add(input("d", 1, "d", 1)).await?;
        assert_eq!(d.id, 4);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() -> Result<(), anyhow::Error> {
        let (_, store) = memory_store();
        store.add(input("a", 1, "d", 1)).await?;
        store.add(input("b", 2, "d", 2)).await?;
        let removed = store.delete(1).await?;
        assert_eq!(removed.full_name, "a");
        let left = store.list().await?;
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, 2);
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_reports_not_found_and_keeps_collection() -> Result<(), anyhow::Error> {
        let backend = Arc::new(InMemoryBackend::with_records(vec![ann()]));
        let store = TeacherStore::new(backend.clone());
        assert!(matches!(store.delete(42).await, Err(ServiceError::NotFound(_))));
        assert_eq!(backend.snapshot().await, vec![ann()]);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id_and_position() -> Result<(), anyhow::Error> {
        let (_, store) = memory_store();
        store.add(input("Ann", 30, "1994-01-01", 3)).await?;
        store.add(input("Bo", 40, "1984-05-05", 5)).await?;

        let payload: TeacherInput = serde_json::from_value(serde_json::json!({
            "id": 77, "full_name": "Ann Lee", "age": 31, "dob": "1993-02-02", "num_classes": 4
        }))?;
        let updated = store.update(1, payload).await?;
        assert_eq!(updated.id, 1);

        let all = store.list().await?;
        assert_eq!(
            all[0],
            Teacher { id: 1, full_name: "Ann Lee".into(), age: 31, dob: "1993-02-02".into(), num_classes: 4 }
        );
        assert_eq!(all[1].full_name, "Bo");
        assert!(all.iter().all(|t| t.id != 77));
        Ok(())
    }

    #[tokio::test]
    async fn update_validates_before_lookup() -> Result<(), anyhow::Error> {
        let (_, store) = memory_store();
        let partial = TeacherInput { dob: Some("x".into()), ..Default::default() };
        assert!(matches!(store.update(9, partial).await, Err(ServiceError::Validation(_))));
        assert!(matches!(
            store.update(9, input("x", 1, "d", 1)).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn find_by_name_is_exact_and_first_match() -> Result<(), anyhow::Error> {
        let (_, store) = memory_store();
        store.add(input("Ann", 30, "1994-01-01", 3)).await?;
        store.add(input("Ann", 50, "1974-01-01", 1)).await?;

        let found = store.find_by_name("Ann").await?.expect("match");
        assert_eq!(found.id, 1);
        assert!(store.find_by_name("ann").await?.is_none());
        assert!(store.find_by_name("An").await?.is_none());
        assert!(store.find_by_name("Ann ").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn filter_requires_a_criterion() -> Result<(), anyhow::Error> {
        let (_, store) = memory_store();
        assert!(matches!(
            store.filter_by(TeacherFilter::default()).await,
            Err(ServiceError::Validation(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn filter_ands_criteria_and_allows_empty_result() -> Result<(), anyhow::Error> {
        let (_, store) = memory_store();
        store.add(input("a", 40, "d", 5)).await?;
        store.add(input("b", 40, "d", 4)).await?;
        store.add(input("c", 30, "d", 5)).await?;

        let both = store.filter_by(TeacherFilter { age: Some(40), num_classes: Some(5) }).await?;
        assert_eq!(both.iter().map(|t| t.full_name.as_str()).collect::<Vec<_>>(), vec!["a"]);

        let by_classes = store.filter_by(TeacherFilter { age: None, num_classes: Some(5) }).await?;
        assert_eq!(by_classes.len(), 2);

        let none = store.filter_by(TeacherFilter { age: Some(99), num_classes: None }).await?;
        assert!(none.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn persistence_failure_surfaces_from_add() -> Result<(), anyhow::Error> {
        let (backend, store) = memory_store();
        backend.fail_saves(true);
        assert!(matches!(
            store.add(input("Ann", 30, "1994-01-01", 3)).await,
            Err(ServiceError::Persistence(_))
        ));
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn ann_and_bo_scenario() -> Result<(), anyhow::Error> {
        let store = TeacherStore::new(Arc::new(InMemoryBackend::with_records(vec![ann()])));

        let bo = store.add(input("Bo", 40, "1984-05-05", 5)).await?;
        assert_eq!(bo.id, 2);

        let forty = store.filter_by(TeacherFilter { age: Some(40), num_classes: None }).await?;
        assert_eq!(forty, vec![bo.clone()]);

        store.delete(1).await?;
        assert_eq!(store.list().await?, vec![bo]);
        assert!(store.find_by_name("Ann").await?.is_none());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_get_distinct_ids() -> Result<(), anyhow::Error> {
        let (_, store) = memory_store();
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.add(input(&format!("t{i}"), 30, "d", 1)).await }));
        }
        for h in handles {
            h.await??;
        }
        let mut ids: Vec<i64> = store.list().await?.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<_>>());
        Ok(())
    }

    #[tokio::test]
    async fn file_backed_store_survives_reopen() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("teacher_store_{}.json", uuid::Uuid::new_v4()));
        let store = TeacherStore::new(Arc::new(JsonFileBackend::new(&path, true).await?));
        store.add(input("Ann", 30, "1994-01-01", 3)).await?;
        store.add(input("Bo", 40, "1984-05-05", 5)).await?;
        store.update(2, input("Bo", 41, "1984-05-05", 6)).await?;

        let reopened = TeacherStore::new(Arc::new(JsonFileBackend::new(&path, true).await?));
        let all = reopened.list().await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].age, 41);
        assert_eq!(reopened.add(input("Cy", 20, "2004-01-01", 1)).await?.id, 3);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
