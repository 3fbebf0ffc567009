//! In-memory store guarded by a single lock.
//!
//! Every operation takes the same [`tokio::sync::Mutex`]. `add` and `update`
//! keep holding it while the simulated work runs, so the existence check and
//! the write that follows it are one critical section.

use std::collections::BTreeMap;
use async_trait::async_trait;
use rollbook_core::{RollNo, Student};
use rollbook_work::Loader;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{RecordStore, StoreError, Result};

/// In-memory student store.
pub struct StudentStore {
    records: Mutex<BTreeMap<RollNo, Student>>,
    loader: Loader,
}

impl StudentStore {
    /// Create an empty store that runs `loader` before each add and update.
    pub fn new(loader: Loader) -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            loader,
        }
    }

    /// The loader used for simulated work.
    pub fn loader(&self) -> &Loader {
        &self.loader
    }
}

impl Default for StudentStore {
    fn default() -> Self {
        Self::new(Loader::default())
    }
}

#[async_trait]
impl RecordStore for StudentStore {
    async fn add(&self, student: Student) -> Result<()> {
        student.validate()?;
        let roll_no = student.roll_no();

        let mut records = self.records.lock().await;
        if records.contains_key(&roll_no) {
            return Err(StoreError::duplicate(roll_no));
        }

        let outcome = self.loader.run("Loading").await;
        records.insert(roll_no, student);

        info!(%roll_no, ?outcome, "student added");
        Ok(())
    }

    async fn delete(&self, roll_no: RollNo) -> Result<Student> {
        let removed = self.records.lock().await.remove(&roll_no);
        let student = removed.ok_or_else(|| StoreError::not_found(roll_no))?;

        info!(%roll_no, "student deleted");
        Ok(student)
    }

    async fn update(&self, roll_no: RollNo, student: Student) -> Result<()> {
        student.validate()?;

        let mut records = self.records.lock().await;
        if !records.contains_key(&roll_no) {
            return Err(StoreError::not_found(roll_no));
        }

        let outcome = self.loader.run("Updating").await;
        if student.roll_no() != roll_no {
            debug!(%roll_no, embedded = %student.roll_no(), "record stored under lookup key");
        }
        records.insert(roll_no, student);

        info!(%roll_no, ?outcome, "student updated");
        Ok(())
    }

    async fn search(&self, roll_no: RollNo) -> Result<Student> {
        let records = self.records.lock().await;
        debug!(%roll_no, "search");
        records
            .get(&roll_no)
            .cloned()
            .ok_or_else(|| StoreError::not_found(roll_no))
    }

    async fn list_all(&self) -> Vec<Student> {
        let records = self.records.lock().await;
        debug!(count = records.len(), "list all");
        records.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollbook_core::Grade;
    use rollbook_work::{LoaderConfig, LoadOutcome};
    use std::time::Duration;

    fn fast_store() -> StudentStore {
        StudentStore::new(Loader::new().with_config(LoaderConfig {
            ticks: 1,
            tick_interval: Duration::from_millis(1),
        }))
    }

    fn student(roll_no: i32, name: &str, marks: f64) -> Student {
        Student::new(roll_no, name, format!("{}@mail.com", name.to_lowercase()), "BCA", marks)
    }

    #[tokio::test]
    async fn test_add_then_search() {
        let store = fast_store();
        store.add(student(1, "Asha", 91.0)).await.unwrap();

        let found = store.search(RollNo::new(1)).await.unwrap();
        assert_eq!(found.name(), "Asha");
        assert_eq!(found.grade(), Grade::A);
    }

    #[tokio::test]
    async fn test_duplicate_add_keeps_first() {
        let store = fast_store();
        store.add(student(5, "First", 70.0)).await.unwrap();

        let err = store.add(student(5, "Second", 95.0)).await.unwrap_err();
        assert_eq!(err, StoreError::Validation("Duplicate roll number: 5".to_string()));

        let kept = store.search(RollNo::new(5)).await.unwrap();
        assert_eq!(kept.name(), "First");
        assert_eq!(store.list_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_record() {
        let store = fast_store();

        let err = store.add(student(1, "Asha", 101.0)).await.unwrap_err();
        assert!(err.is_validation());

        let err = store.add(Student::new(2, "", "x@y.z", "BCA", 50.0)).await.unwrap_err();
        assert_eq!(err.to_string(), "Name cannot be empty.");

        assert!(store.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let store = fast_store();
        store.add(student(1, "Asha", 50.0)).await.unwrap();

        assert!(store.search(RollNo::new(2)).await.unwrap_err().is_not_found());
        assert!(store.delete(RollNo::new(2)).await.unwrap_err().is_not_found());
        let err = store.update(RollNo::new(2), student(2, "Ravi", 60.0)).await.unwrap_err();
        assert_eq!(err.to_string(), "Roll no 2 not found.");

        assert_eq!(store.list_all().await, vec![student(1, "Asha", 50.0)]);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let store = fast_store();
        store.add(student(3, "Old", 40.0)).await.unwrap();

        let replacement = Student::new(3, "New", "new@mail.com", "MCA", 88.0);
        store.update(RollNo::new(3), replacement.clone()).await.unwrap();

        let found = store.search(RollNo::new(3)).await.unwrap();
        assert_eq!(found, replacement);
        assert_eq!(found.course(), "MCA");
        assert_eq!(found.grade(), Grade::B);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_record() {
        let store = fast_store();
        store.add(student(3, "Old", 40.0)).await.unwrap();

        let err = store.update(RollNo::new(3), student(3, "New", -5.0)).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.search(RollNo::new(3)).await.unwrap().name(), "Old");
    }

    #[tokio::test]
    async fn test_update_with_mismatched_key_stores_under_lookup_key() {
        let store = fast_store();
        store.add(student(1, "Asha", 50.0)).await.unwrap();

        store.update(RollNo::new(1), student(2, "Ravi", 65.0)).await.unwrap();

        let found = store.search(RollNo::new(1)).await.unwrap();
        assert_eq!(found.roll_no(), RollNo::new(2));
        assert_eq!(found.name(), "Ravi");
        assert!(store.search(RollNo::new(2)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let store = fast_store();
        store.add(student(9, "Asha", 50.0)).await.unwrap();

        let removed = store.delete(RollNo::new(9)).await.unwrap();
        assert_eq!(removed.name(), "Asha");
        assert!(store.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_all_empty_and_ordered() {
        let store = fast_store();
        assert!(store.list_all().await.is_empty());

        for roll_no in [30, 10, 20] {
            store.add(student(roll_no, "S", 50.0)).await.unwrap();
        }
        let keys: Vec<i32> = store.list_all().await.iter().map(|s| s.roll_no().get()).collect();
        assert_eq!(keys, vec![10, 20, 30]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_and_update_wait_for_simulated_work() {
        let store = StudentStore::default();
        let total = store.loader().config().total_duration();

        let start = tokio::time::Instant::now();
        store.add(student(1, "Asha", 50.0)).await.unwrap();
        assert!(start.elapsed() >= total);

        let start = tokio::time::Instant::now();
        store.update(RollNo::new(1), student(1, "Asha", 60.0)).await.unwrap();
        assert!(start.elapsed() >= total);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_and_delete_do_not_wait() {
        let store = StudentStore::default();
        store.add(student(1, "Asha", 50.0)).await.unwrap();

        let start = tokio::time::Instant::now();
        store.search(RollNo::new(1)).await.unwrap();
        store.list_all().await;
        store.delete(RollNo::new(1)).await.unwrap();
        assert!(start.elapsed() < store.loader().config().tick_interval);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_work_still_applies_mutation() {
        let store = StudentStore::default();
        store.loader().interrupt_handle().interrupt();

        let start = tokio::time::Instant::now();
        store.add(student(4, "Asha", 50.0)).await.unwrap();
        assert!(start.elapsed() < store.loader().config().total_duration());
        assert_eq!(store.loader().run("probe").await, LoadOutcome::Interrupted { completed: 0 });

        store.update(RollNo::new(4), student(4, "Asha", 95.0)).await.unwrap();
        assert_eq!(store.search(RollNo::new(4)).await.unwrap().grade(), Grade::A);
    }
}
