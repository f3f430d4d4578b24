//! Process-local collection. Contents vanish with the process.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use super::{Backend, RepoError, RepoResult, Repository};
use crate::record::Record;

/// A `Vec` behind a lock, plus the collection's counter.
pub struct MemoryRepository<T> {
    records: RwLock<Vec<T>>,
    next: AtomicU64,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next: AtomicU64::new(1),
        }
    }
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn list(&self) -> RepoResult<Vec<T>> {
        Ok(self.records.read()?.clone())
    }

    fn find(&self, key: &str) -> RepoResult<Option<T>> {
        let records = self.records.read()?;
        Ok(records.iter().find(|r| r.key() == key).cloned())
    }

    fn insert(&self, record: &T) -> RepoResult<()> {
        let key = record.key();
        let mut records = self.records.write()?;
        if records.iter().any(|r| r.key() == key) {
            return Err(RepoError::Duplicate(key));
        }
        if let Some(sequence) = record.sequence() {
            self.next.fetch_max(sequence.saturating_add(1), Ordering::AcqRel);
        }
        records.push(record.clone());
        Ok(())
    }

    fn update_with(&self, key: &str, apply: &mut dyn FnMut(&mut T)) -> RepoResult<Option<T>> {
        let mut records = self.records.write()?;
        Ok(records.iter_mut().find(|r| r.key() == key).map(|record| {
            apply(record);
            record.clone()
        }))
    }

    fn remove(&self, key: &str) -> RepoResult<Option<T>> {
        let mut records = self.records.write()?;
        let position = records.iter().position(|r| r.key() == key);
        Ok(position.map(|index| records.remove(index)))
    }

    fn next_sequence(&self) -> RepoResult<u64> {
        Ok(self.next.fetch_add(1, Ordering::AcqRel))
    }

    fn count(&self) -> RepoResult<usize> {
        Ok(self.records.read()?.len())
    }
}

/// Backend whose collections live only as long as the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryBackend;

impl Backend for MemoryBackend {
    fn repository<T: Record>(&self) -> Box<dyn Repository<T>> {
        Box::new(MemoryRepository::<T>::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::tests::{exercise_repository, note, Note};
    use std::sync::Arc;

    #[test]
    fn test_memory_repository_contract() {
        let repo = MemoryRepository::<Note>::new();
        exercise_repository(&repo);
    }

    #[test]
    fn test_concurrent_sequences_are_unique() {
        let repo = Arc::new(MemoryRepository::<Note>::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| repo.next_sequence().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let repo = Arc::new(MemoryRepository::<Note>::new());
        repo.insert(&note(1, "")).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        repo.update_with("1", &mut |n| n.text.push('x')).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.find("1").unwrap().unwrap().text.len(), 200);
    }
}
