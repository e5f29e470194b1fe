//! Wizard checkpoints on top of a key/value store

use super::{KeyValueStore, StorageError};
use crate::state::{Answers, Checkpoint, SubmissionPayload, TOTAL_STEPS};
use tracing::warn;

pub const ANSWERS_KEY: &str = "hodevweb_diagnostic";
pub const STEP_KEY: &str = "hodevweb_step";
pub const BACKUP_KEY: &str = "hodevweb_diagnostic_final";

/// Persists wizard progress under fixed keys.
///
/// Reads never fail: missing, corrupt or out-of-range entries mean
/// "no saved session".
pub struct ProgressStore {
    store: Box<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<(), StorageError> {
        let answers = serde_json::to_string(&checkpoint.answers)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.save(ANSWERS_KEY, &answers)?;
        self.store.save(STEP_KEY, &checkpoint.step.to_string())
    }

    pub fn load_checkpoint(&self) -> Option<Checkpoint> {
        let step = self.read(STEP_KEY)?.trim().parse::<usize>().ok()?;
        if !(1..=TOTAL_STEPS).contains(&step) {
            warn!(step, "ignoring out-of-range saved step");
            return None;
        }
        let answers = match self.read(ANSWERS_KEY) {
            Some(raw) => match serde_json::from_str::<Answers>(&raw) {
                Ok(answers) => answers,
                Err(e) => {
                    warn!(error = %e, "ignoring corrupt saved answers");
                    return None;
                }
            },
            None => Answers::new(),
        };
        Some(Checkpoint { step, answers })
    }

    /// Keep a copy of a payload that could not be delivered.
    pub fn backup(&mut self, payload: &SubmissionPayload) -> Result<(), StorageError> {
        let json = serde_json::to_string(payload)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.save(BACKUP_KEY, &json)
    }

    pub fn load_backup(&self) -> Option<SubmissionPayload> {
        serde_json::from_str(&self.read(BACKUP_KEY)?).ok()
    }

    /// Remove progress and backup so a completed session is never resumed.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        for key in [ANSWERS_KEY, STEP_KEY, BACKUP_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.load(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read saved progress");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Answer;
    use crate::storage::{MemoryStore, MockKeyValueStore};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn checkpoint(step: usize) -> Checkpoint {
        let mut answers = Answers::new();
        answers.insert("nome".into(), Answer::Text("Ana".into()));
        answers.insert(
            "canais_atuais".into(),
            Answer::Choices(vec!["Instagram".into()]),
        );
        Checkpoint { step, answers }
    }

    #[test]
    fn test_checkpoint_round_trip() {
        let mut progress = ProgressStore::new(Box::new(MemoryStore::new()));
        assert_eq!(progress.load_checkpoint(), None);
        progress.save_checkpoint(&checkpoint(5)).unwrap();
        assert_eq!(progress.load_checkpoint(), Some(checkpoint(5)));
    }

    #[test]
    fn test_out_of_range_step_is_no_session() {
        let mut store = MemoryStore::new();
        store.save(STEP_KEY, "42").unwrap();
        let progress = ProgressStore::new(Box::new(store));
        assert_eq!(progress.load_checkpoint(), None);
    }

    #[test]
    fn test_corrupt_answers_are_no_session() {
        let mut store = MemoryStore::new();
        store.save(STEP_KEY, "3").unwrap();
        store.save(ANSWERS_KEY, "{oops").unwrap();
        let progress = ProgressStore::new(Box::new(store));
        assert_eq!(progress.load_checkpoint(), None);
    }

    #[test]
    fn test_clear_removes_all_keys() {
        let mut progress = ProgressStore::new(Box::new(MemoryStore::new()));
        progress.save_checkpoint(&checkpoint(3)).unwrap();
        let now = Utc::now();
        let payload = SubmissionPayload::build(&checkpoint(3).answers, now, now);
        progress.backup(&payload).unwrap();
        assert_eq!(progress.load_backup(), Some(payload));
        progress.clear().unwrap();
        assert_eq!(progress.load_checkpoint(), None);
        assert_eq!(progress.load_backup(), None);
    }

    #[test]
    fn test_read_failure_is_no_session() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_load()
            .returning(|_| Err(StorageError::Io("disk gone".into())));
        let progress = ProgressStore::new(Box::new(store));
        assert_eq!(progress.load_checkpoint(), None);
        assert_eq!(progress.load_backup(), None);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_save()
            .returning(|_, _| Err(StorageError::Io("quota".into())));
        let mut progress = ProgressStore::new(Box::new(store));
        assert!(progress.save_checkpoint(&checkpoint(2)).is_err());
    }
}
