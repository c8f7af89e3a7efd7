//! Progress snapshots persisted as JSON under per-curriculum, per-profile keys.

use std::collections::BTreeMap;
use std::sync::Arc;

use practice_core::model::{CategoryId, ProfileId, ProgressBook, ProgressRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::repository::{KeyValueStore, StorageError};

/// Persisted shape of one category's counters.
///
/// `mastery` is written for readers of the raw blob and ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecordDto {
    #[serde(default)]
    pub name: String,
    pub correct: i64,
    pub attempted: i64,
    #[serde(default)]
    pub mastery: f64,
}

impl ProgressRecordDto {
    #[must_use]
    pub fn from_record(record: &ProgressRecord) -> Self {
        Self {
            name: record.display_name().to_owned(),
            correct: i64::from(record.correct()),
            attempted: i64::from(record.attempted()),
            mastery: record.mastery(),
        }
    }

    /// Rebuild the domain record; a blank name falls back to the category id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for negative or inconsistent counters.
    pub fn into_record(self, id: &CategoryId) -> Result<ProgressRecord, StorageError> {
        let attempted = u32::try_from(self.attempted)
            .map_err(|_| StorageError::Serialization(format!("attempted out of range: {}", self.attempted)))?;
        let correct = u32::try_from(self.correct)
            .map_err(|_| StorageError::Serialization(format!("correct out of range: {}", self.correct)))?;
        let name = if self.name.trim().is_empty() {
            id.as_str().to_owned()
        } else {
            self.name
        };
        ProgressRecord::from_persisted(name, attempted, correct)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

/// Key of a profile's progress blob within a curriculum namespace.
#[must_use]
pub fn progress_key(namespace: &str, profile: &ProfileId) -> String {
    format!("progress:{namespace}:{profile}")
}

#[must_use]
pub fn previous_session_key(namespace: &str, profile: &ProfileId) -> String {
    format!("last_session_questions:{namespace}:{profile}")
}

/// Loads and saves one profile's progress book and previous-session count.
///
/// Keys are scoped to a namespace, one per curriculum, so books for
/// different catalogs never mix. Loads never fail: unreadable or corrupt
/// data degrades to empty defaults with a warning. Saves report errors so a
/// caller can tell the user.
#[derive(Clone)]
pub struct ProgressRepository {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl ProgressRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub async fn load_progress(&self, profile: &ProfileId) -> ProgressBook {
        let key = progress_key(&self.namespace, profile);
        let raw = match self.store.load(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(%profile, "no stored progress");
                return ProgressBook::new();
            }
            Err(err) => {
                warn!(%profile, error = %err, "progress load failed; starting empty");
                return ProgressBook::new();
            }
        };

        // Only a blob that is not a JSON object is discarded; bad entries are
        // dropped individually.
        let parsed: BTreeMap<String, Value> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    namespace = %self.namespace,
                    %profile,
                    error = %err,
                    "corrupt progress blob; discarding"
                );
                if let Err(err) = self.store.remove(&key).await {
                    warn!(%profile, error = %err, "could not remove corrupt progress blob");
                }
                return ProgressBook::new();
            }
        };

        let records = parsed.into_iter().filter_map(|(raw_id, value)| {
            let id = match CategoryId::new(raw_id.as_str()) {
                Ok(id) => id,
                Err(err) => {
                    warn!(%profile, category = %raw_id, error = %err, "dropping record with bad id");
                    return None;
                }
            };
            let record = serde_json::from_value::<ProgressRecordDto>(value)
                .map_err(|err| StorageError::Serialization(err.to_string()))
                .and_then(|dto| dto.into_record(&id));
            match record {
                Ok(record) => Some((id, record)),
                Err(err) => {
                    warn!(%profile, category = %id, error = %err, "dropping invalid record");
                    None
                }
            }
        });
        let book = ProgressBook::from_records(records);
        debug!(%profile, categories = book.len(), "progress loaded");
        book
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be serialized or stored.
    pub async fn save_progress(
        &self,
        profile: &ProfileId,
        progress: &ProgressBook,
    ) -> Result<(), StorageError> {
        let snapshot: BTreeMap<&str, ProgressRecordDto> = progress
            .iter()
            .map(|(id, record)| (id.as_str(), ProgressRecordDto::from_record(record)))
            .collect();
        let json = serde_json::to_string(&snapshot)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.store.save(&progress_key(&self.namespace, profile), &json).await?;
        debug!(%profile, categories = snapshot.len(), "progress saved");
        Ok(())
    }

    /// Questions completed in the profile's last session; 0 when unknown.
    pub async fn load_previous_count(&self, profile: &ProfileId) -> u32 {
        match self.store.load(&previous_session_key(&self.namespace, profile)).await {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(%profile, value = %raw, "malformed previous-session count");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                warn!(%profile, error = %err, "previous-session count load failed");
                0
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the count cannot be stored.
    pub async fn save_previous_count(
        &self,
        profile: &ProfileId,
        count: u32,
    ) -> Result<(), StorageError> {
        self.store
            .save(&previous_session_key(&self.namespace, profile), &count.to_string())
            .await
    }

    /// Forget everything stored for the profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either key cannot be removed.
    pub async fn reset(&self, profile: &ProfileId) -> Result<(), StorageError> {
        self.store.remove(&progress_key(&self.namespace, profile)).await?;
        self.store.remove(&previous_session_key(&self.namespace, profile)).await?;
        debug!(%profile, "progress reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;

    const NS: &str = "year9";

    fn profile(name: &str) -> ProfileId {
        ProfileId::new(name).unwrap()
    }

    fn id(raw: &str) -> CategoryId {
        CategoryId::new(raw).unwrap()
    }

    fn repo() -> (ProgressRepository, InMemoryStore) {
        let store = InMemoryStore::new();
        (ProgressRepository::new(Arc::new(store.clone()), NS), store)
    }

    #[tokio::test]
    async fn saved_snapshot_reloads_identically() {
        let (repo, _) = repo();
        let hudson = profile("hudson");
        let mut book = ProgressBook::new();
        book.record_attempt(&id("number"), "Number", true);
        book.record_attempt(&id("number"), "Number", false);
        book.record_attempt(&id("algebra"), "Algebra", true);

        repo.save_progress(&hudson, &book).await.unwrap();
        let loaded = repo.load_progress(&hudson).await;
        assert_eq!(loaded, book);
    }

    #[tokio::test]
    async fn profiles_are_isolated() {
        let (repo, _) = repo();
        let mut book = ProgressBook::new();
        book.record_attempt(&id("number"), "Number", true);
        repo.save_progress(&profile("baxter"), &book).await.unwrap();
        repo.save_previous_count(&profile("baxter"), 7).await.unwrap();

        assert!(repo.load_progress(&profile("hudson")).await.is_empty());
        assert_eq!(repo.load_previous_count(&profile("hudson")).await, 0);
        assert_eq!(repo.load_previous_count(&profile("baxter")).await, 7);
    }

    #[tokio::test]
    async fn corrupt_blob_is_removed_and_reads_empty() {
        let (repo, store) = repo();
        let hudson = profile("hudson");
        store.save(&progress_key(NS, &hudson), "{not json").await.unwrap();

        assert!(repo.load_progress(&hudson).await.is_empty());
        assert_eq!(store.load(&progress_key(NS, &hudson)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn inconsistent_records_are_dropped_individually() {
        let (repo, store) = repo();
        let hudson = profile("hudson");
        let blob = r#"{
            "number": {"name": "Number", "correct": 2, "attempted": 3, "mastery": 0.66},
            "algebra": {"name": "Algebra", "correct": 5, "attempted": 1, "mastery": 5.0},
            "geometry": {"name": "Geometry", "correct": -1, "attempted": 4},
            "statistics": {"correct": 0, "attempted": 2}
        }"#;
        store.save(&progress_key(NS, &hudson), blob).await.unwrap();

        let book = repo.load_progress(&hudson).await;
        assert_eq!(book.len(), 2);
        let number = book.get(&id("number")).unwrap();
        assert_eq!((number.correct(), number.attempted()), (2, 3));
        assert_eq!(book.get(&id("statistics")).unwrap().display_name(), "statistics");
        assert!(book.get(&id("algebra")).is_none());
    }

    #[tokio::test]
    async fn malformed_previous_count_reads_zero() {
        let (repo, store) = repo();
        let hudson = profile("hudson");
        store.save(&previous_session_key(NS, &hudson), "-3").await.unwrap();
        assert_eq!(repo.load_previous_count(&hudson).await, 0);
        store.save(&previous_session_key(NS, &hudson), "abc").await.unwrap();
        assert_eq!(repo.load_previous_count(&hudson).await, 0);
    }

    #[tokio::test]
    async fn reset_clears_both_keys() {
        let (repo, store) = repo();
        let hudson = profile("hudson");
        let mut book = ProgressBook::new();
        book.record_attempt(&id("number"), "Number", true);
        repo.save_progress(&hudson, &book).await.unwrap();
        repo.save_previous_count(&hudson, 3).await.unwrap();

        repo.reset(&hudson).await.unwrap();
        assert_eq!(store.load(&progress_key(NS, &hudson)).await.unwrap(), None);
        assert_eq!(store.load(&previous_session_key(NS, &hudson)).await.unwrap(), None);
        assert!(repo.load_progress(&hudson).await.is_empty());
    }

    #[tokio::test]
    async fn wrong_typed_record_does_not_discard_the_rest() {
        let (repo, store) = repo();
        let hudson = profile("hudson");
        let blob = r#"{
            "number": {"name": "Number", "correct": 40, "attempted": 50, "mastery": 0.8},
            "algebra": {"name": "Algebra", "correct": 1.5, "attempted": 2, "mastery": 0.75},
            "geometry": {"name": "Geometry", "correct": "3", "attempted": 4}
        }"#;
        store.save(&progress_key(NS, &hudson), blob).await.unwrap();

        let book = repo.load_progress(&hudson).await;
        assert_eq!(book.len(), 1);
        let number = book.get(&id("number")).unwrap();
        assert_eq!((number.correct(), number.attempted()), (40, 50));
        assert!(store.load(&progress_key(NS, &hudson)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn non_object_blob_is_discarded() {
        let (repo, store) = repo();
        let hudson = profile("hudson");
        store.save(&progress_key(NS, &hudson), "[1, 2]").await.unwrap();

        assert!(repo.load_progress(&hudson).await.is_empty());
        assert_eq!(store.load(&progress_key(NS, &hudson)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn namespaces_keep_curricula_apart() {
        let store = InMemoryStore::new();
        let year6 = ProgressRepository::new(Arc::new(store.clone()), "year6");
        let year9 = ProgressRepository::new(Arc::new(store.clone()), "year9");
        let learner = profile("learner");

        let mut book = ProgressBook::new();
        book.record_attempt(&id("number"), "Number & Place Value", true);
        book.record_attempt(&id("fractions_decimals"), "Fractions & Decimals", false);
        year6.save_progress(&learner, &book).await.unwrap();
        year6.save_previous_count(&learner, 2).await.unwrap();

        assert!(year9.load_progress(&learner).await.is_empty());
        assert_eq!(year9.load_previous_count(&learner).await, 0);
        assert_eq!(year6.load_progress(&learner).await, book);

        year9.reset(&learner).await.unwrap();
        assert_eq!(year6.load_previous_count(&learner).await, 2);
    }
}
