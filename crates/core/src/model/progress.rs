use std::collections::BTreeMap;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::model::ids::CategoryId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("correct ({correct}) exceeds attempted ({attempted})")]
    CorrectExceedsAttempted { correct: u32, attempted: u32 },
}

/// Mastery below this is shown as low.
pub const LOW_MASTERY_BELOW: f64 = 0.40;
/// Mastery below this (and at least `LOW_MASTERY_BELOW`) is shown as mid.
pub const MID_MASTERY_BELOW: f64 = 0.75;

/// Coarse bucket used to colour report rows and chart bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasteryBand {
    Low,
    Mid,
    High,
}

impl MasteryBand {
    #[must_use]
    pub fn for_mastery(mastery: f64) -> Self {
        if mastery < LOW_MASTERY_BELOW {
            Self::Low
        } else if mastery < MID_MASTERY_BELOW {
            Self::Mid
        } else {
            Self::High
        }
    }
}

/// Per-category counters.
///
/// Mastery is never stored; it is always derived from the two counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    display_name: String,
    attempted: u32,
    correct: u32,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            attempted: 0,
            correct: 0,
        }
    }

    /// Rehydrate a record from persisted counters.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::CorrectExceedsAttempted` if the counters are inconsistent.
    pub fn from_persisted(
        display_name: impl Into<String>,
        attempted: u32,
        correct: u32,
    ) -> Result<Self, ProgressError> {
        if correct > attempted {
            return Err(ProgressError::CorrectExceedsAttempted { correct, attempted });
        }
        Ok(Self {
            display_name: display_name.into(),
            attempted,
            correct,
        })
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn attempted(&self) -> u32 {
        self.attempted
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn mastery(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempted)
        }
    }

    #[must_use]
    pub fn mastery_percent(&self) -> f64 {
        self.mastery() * 100.0
    }

    #[must_use]
    pub fn band(&self) -> MasteryBand {
        MasteryBand::for_mastery(self.mastery())
    }

    fn record(&mut self, was_correct: bool) {
        // Both counters saturate together so correct never overtakes attempted.
        if self.attempted == u32::MAX {
            return;
        }
        self.attempted += 1;
        if was_correct {
            self.correct += 1;
        }
    }

    fn rename(&mut self, display_name: &str) {
        if self.display_name != display_name {
            display_name.clone_into(&mut self.display_name);
        }
    }
}

/// Snapshot handed to reporting and persistence.
pub type ProgressSnapshot = BTreeMap<CategoryId, ProgressRecord>;

/// In-memory progress store keyed by category id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressBook {
    records: BTreeMap<CategoryId, ProgressRecord>,
}

impl ProgressBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = (CategoryId, ProgressRecord)>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Count one attempt, creating the record on first use.
    ///
    /// `display_name` refreshes the stored name so catalog renames propagate.
    pub fn record_attempt(
        &mut self,
        category_id: &CategoryId,
        display_name: &str,
        was_correct: bool,
    ) -> &ProgressRecord {
        let record = self
            .records
            .entry(category_id.clone())
            .or_insert_with(|| ProgressRecord::new(display_name));
        record.rename(display_name);
        record.record(was_correct);
        record
    }

    #[must_use]
    pub fn get(&self, category_id: &CategoryId) -> Option<&ProgressRecord> {
        self.records.get(category_id)
    }

    /// Attempts recorded for a category, zero when it has never been practised.
    #[must_use]
    pub fn attempted(&self, category_id: &CategoryId) -> u32 {
        self.get(category_id).map_or(0, ProgressRecord::attempted)
    }

    /// Mastery for a category, zero when it has never been practised.
    #[must_use]
    pub fn mastery(&self, category_id: &CategoryId) -> f64 {
        self.get(category_id).map_or(0.0, ProgressRecord::mastery)
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.records.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &ProgressRecord)> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace stored display names with the catalog's for every known category.
    pub fn refresh_names(&mut self, catalog: &Catalog) {
        for (id, record) in &mut self.records {
            if let Some(name) = catalog.display_name(id) {
                record.rename(name);
            }
        }
    }

    /// Drop records whose category is not in `catalog`; returns how many were dropped.
    pub fn retain_known(&mut self, catalog: &Catalog) -> usize {
        let before = self.records.len();
        self.records.retain(|id, _| catalog.category(id).is_some());
        before - self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> CategoryId {
        CategoryId::new(raw).unwrap()
    }

    #[test]
    fn record_attempt_creates_and_counts() {
        let mut book = ProgressBook::new();
        let number = id("number");

        book.record_attempt(&number, "Number", true);
        book.record_attempt(&number, "Number", false);
        let record = book.record_attempt(&number, "Number", true);

        assert_eq!(record.attempted(), 3);
        assert_eq!(record.correct(), 2);
        assert!((record.mastery() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mastery_is_zero_without_attempts() {
        let record = ProgressRecord::new("Algebra");
        assert_eq!(record.mastery(), 0.0);
        assert_eq!(record.band(), MasteryBand::Low);

        let book = ProgressBook::new();
        assert_eq!(book.mastery(&id("algebra")), 0.0);
        assert_eq!(book.attempted(&id("algebra")), 0);
    }

    #[test]
    fn from_persisted_rejects_inconsistent_counters() {
        let err = ProgressRecord::from_persisted("Number", 2, 3).unwrap_err();
        assert_eq!(
            err,
            ProgressError::CorrectExceedsAttempted {
                correct: 3,
                attempted: 2
            }
        );
    }

    #[test]
    fn counters_stay_ordered_under_many_attempts() {
        let mut book = ProgressBook::new();
        let geometry = id("geometry");
        for i in 0..50 {
            book.record_attempt(&geometry, "Geometry", i % 3 == 0);
            let record = book.get(&geometry).unwrap();
            assert!(record.correct() <= record.attempted());
            let expected = f64::from(record.correct()) / f64::from(record.attempted());
            assert!((record.mastery() - expected).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn record_attempt_refreshes_display_name() {
        let mut book = ProgressBook::from_records([(
            id("number"),
            ProgressRecord::from_persisted("number", 1, 1).unwrap(),
        )]);
        book.record_attempt(&id("number"), "Number & Place Value", false);
        assert_eq!(
            book.get(&id("number")).unwrap().display_name(),
            "Number & Place Value"
        );
    }

    #[test]
    fn retain_known_drops_categories_outside_the_catalog() {
        let catalog = crate::curricula::year9().unwrap();
        let mut book = ProgressBook::new();
        book.record_attempt(&id("number"), "Number", true);
        book.record_attempt(&id("fractions_decimals"), "Fractions & Decimals", false);

        assert_eq!(book.retain_known(&catalog), 1);
        assert_eq!(book.len(), 1);
        assert_eq!(book.attempted(&id("number")), 1);
        assert_eq!(book.get(&id("fractions_decimals")), None);
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(MasteryBand::for_mastery(0.39), MasteryBand::Low);
        assert_eq!(MasteryBand::for_mastery(0.40), MasteryBand::Mid);
        assert_eq!(MasteryBand::for_mastery(0.749), MasteryBand::Mid);
        assert_eq!(MasteryBand::for_mastery(0.75), MasteryBand::High);
    }
}
