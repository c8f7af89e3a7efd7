use std::sync::Arc;

use tracing::{error, info, warn};

use practice_core::Clock;
use practice_core::catalog::Catalog;
use practice_core::model::{EngineSettings, ProfileId, ProgressBook};
use storage::progress::ProgressRepository;
use storage::repository::Storage;

use super::machine::{PracticeSession, SessionEnded};
use super::motivation::learner_name;
use super::view::ProgressReport;
use crate::error::PersistenceError;

/// Loads learner state into sessions and persists it when they end.
///
/// Stored progress is scoped to `namespace`, one per catalog, so the same
/// profile keeps separate books for separate curricula.
#[derive(Clone)]
pub struct PracticeLoopService {
    catalog: Arc<Catalog>,
    settings: EngineSettings,
    clock: Clock,
    progress: ProgressRepository,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        namespace: &str,
        settings: EngineSettings,
        storage: &Storage,
    ) -> Self {
        Self {
            catalog,
            settings,
            clock: Clock::default(),
            progress: storage.progress(namespace),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Build an idle session from the profile's stored progress.
    ///
    /// Missing or corrupt data starts the learner from an empty store.
    pub async fn open_profile(&self, profile: &ProfileId) -> PracticeSession {
        let book = self.load_book(profile).await;
        let previous = self.progress.load_previous_count(profile).await;
        info!(
            profile = %profile,
            categories = book.len(),
            previous,
            "profile opened"
        );

        PracticeSession::new(
            Arc::clone(&self.catalog),
            self.settings.clone(),
            book,
            previous,
        )
        .with_clock(self.clock)
        .with_learner(learner_name(profile.as_str()))
    }

    /// Persist the progress snapshot and the completed count of a finished session.
    ///
    /// Both writes are attempted even if the first fails.
    ///
    /// # Errors
    ///
    /// Returns the first `PersistenceError` encountered.
    pub async fn finish_session(
        &self,
        profile: &ProfileId,
        ended: &SessionEnded,
    ) -> Result<(), PersistenceError> {
        let saved_progress = self.progress.save_progress(profile, ended.progress()).await;
        let saved_count = self
            .progress
            .save_previous_count(profile, ended.summary().questions_completed())
            .await;

        for result in [&saved_progress, &saved_count] {
            if let Err(err) = result {
                error!(profile = %profile, error = %err, "failed to persist session");
            }
        }
        saved_progress?;
        saved_count?;
        info!(
            profile = %profile,
            completed = ended.summary().questions_completed(),
            "session persisted"
        );
        Ok(())
    }

    /// Rows for the home/report view, sorted by display name.
    pub async fn progress_report(&self, profile: &ProfileId) -> ProgressReport {
        let mut book = self.load_book(profile).await;
        book.refresh_names(&self.catalog);
        ProgressReport::from_book(&book)
    }

    async fn load_book(&self, profile: &ProfileId) -> ProgressBook {
        let mut book = self.progress.load_progress(profile).await;
        let dropped = book.retain_known(&self.catalog);
        if dropped > 0 {
            warn!(
                profile = %profile,
                namespace = self.progress.namespace(),
                dropped,
                "ignoring progress for categories outside the catalog"
            );
        }
        book
    }

    /// Forget all stored progress for the profile.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Storage` if the store rejects the removal.
    pub async fn reset_profile(&self, profile: &ProfileId) -> Result<(), PersistenceError> {
        self.progress.reset(profile).await?;
        info!(profile = %profile, "profile progress reset");
        Ok(())
    }
}
