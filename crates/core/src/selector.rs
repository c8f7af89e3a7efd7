//! Adaptive category ordering and question selection.
//!
//! Categories below the cold-start threshold always come first, weakest and
//! least-practised leading. The rest are ranked by mastery with a small
//! symmetric jitter so exact ties do not resolve the same way every time.

use rand::{Rng, RngCore};
use thiserror::Error;

use crate::catalog::{Catalog, Category};
use crate::checker::AnswerChecker;
use crate::model::{CategoryId, EngineSettings, Generated, ProgressBook, Question, QuestionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("the catalog has no categories")]
    EmptyCatalog,
    #[error("no category in the catalog has any skills")]
    NoSkills,
    #[error("every generator signalled skip after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
    #[error("skill {skill:?} produced an invalid question: {source}")]
    InvalidQuestion {
        skill: String,
        #[source]
        source: QuestionError,
    },
}

/// A question ready to present, with the context needed to grade it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedQuestion {
    category_id: CategoryId,
    display_name: String,
    skill_name: String,
    question: Question,
    checker: AnswerChecker,
}

impl SelectedQuestion {
    #[must_use]
    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn skill_name(&self) -> &str {
        &self.skill_name
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// The question's own checker when it carries one, else the skill's.
    #[must_use]
    pub fn checker(&self) -> AnswerChecker {
        self.checker
    }

    #[must_use]
    pub fn grade(&self, user_input: &str) -> bool {
        self.checker.check(user_input, self.question.answer())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveSelector {
    cold_start_threshold: u32,
    mastery_jitter: f64,
    retry_cap: u32,
}

impl Default for AdaptiveSelector {
    fn default() -> Self {
        Self::new(&EngineSettings::default())
    }
}

impl AdaptiveSelector {
    #[must_use]
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            cold_start_threshold: settings.cold_start_threshold(),
            mastery_jitter: settings.mastery_jitter(),
            retry_cap: settings.selection_retry_cap(),
        }
    }

    /// Every catalog category, most in need of practice first.
    pub fn order(
        &self,
        catalog: &Catalog,
        progress: &ProgressBook,
        rng: &mut dyn RngCore,
    ) -> Vec<CategoryId> {
        self.ranked(catalog, progress, rng)
            .into_iter()
            .map(|category| category.id().clone())
            .collect()
    }

    fn ranked<'c>(
        &self,
        catalog: &'c Catalog,
        progress: &ProgressBook,
        rng: &mut dyn RngCore,
    ) -> Vec<&'c Category> {
        let mut cold = Vec::new();
        let mut warm = Vec::new();
        for category in catalog.categories() {
            let attempted = progress.attempted(category.id());
            let mastery = progress.mastery(category.id());
            if attempted < self.cold_start_threshold {
                cold.push((category, mastery, attempted));
            } else {
                let jitter = (rng.random::<f64>() * 2.0 - 1.0) * self.mastery_jitter;
                warm.push((category, mastery + jitter));
            }
        }

        // Stable sorts keep registration order for full ties.
        cold.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));
        warm.sort_by(|a, b| a.1.total_cmp(&b.1));

        cold.into_iter()
            .map(|(category, ..)| category)
            .chain(warm.into_iter().map(|(category, _)| category))
            .collect()
    }

    /// Pick the neediest category with skills, a random skill within it, and
    /// generate a question. A skip signal restarts the whole selection.
    ///
    /// # Errors
    ///
    /// [`SelectionError::EmptyCatalog`] and [`SelectionError::NoSkills`] are
    /// configuration errors. [`SelectionError::RetriesExhausted`] means every
    /// attempt hit a skipping generator. [`SelectionError::InvalidQuestion`]
    /// means a generator returned an empty prompt or answer.
    pub fn select(
        &self,
        catalog: &Catalog,
        progress: &ProgressBook,
        rng: &mut dyn RngCore,
    ) -> Result<SelectedQuestion, SelectionError> {
        if catalog.is_empty() {
            return Err(SelectionError::EmptyCatalog);
        }

        for _ in 0..self.retry_cap {
            let category = self
                .ranked(catalog, progress, rng)
                .into_iter()
                .find(|category| !category.skills().is_empty())
                .ok_or(SelectionError::NoSkills)?;

            let index = rng.random_range(0..category.skills().len());
            let skill = &category.skills()[index];

            let question = match skill.generate(rng) {
                Generated::Ready(question) => question,
                Generated::Skip => continue,
            };
            question
                .validate()
                .map_err(|source| SelectionError::InvalidQuestion {
                    skill: skill.name().to_owned(),
                    source,
                })?;

            let checker = question.checker_override().unwrap_or(skill.checker());
            return Ok(SelectedQuestion {
                category_id: category.id().clone(),
                display_name: category.display_name().to_owned(),
                skill_name: skill.name().to_owned(),
                question,
                checker,
            });
        }

        Err(SelectionError::RetriesExhausted {
            attempts: self.retry_cap,
        })
    }
}
