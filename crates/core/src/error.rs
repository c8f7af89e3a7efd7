use thiserror::Error;

use crate::catalog::CatalogError;
use crate::curricula::UnknownGrade;
use crate::model::{IdError, ProgressError, QuestionError, SessionSummaryError, SettingsError};
use crate::quiz::QuizError;
use crate::selector::SelectionError;

/// Aggregate of every error the core crate can raise.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Grade(#[from] UnknownGrade),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
