mod ids;
mod progress;
mod question;
mod session;
mod settings;

pub use ids::{CategoryId, IdError, ProfileId};
pub use progress::{
    LOW_MASTERY_BELOW, MID_MASTERY_BELOW, MasteryBand, ProgressBook, ProgressError,
    ProgressRecord, ProgressSnapshot,
};
pub use question::{Answer, Diagram, Generated, Question, QuestionError};
pub use session::{EndReason, SessionPhase, SessionSummary, SessionSummaryError};
pub use settings::{EngineSettings, SettingsError};
