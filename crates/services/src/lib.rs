#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use practice_core::Clock;

pub use error::{PersistenceError, SessionError};
pub use sessions::{
    AnswerFeedback, ChartSnapshot, IgnoredReason, NextOutcome, PracticeLoopService,
    PracticeSession, ProgressReport, QuestionSlot, QuestionView, ReportRow, SessionEnded,
    SubmitOutcome, Tick, TickOutcome, TickSource,
};
