mod machine;
mod motivation;
mod ticker;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use machine::{
    IgnoredReason, NextOutcome, PracticeSession, QuestionSlot, SessionEnded, SubmitOutcome,
    TickOutcome,
};
pub use motivation::{MOTIVATIONAL_MESSAGES, motivational_message};
pub use ticker::{Tick, TickSource};
pub use view::{AnswerFeedback, ChartSnapshot, ProgressReport, QuestionView, ReportRow};
pub use workflow::PracticeLoopService;
