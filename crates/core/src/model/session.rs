use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("ended_at is before started_at")]
    InvalidTimeRange,
}

/// Lifecycle of a practice session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Active,
    Ended,
}

/// Why a session left the active phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimerExpired,
    EndedEarly,
}

/// Aggregate of a finished practice session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    questions_completed: u32,
    correct: u32,
    reason: EndReason,
}

impl SessionSummary {
    /// Build a summary for a session that just ended.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `ended_at` is before `started_at`.
    pub fn new(
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        questions_completed: u32,
        correct: u32,
        reason: EndReason,
    ) -> Result<Self, SessionSummaryError> {
        if ended_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        Ok(Self {
            started_at,
            ended_at,
            questions_completed,
            correct: correct.min(questions_completed),
            reason,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    #[must_use]
    pub fn questions_completed(&self) -> u32 {
        self.questions_completed
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn reason(&self) -> EndReason {
        self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn summary_rejects_reversed_range() {
        let now = fixed_now();
        let err = SessionSummary::new(now, now - chrono::Duration::seconds(1), 0, 0, EndReason::EndedEarly)
            .unwrap_err();
        assert_eq!(err, SessionSummaryError::InvalidTimeRange);
    }

    #[test]
    fn summary_clamps_correct_to_completed() {
        let now = fixed_now();
        let summary = SessionSummary::new(now, now, 2, 5, EndReason::TimerExpired).unwrap();
        assert_eq!(summary.correct(), 2);
        assert_eq!(summary.reason(), EndReason::TimerExpired);
    }
}
