use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use practice_core::Clock;
use practice_core::catalog::Catalog;
use practice_core::model::{
    EndReason, EngineSettings, ProgressBook, SessionPhase, SessionSummary,
};
use practice_core::selector::{AdaptiveSelector, SelectedQuestion, SelectionError};
use practice_core::time::format_countdown;

use super::motivation::motivational_message;
use super::view::AnswerFeedback;
use crate::error::SessionError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// The single question slot of an active session.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionSlot {
    Presented(SelectedQuestion),
    Answered {
        question: SelectedQuestion,
        feedback: AnswerFeedback,
    },
    /// Selection failed for this slot; the learner may still advance.
    Unavailable(SelectionError),
}

impl QuestionSlot {
    #[must_use]
    pub fn question(&self) -> Option<&SelectedQuestion> {
        match self {
            Self::Presented(question) | Self::Answered { question, .. } => Some(question),
            Self::Unavailable(_) => None,
        }
    }
}

/// Why a command was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    NotActive,
    NoPendingQuestion,
    EmptyAnswer,
    AwaitingAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Graded(AnswerFeedback),
    Ignored(IgnoredReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// A fresh slot is in place; the message is shown alongside it.
    Advanced { motivation: String },
    Ignored(IgnoredReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Running {
        remaining_secs: u32,
        motivation: Option<String>,
    },
    Expired(SessionEnded),
    Ignored,
}

/// Everything that must be persisted when a session leaves `Active`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEnded {
    summary: SessionSummary,
    progress: ProgressBook,
}

impl SessionEnded {
    #[must_use]
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Progress as of the end of the session, including its attempts.
    #[must_use]
    pub fn progress(&self) -> &ProgressBook {
        &self.progress
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Practice session state machine: `Idle -> Active -> Ended -> Idle`.
///
/// All commands are synchronous and never perform I/O. Persisting the
/// [`SessionEnded`] payload is the caller's job.
pub struct PracticeSession {
    catalog: Arc<Catalog>,
    selector: AdaptiveSelector,
    settings: EngineSettings,
    clock: Clock,
    rng: StdRng,
    learner: String,
    progress: ProgressBook,
    phase: SessionPhase,
    time_remaining_secs: u32,
    questions_completed: u32,
    correct_this_session: u32,
    previous_session_count: u32,
    started_at: Option<DateTime<Utc>>,
    slot: Option<QuestionSlot>,
}

impl PracticeSession {
    /// Create an idle session over `progress`, refreshing record names from the catalog.
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        settings: EngineSettings,
        mut progress: ProgressBook,
        previous_session_count: u32,
    ) -> Self {
        progress.refresh_names(&catalog);
        Self {
            selector: AdaptiveSelector::new(&settings),
            catalog,
            settings,
            clock: Clock::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
            learner: String::new(),
            progress,
            phase: SessionPhase::Idle,
            time_remaining_secs: 0,
            questions_completed: 0,
            correct_this_session: 0,
            previous_session_count,
            started_at: None,
            slot: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Name used in personalised motivational messages.
    #[must_use]
    pub fn with_learner(mut self, learner: impl Into<String>) -> Self {
        self.learner = learner.into();
        self
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    /// Remaining time as `m:ss`.
    #[must_use]
    pub fn countdown(&self) -> String {
        format_countdown(self.time_remaining_secs)
    }

    #[must_use]
    pub fn questions_completed(&self) -> u32 {
        self.questions_completed
    }

    #[must_use]
    pub fn correct_this_session(&self) -> u32 {
        self.correct_this_session
    }

    #[must_use]
    pub fn previous_session_count(&self) -> u32 {
        self.previous_session_count
    }

    /// The current slot; `Some` exactly while the session is active.
    #[must_use]
    pub fn slot(&self) -> Option<&QuestionSlot> {
        self.slot.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressBook {
        &self.progress
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    #[must_use]
    pub fn learner(&self) -> &str {
        &self.learner
    }

    /// Enter `Active`: reset the countdown and counters and present the first question.
    ///
    /// Returns the opening motivational message.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` unless the session is idle.
    pub fn start(&mut self) -> Result<String, SessionError> {
        if self.phase != SessionPhase::Idle {
            return Err(SessionError::WrongPhase {
                action: "start",
                phase: self.phase,
            });
        }

        self.phase = SessionPhase::Active;
        self.time_remaining_secs = self.settings.session_duration_secs();
        self.questions_completed = 0;
        self.correct_this_session = 0;
        self.started_at = Some(self.clock.now());
        info!(
            duration_secs = self.time_remaining_secs,
            previous = self.previous_session_count,
            "practice session started"
        );

        self.present_next();
        Ok(self.motivation())
    }

    /// Advance the countdown by one second.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the end-of-session summary cannot be built.
    pub fn tick(&mut self) -> Result<TickOutcome, SessionError> {
        if self.phase != SessionPhase::Active {
            return Ok(TickOutcome::Ignored);
        }

        self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        if self.time_remaining_secs == 0 {
            return self.end(EndReason::TimerExpired).map(TickOutcome::Expired);
        }

        let motivation = (self.time_remaining_secs % self.settings.motivation_interval_secs()
            == 0)
            .then(|| self.motivation());
        Ok(TickOutcome::Running {
            remaining_secs: self.time_remaining_secs,
            motivation,
        })
    }

    /// Grade `raw` against the pending question.
    ///
    /// A blank submission is ignored unless the canonical answer is `0`.
    pub fn submit_answer(&mut self, raw: &str) -> SubmitOutcome {
        if self.phase != SessionPhase::Active {
            return SubmitOutcome::Ignored(IgnoredReason::NotActive);
        }
        let Some(QuestionSlot::Presented(selected)) = &self.slot else {
            return SubmitOutcome::Ignored(IgnoredReason::NoPendingQuestion);
        };

        let answer = selected.question().answer();
        if raw.trim().is_empty() && !answer.is_zero_token() {
            return SubmitOutcome::Ignored(IgnoredReason::EmptyAnswer);
        }

        let is_correct = selected.grade(raw);
        let feedback = AnswerFeedback {
            is_correct,
            revealed_answer: answer.reveal(),
        };
        let category_id = selected.category_id().clone();
        let display_name = selected.display_name().to_owned();
        debug!(
            category = %category_id,
            skill = selected.skill_name(),
            is_correct,
            "answer graded"
        );

        self.progress
            .record_attempt(&category_id, &display_name, is_correct);
        self.questions_completed = self.questions_completed.saturating_add(1);
        if is_correct {
            self.correct_this_session = self.correct_this_session.saturating_add(1);
        }

        if let Some(QuestionSlot::Presented(question)) = self.slot.take() {
            self.slot = Some(QuestionSlot::Answered {
                question,
                feedback: feedback.clone(),
            });
        }
        SubmitOutcome::Graded(feedback)
    }

    /// Replace an answered or unavailable slot with a freshly selected question.
    pub fn request_next(&mut self) -> NextOutcome {
        if self.phase != SessionPhase::Active {
            return NextOutcome::Ignored(IgnoredReason::NotActive);
        }
        if matches!(self.slot, Some(QuestionSlot::Presented(_))) {
            return NextOutcome::Ignored(IgnoredReason::AwaitingAnswer);
        }

        let motivation = self.motivation();
        self.present_next();
        NextOutcome::Advanced { motivation }
    }

    /// Leave `Active` before the timer runs out. `None` when not active.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the end-of-session summary cannot be built.
    pub fn end_early(&mut self) -> Result<Option<SessionEnded>, SessionError> {
        if self.phase != SessionPhase::Active {
            return Ok(None);
        }
        self.end(EndReason::EndedEarly).map(Some)
    }

    /// `Ended -> Idle`. Returns whether the transition happened.
    pub fn return_home(&mut self) -> bool {
        if self.phase != SessionPhase::Ended {
            return false;
        }
        self.phase = SessionPhase::Idle;
        self.time_remaining_secs = 0;
        self.started_at = None;
        true
    }

    fn end(&mut self, reason: EndReason) -> Result<SessionEnded, SessionError> {
        let started_at = self.started_at.unwrap_or_else(|| self.clock.now());
        let ended_at = self.clock.now().max(started_at);
        let summary = SessionSummary::new(
            started_at,
            ended_at,
            self.questions_completed,
            self.correct_this_session,
            reason,
        )?;

        self.phase = SessionPhase::Ended;
        self.slot = None;
        self.previous_session_count = self.questions_completed;
        info!(
            ?reason,
            completed = self.questions_completed,
            correct = self.correct_this_session,
            "practice session ended"
        );

        Ok(SessionEnded {
            summary,
            progress: self.progress.clone(),
        })
    }

    fn present_next(&mut self) {
        let slot = match self
            .selector
            .select(&self.catalog, &self.progress, &mut self.rng)
        {
            Ok(selected) => {
                debug!(
                    category = %selected.category_id(),
                    skill = selected.skill_name(),
                    "question presented"
                );
                QuestionSlot::Presented(selected)
            }
            Err(err) => {
                warn!(error = %err, "unable to load question");
                QuestionSlot::Unavailable(err)
            }
        };
        self.slot = Some(slot);
    }

    fn motivation(&mut self) -> String {
        motivational_message(&mut self.rng, &self.learner)
    }
}

#[cfg(test)]
mod tests {
    use practice_core::catalog::{Category, Skill};
    use practice_core::checker::AnswerChecker;
    use practice_core::model::{Answer, CategoryId, Generated, Question};
    use practice_core::time::fixed_now;

    use super::*;

    fn id(raw: &str) -> CategoryId {
        CategoryId::new(raw).unwrap()
    }

    fn seven(_: &mut dyn rand::RngCore) -> Generated {
        Generated::Ready(Question::new("3 + 4", Answer::number(7.0)))
    }

    fn zero(_: &mut dyn rand::RngCore) -> Generated {
        Generated::Ready(Question::new("5 - 5", Answer::text("0")))
    }

    fn blank(_: &mut dyn rand::RngCore) -> Generated {
        Generated::Ready(Question::new("", Answer::number(1.0)))
    }

    fn catalog_with(generate: practice_core::generators::GenerateFn) -> Arc<Catalog> {
        let skills = vec![Skill::new("Fixed", generate, AnswerChecker::ExactNumeric)];
        Arc::new(Catalog::new(vec![Category::new(id("number"), "Number", skills)]).unwrap())
    }

    fn settings(duration: u32) -> EngineSettings {
        EngineSettings::new(duration, 2, 5, 0.005, 3).unwrap()
    }

    fn session(generate: practice_core::generators::GenerateFn, duration: u32) -> PracticeSession {
        PracticeSession::new(catalog_with(generate), settings(duration), ProgressBook::new(), 4)
            .with_clock(Clock::fixed(fixed_now()))
            .with_rng(StdRng::seed_from_u64(11))
            .with_learner("Hudson")
    }

    #[test]
    fn start_presents_a_question_and_resets_counters() {
        let mut session = session(seven, 60);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.slot().is_none());

        let message = session.start().unwrap();
        assert!(!message.is_empty());
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.time_remaining_secs(), 60);
        assert_eq!(session.countdown(), "1:00");
        assert_eq!(session.previous_session_count(), 4);
        assert!(matches!(session.slot(), Some(QuestionSlot::Presented(_))));

        let err = session.start().unwrap_err();
        assert!(matches!(err, SessionError::WrongPhase { action: "start", .. }));
    }

    #[test]
    fn correct_submission_records_progress_and_moves_to_answered() {
        let mut session = session(seven, 60);
        session.start().unwrap();

        let outcome = session.submit_answer("7");
        assert_eq!(
            outcome,
            SubmitOutcome::Graded(AnswerFeedback {
                is_correct: true,
                revealed_answer: "7".into(),
            })
        );
        assert_eq!(session.questions_completed(), 1);
        let record = session.progress().get(&id("number")).unwrap();
        assert_eq!((record.attempted(), record.correct()), (1, 1));
        assert!(matches!(session.slot(), Some(QuestionSlot::Answered { .. })));

        assert_eq!(
            session.submit_answer("7"),
            SubmitOutcome::Ignored(IgnoredReason::NoPendingQuestion)
        );
        assert_eq!(session.questions_completed(), 1);
    }

    #[test]
    fn incorrect_submission_reveals_the_answer() {
        let mut session = session(seven, 60);
        session.start().unwrap();

        let SubmitOutcome::Graded(feedback) = session.submit_answer("eight") else {
            panic!("expected a graded outcome");
        };
        assert!(!feedback.is_correct);
        assert_eq!(feedback.revealed_answer, "7");
        let record = session.progress().get(&id("number")).unwrap();
        assert_eq!((record.attempted(), record.correct()), (1, 0));
    }

    #[test]
    fn blank_submission_is_ignored_unless_answer_is_zero() {
        let mut session = session(seven, 60);
        session.start().unwrap();
        assert_eq!(
            session.submit_answer("   "),
            SubmitOutcome::Ignored(IgnoredReason::EmptyAnswer)
        );
        assert_eq!(session.questions_completed(), 0);
        assert!(session.progress().is_empty());

        let mut session = self::session(zero, 60);
        session.start().unwrap();
        assert!(matches!(session.submit_answer(""), SubmitOutcome::Graded(_)));
        assert_eq!(session.questions_completed(), 1);
    }

    #[test]
    fn commands_outside_active_are_no_ops() {
        let mut session = session(seven, 60);
        assert_eq!(
            session.submit_answer("7"),
            SubmitOutcome::Ignored(IgnoredReason::NotActive)
        );
        assert_eq!(
            session.request_next(),
            NextOutcome::Ignored(IgnoredReason::NotActive)
        );
        assert_eq!(session.tick().unwrap(), TickOutcome::Ignored);
        assert_eq!(session.end_early().unwrap(), None);
        assert!(!session.return_home());
    }

    #[test]
    fn next_requires_an_answer_first() {
        let mut session = session(seven, 60);
        session.start().unwrap();
        assert_eq!(
            session.request_next(),
            NextOutcome::Ignored(IgnoredReason::AwaitingAnswer)
        );

        session.submit_answer("7");
        assert!(matches!(session.request_next(), NextOutcome::Advanced { .. }));
        assert!(matches!(session.slot(), Some(QuestionSlot::Presented(_))));
    }

    #[test]
    fn invalid_question_leaves_session_active_and_advanceable() {
        let mut session = session(blank, 60);
        session.start().unwrap();
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(matches!(
            session.slot(),
            Some(QuestionSlot::Unavailable(SelectionError::InvalidQuestion { .. }))
        ));
        assert_eq!(
            session.submit_answer("1"),
            SubmitOutcome::Ignored(IgnoredReason::NoPendingQuestion)
        );
        assert!(matches!(session.request_next(), NextOutcome::Advanced { .. }));
    }

    #[test]
    fn ticks_count_down_emit_motivation_and_expire() {
        let mut session = session(seven, 5);
        session.start().unwrap();
        session.submit_answer("7");

        let TickOutcome::Running {
            remaining_secs,
            motivation,
        } = session.tick().unwrap()
        else {
            panic!("expected running");
        };
        assert_eq!(remaining_secs, 4);
        assert!(motivation.is_some());

        let TickOutcome::Running { motivation, .. } = session.tick().unwrap() else {
            panic!("expected running");
        };
        assert!(motivation.is_none());

        session.tick().unwrap();
        session.tick().unwrap();
        let TickOutcome::Expired(ended) = session.tick().unwrap() else {
            panic!("expected expiry");
        };
        assert_eq!(ended.summary().reason(), EndReason::TimerExpired);
        assert_eq!(ended.summary().questions_completed(), 1);
        assert_eq!(ended.summary().correct(), 1);
        assert_eq!(session.phase(), SessionPhase::Ended);
        assert!(session.slot().is_none());
        assert_eq!(session.previous_session_count(), 1);
        assert_eq!(session.tick().unwrap(), TickOutcome::Ignored);
    }

    #[test]
    fn end_early_then_home_allows_a_fresh_start() {
        let mut session = session(seven, 60);
        session.start().unwrap();
        session.submit_answer("7");
        session.request_next();
        session.submit_answer("1");

        let ended = session.end_early().unwrap().expect("session was active");
        assert_eq!(ended.summary().reason(), EndReason::EndedEarly);
        assert_eq!(ended.progress().attempted(&id("number")), 2);
        assert!(session.start().is_err());

        assert!(session.return_home());
        assert_eq!(session.phase(), SessionPhase::Idle);
        session.start().unwrap();
        assert_eq!(session.questions_completed(), 0);
        assert_eq!(session.previous_session_count(), 2);
        assert_eq!(session.progress().attempted(&id("number")), 2);
    }

    #[test]
    fn new_refreshes_stored_names_from_catalog() {
        let stale = ProgressBook::from_records([(
            id("number"),
            practice_core::model::ProgressRecord::from_persisted("number", 3, 1).unwrap(),
        )]);
        let session = PracticeSession::new(catalog_with(seven), settings(60), stale, 0);
        assert_eq!(
            session.progress().get(&id("number")).unwrap().display_name(),
            "Number"
        );
    }
}
