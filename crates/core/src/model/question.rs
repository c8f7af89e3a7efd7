use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;

use crate::checker::AnswerChecker;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,
    #[error("canonical answer is empty")]
    EmptyAnswer,
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// Canonical answer produced by a generator.
///
/// Generators answer either with text (numeric strings, normalized tokens,
/// `"n/d"` fraction literals) or with a raw number whose precision is left to
/// a tolerance checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Answer {
    Text(String),
    Number(f64),
}

impl Answer {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Text handed to checkers.
    #[must_use]
    pub fn as_check_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Number(value) => Cow::Owned(value.to_string()),
        }
    }

    /// True when the canonical answer is literally zero, in which case an
    /// empty submission is still graded.
    #[must_use]
    pub fn is_zero_token(&self) -> bool {
        match self {
            Self::Text(text) => text == "0",
            Self::Number(value) => *value == 0.0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(value) => !value.is_finite(),
        }
    }

    /// Human-facing form shown after an incorrect answer.
    ///
    /// Numbers are rounded to four decimal places with trailing zeros removed;
    /// text (including fraction literals) is shown verbatim.
    #[must_use]
    pub fn reveal(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(value) => trim_decimal(&format!("{value:.4}")),
        }
    }
}

fn trim_decimal(formatted: &str) -> String {
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    };
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Opaque diagram markup passed straight through to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram(String);

impl Diagram {
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    #[must_use]
    pub fn markup(&self) -> &str {
        &self.0
    }
}

/// A freshly generated question instance. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    prompt: String,
    diagram: Option<Diagram>,
    answer: Answer,
    checker_override: Option<AnswerChecker>,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, answer: Answer) -> Self {
        Self {
            prompt: prompt.into(),
            diagram: None,
            answer,
            checker_override: None,
        }
    }

    #[must_use]
    pub fn with_diagram(mut self, diagram: Diagram) -> Self {
        self.diagram = Some(diagram);
        self
    }

    /// Grade this instance with `checker` instead of the owning skill's checker.
    #[must_use]
    pub fn with_checker(mut self, checker: AnswerChecker) -> Self {
        self.checker_override = Some(checker);
        self
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn diagram(&self) -> Option<&Diagram> {
        self.diagram.as_ref()
    }

    #[must_use]
    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    #[must_use]
    pub fn checker_override(&self) -> Option<AnswerChecker> {
        self.checker_override
    }

    /// Reject instances a learner could never answer.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for an empty prompt or empty canonical answer.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.answer.is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        Ok(())
    }
}

/// Result of invoking a generator: a question, or the skip signal when the
/// generator cannot currently produce a valid instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    Ready(Question),
    Skip,
}
