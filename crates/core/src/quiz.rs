//! Fixed multiple-choice quizzes graded in one pass.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a quiz needs at least one question")]
    NoQuestions,
    #[error("question {index} has an empty prompt")]
    EmptyPrompt { index: usize },
    #[error("question {index} has fewer than two options")]
    TooFewOptions { index: usize },
    #[error("the answer to question {index} is not one of its options")]
    AnswerNotAmongOptions { index: usize },
    #[error("expected {expected} responses, got {got}")]
    ResponseCountMismatch { expected: usize, got: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoiceQuestion {
    prompt: String,
    options: Vec<String>,
    answer: String,
}

impl MultipleChoiceQuestion {
    #[must_use]
    pub fn new<S: Into<String>>(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            answer: answer.into(),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    fn is_correct(&self, response: &str) -> bool {
        response.trim() == self.answer.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionOutcome {
    Correct,
    Incorrect { chosen: String, expected: String },
    Unanswered { expected: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Excellent,
    Good,
    NeedsReview,
}

impl Feedback {
    const EXCELLENT_FROM: u32 = 80;
    const GOOD_FROM: u32 = 60;

    #[must_use]
    pub fn for_percentage(percentage: u32) -> Self {
        if percentage >= Self::EXCELLENT_FROM {
            Feedback::Excellent
        } else if percentage >= Self::GOOD_FROM {
            Feedback::Good
        } else {
            Feedback::NeedsReview
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Excellent => "Excellent understanding!",
            Feedback::Good => {
                "Good effort! Review the highlighted answers to strengthen your knowledge."
            }
            Feedback::NeedsReview => {
                "There's room for improvement. Carefully review the concepts covered in the highlighted questions."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    outcomes: Vec<QuestionOutcome>,
    score: usize,
}

impl QuizResult {
    #[must_use]
    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Whole-number percentage, halves rounded up.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        let total = self.total().max(1);
        let rounded = (self.score * 200 + total) / (2 * total);
        u32::try_from(rounded).unwrap_or(100)
    }

    #[must_use]
    pub fn feedback(&self) -> Feedback {
        Feedback::for_percentage(self.percentage())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoiceQuiz {
    questions: Vec<MultipleChoiceQuestion>,
}

impl MultipleChoiceQuiz {
    /// # Errors
    ///
    /// Returns [`QuizError`] for an empty quiz, a blank prompt, a question
    /// with fewer than two options, or an answer missing from its options.
    pub fn new(questions: Vec<MultipleChoiceQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        for (index, question) in questions.iter().enumerate() {
            if question.prompt.trim().is_empty() {
                return Err(QuizError::EmptyPrompt { index });
            }
            if question.options.len() < 2 {
                return Err(QuizError::TooFewOptions { index });
            }
            if !question.options.iter().any(|option| question.is_correct(option)) {
                return Err(QuizError::AnswerNotAmongOptions { index });
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn questions(&self) -> &[MultipleChoiceQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Grade one response per question; `None` marks a skipped question.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::ResponseCountMismatch`] unless there is exactly
    /// one response slot per question.
    pub fn grade<S: AsRef<str>>(&self, responses: &[Option<S>]) -> Result<QuizResult, QuizError> {
        if responses.len() != self.questions.len() {
            return Err(QuizError::ResponseCountMismatch {
                expected: self.questions.len(),
                got: responses.len(),
            });
        }
        let outcomes: Vec<QuestionOutcome> = self
            .questions
            .iter()
            .zip(responses)
            .map(|(question, response)| match response {
                Some(chosen) if question.is_correct(chosen.as_ref()) => QuestionOutcome::Correct,
                Some(chosen) => QuestionOutcome::Incorrect {
                    chosen: chosen.as_ref().trim().to_owned(),
                    expected: question.answer.clone(),
                },
                None => QuestionOutcome::Unanswered {
                    expected: question.answer.clone(),
                },
            })
            .collect();
        let score = outcomes
            .iter()
            .filter(|outcome| **outcome == QuestionOutcome::Correct)
            .count();
        Ok(QuizResult { outcomes, score })
    }
}
