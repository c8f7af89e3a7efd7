use std::cmp::Ordering;

use practice_core::checker::InputKind;
use practice_core::model::{CategoryId, MasteryBand, ProgressBook};
use practice_core::selector::{SelectedQuestion, SelectionError};

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// What the presentation layer needs to show a pending question.
///
/// The diagram is opaque markup and is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub title: String,
    pub prompt: String,
    pub diagram: Option<String>,
    pub input: InputKind,
}

impl QuestionView {
    #[must_use]
    pub fn from_selected(selected: &SelectedQuestion) -> Self {
        let question = selected.question();
        Self {
            title: format!("{} Practice", selected.display_name()),
            prompt: question.prompt().to_owned(),
            diagram: question.diagram().map(|d| d.markup().to_owned()),
            input: selected.checker().input_kind(),
        }
    }

    /// Terminal message for a slot whose question could not be produced.
    #[must_use]
    pub fn unavailable(error: &SelectionError) -> &'static str {
        match error {
            SelectionError::EmptyCatalog | SelectionError::NoSkills => {
                "Setup needed: no questions are configured."
            }
            _ => "Unable to load question. Try the next one.",
        }
    }
}

/// Result event sent to the presentation layer after a graded submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub revealed_answer: String,
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub category_id: CategoryId,
    pub display_name: String,
    pub correct: u32,
    pub attempted: u32,
    pub mastery_percent: f64,
    pub band: MasteryBand,
}

impl ReportRow {
    /// `correct/attempted`, e.g. `7/10`.
    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{}/{}", self.correct, self.attempted)
    }

    /// Mastery with one decimal, e.g. `70.0%`.
    #[must_use]
    pub fn mastery_label(&self) -> String {
        format!("{:.1}%", self.mastery_percent)
    }
}

/// Progress rows sorted by display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressReport {
    rows: Vec<ReportRow>,
}

impl ProgressReport {
    #[must_use]
    pub fn from_book(book: &ProgressBook) -> Self {
        let mut rows: Vec<ReportRow> = book
            .iter()
            .map(|(id, record)| ReportRow {
                category_id: id.clone(),
                display_name: record.display_name().to_owned(),
                correct: record.correct(),
                attempted: record.attempted(),
                mastery_percent: record.mastery_percent(),
                band: record.band(),
            })
            .collect();
        rows.sort_by(|a, b| match a.display_name.cmp(&b.display_name) {
            Ordering::Equal => a.category_id.cmp(&b.category_id),
            other => other,
        });
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bar-chart data in report order.
    #[must_use]
    pub fn chart(&self) -> ChartSnapshot {
        ChartSnapshot {
            labels: self.rows.iter().map(|r| r.display_name.clone()).collect(),
            mastery_percents: self.rows.iter().map(|r| r.mastery_percent).collect(),
            bands: self.rows.iter().map(|r| r.band).collect(),
        }
    }
}

/// Input for an external charting collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSnapshot {
    pub labels: Vec<String>,
    pub mastery_percents: Vec<f64>,
    pub bands: Vec<MasteryBand>,
}

impl ChartSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> CategoryId {
        CategoryId::new(raw).unwrap()
    }

    #[test]
    fn report_sorts_by_display_name_and_labels_rows() {
        let mut book = ProgressBook::new();
        for correct in [true, true, true, false] {
            book.record_attempt(&id("number"), "Number", correct);
        }
        book.record_attempt(&id("algebra"), "Algebra", false);
        book.record_attempt(&id("geometry"), "Geometry", true);

        let report = ProgressReport::from_book(&book);
        let names: Vec<_> = report.rows().iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, ["Algebra", "Geometry", "Number"]);

        let number = &report.rows()[2];
        assert_eq!(number.score_label(), "3/4");
        assert_eq!(number.mastery_label(), "75.0%");
        assert_eq!(number.band, MasteryBand::High);
        assert_eq!(report.rows()[0].band, MasteryBand::Low);
    }

    #[test]
    fn chart_follows_report_order() {
        let mut book = ProgressBook::new();
        book.record_attempt(&id("statistics"), "Statistics", true);
        book.record_attempt(&id("algebra"), "Algebra", false);

        let chart = ProgressReport::from_book(&book).chart();
        assert_eq!(chart.labels, ["Algebra", "Statistics"]);
        assert_eq!(chart.mastery_percents, [0.0, 100.0]);
        assert_eq!(chart.bands, [MasteryBand::Low, MasteryBand::High]);
    }

    #[test]
    fn empty_book_yields_empty_report_and_chart() {
        let report = ProgressReport::from_book(&ProgressBook::new());
        assert!(report.is_empty());
        assert!(report.chart().is_empty());
    }

    #[test]
    fn configuration_errors_read_as_setup_needed() {
        assert!(QuestionView::unavailable(&SelectionError::NoSkills).starts_with("Setup"));
        assert!(
            QuestionView::unavailable(&SelectionError::RetriesExhausted { attempts: 3 })
                .starts_with("Unable")
        );
    }
}
