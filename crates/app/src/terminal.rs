//! Line-based terminal presentation for sessions, reports and the quiz.

use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use practice_core::banks;
use practice_core::checker::InputKind;
use practice_core::model::{MasteryBand, ProfileId};
use practice_core::quiz::QuestionOutcome;
use practice_core::time::format_countdown;
use services::{
    IgnoredReason, NextOutcome, PracticeLoopService, PracticeSession, ProgressReport,
    QuestionSlot, QuestionView, SessionEnded, SubmitOutcome, Tick, TickOutcome, TickSource,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

type Input = Lines<BufReader<Stdin>>;

const BAR_WIDTH: usize = 20;

fn stdin_lines() -> Input {
    BufReader::new(tokio::io::stdin()).lines()
}

fn prompt(text: &str) {
    write_prompt(&mut std::io::stdout(), text);
}

/// A prompt that fails to reach the terminal is logged; the session carries on.
fn write_prompt(out: &mut impl Write, text: &str) {
    if let Err(err) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        warn!(error = %err, "could not write prompt");
    }
}

//
// ─── PRACTICE ──────────────────────────────────────────────────────────────────
//

/// Home view, one timed session, then the end view with the updated report.
pub async fn run_practice(
    service: &PracticeLoopService,
    profile: &ProfileId,
    diagram_dir: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let mut session = service.open_profile(profile).await;
    let mut input = stdin_lines();

    println!("Welcome back, {}!", session.learner());
    print_report(&service.progress_report(profile).await);
    println!();
    println!(
        "Questions completed last session: {}",
        session.previous_session_count()
    );
    println!(
        "Press Enter to start a {} session. While practising, type :time or :end.",
        format_countdown(session.settings().session_duration_secs())
    );
    if input.next_line().await?.is_none() {
        return Ok(());
    }

    let opening = session.start()?;
    let mut ticker = TickSource::new();
    let mut ticks = ticker.install(Duration::from_secs(1));
    println!("\n{opening}");
    let mut presented = 0_u32;
    render_slot(&session, diagram_dir, &mut presented);

    let (ended, user_ended) = loop {
        tokio::select! {
            tick = ticks.recv() => {
                let Some(Tick) = tick else {
                    break (end_now(&mut session)?, false);
                };
                match session.tick()? {
                    TickOutcome::Running { remaining_secs, motivation } => {
                        if let Some(message) = motivation {
                            println!("  ({}) {message}", format_countdown(remaining_secs));
                        }
                    }
                    TickOutcome::Expired(ended) => {
                        println!("\nTime's up!");
                        break (ended, false);
                    }
                    TickOutcome::Ignored => {}
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else {
                    break (end_now(&mut session)?, true);
                };
                match line.trim() {
                    ":end" | ":quit" => break (end_now(&mut session)?, true),
                    ":time" => println!("Time remaining: {}", session.countdown()),
                    _ => handle_line(&mut session, &line, diagram_dir, &mut presented),
                }
            }
        }
    };
    ticker.cancel();

    finish(service, profile, &ended, user_ended).await;
    session.return_home();
    print_report(&service.progress_report(profile).await);
    Ok(())
}

fn end_now(session: &mut PracticeSession) -> Result<SessionEnded, Box<dyn Error>> {
    session
        .end_early()?
        .ok_or_else(|| "session was not active".into())
}

async fn finish(
    service: &PracticeLoopService,
    profile: &ProfileId,
    ended: &SessionEnded,
    user_ended: bool,
) {
    println!(
        "Session over: {} answered, {} correct.",
        ended.summary().questions_completed(),
        ended.summary().correct()
    );
    match service.finish_session(profile, ended).await {
        Ok(()) => println!("Progress saved."),
        // Timer-driven saves are only logged; the learner did not ask for them.
        Err(err) if user_ended => println!("Could not save progress: {err}"),
        Err(_) => {}
    }
    println!();
}

fn handle_line(
    session: &mut PracticeSession,
    line: &str,
    diagram_dir: Option<&Path>,
    presented: &mut u32,
) {
    match session.slot() {
        Some(QuestionSlot::Presented(_)) => match session.submit_answer(line) {
            SubmitOutcome::Graded(feedback) => {
                if feedback.is_correct {
                    println!("Correct!");
                } else {
                    println!("Not quite. The answer was {}.", feedback.revealed_answer);
                }
                println!(
                    "Completed this session: {}. Press Enter for the next question.",
                    session.questions_completed()
                );
            }
            SubmitOutcome::Ignored(IgnoredReason::EmptyAnswer) => {
                println!("Type an answer, or :end to finish.");
            }
            SubmitOutcome::Ignored(_) => {}
        },
        Some(QuestionSlot::Answered { .. } | QuestionSlot::Unavailable(_)) => {
            if let NextOutcome::Advanced { motivation } = session.request_next() {
                println!("\n{motivation}");
                render_slot(session, diagram_dir, presented);
            }
        }
        None => {}
    }
}

fn render_slot(session: &PracticeSession, diagram_dir: Option<&Path>, presented: &mut u32) {
    match session.slot() {
        Some(QuestionSlot::Presented(selected)) => {
            *presented += 1;
            let view = QuestionView::from_selected(selected);
            println!("[{}] {}", session.countdown(), view.title);
            println!("{}", view.prompt);
            if let Some(markup) = &view.diagram {
                show_diagram(markup, diagram_dir, *presented);
            }
            prompt(input_hint(view.input));
        }
        Some(QuestionSlot::Unavailable(err)) => {
            println!("{}", QuestionView::unavailable(err));
            println!("Press Enter to try another question.");
        }
        Some(QuestionSlot::Answered { .. }) | None => {}
    }
}

fn show_diagram(markup: &str, diagram_dir: Option<&Path>, index: u32) {
    let Some(dir) = diagram_dir else {
        println!("(This question has a diagram; pass --diagram-dir to save it.)");
        return;
    };
    let path = dir.join(format!("question-{index}.svg"));
    let written = std::fs::create_dir_all(dir).and_then(|()| std::fs::write(&path, markup));
    match written {
        Ok(()) => println!("Diagram: {}", path.display()),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not write diagram");
            println!("(Diagram could not be saved.)");
        }
    }
}

fn input_hint(kind: InputKind) -> &'static str {
    match kind {
        InputKind::Numeric => "Number> ",
        InputKind::Fraction => "Fraction or decimal> ",
        InputKind::Text => "Answer> ",
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

pub fn print_report(report: &ProgressReport) {
    if report.is_empty() {
        println!("No progress tracked yet.");
        return;
    }

    println!("{:<34} {:>9} {:>8}  Band", "Category", "Score", "Mastery");
    for row in report.rows() {
        println!(
            "{:<34} {:>9} {:>8}  {}",
            row.display_name,
            row.score_label(),
            row.mastery_label(),
            band_label(row.band)
        );
    }

    println!();
    let chart = report.chart();
    for (label, percent) in chart.labels.iter().zip(&chart.mastery_percents) {
        println!(
            "{label:<34} |{:<width$}| {percent:.0}%",
            bar(*percent),
            width = BAR_WIDTH
        );
    }
}

fn band_label(band: MasteryBand) -> &'static str {
    match band {
        MasteryBand::Low => "low",
        MasteryBand::Mid => "mid",
        MasteryBand::High => "high",
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(percent: f64) -> String {
    let filled = (percent.clamp(0.0, 100.0) / 100.0 * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled)
}

//
// ─── RESET ─────────────────────────────────────────────────────────────────────
//

pub async fn run_reset(
    service: &PracticeLoopService,
    profile: &ProfileId,
) -> Result<(), Box<dyn Error>> {
    prompt(&format!(
        "This forgets all progress for {profile}. Type the profile name to confirm: "
    ));
    let confirmation = stdin_lines().next_line().await?.unwrap_or_default();
    if confirmation.trim() != profile.as_str() {
        println!("Reset cancelled.");
        return Ok(());
    }
    service.reset_profile(profile).await?;
    println!("Progress for {profile} has been reset.");
    Ok(())
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

pub async fn run_quiz() -> Result<(), Box<dyn Error>> {
    let quiz = banks::biology()?;
    let mut input = stdin_lines();
    let mut responses = Vec::with_capacity(quiz.len());

    for (number, question) in (1..).zip(quiz.questions()) {
        println!("\n{number}. {}", question.prompt());
        for (letter, option) in ('a'..).zip(question.options()) {
            println!("   {letter}) {option}");
        }
        prompt("Answer (letter, blank to skip)> ");
        let line = input.next_line().await?.unwrap_or_default();
        responses.push(choose_option(question.options(), &line));
    }

    let result = quiz.grade(&responses)?;
    println!();
    for ((number, question), outcome) in (1..).zip(quiz.questions()).zip(result.outcomes()) {
        match outcome {
            QuestionOutcome::Correct => println!("{number}. correct"),
            QuestionOutcome::Incorrect { chosen, expected } => {
                println!("{number}. {:?}: chose {chosen}, answer {expected}", question.prompt());
            }
            QuestionOutcome::Unanswered { expected } => {
                println!("{number}. {:?}: not answered, answer {expected}", question.prompt());
            }
        }
    }
    println!(
        "\nYou scored {} out of {} ({}%).",
        result.score(),
        result.total(),
        result.percentage()
    );
    println!("{}", result.feedback().message());
    Ok(())
}

/// A single letter picks an option; anything else is matched as typed.
fn choose_option(options: &[String], raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let mut chars = raw.chars();
    let picked = match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => {
            let index = usize::from(letter.to_ascii_lowercase() as u8 - b'a');
            options.get(index).cloned()
        }
        _ => None,
    };
    Some(picked.unwrap_or_else(|| raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Neuron".into(), "Nephron".into(), "Alveolus".into()]
    }

    #[test]
    fn letters_pick_options_and_text_passes_through() {
        assert_eq!(choose_option(&options(), "b"), Some("Nephron".into()));
        assert_eq!(choose_option(&options(), " C "), Some("Alveolus".into()));
        assert_eq!(choose_option(&options(), "z"), Some("z".into()));
        assert_eq!(choose_option(&options(), "Neuron"), Some("Neuron".into()));
        assert_eq!(choose_option(&options(), "   "), None);
    }

    struct BrokenPipe {
        written: Vec<u8>,
    }

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn prompt_survives_a_failed_flush() {
        let mut out = BrokenPipe { written: Vec::new() };
        write_prompt(&mut out, "Number> ");
        assert_eq!(out.written, b"Number> ");

        let mut buffer = Vec::new();
        write_prompt(&mut buffer, "Answer> ");
        assert_eq!(buffer, b"Answer> ");
    }

    #[test]
    fn bars_scale_to_width() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(50.0).len(), BAR_WIDTH / 2);
        assert_eq!(bar(100.0).len(), BAR_WIDTH);
        assert_eq!(bar(250.0).len(), BAR_WIDTH);
    }
}
