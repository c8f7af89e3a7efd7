use std::sync::Arc;

use practice_core::catalog::{Catalog, Category, Skill};
use practice_core::checker::AnswerChecker;
use practice_core::curricula;
use practice_core::model::{
    Answer, CategoryId, EngineSettings, Generated, ProfileId, ProgressBook, Question,
    SessionPhase,
};
use practice_core::time::fixed_now;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{Clock, PracticeLoopService, QuestionSlot, SubmitOutcome, TickOutcome};
use storage::repository::Storage;

fn twelve(_: &mut dyn rand::RngCore) -> Generated {
    Generated::Ready(Question::new("What is 3 x 4?", Answer::number(12.0)))
}

fn number_only_catalog() -> Arc<Catalog> {
    let number = Category::new(
        CategoryId::new("number").unwrap(),
        "Number",
        vec![Skill::new("Times Tables", twelve, AnswerChecker::ExactNumeric)],
    );
    Arc::new(Catalog::new(vec![number]).unwrap())
}

fn service(storage: &Storage) -> PracticeLoopService {
    PracticeLoopService::new(
        number_only_catalog(),
        NAMESPACE,
        EngineSettings::default(),
        storage,
    )
    .with_clock(Clock::fixed(fixed_now()))
}

const NAMESPACE: &str = "numbers";

fn grade_service(storage: &Storage, grade: curricula::Grade) -> PracticeLoopService {
    PracticeLoopService::new(
        Arc::new(grade.catalog().unwrap()),
        grade.as_str(),
        EngineSettings::default(),
        storage,
    )
    .with_clock(Clock::fixed(fixed_now()))
}

#[tokio::test]
async fn timer_expiry_persists_progress_and_session_count() {
    let storage = Storage::in_memory();
    let svc = service(&storage);
    let profile = ProfileId::new("hudson").unwrap();
    let number = CategoryId::new("number").unwrap();

    let mut session = svc
        .open_profile(&profile)
        .await
        .with_rng(StdRng::seed_from_u64(7));
    assert_eq!(session.learner(), "Hudson");
    session.start().unwrap();
    assert_eq!(session.time_remaining_secs(), 1800);

    let SubmitOutcome::Graded(feedback) = session.submit_answer("12") else {
        panic!("answer should be graded");
    };
    assert!(feedback.is_correct);
    assert_eq!(session.questions_completed(), 1);
    let record = session.progress().get(&number).unwrap();
    assert_eq!((record.attempted(), record.correct()), (1, 1));

    let mut ended = None;
    for _ in 0..1800 {
        if let TickOutcome::Expired(payload) = session.tick().unwrap() {
            ended = Some(payload);
        }
    }
    let ended = ended.expect("timer reaches zero");
    assert_eq!(session.phase(), SessionPhase::Ended);
    assert_eq!(session.time_remaining_secs(), 0);

    svc.finish_session(&profile, &ended).await.unwrap();

    let repo = storage.progress(NAMESPACE);
    assert_eq!(repo.load_previous_count(&profile).await, 1);
    let stored = repo.load_progress(&profile).await;
    let record = stored.get(&number).unwrap();
    assert_eq!((record.attempted(), record.correct()), (1, 1));

    let reopened = svc.open_profile(&profile).await;
    assert_eq!(reopened.previous_session_count(), 1);
}

#[tokio::test]
async fn skipping_with_an_empty_answer_changes_nothing() {
    let storage = Storage::in_memory();
    let svc = service(&storage);
    let profile = ProfileId::new("baxter").unwrap();

    let mut session = svc.open_profile(&profile).await;
    session.start().unwrap();

    assert!(matches!(session.submit_answer(""), SubmitOutcome::Ignored(_)));
    assert_eq!(session.questions_completed(), 0);
    assert!(session.progress().is_empty());
    assert!(matches!(session.slot(), Some(QuestionSlot::Presented(_))));

    let ended = session.end_early().unwrap().expect("active session");
    svc.finish_session(&profile, &ended).await.unwrap();
    assert!(svc.progress_report(&profile).await.is_empty());
    assert_eq!(storage.progress(NAMESPACE).load_previous_count(&profile).await, 0);
}

#[tokio::test]
async fn report_and_reset_follow_stored_progress() {
    let storage = Storage::in_memory();
    let svc = service(&storage);
    let profile = ProfileId::new("hudson").unwrap();

    let mut session = svc.open_profile(&profile).await;
    session.start().unwrap();
    session.submit_answer("12");
    session.request_next();
    session.submit_answer("13");
    let ended = session.end_early().unwrap().expect("active session");
    svc.finish_session(&profile, &ended).await.unwrap();

    let report = svc.progress_report(&profile).await;
    let rows = report.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display_name, "Number");
    assert_eq!(rows[0].score_label(), "1/2");
    assert_eq!(rows[0].mastery_label(), "50.0%");
    assert_eq!(report.chart().labels, ["Number"]);

    svc.reset_profile(&profile).await.unwrap();
    assert!(svc.progress_report(&profile).await.is_empty());
    assert_eq!(storage.progress(NAMESPACE).load_previous_count(&profile).await, 0);
}

#[tokio::test]
async fn grades_sharing_a_store_keep_separate_progress() {
    let storage = Storage::in_memory();
    let year6 = grade_service(&storage, curricula::Grade::Year6);
    let year9 = grade_service(&storage, curricula::Grade::Year9);
    let profile = ProfileId::new("hudson").unwrap();

    let mut session = year6
        .open_profile(&profile)
        .await
        .with_rng(StdRng::seed_from_u64(11));
    session.start().unwrap();
    for _ in 0..12 {
        session.submit_answer("0");
        session.request_next();
    }
    assert!(session.questions_completed() > 0);
    let ended = session.end_early().unwrap().expect("active session");
    year6.finish_session(&profile, &ended).await.unwrap();

    let reopened = year9.open_profile(&profile).await;
    assert!(reopened.progress().is_empty());
    assert_eq!(reopened.previous_session_count(), 0);
    assert_eq!(reopened.progress().attempted(&CategoryId::new("number").unwrap()), 0);
    assert!(year9.progress_report(&profile).await.is_empty());

    let back = year6.open_profile(&profile).await;
    assert_eq!(back.progress(), ended.progress());
    assert_eq!(back.previous_session_count(), ended.summary().questions_completed());
}

#[tokio::test]
async fn stored_categories_outside_the_catalog_are_ignored() {
    let storage = Storage::in_memory();
    let profile = ProfileId::new("baxter").unwrap();
    let mut book = ProgressBook::new();
    book.record_attempt(&CategoryId::new("number").unwrap(), "Number", true);
    book.record_attempt(&CategoryId::new("fractions_decimals").unwrap(), "Fractions", false);
    storage
        .progress(NAMESPACE)
        .save_progress(&profile, &book)
        .await
        .unwrap();

    let svc = service(&storage);
    let session = svc.open_profile(&profile).await;
    assert_eq!(session.progress().len(), 1);
    assert_eq!(session.progress().attempted(&CategoryId::new("number").unwrap()), 1);
    let report = svc.progress_report(&profile).await;
    assert_eq!(report.chart().labels, ["Number"]);
}
