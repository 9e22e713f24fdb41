//! Integration tests for feedback-survey

use std::time::Duration;

use feedback_survey::progress::{ANSWERS_KEY, STATUS_KEY};
use feedback_survey::{
    Answer, AnswerPolicy, AnswerValue, FileStore, KeyValueStore, ManualClock, MemoryStore, Phase,
    ResetCause, RunnerConfig, SurveyRunner, catalog,
};

fn mount(store: MemoryStore) -> (SurveyRunner<MemoryStore, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let runner = SurveyRunner::mount_with_clock(
        catalog::default_survey(),
        store,
        RunnerConfig::default(),
        clock.clone(),
    )
    .unwrap();
    (runner, clock)
}

#[test]
fn test_confirming_reached_exactly_at_last_question() {
    // Every mix of answers and skips enters Confirming on the fifth step, not before.
    for mask in 0u8..16 {
        let (mut runner, _) = mount(MemoryStore::new());
        runner.start().unwrap();

        for step in 0..4 {
            assert_eq!(runner.phase(), Phase::InProgress);
            if mask & (1 << step) != 0 {
                runner.answer(AnswerValue::Rating(3)).unwrap();
            } else {
                runner.skip().unwrap();
            }
        }
        assert_eq!(runner.phase(), Phase::InProgress);
        assert!(runner.is_last());

        runner.skip().unwrap();
        assert_eq!(runner.phase(), Phase::Confirming);
        assert!(runner.skip().is_err());
    }
}

#[test]
fn test_previous_then_next_restores_index() {
    let (mut runner, _) = mount(MemoryStore::new());
    runner.start().unwrap();
    runner.go_next().unwrap();
    runner.go_next().unwrap();

    let before = runner.current_index();
    runner.go_previous().unwrap();
    runner.go_next().unwrap();
    assert_eq!(runner.current_index(), before);
}

#[test]
fn test_submit_clears_answers_and_marks_completed() {
    let (mut runner, _) = mount(MemoryStore::new());
    runner.start().unwrap();
    for rating in [5, 4, 3, 8] {
        runner.answer(AnswerValue::Rating(rating)).unwrap();
    }
    runner
        .answer(AnswerValue::Text("Faster delivery".into()))
        .unwrap();

    let submission = runner.confirm_submit().unwrap();
    assert_eq!(submission.answers.len(), 5);
    assert!(runner.answers().is_empty());
    assert_eq!(runner.store().value(STATUS_KEY), Some("COMPLETED"));
    assert_eq!(runner.store().value(ANSWERS_KEY), Some("[]"));
    assert!(runner.show_thank_you());
}

#[test]
fn test_thank_you_resets_to_welcome_after_delay() {
    let (mut runner, clock) = mount(MemoryStore::new());
    runner.start().unwrap();
    for _ in 0..5 {
        runner.skip().unwrap();
    }
    runner.confirm_submit().unwrap();

    clock.advance(Duration::from_millis(4999));
    assert_eq!(runner.tick().unwrap(), None);
    assert_eq!(runner.phase(), Phase::ThankYou);

    clock.advance(Duration::from_millis(1));
    assert_eq!(runner.tick().unwrap(), Some(ResetCause::ThankYou));
    assert_eq!(runner.phase(), Phase::Welcome);
    assert_eq!(runner.store().value(STATUS_KEY), None);
    assert_eq!(runner.current_index(), 0);
}

#[test]
fn test_restores_stored_progress() {
    let store = MemoryStore::new().with_value(ANSWERS_KEY, r#"[{"questionId":1,"answer":5}]"#);
    let (runner, _) = mount(store);

    assert_eq!(runner.answers().len(), 1);
    assert_eq!(
        runner.answers().as_slice(),
        &[Answer::new(1, AnswerValue::Rating(5))]
    );
    assert!(runner.show_welcome());
}

#[test]
fn test_malformed_progress_starts_empty() {
    let store = MemoryStore::new().with_value(ANSWERS_KEY, "not json");
    let (runner, _) = mount(store);
    assert!(runner.answers().is_empty());
}

#[test]
fn test_text_answer_path_scenario() {
    let (mut runner, _) = mount(MemoryStore::new());
    runner.start().unwrap();
    for rating in [5, 4, 3, 8] {
        runner.answer(AnswerValue::Rating(rating)).unwrap();
    }
    assert_eq!(runner.current_index(), 4);

    runner.type_feedback("More options").unwrap();
    assert_eq!(runner.phase(), Phase::Confirming);
    assert_eq!(runner.feedback_text(), "More options");
    assert_eq!(runner.answers().len(), 4);

    let submission = runner.confirm_submit().unwrap();
    assert_eq!(
        submission.answers,
        vec![
            Answer::new(1, 5),
            Answer::new(2, 4),
            Answer::new(3, 3),
            Answer::new(4, 8),
            Answer::new(5, "More options"),
        ]
    );
}

#[test]
fn test_edited_feedback_replaces_earlier_text_answer() {
    let (mut runner, _) = mount(MemoryStore::new());
    runner.start().unwrap();
    for _ in 0..4 {
        runner.skip().unwrap();
    }
    runner.answer(AnswerValue::Text("abc".into())).unwrap();
    assert_eq!(runner.phase(), Phase::Confirming);

    runner.type_feedback("ab").unwrap();
    assert_eq!(runner.feedback_text(), "ab");

    let submission = runner.confirm_submit().unwrap();
    assert_eq!(submission.answers, vec![Answer::new(5, "ab")]);
}

#[test]
fn test_feedback_typed_over_restored_answer_wins() {
    let store = MemoryStore::new().with_value(
        ANSWERS_KEY,
        r#"[{"questionId":1,"answer":4},{"questionId":5,"answer":"old"}]"#,
    );
    let (mut runner, _) = mount(store);
    runner.start().unwrap();
    for _ in 0..4 {
        runner.skip().unwrap();
    }
    runner.type_feedback("new text").unwrap();

    let submission = runner.confirm_submit().unwrap();
    assert_eq!(
        submission.answers,
        vec![Answer::new(1, 4), Answer::new(5, "new text")]
    );
}

#[test]
fn test_restored_text_answer_kept_when_nothing_typed() {
    let store = MemoryStore::new().with_value(ANSWERS_KEY, r#"[{"questionId":5,"answer":"old"}]"#);
    let (mut runner, _) = mount(store);
    runner.start().unwrap();
    for _ in 0..5 {
        runner.skip().unwrap();
    }

    let submission = runner.confirm_submit().unwrap();
    assert_eq!(submission.answers, vec![Answer::new(5, "old")]);
}

#[test]
fn test_cleared_feedback_withdraws_text_answer() {
    let store = MemoryStore::new().with_value(ANSWERS_KEY, r#"[{"questionId":5,"answer":"old"}]"#);
    let (mut runner, _) = mount(store);
    runner.start().unwrap();
    for _ in 0..4 {
        runner.skip().unwrap();
    }
    runner.type_feedback("").unwrap();

    let submission = runner.confirm_submit().unwrap();
    assert!(submission.answers.is_empty());
}

#[test]
fn test_stale_completion_guard() {
    let store = MemoryStore::new()
        .with_value(STATUS_KEY, "COMPLETED")
        .with_value(ANSWERS_KEY, r#"[{"questionId":2,"answer":1}]"#);
    let (mut runner, clock) = mount(store);

    assert_eq!(runner.phase(), Phase::ComeBackLater);
    assert!(runner.start().is_err());

    clock.advance_secs(5);
    assert_eq!(runner.tick().unwrap(), Some(ResetCause::StaleCompletion));
    assert_eq!(runner.phase(), Phase::Welcome);
    assert_eq!(runner.store().value(STATUS_KEY), None);
    assert!(runner.answers().is_empty());
    assert_eq!(runner.pending_reset(), None);
}

#[test]
fn test_revisit_appends_duplicate_by_default() {
    let (mut runner, _) = mount(MemoryStore::new());
    runner.start().unwrap();
    runner.answer(AnswerValue::Rating(5)).unwrap();
    runner.go_previous().unwrap();
    runner.answer(AnswerValue::Rating(2)).unwrap();

    assert_eq!(runner.answers().len(), 2);
    assert_eq!(runner.answers().latest_for(1), Some(&AnswerValue::Rating(2)));
}

#[test]
fn test_revisit_replaces_under_upsert() {
    let clock = ManualClock::new();
    let mut runner = SurveyRunner::mount_with_clock(
        catalog::default_survey(),
        MemoryStore::new(),
        RunnerConfig::default().with_answer_policy(AnswerPolicy::Upsert),
        clock,
    )
    .unwrap();
    runner.start().unwrap();
    runner.answer(AnswerValue::Rating(5)).unwrap();
    runner.go_previous().unwrap();
    runner.answer(AnswerValue::Rating(2)).unwrap();

    assert_eq!(runner.answers().as_slice(), &[Answer::new(1, 2)]);
}

#[test]
fn test_progress_survives_remount_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey-store.json");

    {
        let store = FileStore::open(&path).unwrap();
        let mut runner =
            SurveyRunner::mount(catalog::default_survey(), store, RunnerConfig::default()).unwrap();
        runner.start().unwrap();
        runner.answer(AnswerValue::Rating(4)).unwrap();
        runner.answer(AnswerValue::Rating(2)).unwrap();
    }

    let store = FileStore::open(&path).unwrap();
    let runner =
        SurveyRunner::mount(catalog::default_survey(), store, RunnerConfig::default()).unwrap();
    assert_eq!(
        runner.answers().as_slice(),
        &[Answer::new(1, 4), Answer::new(2, 2)]
    );
    assert_eq!(runner.store().get(STATUS_KEY).unwrap(), None);
}

#[test]
fn test_borrowed_store_outlives_runner() {
    let mut store = MemoryStore::new();
    {
        let clock = ManualClock::new();
        let mut runner = SurveyRunner::mount_with_clock(
            catalog::default_survey(),
            &mut store,
            RunnerConfig::default(),
            clock,
        )
        .unwrap();
        runner.start().unwrap();
        for _ in 0..5 {
            runner.skip().unwrap();
        }
        runner.confirm_submit().unwrap();
    }

    // Dropped with the thank-you reset still pending: the marker stays and
    // the next mount takes the stale-completion path.
    assert_eq!(store.value(STATUS_KEY), Some("COMPLETED"));
    let (runner, _) = mount(store);
    assert_eq!(runner.phase(), Phase::ComeBackLater);
}
