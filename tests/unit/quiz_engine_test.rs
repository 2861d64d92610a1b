use quiztrack::services::question_bank::QuestionBank;
use quiztrack::services::quiz_engine::{
    Advance, AnswerFeedback, QuizEngine, QuizEngineTrait,
};
use quiztrack::types::errors::QuizError;
use quiztrack::types::quiz::PerformanceTier;
use rstest::rstest;

fn engine() -> QuizEngine {
    QuizEngine::new(QuestionBank::builtin())
}

#[test]
fn test_start_unknown_category_fails() {
    let mut engine = engine();
    assert!(matches!(
        engine.start("geography"),
        Err(QuizError::UnknownCategory(_))
    ));
    assert!(engine.current_question().is_none());
}

#[test]
fn test_start_resets_state() {
    let mut engine = engine();
    engine.start("science").unwrap();
    assert_eq!(engine.progress(), Some((0, 3)));
    assert_eq!(engine.score(), 0);
    assert!(engine.current_question().is_some());
}

#[test]
fn test_correct_answer_increments_score() {
    let mut engine = engine();
    engine.start("science").unwrap();
    let correct = engine.current_question().unwrap().correct;
    let feedback = engine.select_answer(correct).unwrap();
    assert_eq!(feedback, Some(AnswerFeedback::Correct));
    assert_eq!(engine.score(), 1);
}

#[test]
fn test_wrong_answer_reports_correct_index() {
    let mut engine = engine();
    engine.start("science").unwrap();
    let question = engine.current_question().unwrap();
    let correct = question.correct;
    let wrong = (correct + 1) % question.options.len();

    let feedback = engine.select_answer(wrong).unwrap();
    assert_eq!(feedback, Some(AnswerFeedback::Incorrect { correct }));
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_selection_is_idempotent() {
    let mut engine = engine();
    engine.start("science").unwrap();
    let correct = engine.current_question().unwrap().correct;

    engine.select_answer(correct).unwrap();
    // Further selections change nothing, correct or not.
    assert_eq!(engine.select_answer(correct).unwrap(), None);
    assert_eq!(engine.select_answer(0).unwrap(), None);
    assert_eq!(engine.score(), 1);
}

#[test]
fn test_out_of_range_option_rejected() {
    let mut engine = engine();
    engine.start("science").unwrap();
    assert!(matches!(
        engine.select_answer(99),
        Err(QuizError::InvalidOption(99))
    ));
    // Question remains answerable after the bad input.
    let correct = engine.current_question().unwrap().correct;
    assert_eq!(
        engine.select_answer(correct).unwrap(),
        Some(AnswerFeedback::Correct)
    );
}

#[test]
fn test_advance_locked_until_answered() {
    let mut engine = engine();
    engine.start("science").unwrap();
    assert!(matches!(engine.advance(), Err(QuizError::QuestionUnanswered)));
}

#[test]
fn test_operations_require_active_session() {
    let mut engine = engine();
    assert!(matches!(engine.select_answer(0), Err(QuizError::NoActiveQuiz)));
    assert!(matches!(engine.advance(), Err(QuizError::NoActiveQuiz)));
}

#[test]
fn test_perfect_science_run_is_excellent() {
    let mut engine = engine();
    engine.start("science").unwrap();

    for _ in 0..2 {
        assert!(!engine.is_last_question());
        let correct = engine.current_question().unwrap().correct;
        engine.select_answer(correct).unwrap();
        assert_eq!(engine.advance().unwrap(), Advance::Next);
    }
    assert!(engine.is_last_question());
    let correct = engine.current_question().unwrap().correct;
    engine.select_answer(correct).unwrap();

    match engine.advance().unwrap() {
        Advance::Finished { draft, tier } => {
            assert_eq!(draft.category, "science");
            assert_eq!(draft.score, 3);
            assert_eq!(draft.total, 3);
            assert_eq!(draft.streak, Some(3));
            assert_eq!(tier, PerformanceTier::Excellent);
        }
        other => panic!("expected finish, got {:?}", other),
    }
    // Session is consumed by finalization.
    assert!(engine.current_question().is_none());
}

#[test]
fn test_streak_breaks_on_wrong_answer() {
    let mut engine = engine();
    engine.start("general").unwrap();

    // Right, wrong, right, right, right → best streak 3.
    let answers = [true, false, true, true, true];
    for (i, &answer_correctly) in answers.iter().enumerate() {
        let question = engine.current_question().unwrap();
        let index = if answer_correctly {
            question.correct
        } else {
            (question.correct + 1) % question.options.len()
        };
        engine.select_answer(index).unwrap();
        if i < answers.len() - 1 {
            assert_eq!(engine.advance().unwrap(), Advance::Next);
        }
    }

    match engine.advance().unwrap() {
        Advance::Finished { draft, tier } => {
            assert_eq!(draft.score, 4);
            assert_eq!(draft.streak, Some(3));
            // 4/5 = 80% → Great
            assert_eq!(tier, PerformanceTier::Great);
        }
        other => panic!("expected finish, got {:?}", other),
    }
}

#[rstest]
#[case(100.0, PerformanceTier::Excellent)]
#[case(90.0, PerformanceTier::Excellent)]
#[case(80.0, PerformanceTier::Great)]
#[case(75.0, PerformanceTier::Great)]
#[case(60.0, PerformanceTier::Good)]
#[case(50.0, PerformanceTier::KeepPracticing)]
#[case(40.0, PerformanceTier::KeepPracticing)]
#[case(10.0, PerformanceTier::DontGiveUp)]
#[case(0.0, PerformanceTier::DontGiveUp)]
fn test_performance_tiers(#[case] percentage: f64, #[case] expected: PerformanceTier) {
    assert_eq!(PerformanceTier::from_percentage(percentage), expected);
}

#[test]
fn test_shuffle_preserves_question_set() {
    let mut engine = engine();
    engine.start("general").unwrap();

    let bank = QuestionBank::builtin();
    let mut expected: Vec<String> = bank
        .questions("general")
        .unwrap()
        .iter()
        .map(|q| q.text.clone())
        .collect();

    let mut seen = Vec::new();
    loop {
        let question = engine.current_question().unwrap();
        seen.push(question.text.clone());
        let correct = question.correct;
        engine.select_answer(correct).unwrap();
        match engine.advance().unwrap() {
            Advance::Next => continue,
            Advance::Finished { .. } => break,
        }
    }

    expected.sort();
    seen.sort();
    assert_eq!(seen, expected);
}
