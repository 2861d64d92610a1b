use quiztrack::services::countdown::{
    Countdown, CountdownState, PromptAction, PromptChoice, TickEvent, PROMPT_THRESHOLD_SECS,
    WARNING_LEAD_SECS,
};
use quiztrack::types::message::ContentPush;

/// Ticks visible time and returns every surfaced event.
fn run_ticks(countdown: &mut Countdown, seconds: u64) -> Vec<(u64, TickEvent)> {
    let mut events = Vec::new();
    for _ in 0..seconds {
        if let Some(event) = countdown.tick(true) {
            events.push((countdown.seconds(), event));
        }
    }
    events
}

#[test]
fn test_hidden_page_does_not_advance() {
    let mut countdown = Countdown::new();
    countdown.set_blocked(true);
    for _ in 0..100 {
        assert_eq!(countdown.tick(false), None);
    }
    assert_eq!(countdown.seconds(), 0);
    assert_eq!(countdown.state(), CountdownState::Counting);
}

#[test]
fn test_unblocked_page_counts_but_never_prompts() {
    let mut countdown = Countdown::new();
    let events = run_ticks(&mut countdown, 120);
    assert!(events.is_empty());
    assert_eq!(countdown.seconds(), 120);
    assert_eq!(countdown.state(), CountdownState::Idle);
}

#[test]
fn test_blocked_page_warns_then_prompts() {
    let mut countdown = Countdown::new();
    countdown.set_blocked(true);

    let events = run_ticks(&mut countdown, PROMPT_THRESHOLD_SECS);
    assert_eq!(
        events,
        vec![
            (
                PROMPT_THRESHOLD_SECS - WARNING_LEAD_SECS,
                TickEvent::WarningPulse
            ),
            (PROMPT_THRESHOLD_SECS, TickEvent::ShowPrompt),
        ]
    );
    assert_eq!(countdown.state(), CountdownState::PromptShown);
}

#[test]
fn test_prompt_pauses_the_counter() {
    let mut countdown = Countdown::new();
    countdown.set_blocked(true);
    run_ticks(&mut countdown, PROMPT_THRESHOLD_SECS);

    let seconds_at_prompt = countdown.seconds();
    for _ in 0..30 {
        assert_eq!(countdown.tick(true), None);
    }
    assert_eq!(countdown.seconds(), seconds_at_prompt);
}

#[test]
fn test_warning_fires_once_per_approach() {
    let mut countdown = Countdown::new();
    countdown.set_blocked(true);

    let events = run_ticks(&mut countdown, PROMPT_THRESHOLD_SECS - 1);
    let warnings = events
        .iter()
        .filter(|(_, e)| *e == TickEvent::WarningPulse)
        .count();
    assert_eq!(warnings, 1);

    // After a reset the machine may warn again on the next approach.
    countdown.reset();
    let events = run_ticks(&mut countdown, PROMPT_THRESHOLD_SECS - 1);
    let warnings = events
        .iter()
        .filter(|(_, e)| *e == TickEvent::WarningPulse)
        .count();
    assert_eq!(warnings, 1);
}

#[test]
fn test_return_to_assignment_resets() {
    let mut countdown = Countdown::new();
    countdown.set_blocked(true);
    run_ticks(&mut countdown, PROMPT_THRESHOLD_SECS);
    assert_eq!(countdown.state(), CountdownState::PromptShown);

    let action = countdown.choose(PromptChoice::ReturnToAssignment);
    assert_eq!(action, PromptAction::RequestAssignmentRedirect);
    assert_eq!(countdown.state(), CountdownState::Idle);
    assert_eq!(countdown.seconds(), 0);

    // Still on the blocked page: the countdown starts over and prompts again.
    let events = run_ticks(&mut countdown, PROMPT_THRESHOLD_SECS);
    assert!(events.contains(&(PROMPT_THRESHOLD_SECS, TickEvent::ShowPrompt)));
}

#[test]
fn test_take_quiz_leaves_prompt_up() {
    let mut countdown = Countdown::new();
    countdown.set_blocked(true);
    run_ticks(&mut countdown, PROMPT_THRESHOLD_SECS);

    let action = countdown.choose(PromptChoice::TakeQuiz);
    assert_eq!(action, PromptAction::OpenQuizPage);
    // The page is about to navigate away; the machine stays put.
    assert_eq!(countdown.state(), CountdownState::PromptShown);
}

#[test]
fn test_reset_push_zeroes_from_any_state() {
    let mut countdown = Countdown::new();
    countdown.set_blocked(true);
    run_ticks(&mut countdown, PROMPT_THRESHOLD_SECS);
    assert_eq!(countdown.state(), CountdownState::PromptShown);

    countdown.apply_push(&ContentPush::reset());
    assert_eq!(countdown.state(), CountdownState::Idle);
    assert_eq!(countdown.seconds(), 0);
}

#[test]
fn test_push_overwrites_time_and_classification() {
    let mut countdown = Countdown::new();

    countdown.apply_push(&ContentPush::loaded(8_000, true));
    assert_eq!(countdown.seconds(), 8);
    assert!(countdown.is_blocked());
    assert_eq!(countdown.state(), CountdownState::Counting);

    // Two more visible seconds reach the threshold.
    let mut prompted = false;
    for _ in 0..2 {
        if countdown.tick(true) == Some(TickEvent::ShowPrompt) {
            prompted = true;
        }
    }
    assert!(prompted);
}

#[test]
fn test_plain_time_push_keeps_classification() {
    let mut countdown = Countdown::new();
    countdown.set_blocked(true);
    countdown.apply_push(&ContentPush::time(4_000));
    assert_eq!(countdown.seconds(), 4);
    assert!(countdown.is_blocked());
}

#[test]
fn test_unblocking_returns_to_idle() {
    let mut countdown = Countdown::new();
    countdown.set_blocked(true);
    run_ticks(&mut countdown, 5);
    assert_eq!(countdown.state(), CountdownState::Counting);

    countdown.set_blocked(false);
    assert_eq!(countdown.state(), CountdownState::Idle);
    // Counting continues without ever prompting.
    let events = run_ticks(&mut countdown, 60);
    assert!(events.is_empty());
}
