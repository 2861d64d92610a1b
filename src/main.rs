//! QuizTrack — engine core for a trivia-quiz popup and a tab-time tracker.
//!
//! Entry point: console demo walking each component with an in-memory
//! store and host, so the whole engine can be exercised without a browser
//! shell attached.

use std::sync::Arc;

use quiztrack::host::{ManualClock, MemoryHost};
use quiztrack::types::tab::TabInfo;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!();
    println!("QuizTrack v{} — Demo Mode", env!("CARGO_PKG_VERSION"));
    println!("Trivia quiz + tab time tracking engine core");
    println!();

    demo_storage();
    demo_question_bank();
    demo_quiz_engine();
    demo_quiz_log();
    demo_tab_ledger();
    demo_countdown();
    demo_redirector();
    demo_page_scan();
    demo_tabs_overview();
    demo_reminder_and_menu();
    demo_app_core();

    println!();
    println!("All components demonstrated successfully.");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────");
}

fn tab(id: i64, window_id: i64, url: &str, title: &str, active: bool) -> TabInfo {
    TabInfo {
        id,
        window_id,
        url: url.to_string(),
        title: title.to_string(),
        favicon_url: None,
        active,
    }
}

fn demo_storage() {
    use quiztrack::storage::KvStore;
    section("Key-Value Store");

    let store = KvStore::open_in_memory().expect("failed to open store");
    store.set("totalScore", &42u64).unwrap();
    store.set("preferences", &quiztrack::types::preferences::Preferences::default()).unwrap();
    println!("  Wrote 2 keys: {:?}", store.keys().unwrap());
    println!("  totalScore = {}", store.counter("totalScore"));
    println!("  missing counter falls back to {}", store.counter("bestStreak"));
    println!("  ✓ KvStore OK");
    println!();
}

fn demo_question_bank() {
    use quiztrack::services::question_bank::QuestionBank;
    section("Question Bank");

    let bank = QuestionBank::builtin();
    for category in bank.categories() {
        println!("  {}: {} questions", category, bank.questions(category).unwrap().len());
    }
    println!("  ✓ QuestionBank OK");
    println!();
}

fn demo_quiz_engine() {
    use quiztrack::services::question_bank::QuestionBank;
    use quiztrack::services::quiz_engine::{Advance, QuizEngine, QuizEngineTrait};
    section("Quiz Engine");

    let mut engine = QuizEngine::new(QuestionBank::builtin());
    engine.start("science").unwrap();
    println!("  Started 'science' ({} questions)", engine.progress().unwrap().1);

    loop {
        let correct = engine.current_question().unwrap().correct;
        engine.select_answer(correct).unwrap();
        // Repeated selection is a no-op
        assert!(engine.select_answer(0).unwrap().is_none());
        match engine.advance().unwrap() {
            Advance::Next => continue,
            Advance::Finished { draft, tier } => {
                println!(
                    "  Finished: {}/{} — {} (streak {})",
                    draft.score,
                    draft.total,
                    tier.label(),
                    draft.streak.unwrap_or(0)
                );
                break;
            }
        }
    }
    println!("  ✓ QuizEngine OK");
    println!();
}

fn demo_quiz_log() {
    use quiztrack::host::SystemClock;
    use quiztrack::managers::quiz_log::{QuizLog, QuizLogTrait};
    use quiztrack::storage::KvStore;
    use quiztrack::types::quiz::QuizResultDraft;
    section("Quiz Result Log");

    let store = Arc::new(KvStore::open_in_memory().unwrap());
    let log = QuizLog::new(store, Arc::new(SystemClock));
    log.initialize_defaults().unwrap();

    log.append(QuizResultDraft { category: "science".into(), score: 3, total: 3, streak: Some(3) }).unwrap();
    log.append(QuizResultDraft { category: "general".into(), score: 2, total: 5, streak: Some(1) }).unwrap();
    log.record_quiz_taken();
    log.record_quiz_taken();

    let stats = log.stats().unwrap();
    println!("  quizzesTaken = {}", stats.quizzes_taken);
    println!("  totalScore = {}, bestStreak = {}", stats.total_score, stats.best_streak);
    println!("  averageScore = {:.1}", stats.average_score);
    println!("  badge = {:?}", log.badge_text());
    println!("  ✓ QuizLog OK");
    println!();
}

fn demo_tab_ledger() {
    use quiztrack::managers::tab_ledger::{TabLedger, TabLedgerTrait};
    use quiztrack::storage::KvStore;
    section("Tab Time Ledger");

    let store = Arc::new(KvStore::open_in_memory().unwrap());
    let host = Arc::new(MemoryHost::new());
    let clock = Arc::new(ManualClock::new(1_000_000));
    host.add_tab(tab(1, 1, "https://docs.rs/", "Docs.rs", true));
    host.add_tab(tab(2, 1, "https://www.youtube.com/watch", "YouTube", false));

    let mut ledger = TabLedger::new(store, host.clone(), clock.clone());
    ledger.on_tab_activated(1);
    clock.advance(5_000);
    ledger.on_tab_activated(2);
    println!("  Tab 1 accumulated {} ms", ledger.get_elapsed(1));

    clock.advance(3_000);
    println!("  Tab 2 accumulated {} ms", ledger.get_elapsed(2));
    println!("  youtube blocked: {}", ledger.is_blocked_site("https://www.youtube.com/watch"));

    ledger.on_tab_url_changed(2, "https://www.youtube.com/feed");
    ledger.on_tab_url_changed(2, "https://example.com/");
    println!("  After domain change, tab 2 = {} ms", ledger.get_elapsed(2));
    println!("  Pushes delivered: {}", host.pushes().len());
    println!("  ✓ TabLedger OK");
    println!();
}

fn demo_countdown() {
    use quiztrack::services::countdown::{
        Countdown, CountdownState, PromptAction, PromptChoice, TickEvent,
    };
    section("Countdown / Blocked-Site Prompt");

    let mut countdown = Countdown::new();
    countdown.set_blocked(true);
    for second in 1..=10u64 {
        match countdown.tick(true) {
            Some(TickEvent::WarningPulse) => println!("  t={}s: warning pulse", second),
            Some(TickEvent::ShowPrompt) => println!("  t={}s: prompt shown", second),
            None => {}
        }
    }
    assert_eq!(countdown.state(), CountdownState::PromptShown);
    let action = countdown.choose(PromptChoice::ReturnToAssignment);
    assert_eq!(action, PromptAction::RequestAssignmentRedirect);
    println!("  Chose 'return to assignment' → timer reset to {}s, state {:?}",
        countdown.seconds(), countdown.state());
    println!("  ✓ Countdown OK");
    println!();
}

fn demo_redirector() {
    use quiztrack::services::redirector::Redirector;
    section("Assignment-Site Redirector");

    let host = Arc::new(MemoryHost::new());
    host.add_tab(tab(1, 1, "https://news.example.com/", "News", true));
    host.add_tab(tab(2, 2, "https://www.khanacademy.org/math", "Khan Academy", false));

    let redirector = Redirector::new(host.clone());
    let outcome = redirector.redirect(Some(1));
    println!("  Outcome: {:?}", outcome);
    println!("  Activated: {:?}, focused windows: {:?}", host.activations(), host.focused_windows());
    println!("  ✓ Redirector OK");
    println!();
}

fn demo_page_scan() {
    use quiztrack::services::page_scan;
    section("Page Scan");

    let text = "Rust provides memory safety without garbage collection. \
                Rust tracks ownership so systems programs stay safe and fast.";
    let analysis = page_scan::analyze("https://blog.example.com/rust", "Why Rust?", text, None);
    println!("  Keywords: {:?}", analysis.keywords);
    println!("  Selection 'short' worthy: {}", page_scan::selection_worthy("short"));
    println!(
        "  Selection 'a much longer passage' worthy: {}",
        page_scan::selection_worthy("a much longer passage")
    );
    println!("  ✓ PageScan OK");
    println!();
}

fn demo_tabs_overview() {
    use quiztrack::services::tabs_overview::{format_time, TabsOverview};
    use std::collections::HashMap;
    section("Tabs Overview (popup)");

    let tabs = vec![
        tab(1, 1, "https://docs.rs/", "Docs.rs", true),
        tab(2, 2, "https://www.rust-lang.org/", "Rust", false),
        tab(3, 1, "https://crates.io/", "crates.io", false),
    ];
    let mut times = HashMap::new();
    times.insert(1, 3_725_000u64);
    times.insert(3, 59_000u64);

    let mut overview = TabsOverview::new(tabs, times, Some(1));
    println!("  {}", overview.count_line());
    println!("  1h02m05s renders as {}", format_time(3_725_000));
    overview.set_query("rust");
    println!("  After query 'rust': {}", overview.count_line());
    println!("  Rows: {}", overview.rows().len());
    println!("  ✓ TabsOverview OK");
    println!();
}

fn demo_reminder_and_menu() {
    use quiztrack::services::context_menu;
    use quiztrack::services::reminder::Reminder;
    section("Context Menu & Reminder");

    for entry in context_menu::entries() {
        println!("  menu: {} — \"{}\"", entry.id, entry.title);
    }
    let page = tab(4, 1, "https://en.wikipedia.org/wiki/Ada_Lovelace", "Ada Lovelace", true);
    let action = context_menu::on_click(context_menu::MENU_QUIZ_ABOUT_PAGE, &page);
    println!("  quizAboutPage click → {:?}", action.map(|_| "SendToTab"));

    let mut reminder = Reminder::new().with_period_ms(1_000);
    reminder.arm(0);
    println!("  reminder due at 500ms: {:?}", reminder.poll(500).is_some());
    println!("  reminder due at 1000ms: {:?}", reminder.poll(1_000).is_some());
    println!("  ✓ ContextMenu & Reminder OK");
    println!();
}

fn demo_app_core() {
    use quiztrack::app::App;
    use quiztrack::host::SystemClock;
    use quiztrack::storage::KvStore;
    section("App Core (full lifecycle)");

    let store = Arc::new(KvStore::open_in_memory().unwrap());
    let host = Arc::new(MemoryHost::new());
    let mut app = App::with_parts(store, host, Arc::new(SystemClock));
    app.startup();
    println!("  Startup: defaults seeded, reminder armed = {}", app.reminder.is_armed());
    println!("  Stored keys: {:?}", app.store.keys().unwrap());
    println!("  ✓ App Core OK");
}
