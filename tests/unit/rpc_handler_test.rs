use std::sync::{Arc, Mutex};

use quiztrack::app::App;
use quiztrack::host::{ManualClock, MemoryHost};
use quiztrack::rpc_handler::handle_request;
use quiztrack::storage::KvStore;
use quiztrack::types::message::MessageSender;
use serde_json::json;

fn setup() -> (Arc<MemoryHost>, Arc<ManualClock>, Mutex<App>) {
    let store = Arc::new(KvStore::open_in_memory().unwrap());
    let host = Arc::new(MemoryHost::new());
    let clock = Arc::new(ManualClock::new(1_000_000));
    let app = App::with_parts(store, host.clone(), clock.clone());
    (host, clock, Mutex::new(app))
}

fn content_sender(tab_id: i64) -> MessageSender {
    MessageSender {
        tab_id: Some(tab_id),
    }
}

#[test]
fn test_unknown_action_is_an_error() {
    let (_host, _clock, app) = setup();
    let err = handle_request(&app, &json!({"action": "explodeTab"}), None).unwrap_err();
    assert!(err.contains("explodeTab"));
}

#[test]
fn test_missing_action_is_an_error() {
    let (_host, _clock, app) = setup();
    assert!(handle_request(&app, &json!({"tabId": 3}), None).is_err());
}

#[test]
fn test_get_tab_time_roundtrip() {
    let (_host, clock, app) = setup();

    handle_request(&app, &json!({"action": "tabActivated", "tabId": 3}), None).unwrap();
    clock.advance(4_000);

    let result = handle_request(&app, &json!({"action": "getTabTime", "tabId": 3}), None).unwrap();
    assert_eq!(result, json!({"time": 4000}));

    // Querying again immediately must not double count.
    let result = handle_request(&app, &json!({"action": "getTabTime", "tabId": 3}), None).unwrap();
    assert_eq!(result, json!({"time": 4000}));
}

#[test]
fn test_get_all_tab_times_shape() {
    let (_host, clock, app) = setup();

    handle_request(&app, &json!({"action": "tabActivated", "tabId": 1}), None).unwrap();
    clock.advance(2_000);
    handle_request(&app, &json!({"action": "tabActivated", "tabId": 2}), None).unwrap();

    let result = handle_request(&app, &json!({"action": "getAllTabTimes"}), None).unwrap();
    // Map keys are decimal tab ids, exactly as the original persisted them.
    assert_eq!(result["tabTimes"]["1"], json!(2000));
}

#[test]
fn test_get_current_tab_prefers_sender() {
    let (_host, _clock, app) = setup();
    handle_request(&app, &json!({"action": "tabActivated", "tabId": 9}), None).unwrap();

    // Content agent gets its own id back.
    let result = handle_request(
        &app,
        &json!({"action": "getCurrentTab"}),
        Some(&content_sender(5)),
    )
    .unwrap();
    assert_eq!(result, json!({"tabId": 5}));

    // Popup gets the active tab.
    let result = handle_request(&app, &json!({"action": "getCurrentTab"}), None).unwrap();
    assert_eq!(result, json!({"tabId": 9}));
}

#[test]
fn test_reset_tab_timer() {
    let (_host, clock, app) = setup();

    handle_request(&app, &json!({"action": "tabActivated", "tabId": 3}), None).unwrap();
    clock.advance(7_000);
    handle_request(&app, &json!({"action": "resetTabTimer", "tabId": 3}), None).unwrap();

    let result = handle_request(&app, &json!({"action": "getTabTime", "tabId": 3}), None).unwrap();
    assert_eq!(result, json!({"time": 0}));
}

#[test]
fn test_domain_change_event_resets_active_tab() {
    let (host, clock, app) = setup();

    handle_request(&app, &json!({"action": "tabActivated", "tabId": 3}), None).unwrap();
    handle_request(
        &app,
        &json!({"action": "tabUrlChanged", "tabId": 3, "url": "https://a.com/x"}),
        None,
    )
    .unwrap();
    clock.advance(5_000);
    handle_request(
        &app,
        &json!({"action": "tabUrlChanged", "tabId": 3, "url": "https://b.com/y"}),
        None,
    )
    .unwrap();

    let result = handle_request(&app, &json!({"action": "getTabTime", "tabId": 3}), None).unwrap();
    assert_eq!(result, json!({"time": 0}));

    // The reset push went out with the exact wire shape.
    let reset_push = host
        .pushes()
        .into_iter()
        .map(|(_, push)| serde_json::to_value(&push).unwrap())
        .find(|v| v["isReset"] == json!(true))
        .expect("reset push missing");
    assert_eq!(
        reset_push,
        json!({"action": "updateTimer", "time": 0, "isReset": true})
    );
}

#[test]
fn test_redirect_uses_sender_tab() {
    let (host, _clock, app) = setup();
    host.add_tab(quiztrack::types::tab::TabInfo {
        id: 1,
        window_id: 1,
        url: "https://news.example.com/".to_string(),
        title: "News".to_string(),
        favicon_url: None,
        active: true,
    });

    let result = handle_request(
        &app,
        &json!({"action": "redirectToAssignmentSite"}),
        Some(&content_sender(1)),
    )
    .unwrap();
    assert_eq!(result, json!({"ok": true}));
    assert_eq!(host.navigations().len(), 1);
}

#[test]
fn test_open_tabs_list_opens_popup() {
    let (host, _clock, app) = setup();
    handle_request(&app, &json!({"action": "openTabsList"}), None).unwrap();
    assert_eq!(host.popup_opens(), 1);
}

#[test]
fn test_save_quiz_result_and_stats() {
    let (_host, _clock, app) = setup();

    let result = handle_request(
        &app,
        &json!({
            "action": "saveQuizResult",
            "data": {"category": "science", "score": 3, "total": 3, "streak": 3}
        }),
        None,
    )
    .unwrap();
    assert_eq!(result, json!({"success": true}));

    let result = handle_request(&app, &json!({"action": "getStats"}), None).unwrap();
    assert_eq!(result["success"], json!(true));
    assert_eq!(result["stats"]["totalScore"], json!(3));
    assert_eq!(result["stats"]["bestStreak"], json!(3));
    assert_eq!(result["stats"]["recentPerformance"][0]["category"], json!("science"));
}

#[test]
fn test_get_quiz_data_placeholder() {
    let (_host, _clock, app) = setup();
    let result = handle_request(&app, &json!({"action": "getQuizData"}), None).unwrap();
    assert_eq!(result["success"], json!(true));
}

#[test]
fn test_page_analysis_is_fire_and_forget() {
    let (_host, _clock, app) = setup();
    let result = handle_request(
        &app,
        &json!({
            "action": "pageAnalysis",
            "data": {
                "url": "https://example.com/",
                "title": "Example",
                "content": "some text",
                "keywords": ["example"],
                "language": "en"
            }
        }),
        Some(&content_sender(2)),
    )
    .unwrap();
    assert_eq!(result, serde_json::Value::Null);
}

#[test]
fn test_analysis_stubs_acknowledge() {
    let (_host, _clock, app) = setup();

    let result = handle_request(
        &app,
        &json!({"action": "analyzePageForQuiz", "pageTitle": "T", "pageUrl": "https://x.test/"}),
        None,
    )
    .unwrap();
    assert_eq!(result, json!({"success": true}));

    let result = handle_request(
        &app,
        &json!({
            "action": "createQuizFromText",
            "text": "selected passage",
            "pageUrl": "https://x.test/",
            "pageTitle": "T"
        }),
        None,
    )
    .unwrap();
    assert_eq!(result, json!({"success": true}));
}

#[test]
fn test_window_focus_events_pause_and_resume() {
    let (host, clock, app) = setup();
    host.add_tab(quiztrack::types::tab::TabInfo {
        id: 4,
        window_id: 2,
        url: "https://docs.rs/".to_string(),
        title: "Docs.rs".to_string(),
        favicon_url: None,
        active: true,
    });

    handle_request(&app, &json!({"action": "tabActivated", "tabId": 4}), None).unwrap();
    clock.advance(3_000);
    handle_request(&app, &json!({"action": "windowFocusChanged"}), None).unwrap();
    clock.advance(50_000);
    handle_request(
        &app,
        &json!({"action": "windowFocusChanged", "windowId": 2}),
        None,
    )
    .unwrap();
    clock.advance(2_000);

    let result = handle_request(&app, &json!({"action": "getTabTime", "tabId": 4}), None).unwrap();
    assert_eq!(result, json!({"time": 5000}));
}
