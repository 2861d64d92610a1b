//! QuizTrack RPC Server — JSON-RPC over stdin/stdout for a UI shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "action":"getTabTime", "tabId":3, "sender":{"tabId":3}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Host-side effects (timer pushes, tab activation, navigation) are emitted
//! as `{"event": ...}` lines so the shell can apply them; the shell keeps
//! the tab snapshot current with `tabsSnapshot` events.

use std::io::{self, BufRead, Write};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use serde_json::{json, Value};

use quiztrack::app::App;
use quiztrack::host::TabHost;
use quiztrack::rpc_handler::handle_request;
use quiztrack::types::errors::HostError;
use quiztrack::types::message::{ContentPush, MessageSender};
use quiztrack::types::tab::{TabId, TabInfo, WindowId};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        let elapsed = self.window_start.elapsed();
        if elapsed.as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

/// `TabHost` implementation backed by the shell.
///
/// Keeps the tab snapshot the shell last sent, and forwards every host
/// command to the shell as a stdout event line.
struct ShellHost {
    tabs: Mutex<Vec<TabInfo>>,
}

impl ShellHost {
    fn new() -> Self {
        Self {
            tabs: Mutex::new(Vec::new()),
        }
    }

    fn set_tabs(&self, tabs: Vec<TabInfo>) {
        *self.tabs.lock().unwrap() = tabs;
    }

    fn tabs(&self) -> MutexGuard<'_, Vec<TabInfo>> {
        self.tabs.lock().unwrap()
    }

    fn emit(&self, event: Value) {
        println!("{}", event);
        let _ = io::stdout().flush();
    }
}

impl TabHost for ShellHost {
    fn list_tabs(&self) -> Vec<TabInfo> {
        self.tabs().clone()
    }

    fn active_tab_in_window(&self, window_id: WindowId) -> Option<TabInfo> {
        self.tabs()
            .iter()
            .find(|t| t.window_id == window_id && t.active)
            .cloned()
    }

    fn activate_tab(&self, tab_id: TabId) -> Result<(), HostError> {
        self.emit(json!({"event": "activateTab", "tabId": tab_id}));
        Ok(())
    }

    fn focus_window(&self, window_id: WindowId) -> Result<(), HostError> {
        self.emit(json!({"event": "focusWindow", "windowId": window_id}));
        Ok(())
    }

    fn navigate_tab(&self, tab_id: TabId, url: &str) -> Result<(), HostError> {
        self.emit(json!({"event": "navigateTab", "tabId": tab_id, "url": url}));
        Ok(())
    }

    fn push_to_tab(&self, tab_id: TabId, push: &ContentPush) -> Result<(), HostError> {
        let payload = serde_json::to_value(push)
            .map_err(|e| HostError::Unavailable(e.to_string()))?;
        self.emit(json!({"event": "push", "tabId": tab_id, "message": payload}));
        Ok(())
    }

    fn open_popup(&self) -> Result<(), HostError> {
        self.emit(json!({"event": "openPopup"}));
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // Prefer QUIZTRACK_DATA_DIR, fall back to the executable's directory.
    let db_path = if let Ok(dir) = std::env::var("QUIZTRACK_DATA_DIR") {
        std::path::PathBuf::from(dir).join("quiztrack.db")
    } else if let Ok(exe) = std::env::current_exe() {
        exe.parent()
            .unwrap_or(std::path::Path::new("."))
            .join("quiztrack.db")
    } else {
        std::path::PathBuf::from("quiztrack.db")
    };

    let host = std::sync::Arc::new(ShellHost::new());
    let mut app = App::new(db_path.to_str().unwrap_or("quiztrack.db"), host.clone())
        .expect("Failed to initialize QuizTrack");
    app.startup();
    let app = Mutex::new(app);

    // Signal ready
    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    println!("{}", ready);
    io::stdout().flush().unwrap();

    // Max 200 requests per second to keep a misbehaving shell from spinning.
    let mut rate_limiter = RateLimiter::new(200);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let err = json!({"id": null, "error": format!("parse error: {}", e)});
                println!("{}", err);
                io::stdout().flush().unwrap();
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            let response = json!({"id": id, "error": "rate limit exceeded"});
            println!("{}", response);
            io::stdout().flush().unwrap();
            continue;
        }

        // Keep the shell's tab snapshot current before dispatch.
        if req.get("action").and_then(|v| v.as_str()) == Some("tabsSnapshot") {
            if let Some(tabs) = req.get("tabs") {
                if let Ok(tabs) = serde_json::from_value::<Vec<TabInfo>>(tabs.clone()) {
                    host.set_tabs(tabs);
                }
            }
        }

        let sender: Option<MessageSender> = req
            .get("sender")
            .and_then(|v| serde_json::from_value(v.clone()).ok());

        // Poll the reminder alongside normal traffic; a due alarm becomes
        // a notification event for the shell.
        {
            let mut a = app.lock().unwrap();
            let now = a.clock.now_ms();
            if let Some(notification) = a.reminder.poll(now) {
                host.emit(json!({
                    "event": "notification",
                    "title": notification.title,
                    "message": notification.message,
                }));
            }
        }

        let result = handle_request(&app, &req, sender.as_ref());

        let response = match result {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        println!("{}", response);
        io::stdout().flush().unwrap();
    }
}
