//! Trait seams over the browser host.
//!
//! The coordinators never talk to a real extension API; they see a [`Clock`]
//! for wall time and a [`TabHost`] for tab enumeration, activation, and
//! message pushes. Production shells implement `TabHost` over their actual
//! host; tests and the demo use [`MemoryHost`].

pub mod memory;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::errors::HostError;
use crate::types::message::ContentPush;
use crate::types::tab::{TabId, TabInfo, WindowId};

pub use memory::MemoryHost;

/// Source of wall-clock time in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// System wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Hand-advanced clock for deterministic tests.
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// The tab/window surface of the browser host.
///
/// All operations are best-effort from the coordinator's point of view:
/// callers that don't care about the outcome discard the `Result`.
pub trait TabHost {
    /// All open tabs across all windows, in host enumeration order.
    fn list_tabs(&self) -> Vec<TabInfo>;

    /// The active tab of the given window, if any.
    fn active_tab_in_window(&self, window_id: WindowId) -> Option<TabInfo>;

    /// Bring a tab to the foreground of its window.
    fn activate_tab(&self, tab_id: TabId) -> Result<(), HostError>;

    /// Focus a window.
    fn focus_window(&self, window_id: WindowId) -> Result<(), HostError>;

    /// Navigate a tab to a new URL.
    fn navigate_tab(&self, tab_id: TabId, url: &str) -> Result<(), HostError>;

    /// Deliver a push message to a tab's content agent.
    fn push_to_tab(&self, tab_id: TabId, push: &ContentPush) -> Result<(), HostError>;

    /// Open the extension popup.
    fn open_popup(&self) -> Result<(), HostError>;
}
