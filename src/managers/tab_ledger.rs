use std::collections::HashMap;
use std::sync::Arc;

use crate::host::{Clock, TabHost};
use crate::storage::KvStore;
use crate::types::message::ContentPush;
use crate::types::tab::{TabId, WindowId};
use crate::urls::hostname_of;

/// Storage key for the persisted ledger.
pub const TAB_TIMES_KEY: &str = "tabTimes";

/// Sites subject to the countdown prompt. Matched as substrings of the full
/// URL, not as hostnames.
pub const BLOCKED_SITES: &[&str] = &[
    "facebook.com",
    "youtube.com",
    "instagram.com",
    "tiktok.com",
];

/// Trait defining the tab time ledger interface.
pub trait TabLedgerTrait {
    fn record_elapsed(&mut self, tab_id: TabId);
    fn get_elapsed(&mut self, tab_id: TabId) -> u64;
    fn reset_elapsed(&mut self, tab_id: TabId);
    fn all_times(&mut self) -> HashMap<TabId, u64>;
    fn active_tab(&self) -> Option<TabId>;
    fn is_blocked_site(&self, url: &str) -> bool;
    fn on_tab_activated(&mut self, tab_id: TabId);
    fn on_tab_url_changed(&mut self, tab_id: TabId, url: &str);
    fn on_tab_load_complete(&mut self, tab_id: TabId, url: &str);
    fn on_window_focus_changed(&mut self, window_id: Option<WindowId>);
}

/// Per-tab active-time accounting for the tracker background coordinator.
///
/// Owns the tab→milliseconds ledger, the active-tab pointer, and the
/// per-tab hostname cache. Every mutation persists the full ledger and
/// sends a best-effort `updateTimer` push to the affected tab; both
/// failures degrade to a log line. Entries are never removed when a tab
/// closes — stale ids simply stop being queried.
pub struct TabLedger {
    store: Arc<KvStore>,
    host: Arc<dyn TabHost>,
    clock: Arc<dyn Clock>,
    times: HashMap<TabId, u64>,
    active_tab: Option<TabId>,
    /// When the active tab came to the foreground. None while no window
    /// has focus (the timer is paused).
    activated_at: Option<u64>,
    hostnames: HashMap<TabId, String>,
    blocked_sites: Vec<String>,
}

impl TabLedger {
    /// Creates a ledger, loading any previously persisted times.
    ///
    /// A failed load is logged and starts the ledger empty, matching the
    /// degrade-to-default error policy used throughout.
    pub fn new(store: Arc<KvStore>, host: Arc<dyn TabHost>, clock: Arc<dyn Clock>) -> Self {
        let times = match store.get::<HashMap<TabId, u64>>(TAB_TIMES_KEY) {
            Ok(Some(times)) => times,
            Ok(None) => HashMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load tab times, starting empty");
                HashMap::new()
            }
        };
        Self {
            store,
            host,
            clock,
            times,
            active_tab: None,
            activated_at: None,
            hostnames: HashMap::new(),
            blocked_sites: BLOCKED_SITES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replaces the blocklist (used by tests and the demo).
    pub fn with_blocked_sites(mut self, sites: &[&str]) -> Self {
        self.blocked_sites = sites.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Writes the whole ledger to storage. Failures are logged and swallowed;
    /// the in-memory ledger stays authoritative for this coordinator.
    fn persist(&self) {
        if let Err(e) = self.store.set(TAB_TIMES_KEY, &self.times) {
            tracing::warn!(error = %e, "failed to persist tab times");
        }
    }

    /// Best-effort push to a tab's content agent. A closed or unready tab
    /// fails the send; that is expected and ignored.
    fn push(&self, tab_id: TabId, push: ContentPush) {
        if let Err(e) = self.host.push_to_tab(tab_id, &push) {
            tracing::debug!(tab_id, error = %e, "timer push not delivered");
        }
    }

    fn restamp(&mut self) {
        self.activated_at = Some(self.clock.now_ms());
    }
}

impl TabLedgerTrait for TabLedger {
    /// Folds `now − activation` into the tab's entry, persists, and pushes
    /// the new total. No-op while the timer is paused (no activation stamp).
    fn record_elapsed(&mut self, tab_id: TabId) {
        let Some(started) = self.activated_at else {
            return;
        };
        let spent = self.clock.now_ms().saturating_sub(started);
        let total = self.times.entry(tab_id).or_insert(0);
        *total += spent;
        let total = *total;
        self.persist();
        self.push(tab_id, ContentPush::time(total));
    }

    /// Current accumulated time for a tab.
    ///
    /// For the active tab this first records the in-flight interval and
    /// restamps activation, so repeated queries neither double count nor
    /// stall.
    fn get_elapsed(&mut self, tab_id: TabId) -> u64 {
        if Some(tab_id) == self.active_tab {
            self.record_elapsed(tab_id);
            self.restamp();
        }
        self.times.get(&tab_id).copied().unwrap_or(0)
    }

    /// Zeroes a tab's entry and persists, restamping activation when the
    /// tab is active so the in-flight interval dies with the reset.
    /// Manual resets send no push — the requesting agent zeroes its own
    /// display.
    fn reset_elapsed(&mut self, tab_id: TabId) {
        self.times.insert(tab_id, 0);
        self.persist();
        if Some(tab_id) == self.active_tab {
            self.restamp();
        }
    }

    /// Snapshot of the whole ledger, with the active tab brought current
    /// first.
    fn all_times(&mut self) -> HashMap<TabId, u64> {
        if let Some(active) = self.active_tab {
            self.record_elapsed(active);
            self.restamp();
        }
        self.times.clone()
    }

    fn active_tab(&self) -> Option<TabId> {
        self.active_tab
    }

    fn is_blocked_site(&self, url: &str) -> bool {
        !url.is_empty() && self.blocked_sites.iter().any(|site| url.contains(site))
    }

    /// The foreground tab changed: settle the previous tab, move the
    /// pointer, and replay the new tab's stored time to its agent.
    fn on_tab_activated(&mut self, tab_id: TabId) {
        if let Some(prev) = self.active_tab {
            self.record_elapsed(prev);
        }
        self.active_tab = Some(tab_id);
        self.restamp();
        let stored = self.times.get(&tab_id).copied().unwrap_or(0);
        if stored > 0 {
            self.push(tab_id, ContentPush::time(stored));
        }
    }

    /// A tab navigated. On the active tab this settles the clock and, when
    /// the hostname changed, zeroes the entry and pushes a reset. On a
    /// background tab only the hostname cache moves.
    fn on_tab_url_changed(&mut self, tab_id: TabId, url: &str) {
        let new_hostname = hostname_of(url);
        let old_hostname = self.hostnames.get(&tab_id).cloned();

        if Some(tab_id) == self.active_tab {
            self.record_elapsed(tab_id);
            self.restamp();

            if let Some(old) = old_hostname.as_deref() {
                if old != new_hostname {
                    self.times.insert(tab_id, 0);
                    self.persist();
                    self.push(tab_id, ContentPush::reset());
                }
            }
        }

        self.hostnames.insert(tab_id, new_hostname);
    }

    /// A tab finished loading: classify it against the blocklist, backfill
    /// the hostname cache, and push time plus verdict to its agent.
    fn on_tab_load_complete(&mut self, tab_id: TabId, url: &str) {
        let blocked = self.is_blocked_site(url);
        if !url.is_empty() {
            self.hostnames
                .entry(tab_id)
                .or_insert_with(|| hostname_of(url));
        }
        let stored = self.times.get(&tab_id).copied().unwrap_or(0);
        self.push(tab_id, ContentPush::loaded(stored, blocked));
    }

    /// Window focus moved. Losing focus settles the active tab and pauses
    /// the clock (the pointer keeps the id). Gaining focus adopts that
    /// window's active tab and restarts the clock; the previous tab's time
    /// is not settled on this path.
    fn on_window_focus_changed(&mut self, window_id: Option<WindowId>) {
        match window_id {
            None => {
                if let Some(active) = self.active_tab {
                    self.record_elapsed(active);
                    self.activated_at = None;
                }
            }
            Some(window_id) => {
                if let Some(tab) = self.host.active_tab_in_window(window_id) {
                    self.active_tab = Some(tab.id);
                    self.restamp();
                }
            }
        }
    }
}
