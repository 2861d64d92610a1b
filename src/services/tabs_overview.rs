//! View logic for the tracker popup's searchable tab list.
//!
//! Pure functions from tab/ledger snapshots to display rows; the DOM layer
//! renders what comes out and feeds search input back in.

use std::collections::HashMap;

use crate::types::tab::{TabId, TabInfo, WindowId};

/// Formats accumulated milliseconds as zero-padded `HH:MM:SS`.
pub fn format_time(milliseconds: u64) -> String {
    let total_seconds = milliseconds / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// One rendered line of the tab list.
#[derive(Debug, Clone, PartialEq)]
pub enum OverviewItem {
    /// Header shown when the list crosses into a new window.
    WindowSeparator(WindowId),
    Tab(TabRow),
}

/// A tab annotated with its tracked time.
#[derive(Debug, Clone, PartialEq)]
pub struct TabRow {
    pub tab: TabInfo,
    pub time_display: String,
    pub is_current: bool,
}

/// Immutable view state for the popup's tab list.
pub struct TabsOverview {
    tabs: Vec<TabInfo>,
    times: HashMap<TabId, u64>,
    current_tab: Option<TabId>,
    query: String,
}

impl TabsOverview {
    /// Builds the view over a tab snapshot and ledger snapshot, sorted by
    /// window id so tabs group under their window separators.
    pub fn new(mut tabs: Vec<TabInfo>, times: HashMap<TabId, u64>, current_tab: Option<TabId>) -> Self {
        tabs.sort_by_key(|t| t.window_id);
        Self {
            tabs,
            times,
            current_tab,
            query: String::new(),
        }
    }

    /// Sets the search query (case-insensitive substring over title and URL).
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_lowercase();
    }

    fn matches(&self, tab: &TabInfo) -> bool {
        if self.query.is_empty() {
            return true;
        }
        tab.title.to_lowercase().contains(&self.query)
            || tab.url.to_lowercase().contains(&self.query)
    }

    fn visible_tabs(&self) -> Vec<&TabInfo> {
        self.tabs.iter().filter(|t| self.matches(t)).collect()
    }

    /// Rendered rows: window separators interleaved with annotated tabs.
    pub fn rows(&self) -> Vec<OverviewItem> {
        let mut rows = Vec::new();
        let mut current_window: Option<WindowId> = None;
        for tab in self.visible_tabs() {
            if current_window != Some(tab.window_id) {
                current_window = Some(tab.window_id);
                rows.push(OverviewItem::WindowSeparator(tab.window_id));
            }
            rows.push(OverviewItem::Tab(TabRow {
                tab: tab.clone(),
                time_display: format_time(self.times.get(&tab.id).copied().unwrap_or(0)),
                is_current: self.current_tab == Some(tab.id),
            }));
        }
        rows
    }

    /// The count line above the list.
    pub fn count_line(&self) -> String {
        let total = self.tabs.len();
        if self.query.is_empty() {
            format!("Total open tabs: {}", total)
        } else {
            format!("Showing {} of {} tabs", self.visible_tabs().len(), total)
        }
    }
}
