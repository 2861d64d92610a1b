use std::sync::Arc;

use crate::host::TabHost;
use crate::types::tab::TabId;
use crate::urls::hostname_of;

/// Sites considered productive; redirect targets for the "return to
/// assignment" prompt. The first entry is the fallback navigation target.
pub const ASSIGNMENT_SITES: &[&str] = &[
    "https://www.khanacademy.org/",
    "https://www.coursera.org/assignments",
    "https://classroom.google.com/",
];

/// What the redirect did, mostly for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// An open assignment tab was activated and its window focused.
    SwitchedTo(TabId),
    /// No open match; the requesting tab was navigated to the first site.
    Navigated(TabId),
}

/// Finds or opens an assignment site on request from a content agent.
pub struct Redirector {
    host: Arc<dyn TabHost>,
    sites: Vec<String>,
}

impl Redirector {
    pub fn new(host: Arc<dyn TabHost>) -> Self {
        Self {
            host,
            sites: ASSIGNMENT_SITES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replaces the allowlist (used by tests and the demo).
    pub fn with_sites(mut self, sites: &[&str]) -> Self {
        self.sites = sites.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Scans all open tabs for one whose URL contains the hostname of any
    /// allowlist entry; the first match (in host enumeration order) is
    /// activated and focused. With no match, the requesting tab is
    /// navigated to the first allowlist entry.
    ///
    /// Requires a content-agent sender; popup requests have no tab to
    /// navigate and are ignored. Host failures are not observed or
    /// retried.
    pub fn redirect(&self, requester: Option<TabId>) -> Option<RedirectOutcome> {
        let requester = requester?;

        for tab in self.host.list_tabs() {
            for site in &self.sites {
                let site_host = hostname_of(site);
                if !tab.url.is_empty() && tab.url.contains(&site_host) {
                    let _ = self.host.activate_tab(tab.id);
                    let _ = self.host.focus_window(tab.window_id);
                    return Some(RedirectOutcome::SwitchedTo(tab.id));
                }
            }
        }

        let first = self.sites.first()?;
        let _ = self.host.navigate_tab(requester, first);
        Some(RedirectOutcome::Navigated(requester))
    }
}
