//! In-memory [`TabHost`] double for tests and the console demo.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::types::errors::HostError;
use crate::types::message::ContentPush;
use crate::types::tab::{TabId, TabInfo, WindowId};

use super::TabHost;

/// A `TabHost` backed by a plain tab list.
///
/// Records every push, activation, and navigation so tests can assert on
/// them, and can be told to treat specific tabs as unreachable to exercise
/// the best-effort paths.
#[derive(Default)]
pub struct MemoryHost {
    tabs: Mutex<Vec<TabInfo>>,
    unreachable: Mutex<HashSet<TabId>>,
    pushes: Mutex<Vec<(TabId, ContentPush)>>,
    activated: Mutex<Vec<TabId>>,
    focused_windows: Mutex<Vec<WindowId>>,
    navigations: Mutex<Vec<(TabId, String)>>,
    popup_opens: Mutex<u32>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tabs(&self, tabs: Vec<TabInfo>) {
        *self.tabs.lock().unwrap() = tabs;
    }

    pub fn add_tab(&self, tab: TabInfo) {
        self.tabs.lock().unwrap().push(tab);
    }

    /// Make pushes to this tab fail, as if it were closed.
    pub fn disconnect_tab(&self, tab_id: TabId) {
        self.unreachable.lock().unwrap().insert(tab_id);
    }

    pub fn pushes(&self) -> Vec<(TabId, ContentPush)> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn take_pushes(&self) -> Vec<(TabId, ContentPush)> {
        std::mem::take(&mut self.pushes.lock().unwrap())
    }

    pub fn activations(&self) -> Vec<TabId> {
        self.activated.lock().unwrap().clone()
    }

    pub fn focused_windows(&self) -> Vec<WindowId> {
        self.focused_windows.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<(TabId, String)> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn popup_opens(&self) -> u32 {
        *self.popup_opens.lock().unwrap()
    }
}

impl TabHost for MemoryHost {
    fn list_tabs(&self) -> Vec<TabInfo> {
        self.tabs.lock().unwrap().clone()
    }

    fn active_tab_in_window(&self, window_id: WindowId) -> Option<TabInfo> {
        self.tabs
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.window_id == window_id && t.active)
            .cloned()
    }

    fn activate_tab(&self, tab_id: TabId) -> Result<(), HostError> {
        let mut tabs = self.tabs.lock().unwrap();
        if !tabs.iter().any(|t| t.id == tab_id) {
            return Err(HostError::TabUnreachable(tab_id));
        }
        let window_id = tabs.iter().find(|t| t.id == tab_id).map(|t| t.window_id);
        for tab in tabs.iter_mut() {
            if Some(tab.window_id) == window_id {
                tab.active = tab.id == tab_id;
            }
        }
        self.activated.lock().unwrap().push(tab_id);
        Ok(())
    }

    fn focus_window(&self, window_id: WindowId) -> Result<(), HostError> {
        self.focused_windows.lock().unwrap().push(window_id);
        Ok(())
    }

    fn navigate_tab(&self, tab_id: TabId, url: &str) -> Result<(), HostError> {
        let mut tabs = self.tabs.lock().unwrap();
        match tabs.iter_mut().find(|t| t.id == tab_id) {
            Some(tab) => {
                tab.url = url.to_string();
                self.navigations
                    .lock()
                    .unwrap()
                    .push((tab_id, url.to_string()));
                Ok(())
            }
            None => Err(HostError::TabUnreachable(tab_id)),
        }
    }

    fn push_to_tab(&self, tab_id: TabId, push: &ContentPush) -> Result<(), HostError> {
        if self.unreachable.lock().unwrap().contains(&tab_id) {
            return Err(HostError::TabUnreachable(tab_id));
        }
        self.pushes.lock().unwrap().push((tab_id, push.clone()));
        Ok(())
    }

    fn open_popup(&self) -> Result<(), HostError> {
        *self.popup_opens.lock().unwrap() += 1;
        Ok(())
    }
}
