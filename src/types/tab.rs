use serde::{Deserialize, Serialize};

/// Host-assigned tab identifier, unique while the tab is open.
pub type TabId = i64;

/// Host-assigned window identifier.
pub type WindowId = i64;

/// A snapshot of an open browser tab as reported by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: TabId,
    pub window_id: WindowId,
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
    #[serde(default)]
    pub active: bool,
}
