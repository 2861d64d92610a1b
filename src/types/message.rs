//! Cross-context message types.
//!
//! Every message the original extensions exchanged as an `action`-string
//! object is modeled here as a tagged enum variant, so dispatch is
//! exhaustive and the wire names stay exactly as persisted clients expect.

use serde::{Deserialize, Serialize};

use super::quiz::QuizResultDraft;
use super::tab::{TabId, TabInfo, WindowId};

/// Report produced by the quiz content agent's page scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    pub url: String,
    pub title: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub language: String,
}

/// Identity of the context a request came from.
///
/// Content agents carry their tab id; popup senders carry none.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageSender {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<TabId>,
}

/// Requests handled by the quiz coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum QuizRequest {
    GetQuizData,
    SaveQuizResult {
        data: QuizResultDraft,
    },
    GetStats,
    /// Fire-and-forget report from the content agent; logged and dropped.
    PageAnalysis {
        data: PageAnalysis,
    },
    #[serde(rename_all = "camelCase")]
    AnalyzePageForQuiz {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page_title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page_url: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    CreateQuizFromText {
        text: String,
        page_url: String,
        page_title: String,
    },
}

/// Requests handled by the tracker coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TrackerRequest {
    #[serde(rename_all = "camelCase")]
    GetTabTime { tab_id: TabId },
    GetAllTabTimes,
    GetCurrentTab,
    OpenTabsList,
    RedirectToAssignmentSite,
    #[serde(rename_all = "camelCase")]
    ResetTabTimer { tab_id: TabId },
}

/// Host events forwarded to the tracker coordinator by the shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum HostEvent {
    #[serde(rename_all = "camelCase")]
    TabActivated { tab_id: TabId },
    #[serde(rename_all = "camelCase")]
    TabUrlChanged { tab_id: TabId, url: String },
    #[serde(rename_all = "camelCase")]
    TabLoadComplete { tab_id: TabId, url: String },
    #[serde(rename_all = "camelCase")]
    WindowFocusChanged {
        #[serde(default)]
        window_id: Option<WindowId>,
    },
    /// Full snapshot of open tabs, pushed by the shell after tab churn.
    TabsSnapshot { tabs: Vec<TabInfo> },
}

/// Pushes from the tracker coordinator to a tab's content agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ContentPush {
    #[serde(rename_all = "camelCase")]
    UpdateTimer {
        /// Accumulated active milliseconds for the tab.
        time: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_blocked_site: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_reset: Option<bool>,
    },
}

impl ContentPush {
    /// Plain time update.
    pub fn time(time: u64) -> Self {
        ContentPush::UpdateTimer {
            time,
            is_blocked_site: None,
            is_reset: None,
        }
    }

    /// Update sent after a load completes, carrying the blocklist verdict.
    pub fn loaded(time: u64, blocked: bool) -> Self {
        ContentPush::UpdateTimer {
            time,
            is_blocked_site: Some(blocked),
            is_reset: None,
        }
    }

    /// Zeroing update sent after a cross-domain navigation.
    pub fn reset() -> Self {
        ContentPush::UpdateTimer {
            time: 0,
            is_blocked_site: None,
            is_reset: Some(true),
        }
    }
}
