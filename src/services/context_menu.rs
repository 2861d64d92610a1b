//! Context-menu contribution for the quiz extension.

use crate::types::message::QuizRequest;
use crate::types::tab::{TabId, TabInfo};

pub const MENU_QUICK_QUIZ: &str = "quickQuiz";
pub const MENU_QUIZ_ABOUT_PAGE: &str = "quizAboutPage";

/// Where a menu entry is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuContext {
    Selection,
    Page,
}

/// A contributed context-menu entry.
#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub contexts: &'static [MenuContext],
}

/// The two entries the quiz extension contributes.
pub fn entries() -> &'static [MenuEntry] {
    &[
        MenuEntry {
            id: MENU_QUICK_QUIZ,
            title: "Start Quick Quiz",
            contexts: &[MenuContext::Selection, MenuContext::Page],
        },
        MenuEntry {
            id: MENU_QUIZ_ABOUT_PAGE,
            title: "Quiz about this page topic",
            contexts: &[MenuContext::Page],
        },
    ]
}

/// What a menu click should do.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    /// Open the quiz popup.
    OpenPopup,
    /// Send a request to the clicked tab's content agent.
    SendToTab {
        tab_id: TabId,
        request: QuizRequest,
    },
}

/// Dispatches a context-menu click. Unknown entry ids are ignored.
pub fn on_click(entry_id: &str, tab: &TabInfo) -> Option<MenuAction> {
    match entry_id {
        MENU_QUICK_QUIZ => Some(MenuAction::OpenPopup),
        MENU_QUIZ_ABOUT_PAGE => Some(MenuAction::SendToTab {
            tab_id: tab.id,
            request: QuizRequest::AnalyzePageForQuiz {
                page_title: Some(tab.title.clone()),
                page_url: Some(tab.url.clone()),
            },
        }),
        _ => None,
    }
}
