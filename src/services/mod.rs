pub mod context_menu;
pub mod countdown;
pub mod page_scan;
pub mod question_bank;
pub mod quiz_engine;
pub mod redirector;
pub mod reminder;
pub mod tabs_overview;
