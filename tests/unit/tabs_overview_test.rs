use std::collections::HashMap;

use quiztrack::services::tabs_overview::{format_time, OverviewItem, TabsOverview};
use quiztrack::types::tab::TabInfo;

fn tab(id: i64, window_id: i64, url: &str, title: &str) -> TabInfo {
    TabInfo {
        id,
        window_id,
        url: url.to_string(),
        title: title.to_string(),
        favicon_url: None,
        active: false,
    }
}

fn sample() -> TabsOverview {
    let tabs = vec![
        tab(1, 2, "https://docs.rs/serde", "Docs.rs — serde"),
        tab(2, 1, "https://www.rust-lang.org/", "Rust Programming Language"),
        tab(3, 1, "https://crates.io/", "crates.io"),
        tab(4, 2, "https://github.com/rust-lang", "GitHub"),
    ];
    let mut times = HashMap::new();
    times.insert(1, 61_000u64);
    times.insert(3, 3_600_000u64);
    TabsOverview::new(tabs, times, Some(3))
}

#[test]
fn test_format_time_zero_pads() {
    assert_eq!(format_time(0), "00:00:00");
    assert_eq!(format_time(999), "00:00:00");
    assert_eq!(format_time(59_000), "00:00:59");
    assert_eq!(format_time(61_000), "00:01:01");
    assert_eq!(format_time(3_725_000), "01:02:05");
    assert_eq!(format_time(360_000_000), "100:00:00");
}

#[test]
fn test_rows_group_by_window() {
    let overview = sample();
    let rows = overview.rows();

    // Two windows → two separators, one ahead of each group.
    let kinds: Vec<bool> = rows
        .iter()
        .map(|r| matches!(r, OverviewItem::WindowSeparator(_)))
        .collect();
    assert_eq!(kinds, vec![true, false, false, true, false, false]);

    match &rows[0] {
        OverviewItem::WindowSeparator(window_id) => assert_eq!(*window_id, 1),
        other => panic!("expected separator, got {:?}", other),
    }
}

#[test]
fn test_rows_annotate_times_and_current() {
    let overview = sample();
    let tab_rows: Vec<_> = overview
        .rows()
        .into_iter()
        .filter_map(|r| match r {
            OverviewItem::Tab(row) => Some(row),
            _ => None,
        })
        .collect();

    let row3 = tab_rows.iter().find(|r| r.tab.id == 3).unwrap();
    assert_eq!(row3.time_display, "01:00:00");
    assert!(row3.is_current);

    // Untracked tabs render as zero.
    let row4 = tab_rows.iter().find(|r| r.tab.id == 4).unwrap();
    assert_eq!(row4.time_display, "00:00:00");
    assert!(!row4.is_current);
}

#[test]
fn test_filter_is_case_insensitive_over_title_and_url() {
    let mut overview = sample();

    overview.set_query("RUST");
    let ids: Vec<i64> = overview
        .rows()
        .into_iter()
        .filter_map(|r| match r {
            OverviewItem::Tab(row) => Some(row.tab.id),
            _ => None,
        })
        .collect();
    // "Rust Programming Language" by title; github.com/rust-lang by URL.
    assert_eq!(ids, vec![2, 4]);
}

#[test]
fn test_count_line() {
    let mut overview = sample();
    assert_eq!(overview.count_line(), "Total open tabs: 4");

    overview.set_query("crates");
    assert_eq!(overview.count_line(), "Showing 1 of 4 tabs");

    overview.set_query("nomatch");
    assert_eq!(overview.count_line(), "Showing 0 of 4 tabs");

    overview.set_query("");
    assert_eq!(overview.count_line(), "Total open tabs: 4");
}
