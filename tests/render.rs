//! Text rendering tests
//!
//! Row layout, in-place row updates and the highlight marker.

mod common;

use common::*;
use tablist::model::{EmptiedContainers, GroupId, SessionMode, TabDirectory, TabId, WindowId};
use tablist::projection::project;
use tablist::render::{RenderSink, RowKind, RowMap, RowTarget, TextSink};

fn rendered(mode: SessionMode, snapshot: tablist::model::Snapshot) -> TextSink {
    let mut dir = TabDirectory::new(mode);
    dir.ingest(snapshot);
    let mut sink = TextSink::new();
    sink.render(&project(&dir, None));
    sink
}

fn two_windows() -> tablist::model::Snapshot {
    let mut music = tab(20, 2, 0, "Music");
    music.audible = true;
    snapshot(
        1,
        vec![
            window(1, vec![tab(10, 1, 0, "Home")]),
            window(2, vec![music]),
        ],
        None,
    )
}

// ========================================================================
// Layout
// ========================================================================

#[test]
fn test_group_header_precedes_indented_members() {
    let sink = rendered(SessionMode::CurrentWindow, three_tabs_work_group());

    assert_eq!(
        sink.lines(),
        &[
            "- Google  <https://google.example.com/>".to_string(),
            "v Work [blue]".to_string(),
            "  - Mail  <https://mail.example.com/>".to_string(),
            "  - Docs  <https://docs.example.com/>".to_string(),
        ]
    );
}

#[test]
fn test_window_wrappers_are_labelled() {
    let sink = rendered(SessionMode::AllWindows, two_windows());

    assert_eq!(sink.lines()[0], "== This Window ==");
    assert_eq!(sink.lines()[2], "== window 1 ==");
    assert_eq!(
        sink.lines()[3],
        "  - Music [playing]  <https://music.example.com/>"
    );
}

#[test]
fn test_empty_projection_says_no_tabs() {
    let sink = rendered(
        SessionMode::CurrentWindow,
        snapshot(1, vec![window(1, vec![])], None),
    );
    assert!(sink.lines().is_empty());
    assert!(sink.output().contains("(no tabs)"));
}

// ========================================================================
// Row map
// ========================================================================

#[test]
fn test_row_map_resolves_lines() {
    let sink = rendered(SessionMode::CurrentWindow, three_tabs_work_group());
    let map = sink.row_map();

    assert_eq!(map.len(), 4);
    assert_eq!(map.group_at(1), Some(GroupId(9)));
    assert_eq!(
        map.tab_at(2),
        Some(RowTarget {
            tab_id: TabId(2),
            window_id: WindowId(1),
        })
    );
    assert_eq!(map.tab_at(1), None);
    assert_eq!(map.line_of(TabId(3)), Some(3));
    // Navigation index 1 is the second tab row, past the header
    assert_eq!(map.tab_line(1), Some(2));
}

#[test]
fn test_remove_tab_drops_emptied_headers() {
    let sink = rendered(SessionMode::AllWindows, two_windows());
    let mut map: RowMap = sink.row_map().clone();

    let removed = map.remove_tab(
        TabId(20),
        EmptiedContainers {
            group: None,
            window: Some(WindowId(2)),
        },
    );

    assert_eq!(removed, vec![2, 3]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(0), Some(RowKind::WindowHeader(WindowId(1))));
}

// ========================================================================
// Incremental updates
// ========================================================================

#[test]
fn test_row_removal_keeps_lines_and_map_aligned() {
    let mut sink = rendered(SessionMode::CurrentWindow, three_tabs_work_group());

    sink.on_row_removed(TabId(2), EmptiedContainers::default());
    assert_eq!(sink.lines().len(), 3);
    assert_eq!(sink.row_map().line_of(TabId(3)), Some(2));

    sink.on_row_removed(
        TabId(3),
        EmptiedContainers {
            group: Some(GroupId(9)),
            window: None,
        },
    );
    assert_eq!(sink.lines().len(), 1);
    assert_eq!(sink.row_map().len(), 1);
    assert_eq!(sink.render_count(), 1);
}

#[test]
fn test_mute_change_rewrites_only_that_row() {
    let mut sink = rendered(SessionMode::AllWindows, two_windows());

    sink.on_mute_state_changed(TabId(20), true);
    assert_eq!(
        sink.lines()[3],
        "  - Music [muted]  <https://music.example.com/>"
    );

    // A silent tab gets no speaker marker either way
    sink.on_mute_state_changed(TabId(10), true);
    assert_eq!(sink.lines()[1], "  - Home  <https://home.example.com/>");
    assert_eq!(sink.render_count(), 1);
}

#[test]
fn test_highlight_marker_follows_tab_rows() {
    let mut sink = rendered(SessionMode::CurrentWindow, three_tabs_work_group());

    sink.on_highlight_changed(Some(1), true);
    let output = sink.output();
    let marked: Vec<&str> = output
        .lines()
        .filter(|line| line.contains(" > "))
        .map(|line| line.trim_start())
        .collect::<Vec<_>>();
    assert_eq!(marked.len(), 1);
    assert!(marked[0].contains("Mail"));

    sink.on_highlight_changed(Some(1), false);
    assert!(!sink.output().contains(" > "));
}
