//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use tablist::config::PopupConfig;
use tablist::messages::Msg;
use tablist::model::{
    Group, GroupColor, GroupId, GroupListing, PopupModel, Snapshot, Tab, TabId, Window, WindowId,
};
use tablist::projection::Projection;
use tablist::update::update;

/// Create an ungrouped, inactive, silent tab
pub fn tab(id: i64, window: i64, index: usize, title: &str) -> Tab {
    Tab {
        id: TabId(id),
        window_id: WindowId(window),
        group_id: None,
        index,
        title: title.to_string(),
        url: format!("https://{}.example.com/", title.to_lowercase()),
        favicon: None,
        active: false,
        audible: false,
        muted: false,
    }
}

/// Put a tab into a group
pub fn grouped(mut tab: Tab, group: i64) -> Tab {
    tab.group_id = Some(GroupId(group));
    tab
}

pub fn group(id: i64, window: i64, title: &str, color: GroupColor) -> Group {
    Group {
        id: GroupId(id),
        window_id: Some(WindowId(window)),
        title: title.to_string(),
        color,
        collapsed: false,
    }
}

pub fn window(id: i64, tabs: Vec<Tab>) -> Window {
    Window {
        id: WindowId(id),
        incognito: false,
        tabs,
    }
}

/// `groups: None` models a browser without tab groups
pub fn snapshot(current: i64, windows: Vec<Window>, groups: Option<Vec<Group>>) -> Snapshot {
    Snapshot {
        current_window_id: Some(WindowId(current)),
        windows,
        groups: groups.map_or(GroupListing::Unsupported, GroupListing::Supported),
    }
}

/// Three ungrouped tabs "Google", "Mail", "Docs" in window 1
pub fn three_tabs() -> Snapshot {
    snapshot(
        1,
        vec![window(
            1,
            vec![
                tab(1, 1, 0, "Google"),
                tab(2, 1, 1, "Mail"),
                tab(3, 1, 2, "Docs"),
            ],
        )],
        Some(vec![]),
    )
}

/// `three_tabs` with "Mail" and "Docs" in group 9 "Work"
pub fn three_tabs_work_group() -> Snapshot {
    snapshot(
        1,
        vec![window(
            1,
            vec![
                tab(1, 1, 0, "Google"),
                grouped(tab(2, 1, 1, "Mail"), 9),
                grouped(tab(3, 1, 2, "Docs"), 9),
            ],
        )],
        Some(vec![group(9, 1, "Work", GroupColor::Blue)]),
    )
}

/// A model that has ingested `snapshot`
pub fn test_model(only_current_window: bool, snapshot: Snapshot) -> PopupModel {
    let mut model = PopupModel::new(PopupConfig {
        only_current_window,
        ..PopupConfig::default()
    });
    update(&mut model, Msg::snapshot(snapshot));
    model
}

pub fn row_ids(projection: &Projection) -> Vec<i64> {
    projection.rows().map(|row| row.tab_id.0).collect()
}

pub fn row_titles(projection: &Projection) -> Vec<String> {
    projection.rows().map(|row| row.title.clone()).collect()
}
