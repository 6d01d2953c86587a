//! Shared helpers for benchmarks

use tablist::model::{
    Group, GroupColor, GroupId, GroupListing, Snapshot, Tab, TabId, Window, WindowId,
};

const SITES: [&str; 8] = [
    "github", "docs.rs", "crates.io", "mail", "calendar", "news", "music", "wiki",
];

/// A snapshot of `windows` windows with `tabs_per_window` tabs each.
/// Every fourth run of four tabs in a window shares a group.
#[allow(dead_code)]
pub fn make_snapshot(windows: usize, tabs_per_window: usize) -> Snapshot {
    let mut groups = Vec::new();
    let windows = (0..windows)
        .map(|w| {
            let window_id = WindowId(w as i64 + 1);
            let tabs = (0..tabs_per_window)
                .map(|i| {
                    let id = (w * tabs_per_window + i) as i64 + 1;
                    let site = SITES[i % SITES.len()];
                    let group_id = (i / 4 % 4 == 0).then(|| GroupId((w * 1000 + i / 4) as i64));
                    if let Some(group_id) = group_id {
                        if !groups.iter().any(|g: &Group| g.id == group_id) {
                            groups.push(Group {
                                id: group_id,
                                window_id: Some(window_id),
                                title: format!("Group {}", group_id.0),
                                color: GroupColor::ALL[groups.len() % GroupColor::ALL.len()],
                                collapsed: false,
                            });
                        }
                    }
                    Tab {
                        id: TabId(id),
                        window_id,
                        group_id,
                        index: i,
                        title: format!("{} page {}", site, i),
                        url: format!("https://{}.example.com/page/{}", site, i),
                        favicon: None,
                        active: i == 0,
                        audible: i % 7 == 0,
                        muted: false,
                    }
                })
                .collect();
            Window {
                id: window_id,
                incognito: false,
                tabs,
            }
        })
        .collect();

    Snapshot {
        current_window_id: Some(WindowId(1)),
        windows,
        groups: GroupListing::Supported(groups),
    }
}
