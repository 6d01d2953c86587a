//! Tab source tests
//!
//! Requests executed against the JSON fixture source and fed back through
//! `update`, the way the runtime does it.

mod common;

use tablist::commands::{Cmd, SourceRequest};
use tablist::messages::{Msg, SourceMsg};
use tablist::model::{GroupId, GroupListing, PopupModel, TabId, WindowId};
use tablist::source::{load_snapshot, perform, FixtureTabSource, SourceError, TabSource};
use tablist::update::update;
use tablist::PopupConfig;

const TWO_WINDOWS: &str = r#"{
    "currentWindowId": 1,
    "windows": [
        { "id": 1, "tabs": [
            { "id": 10, "index": 0, "title": "Google", "url": "https://www.google.com", "active": true },
            { "id": 11, "index": 1, "title": "Mail", "url": "https://mail.example.com", "groupId": 9 },
            { "id": 12, "index": 2, "title": "Docs", "url": "https://docs.example.com", "groupId": 9,
              "audible": true }
        ]},
        { "id": 2, "tabs": [
            { "id": 20, "title": "Music", "url": "https://music.example.com", "active": true,
              "audible": true, "mutedInfo": { "muted": false } }
        ]}
    ],
    "groups": [ { "id": 9, "windowId": 1, "title": "Work", "color": "blue", "collapsed": false } ]
}"#;

fn source() -> FixtureTabSource {
    FixtureTabSource::from_json(TWO_WINDOWS).unwrap()
}

/// Run every source request in `cmd` and feed the results back, like the runtime
fn settle(model: &mut PopupModel, source: &dyn TabSource, cmd: Option<Cmd>) {
    let mut queue: Vec<SourceRequest> = cmd.map(|c| c.source_requests()).unwrap_or_default();
    while let Some(request) = queue.pop() {
        let next = update(model, perform(source, request));
        queue.extend(next.map(|c| c.source_requests()).unwrap_or_default());
    }
}

fn loaded_model(source: &FixtureTabSource, only_current_window: bool) -> PopupModel {
    let mut model = PopupModel::new(PopupConfig {
        only_current_window,
        ..PopupConfig::default()
    });
    let cmd = update(&mut model, Msg::Reload);
    settle(&mut model, source, cmd);
    model
}

// ========================================================================
// Snapshots
// ========================================================================

#[test]
fn test_load_snapshot_collects_windows_and_groups() {
    let source = source();
    let snapshot = load_snapshot(&source, false).unwrap();

    assert_eq!(snapshot.current_window_id, Some(WindowId(1)));
    assert_eq!(snapshot.windows.len(), 2);
    let GroupListing::Supported(groups) = snapshot.groups else {
        panic!("groups should be supported");
    };
    assert_eq!(groups[0].id, GroupId(9));
}

#[test]
fn test_reload_requests_scope_from_config() {
    let mut model = PopupModel::new(PopupConfig {
        only_current_window: true,
        ..PopupConfig::default()
    });
    assert_eq!(
        update(&mut model, Msg::Reload),
        Some(Cmd::Source(SourceRequest::LoadSnapshot {
            only_current_window: true
        }))
    );
}

#[test]
fn test_null_groups_degrade_to_ungrouped() {
    let json = TWO_WINDOWS.replace(
        r#""groups": [ { "id": 9, "windowId": 1, "title": "Work", "color": "blue", "collapsed": false } ]"#,
        r#""groups": null"#,
    );
    let source = FixtureTabSource::from_json(&json).unwrap();
    let model = loaded_model(&source, true);

    assert!(!model.directory.groups_supported());
    assert!(model.projection().rows().all(|row| row.group_id.is_none()));
    assert_eq!(model.projection().nodes().len(), 3);
}

#[test]
fn test_offline_source_keeps_previous_state() {
    let source = source();
    let mut model = loaded_model(&source, false);
    let before = model.projection().clone();

    source.set_offline(true);
    let cmd = update(&mut model, Msg::Reload);
    settle(&mut model, &source, cmd);

    assert_eq!(model.projection(), &before);
}

// ========================================================================
// Round trips
// ========================================================================

#[test]
fn test_close_round_trip() {
    let source = source();
    let mut model = loaded_model(&source, true);

    let cmd = update(&mut model, Msg::Row(tablist::messages::RowMsg::Close(TabId(11))));
    settle(&mut model, &source, cmd);

    assert!(!model.projection().contains_tab(TabId(11)));
    assert_eq!(
        source.list_windows(true).unwrap()[0].tabs.len(),
        2,
        "fixture should have dropped the tab"
    );
}

#[test]
fn test_mute_round_trip() {
    let source = source();
    let mut model = loaded_model(&source, false);

    let cmd = update(&mut model, Msg::Row(tablist::messages::RowMsg::ToggleMute(TabId(20))));
    settle(&mut model, &source, cmd);

    assert!(model.directory.tab(TabId(20)).unwrap().muted);
}

#[test]
fn test_collapse_round_trip() {
    let source = source();
    let mut model = loaded_model(&source, true);

    let cmd = update(
        &mut model,
        Msg::Row(tablist::messages::RowMsg::ToggleGroup(GroupId(9))),
    );
    settle(&mut model, &source, cmd);

    assert!(model.directory.group(GroupId(9)).unwrap().collapsed);
}

#[test]
fn test_failed_request_is_absorbed() {
    let source = source();
    let mut model = loaded_model(&source, true);
    source.set_offline(true);

    let msg = perform(&source, SourceRequest::SetMuted {
        tab_id: TabId(12),
        muted: true,
    });
    assert!(matches!(
        msg,
        Msg::Source(SourceMsg::MuteChanged {
            result: Err(SourceError::Unavailable(_)),
            ..
        })
    ));
    assert_eq!(update(&mut model, msg), None);
    assert!(!model.directory.tab(TabId(12)).unwrap().muted);
}

#[test]
fn test_close_of_already_closed_tab_fails_in_source() {
    let source = source();
    source.close(TabId(20)).unwrap();
    let msg = perform(&source, SourceRequest::Close { tab_id: TabId(20) });
    assert!(matches!(
        msg,
        Msg::Source(SourceMsg::Closed {
            result: Err(SourceError::TabNotFound(TabId(20))),
            ..
        })
    ));
}

#[test]
fn test_bundled_sample_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/two_windows.json");
    let source = FixtureTabSource::load(&path).unwrap();
    let model = loaded_model(&source, false);

    assert!(model.projection().has_window_wrappers());
    assert_eq!(model.projection().tab_count(), 8);
    assert!(model.directory.tab(TabId(202)).unwrap().muted);
}
