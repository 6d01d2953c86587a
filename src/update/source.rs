//! Tab source result handlers
//!
//! Every result names the entity it was about. If that entity is gone by the
//! time the result arrives, the result is dropped.

use crate::commands::Cmd;
use crate::messages::SourceMsg;
use crate::model::{EmptiedContainers, PopupModel, TabId};

use super::{highlight_cmd, render_cmd};

/// Handle tab source results
pub fn update_source(model: &mut PopupModel, msg: SourceMsg) -> Option<Cmd> {
    match msg {
        SourceMsg::SnapshotLoaded(Ok(snapshot)) => {
            model.directory.ingest(snapshot);
            let bound = model.refresh_projection();
            model.navigation.reset(bound);
            Some(render_cmd(model))
        }
        SourceMsg::SnapshotLoaded(Err(e)) => {
            tracing::warn!("Could not load tabs: {}", e);
            None
        }

        SourceMsg::Activated { tab_id, result } => {
            if let Err(e) = result {
                tracing::warn!("Activating tab {} failed: {}", tab_id, e);
                return None;
            }
            if let Err(e) = model.directory.apply_activate(tab_id) {
                tracing::debug!("Dropping activate result: {}", e);
                return None;
            }
            model.refresh_projection();
            Some(render_cmd(model))
        }

        SourceMsg::MuteChanged { tab_id, result } => {
            let muted = match result {
                Ok(muted) => muted,
                Err(e) => {
                    tracing::warn!("Changing mute state of tab {} failed: {}", tab_id, e);
                    return None;
                }
            };
            if let Err(e) = model.directory.apply_mute(tab_id, muted) {
                tracing::debug!("Dropping mute result: {}", e);
                return None;
            }
            model.refresh_projection();
            Some(Cmd::UpdateMute { tab_id, muted })
        }

        SourceMsg::Closed { tab_id, result } => {
            if let Err(e) = result {
                tracing::warn!("Closing tab {} failed: {}", tab_id, e);
                return None;
            }
            apply_close(model, tab_id)
        }

        SourceMsg::GroupCollapsed { group_id, result } => {
            let collapsed = match result {
                Ok(collapsed) => collapsed,
                Err(e) => {
                    tracing::warn!("Collapsing group {} failed: {}", group_id, e);
                    return None;
                }
            };
            if let Err(e) = model.directory.apply_group_collapsed(group_id, collapsed) {
                tracing::debug!("Dropping collapse result: {}", e);
                return None;
            }
            model.refresh_projection();
            Some(render_cmd(model))
        }
    }
}

/// Remove a closed tab and shrink the list by one row where possible.
///
/// Falls back to a full render whenever the new projection is not the old one
/// minus that row: a group moving because its first member closed, wrappers
/// coming or going, or the current-tab marker changing.
fn apply_close(model: &mut PopupModel, tab_id: TabId) -> Option<Cmd> {
    let before = model.projection();
    let expected = before.without_tab(tab_id);
    let shown = before.rows().find(|row| row.tab_id == tab_id).map(|row| {
        let group = row.group_id.filter(|&g| before.contains_group(g));
        let window = before
            .contains_window(row.window_id)
            .then_some(row.window_id);
        (group, window)
    });

    if let Err(e) = model.directory.apply_close(tab_id) {
        tracing::debug!("Dropping close result: {}", e);
        return None;
    }
    model.refresh_projection();

    let after = model.projection();
    if *after != expected {
        tracing::debug!("Close of tab {} reshaped the list, rendering in full", tab_id);
        return Some(render_cmd(model));
    }

    // Filtered out: nothing on screen changes
    let (group, window) = shown?;
    let emptied = EmptiedContainers {
        group: group.filter(|&g| !after.contains_group(g)),
        window: window.filter(|&w| !after.contains_window(w)),
    };
    Some(Cmd::batch(vec![
        Cmd::RemoveRow { tab_id, emptied },
        highlight_cmd(model),
    ]))
}
