//! Row click handlers
//!
//! Clicks only issue requests. The directory changes when the tab source
//! reports back.

use crate::commands::{Cmd, SourceRequest};
use crate::messages::RowMsg;
use crate::model::PopupModel;

/// Handle pointer actions on rows
pub fn update_row(model: &mut PopupModel, msg: RowMsg) -> Option<Cmd> {
    match msg {
        RowMsg::Activate(target) => {
            let Some(tab) = model.directory.tab(target.tab_id) else {
                tracing::debug!("Click on stale row for tab {}", target.tab_id);
                return None;
            };
            Some(Cmd::Source(SourceRequest::Activate {
                tab_id: tab.id,
                window_id: tab.window_id,
            }))
        }

        RowMsg::ToggleMute(tab_id) => {
            let Some(tab) = model.directory.tab(tab_id) else {
                tracing::debug!("Mute click on stale row for tab {}", tab_id);
                return None;
            };
            Some(Cmd::Source(SourceRequest::SetMuted {
                tab_id,
                muted: !tab.muted,
            }))
        }

        RowMsg::Close(tab_id) => {
            if model.directory.tab(tab_id).is_none() {
                tracing::debug!("Close click on stale row for tab {}", tab_id);
                return None;
            }
            Some(Cmd::Source(SourceRequest::Close { tab_id }))
        }

        RowMsg::ToggleGroup(group_id) => {
            let Some(group) = model.directory.group(group_id) else {
                tracing::debug!("Click on stale group header {}", group_id);
                return None;
            };
            Some(Cmd::Source(SourceRequest::SetGroupCollapsed {
                group_id,
                collapsed: !group.collapsed,
            }))
        }
    }
}
