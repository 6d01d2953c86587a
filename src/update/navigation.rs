//! Keyboard highlight handlers

use crate::commands::{Cmd, SourceRequest};
use crate::messages::NavMsg;
use crate::model::PopupModel;

use super::highlight_cmd;

/// Handle keyboard navigation
pub fn update_navigation(model: &mut PopupModel, msg: NavMsg) -> Option<Cmd> {
    match msg {
        NavMsg::Next => model.navigation.next().then(|| highlight_cmd(model)),
        NavMsg::Previous => model.navigation.previous().then(|| highlight_cmd(model)),
        NavMsg::ClearHighlight => model
            .navigation
            .clear_highlight()
            .then(|| highlight_cmd(model)),
        NavMsg::ActivateHighlighted => {
            let row = model.navigation.highlighted(model.projection())?;
            Some(Cmd::Source(SourceRequest::Activate {
                tab_id: row.tab_id,
                window_id: row.window_id,
            }))
        }
    }
}
