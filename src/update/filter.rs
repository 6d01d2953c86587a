//! Filter box handlers

use crate::commands::Cmd;
use crate::filter::{is_content_key, FilterChange};
use crate::messages::FilterMsg;
use crate::model::PopupModel;

use super::render_cmd;

/// Handle filter box input
pub fn update_filter(model: &mut PopupModel, msg: FilterMsg) -> Option<Cmd> {
    match msg {
        FilterMsg::KeyUp { key, value } => {
            if !is_content_key(key) {
                tracing::debug!("Ignoring non-content key {}", key);
                return None;
            }
            match model.filter.set_query(&value) {
                FilterChange::Unchanged => None,
                FilterChange::Applied => {
                    let bound = model.refresh_projection();
                    model.navigation.enter_filtered(bound);
                    tracing::debug!(query = %value, matches = bound, "Filter applied");
                    Some(render_cmd(model))
                }
                FilterChange::Cleared => Some(leave_filter(model)),
            }
        }

        FilterMsg::Clear => model.filter.clear().then(|| leave_filter(model)),
    }
}

fn leave_filter(model: &mut PopupModel) -> Cmd {
    let bound = model.refresh_projection();
    model.navigation.enter_normal(bound);
    tracing::debug!(rows = bound, "Filter cleared");
    render_cmd(model)
}
