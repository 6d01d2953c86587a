//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod filter;
mod navigation;
mod row;
mod source;

use crate::commands::{Cmd, SourceRequest};
use crate::messages::Msg;
use crate::model::PopupModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use filter::update_filter;
pub use navigation::update_navigation;
pub use row::update_row;
pub use source::update_source;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut PopupModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut PopupModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Source(m) => source::update_source(model, m),
        Msg::Filter(m) => filter::update_filter(model, m),
        Msg::Nav(m) => navigation::update_navigation(model, m),
        Msg::Row(m) => row::update_row(model, m),
        Msg::Reload => Some(Cmd::Source(SourceRequest::LoadSnapshot {
            only_current_window: model.directory.mode().only_current_window(),
        })),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Logs every message and checks the highlight invariants after it is applied.
#[cfg(debug_assertions)]
fn update_traced(model: &mut PopupModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    model.assert_invariants(&msg_name);
    result
}

/// Get a display name for a message type
///
/// Snapshots are summarised; everything else uses Debug formatting.
/// Example outputs:
/// - `Nav::Next`
/// - `Filter::KeyUp { key: Char('g'), value: "g" }`
/// - `Source::SnapshotLoaded(3 windows)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::SourceMsg;

    match msg {
        Msg::Source(SourceMsg::SnapshotLoaded(Ok(snapshot))) => {
            format!("Source::SnapshotLoaded({} windows)", snapshot.windows.len())
        }
        Msg::Source(m) => format!("Source::{:?}", m),
        Msg::Filter(m) => format!("Filter::{:?}", m),
        Msg::Nav(m) => format!("Nav::{:?}", m),
        Msg::Row(m) => format!("Row::{:?}", m),
        Msg::Reload => "Reload".to_string(),
    }
}

/// Instruction that mirrors the navigation state into the sink
pub(crate) fn highlight_cmd(model: &PopupModel) -> Cmd {
    Cmd::Highlight {
        index: model.navigation.index(),
        visible: model.navigation.is_visible(),
    }
}

/// Full render followed by the highlight it should show
pub(crate) fn render_cmd(model: &PopupModel) -> Cmd {
    Cmd::batch(vec![Cmd::Render, highlight_cmd(model)])
}
