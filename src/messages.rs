//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::keymap::KeyCode;
use crate::model::{GroupId, Snapshot, TabId};
use crate::render::RowTarget;
use crate::source::SourceError;

/// Results delivered by the tab source, one per issued request
#[derive(Debug, Clone)]
pub enum SourceMsg {
    /// A full snapshot (or the reason none could be taken)
    SnapshotLoaded(Result<Snapshot, SourceError>),
    Activated {
        tab_id: TabId,
        result: Result<(), SourceError>,
    },
    /// Carries the muted state the browser settled on
    MuteChanged {
        tab_id: TabId,
        result: Result<bool, SourceError>,
    },
    Closed {
        tab_id: TabId,
        result: Result<(), SourceError>,
    },
    GroupCollapsed {
        group_id: GroupId,
        result: Result<bool, SourceError>,
    },
}

/// Filter box messages
#[derive(Debug, Clone)]
pub enum FilterMsg {
    /// A key was released in the filter box; `value` is the box text afterwards
    KeyUp { key: KeyCode, value: String },
    /// The "remove filter" button
    Clear,
}

/// Keyboard highlight messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMsg {
    /// Arrow down
    Next,
    /// Arrow up
    Previous,
    /// Enter
    ActivateHighlighted,
    /// Pointer moved over the list
    ClearHighlight,
}

/// Pointer actions on a rendered row, already resolved through the row map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMsg {
    /// Click on a tab row
    Activate(RowTarget),
    /// Click on the speaker icon
    ToggleMute(TabId),
    /// Close button or middle click
    Close(TabId),
    /// Click on a group header
    ToggleGroup(GroupId),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Tab source results
    Source(SourceMsg),
    /// Filter box input
    Filter(FilterMsg),
    /// Keyboard navigation
    Nav(NavMsg),
    /// Row clicks
    Row(RowMsg),
    /// Ask the tab source for a fresh snapshot
    Reload,
}

// Convenience constructors for common messages
impl Msg {
    /// Create a filter key-up message
    pub fn key_up(key: KeyCode, value: impl Into<String>) -> Self {
        Msg::Filter(FilterMsg::KeyUp {
            key,
            value: value.into(),
        })
    }

    /// Create a snapshot-delivered message
    pub fn snapshot(snapshot: Snapshot) -> Self {
        Msg::Source(SourceMsg::SnapshotLoaded(Ok(snapshot)))
    }
}
