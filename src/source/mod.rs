//! Tab source - the browser side of the popup
//!
//! A [`TabSource`] answers snapshot queries and executes activate / mute /
//! close / collapse requests. Every call is single-shot: the runtime runs it
//! off the update loop and delivers exactly one [`SourceMsg`] back, carrying
//! either the result or the failure reason.

mod fixture;

pub use fixture::{FixtureTabSource, RawGroup, RawMutedInfo, RawSnapshot, RawTab, RawWindow};

use thiserror::Error;

use crate::commands::SourceRequest;
use crate::messages::{Msg, SourceMsg};
use crate::model::{GroupId, GroupListing, Snapshot, TabId, Window, WindowId};

/// Why a tab source call did not take effect
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("tab source unavailable: {0}")]
    Unavailable(String),
    #[error("no such tab: {0}")]
    TabNotFound(TabId),
    #[error("no such window: {0}")]
    WindowNotFound(WindowId),
    #[error("no such group: {0}")]
    GroupNotFound(GroupId),
    #[error("capability not supported: {0}")]
    Unsupported(&'static str),
    #[error("invalid fixture: {0}")]
    Fixture(String),
}

/// Browser tab API as seen by the popup
pub trait TabSource: Send + Sync {
    /// Windows with their tabs; only the current window when `only_current` is set
    fn list_windows(&self, only_current: bool) -> Result<Vec<Window>, SourceError>;

    /// Tab groups, or [`GroupListing::Unsupported`] when the browser has none
    fn list_groups(&self) -> Result<GroupListing, SourceError>;

    fn current_window_id(&self) -> Result<WindowId, SourceError>;

    /// Focus `window_id` and make `tab_id` its active tab
    fn activate(&self, tab_id: TabId, window_id: WindowId) -> Result<(), SourceError>;

    /// Returns the muted state the browser settled on
    fn set_muted(&self, tab_id: TabId, muted: bool) -> Result<bool, SourceError>;

    fn close(&self, tab_id: TabId) -> Result<(), SourceError>;

    /// Returns the collapsed state the browser settled on
    fn set_group_collapsed(&self, group_id: GroupId, collapsed: bool)
        -> Result<bool, SourceError>;
}

/// Gather a full snapshot. Group listing failures fail closed to "unsupported".
pub fn load_snapshot(
    source: &dyn TabSource,
    only_current_window: bool,
) -> Result<Snapshot, SourceError> {
    let current_window_id = source.current_window_id()?;
    let windows = source.list_windows(only_current_window)?;
    let groups = match source.list_groups() {
        Ok(listing) => listing,
        Err(SourceError::Unsupported(_)) => GroupListing::Unsupported,
        Err(e) => {
            tracing::warn!("Listing tab groups failed, treating tabs as ungrouped: {}", e);
            GroupListing::Unsupported
        }
    };

    Ok(Snapshot {
        current_window_id: Some(current_window_id),
        windows,
        groups,
    })
}

/// Execute one request against a source, producing the message that reports it
pub fn perform(source: &dyn TabSource, request: SourceRequest) -> Msg {
    let msg = match request {
        SourceRequest::LoadSnapshot {
            only_current_window,
        } => SourceMsg::SnapshotLoaded(load_snapshot(source, only_current_window)),
        SourceRequest::Activate { tab_id, window_id } => SourceMsg::Activated {
            tab_id,
            result: source.activate(tab_id, window_id),
        },
        SourceRequest::SetMuted { tab_id, muted } => SourceMsg::MuteChanged {
            tab_id,
            result: source.set_muted(tab_id, muted),
        },
        SourceRequest::Close { tab_id } => SourceMsg::Closed {
            tab_id,
            result: source.close(tab_id),
        },
        SourceRequest::SetGroupCollapsed {
            group_id,
            collapsed,
        } => SourceMsg::GroupCollapsed {
            group_id,
            result: source.set_group_collapsed(group_id, collapsed),
        },
    };
    Msg::Source(msg)
}
