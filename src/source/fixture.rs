//! JSON-backed tab source
//!
//! The fixture format mirrors the browser's own tab/window/group objects, so a
//! dump of `windows.getAll({ populate: true })` plus `tabGroups.query({})` can be
//! replayed as-is. `"groups": null` (or a missing key) models a browser without
//! tab groups.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{SourceError, TabSource};
use crate::model::{Group, GroupColor, GroupId, GroupListing, Tab, TabId, Window, WindowId};

const UNGROUPED: i64 = -1;

fn ungrouped() -> i64 {
    UNGROUPED
}

fn default_color() -> String {
    GroupColor::default().name().to_string()
}

/// Top-level fixture document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    pub current_window_id: i64,
    #[serde(default)]
    pub windows: Vec<RawWindow>,
    #[serde(default)]
    pub groups: Option<Vec<RawGroup>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWindow {
    pub id: i64,
    #[serde(default)]
    pub incognito: bool,
    #[serde(default)]
    pub tabs: Vec<RawTab>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTab {
    pub id: i64,
    #[serde(default)]
    pub window_id: Option<i64>,
    #[serde(default = "ungrouped")]
    pub group_id: i64,
    /// Defaults to the tab's position in its window
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub audible: bool,
    #[serde(default)]
    pub muted_info: Option<RawMutedInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawMutedInfo {
    pub muted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroup {
    pub id: i64,
    #[serde(default)]
    pub window_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub collapsed: bool,
}

impl RawTab {
    fn is_muted(&self) -> bool {
        self.muted_info.map(|info| info.muted).unwrap_or(false)
    }

    fn to_tab(&self, window_id: WindowId, position: usize) -> Tab {
        Tab {
            id: TabId(self.id),
            window_id,
            group_id: GroupId::from_raw(self.group_id),
            index: self.index.unwrap_or(position),
            title: self.title.clone(),
            url: self.url.clone(),
            favicon: self.fav_icon_url.clone(),
            active: self.active,
            audible: self.audible,
            muted: self.is_muted(),
        }
    }
}

impl RawWindow {
    fn to_window(&self) -> Window {
        let id = WindowId(self.id);
        Window {
            id,
            incognito: self.incognito,
            tabs: self
                .tabs
                .iter()
                .enumerate()
                .map(|(position, tab)| tab.to_tab(id, position))
                .collect(),
        }
    }
}

impl RawGroup {
    fn to_group(&self) -> Group {
        Group {
            id: GroupId(self.id),
            window_id: self.window_id.map(WindowId),
            title: self.title.clone(),
            color: GroupColor::from_name(&self.color),
            collapsed: self.collapsed,
        }
    }
}

/// An in-memory browser loaded from a JSON fixture.
///
/// Requests mutate the fixture the way the browser would (closing a tab
/// reindexes its window and deletes a group left empty), so a later snapshot
/// reflects them.
#[derive(Debug)]
pub struct FixtureTabSource {
    state: Mutex<RawSnapshot>,
    offline: AtomicBool,
}

impl FixtureTabSource {
    pub fn new(mut snapshot: RawSnapshot) -> Self {
        for window in &mut snapshot.windows {
            for (position, tab) in window.tabs.iter_mut().enumerate() {
                tab.index.get_or_insert(position);
                tab.window_id = Some(window.id);
            }
        }
        Self {
            state: Mutex::new(snapshot),
            offline: AtomicBool::new(false),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let snapshot: RawSnapshot =
            serde_json::from_str(json).map_err(|e| SourceError::Fixture(e.to_string()))?;
        Ok(Self::new(snapshot))
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SourceError::Fixture(format!("{}: {}", path.display(), e)))?;
        let source = Self::from_json(&json)?;
        tracing::info!("Loaded tab fixture from {}", path.display());
        Ok(source)
    }

    /// While offline every call fails with [`SourceError::Unavailable`]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Current fixture contents, including the effect of earlier requests
    pub fn raw(&self) -> Result<RawSnapshot, SourceError> {
        self.with_state(|state| Ok(state.clone()))
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut RawSnapshot) -> Result<T, SourceError>,
    ) -> Result<T, SourceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("browser offline".to_string()));
        }
        let mut state = self
            .state
            .lock()
            .map_err(|_| SourceError::Unavailable("fixture state poisoned".to_string()))?;
        f(&mut state)
    }
}

impl TabSource for FixtureTabSource {
    fn list_windows(&self, only_current: bool) -> Result<Vec<Window>, SourceError> {
        self.with_state(|state| {
            let current = state.current_window_id;
            Ok(state
                .windows
                .iter()
                .filter(|w| !only_current || w.id == current)
                .map(RawWindow::to_window)
                .collect())
        })
    }

    fn list_groups(&self) -> Result<GroupListing, SourceError> {
        self.with_state(|state| match &state.groups {
            Some(groups) => Ok(GroupListing::Supported(
                groups.iter().map(RawGroup::to_group).collect(),
            )),
            None => Err(SourceError::Unsupported("tab groups")),
        })
    }

    fn current_window_id(&self) -> Result<WindowId, SourceError> {
        self.with_state(|state| Ok(WindowId(state.current_window_id)))
    }

    fn activate(&self, tab_id: TabId, window_id: WindowId) -> Result<(), SourceError> {
        self.with_state(|state| {
            let window = state
                .windows
                .iter_mut()
                .find(|w| w.id == window_id.0)
                .ok_or(SourceError::WindowNotFound(window_id))?;
            if !window.tabs.iter().any(|t| t.id == tab_id.0) {
                return Err(SourceError::TabNotFound(tab_id));
            }
            for tab in &mut window.tabs {
                tab.active = tab.id == tab_id.0;
            }
            state.current_window_id = window_id.0;
            Ok(())
        })
    }

    fn set_muted(&self, tab_id: TabId, muted: bool) -> Result<bool, SourceError> {
        self.with_state(|state| {
            let tab = state
                .windows
                .iter_mut()
                .flat_map(|w| w.tabs.iter_mut())
                .find(|t| t.id == tab_id.0)
                .ok_or(SourceError::TabNotFound(tab_id))?;
            tab.muted_info = Some(RawMutedInfo { muted });
            Ok(muted)
        })
    }

    fn close(&self, tab_id: TabId) -> Result<(), SourceError> {
        self.with_state(|state| {
            let window = state
                .windows
                .iter_mut()
                .find(|w| w.tabs.iter().any(|t| t.id == tab_id.0))
                .ok_or(SourceError::TabNotFound(tab_id))?;
            let position = window
                .tabs
                .iter()
                .position(|t| t.id == tab_id.0)
                .ok_or(SourceError::TabNotFound(tab_id))?;
            let removed = window.tabs.remove(position);
            let removed_index = removed.index.unwrap_or(position);
            for tab in &mut window.tabs {
                if let Some(index) = tab.index.as_mut() {
                    if *index > removed_index {
                        *index -= 1;
                    }
                }
            }

            if removed.group_id != UNGROUPED {
                let still_used = state
                    .windows
                    .iter()
                    .flat_map(|w| w.tabs.iter())
                    .any(|t| t.group_id == removed.group_id);
                if !still_used {
                    if let Some(groups) = state.groups.as_mut() {
                        groups.retain(|g| g.id != removed.group_id);
                    }
                }
            }
            Ok(())
        })
    }

    fn set_group_collapsed(
        &self,
        group_id: GroupId,
        collapsed: bool,
    ) -> Result<bool, SourceError> {
        self.with_state(|state| {
            let groups = state
                .groups
                .as_mut()
                .ok_or(SourceError::Unsupported("tab groups"))?;
            let group = groups
                .iter_mut()
                .find(|g| g.id == group_id.0)
                .ok_or(SourceError::GroupNotFound(group_id))?;
            group.collapsed = collapsed;
            Ok(collapsed)
        })
    }
}
