//! Tab directory - the canonical model of windows, tabs, and tab groups
//!
//! The directory is the only writer of tab state. Projections, navigation and
//! rendering all read from it; browser results are echoed back into it through
//! the `apply_*` methods.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Identifiers
// ============================================================================

/// Browser-assigned tab identifier, unique within a browser session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub i64);

/// Browser-assigned window identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub i64);

/// Browser-assigned tab group identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl GroupId {
    /// Interpret a raw browser group id; any negative value means "ungrouped"
    pub fn from_raw(raw: i64) -> Option<GroupId> {
        (raw >= 0).then_some(GroupId(raw))
    }
}

// ============================================================================
// Group colours
// ============================================================================

/// Fixed palette of browser tab group colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupColor {
    #[default]
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
}

impl GroupColor {
    pub const ALL: [GroupColor; 8] = [
        GroupColor::Grey,
        GroupColor::Blue,
        GroupColor::Red,
        GroupColor::Yellow,
        GroupColor::Green,
        GroupColor::Pink,
        GroupColor::Purple,
        GroupColor::Cyan,
    ];

    /// Parse a browser colour name. Unknown names degrade to grey.
    pub fn from_name(name: &str) -> GroupColor {
        let name = name.trim().to_ascii_lowercase();
        if name == "gray" {
            return GroupColor::Grey;
        }
        Self::ALL
            .into_iter()
            .find(|color| color.name() == name)
            .unwrap_or_else(|| {
                tracing::debug!("Unknown group colour '{}', using grey", name);
                GroupColor::Grey
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            GroupColor::Grey => "grey",
            GroupColor::Blue => "blue",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Purple => "purple",
            GroupColor::Cyan => "cyan",
        }
    }

    /// Swatch used for the group marker
    pub fn swatch(self) -> &'static str {
        match self {
            GroupColor::Grey => "#5f6368",
            GroupColor::Blue => "#3374eb",
            GroupColor::Red => "#d02d1d",
            GroupColor::Yellow => "#db7300",
            GroupColor::Green => "#348e3a",
            GroupColor::Pink => "#c71485",
            GroupColor::Purple => "#8f36ea",
            GroupColor::Cyan => "#267b84",
        }
    }
}

impl fmt::Display for GroupColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Speaker affordance for a tab row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    /// Not producing sound
    Silent,
    /// Audible and not muted
    Playing,
    /// Audible but muted
    Muted,
}

/// A browser tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub window_id: WindowId,
    /// `None` when the tab is not part of a known group
    pub group_id: Option<GroupId>,
    /// Position within its window
    pub index: usize,
    pub title: String,
    pub url: String,
    pub favicon: Option<String>,
    pub active: bool,
    pub audible: bool,
    pub muted: bool,
}

impl Tab {
    pub fn audio(&self) -> AudioState {
        match (self.audible, self.muted) {
            (false, _) => AudioState::Silent,
            (true, false) => AudioState::Playing,
            (true, true) => AudioState::Muted,
        }
    }
}

/// A browser window and its tabs, kept in `index` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub id: WindowId,
    pub incognito: bool,
    pub tabs: Vec<Tab>,
}

impl Window {
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }
}

/// A browser-native tab group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    /// Window the group lives in (groups never span windows)
    pub window_id: Option<WindowId>,
    pub title: String,
    pub color: GroupColor,
    pub collapsed: bool,
}

/// Result of asking the browser for its tab groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupListing {
    Supported(Vec<Group>),
    /// The browser has no tab-group API; every tab is treated as ungrouped
    Unsupported,
}

/// A full picture of browser state, as delivered by a tab source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub current_window_id: Option<WindowId>,
    pub windows: Vec<Window>,
    pub groups: GroupListing,
}

// ============================================================================
// Directory
// ============================================================================

/// Whether a session shows only the invoking window or every window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    CurrentWindow,
    AllWindows,
}

impl SessionMode {
    pub fn from_only_current(only_current_window: bool) -> Self {
        if only_current_window {
            SessionMode::CurrentWindow
        } else {
            SessionMode::AllWindows
        }
    }

    pub fn only_current_window(self) -> bool {
        self == SessionMode::CurrentWindow
    }
}

/// Shape of the stored tabs, matching the session mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryModel {
    /// Tabs of the current window only (some tagged with a group)
    SingleWindow(Option<Window>),
    /// Every window, in source order
    MultiWindow(Vec<Window>),
}

/// Containers left without tabs by a close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmptiedContainers {
    pub group: Option<GroupId>,
    pub window: Option<WindowId>,
}

/// A tab removed by [`TabDirectory::apply_close`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedTab {
    pub tab: Tab,
    pub emptied: EmptiedContainers,
}

/// A mutation targeted an entity the directory no longer holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("tab {0} is no longer in the directory")]
    StaleTab(TabId),
    #[error("group {0} is no longer in the directory")]
    StaleGroup(GroupId),
}

/// Owner of every window, tab and group known to the session
#[derive(Debug, Clone)]
pub struct TabDirectory {
    mode: SessionMode,
    model: DirectoryModel,
    groups: HashMap<GroupId, Group>,
    groups_supported: bool,
    current_window_id: Option<WindowId>,
    /// "window N" labels, assigned at ingest and kept for the session
    window_numbers: HashMap<WindowId, usize>,
}

impl TabDirectory {
    /// Create an empty directory. The mode never changes afterwards.
    pub fn new(mode: SessionMode) -> Self {
        let model = match mode {
            SessionMode::CurrentWindow => DirectoryModel::SingleWindow(None),
            SessionMode::AllWindows => DirectoryModel::MultiWindow(Vec::new()),
        };
        Self {
            mode,
            model,
            groups: HashMap::new(),
            groups_supported: false,
            current_window_id: None,
            window_numbers: HashMap::new(),
        }
    }

    /// Single- vs multi-window mode, fixed at session start
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn model(&self) -> &DirectoryModel {
        &self.model
    }

    /// Replace the whole model with a fresh snapshot
    pub fn ingest(&mut self, snapshot: Snapshot) {
        let Snapshot {
            current_window_id,
            windows,
            groups,
        } = snapshot;

        let (groups_supported, groups): (bool, HashMap<GroupId, Group>) = match groups {
            GroupListing::Supported(list) => (true, list.into_iter().map(|g| (g.id, g)).collect()),
            GroupListing::Unsupported => (false, HashMap::new()),
        };

        let windows: Vec<Window> = windows
            .into_iter()
            .map(|window| normalize_window(window, &groups))
            .collect();

        self.model = match self.mode {
            SessionMode::CurrentWindow => {
                let position = current_window_id
                    .and_then(|id| windows.iter().position(|w| w.id == id))
                    .unwrap_or(0);
                if position != 0 || current_window_id.is_none() {
                    tracing::debug!(
                        "Current window {:?} not first in snapshot, using position {}",
                        current_window_id,
                        position
                    );
                }
                DirectoryModel::SingleWindow(windows.into_iter().nth(position))
            }
            SessionMode::AllWindows => DirectoryModel::MultiWindow(windows),
        };

        // Drop groups whose members all live elsewhere (other windows in single-window mode)
        let referenced: HashSet<GroupId> = self
            .windows()
            .iter()
            .flat_map(|w| w.tabs.iter())
            .filter_map(|t| t.group_id)
            .collect();
        self.groups = groups
            .into_iter()
            .filter(|(id, _)| referenced.contains(id))
            .collect();
        self.groups_supported = groups_supported;
        self.current_window_id = current_window_id;
        self.window_numbers = self.number_windows();

        tracing::info!(
            mode = ?self.mode,
            windows = self.windows().len(),
            tabs = self.tab_count(),
            groups = self.groups.len(),
            groups_supported,
            "Ingested snapshot"
        );
    }

    /// Update a tab's muted flag in place
    pub fn apply_mute(&mut self, tab_id: TabId, muted: bool) -> Result<(), DirectoryError> {
        let tab = self.tab_mut(tab_id).ok_or(DirectoryError::StaleTab(tab_id))?;
        tab.muted = muted;
        Ok(())
    }

    /// Remove a tab, reporting any group or window it leaves empty.
    ///
    /// Emptied containers stay in storage until the next ingest; projections
    /// skip them.
    pub fn apply_close(&mut self, tab_id: TabId) -> Result<RemovedTab, DirectoryError> {
        let window = self
            .windows_mut()
            .iter_mut()
            .find(|w| w.tab(tab_id).is_some())
            .ok_or(DirectoryError::StaleTab(tab_id))?;

        let position = window
            .tabs
            .iter()
            .position(|t| t.id == tab_id)
            .ok_or(DirectoryError::StaleTab(tab_id))?;
        let tab = window.tabs.remove(position);
        let window_emptied = window.is_empty().then_some(window.id);

        let group_emptied = tab.group_id.filter(|&group_id| {
            !self
                .windows()
                .iter()
                .flat_map(|w| w.tabs.iter())
                .any(|t| t.group_id == Some(group_id))
        });

        Ok(RemovedTab {
            tab,
            emptied: EmptiedContainers {
                group: group_emptied,
                window: window_emptied,
            },
        })
    }

    /// Make a tab the active one of its own window. Other windows are untouched.
    pub fn apply_activate(&mut self, tab_id: TabId) -> Result<(), DirectoryError> {
        let window_id = self
            .tab(tab_id)
            .map(|t| t.window_id)
            .ok_or(DirectoryError::StaleTab(tab_id))?;

        for tab in self
            .windows_mut()
            .iter_mut()
            .flat_map(|w| w.tabs.iter_mut())
            .filter(|t| t.window_id == window_id)
        {
            tab.active = tab.id == tab_id;
        }
        Ok(())
    }

    pub fn apply_group_collapsed(
        &mut self,
        group_id: GroupId,
        collapsed: bool,
    ) -> Result<(), DirectoryError> {
        let group = self
            .groups
            .get_mut(&group_id)
            .ok_or(DirectoryError::StaleGroup(group_id))?;
        group.collapsed = collapsed;
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Stored windows in source order (at most one in single-window mode)
    pub fn windows(&self) -> &[Window] {
        match &self.model {
            DirectoryModel::SingleWindow(Some(window)) => std::slice::from_ref(window),
            DirectoryModel::SingleWindow(None) => &[],
            DirectoryModel::MultiWindow(windows) => windows,
        }
    }

    fn windows_mut(&mut self) -> &mut [Window] {
        match &mut self.model {
            DirectoryModel::SingleWindow(Some(window)) => std::slice::from_mut(window),
            DirectoryModel::SingleWindow(None) => &mut [],
            DirectoryModel::MultiWindow(windows) => windows,
        }
    }

    /// Windows in display order: the current window first, others in source order
    pub fn windows_in_display_order(&self) -> Vec<&Window> {
        let windows = self.windows();
        let current = windows
            .iter()
            .filter(|w| Some(w.id) == self.current_window_id);
        let others = windows
            .iter()
            .filter(|w| Some(w.id) != self.current_window_id);
        current.chain(others).collect()
    }

    pub fn tabs(&self) -> impl Iterator<Item = &Tab> + '_ {
        self.windows().iter().flat_map(|w| w.tabs.iter())
    }

    pub fn tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.tabs().find(|t| t.id == tab_id)
    }

    fn tab_mut(&mut self, tab_id: TabId) -> Option<&mut Tab> {
        self.windows_mut()
            .iter_mut()
            .flat_map(|w| w.tabs.iter_mut())
            .find(|t| t.id == tab_id)
    }

    pub fn tab_count(&self) -> usize {
        self.windows().iter().map(|w| w.tabs.len()).sum()
    }

    pub fn group(&self, group_id: GroupId) -> Option<&Group> {
        self.groups.get(&group_id)
    }

    pub fn groups_supported(&self) -> bool {
        self.groups_supported
    }

    pub fn current_window_id(&self) -> Option<WindowId> {
        self.current_window_id
    }

    /// The N of a "window N" label, if the window had tabs at ingest
    pub fn window_number(&self, window_id: WindowId) -> Option<usize> {
        self.window_numbers.get(&window_id).copied()
    }

    fn number_windows(&self) -> HashMap<WindowId, usize> {
        self.windows_in_display_order()
            .into_iter()
            .filter(|w| Some(w.id) != self.current_window_id && !w.is_empty())
            .enumerate()
            .map(|(position, w)| (w.id, position + 1))
            .collect()
    }
}

/// Nesting is authoritative for window membership; unknown groups degrade to ungrouped.
fn normalize_window(mut window: Window, groups: &HashMap<GroupId, Group>) -> Window {
    for tab in &mut window.tabs {
        tab.window_id = window.id;
        if let Some(group_id) = tab.group_id {
            if !groups.contains_key(&group_id) {
                tracing::debug!(
                    "Tab {} references unknown group {}, treating as ungrouped",
                    tab.id,
                    group_id
                );
                tab.group_id = None;
            }
        }
    }
    window.tabs.sort_by_key(|t| t.index);
    window
}
