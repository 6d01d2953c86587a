//! View projector - derives the ordered, renderable list from the directory
//!
//! `project` is pure: the same directory and filter always give an equal
//! `Projection`. Navigation only looks at the flattened tab rows, so collapsed
//! group members still count as rows.

use std::collections::HashMap;
use std::fmt;

use crate::filter::TabFilter;
use crate::model::{
    AudioState, GroupColor, GroupId, SessionMode, Tab, TabDirectory, TabId, Window, WindowId,
};

// ============================================================================
// Nodes
// ============================================================================

/// One tab row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabNode {
    pub tab_id: TabId,
    pub window_id: WindowId,
    pub group_id: Option<GroupId>,
    pub index: usize,
    pub title: String,
    pub url: String,
    pub favicon: Option<String>,
    pub audio: AudioState,
    pub muted: bool,
    /// Active tab of the current window, when that window has other tabs
    pub is_current: bool,
}

/// A tab group header and its surviving members in `index` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    pub group_id: GroupId,
    pub title: String,
    pub color: GroupColor,
    pub collapsed: bool,
    pub tabs: Vec<TabNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLabel {
    ThisWindow,
    Numbered(usize),
}

impl fmt::Display for WindowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowLabel::ThisWindow => f.write_str("This Window"),
            WindowLabel::Numbered(n) => write!(f, "window {}", n),
        }
    }
}

/// A window wrapper, only emitted when more than one window has rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowNode {
    pub window_id: WindowId,
    pub label: WindowLabel,
    pub incognito: bool,
    pub tabs: Vec<TabNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Tab(TabNode),
    Group(GroupNode),
    Window(WindowNode),
}

impl RenderNode {
    /// Tab rows under this node, in display order
    pub fn tabs(&self) -> &[TabNode] {
        match self {
            RenderNode::Tab(tab) => std::slice::from_ref(tab),
            RenderNode::Group(group) => &group.tabs,
            RenderNode::Window(window) => &window.tabs,
        }
    }
}

// ============================================================================
// Projection
// ============================================================================

/// The ordered view handed to the render sink and to navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    nodes: Vec<RenderNode>,
}

impl Projection {
    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    /// Tab rows in navigation order
    pub fn rows(&self) -> impl Iterator<Item = &TabNode> + '_ {
        self.nodes.iter().flat_map(|node| node.tabs().iter())
    }

    pub fn row(&self, index: usize) -> Option<&TabNode> {
        self.rows().nth(index)
    }

    /// Number of tab rows; the navigation bound
    pub fn tab_count(&self) -> usize {
        self.nodes.iter().map(|node| node.tabs().len()).sum()
    }

    pub fn contains_tab(&self, tab_id: TabId) -> bool {
        self.position_of(tab_id).is_some()
    }

    pub fn position_of(&self, tab_id: TabId) -> Option<usize> {
        self.rows().position(|row| row.tab_id == tab_id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether rows are wrapped per window
    pub fn has_window_wrappers(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, RenderNode::Window(_)))
    }

    pub fn contains_group(&self, group_id: GroupId) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, RenderNode::Group(g) if g.group_id == group_id))
    }

    /// Whether `window_id` has a wrapper node
    pub fn contains_window(&self, window_id: WindowId) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, RenderNode::Window(w) if w.window_id == window_id))
    }

    /// This projection with one tab row removed and any node it empties dropped.
    /// What a sink shows after removing that row in place.
    pub fn without_tab(&self, tab_id: TabId) -> Projection {
        let nodes = self
            .nodes
            .iter()
            .filter_map(|node| match node {
                RenderNode::Tab(tab) => (tab.tab_id != tab_id).then(|| node.clone()),
                RenderNode::Group(group) => {
                    let mut group = group.clone();
                    group.tabs.retain(|tab| tab.tab_id != tab_id);
                    (!group.tabs.is_empty()).then_some(RenderNode::Group(group))
                }
                RenderNode::Window(window) => {
                    let mut window = window.clone();
                    window.tabs.retain(|tab| tab.tab_id != tab_id);
                    (!window.tabs.is_empty()).then_some(RenderNode::Window(window))
                }
            })
            .collect();
        Projection { nodes }
    }
}

/// Derive the view of `directory`, keeping only tabs `filter` accepts
pub fn project(directory: &TabDirectory, filter: Option<&TabFilter>) -> Projection {
    let nodes = match directory.mode() {
        SessionMode::CurrentWindow => directory
            .windows()
            .first()
            .map(|window| project_single_window(directory, window, filter))
            .unwrap_or_default(),
        SessionMode::AllWindows => project_all_windows(directory, filter),
    };
    Projection { nodes }
}

fn passes(filter: Option<&TabFilter>, tab: &Tab) -> bool {
    filter.map_or(true, |f| f.matches(tab))
}

fn tab_node(directory: &TabDirectory, window: &Window, tab: &Tab) -> TabNode {
    TabNode {
        tab_id: tab.id,
        window_id: tab.window_id,
        group_id: tab.group_id,
        index: tab.index,
        title: tab.title.clone(),
        url: tab.url.clone(),
        favicon: tab.favicon.clone(),
        audio: tab.audio(),
        muted: tab.muted,
        is_current: tab.active
            && directory.current_window_id() == Some(window.id)
            && window.tabs.len() > 1,
    }
}

enum Entry<'a> {
    Single(&'a Tab),
    Group(GroupId, Vec<&'a Tab>),
}

fn project_single_window(
    directory: &TabDirectory,
    window: &Window,
    filter: Option<&TabFilter>,
) -> Vec<RenderNode> {
    // Keys are computed over every member so filtering never reorders groups
    let mut entries: Vec<(usize, Entry<'_>)> = Vec::new();
    let mut group_slots: HashMap<GroupId, usize> = HashMap::new();

    for tab in &window.tabs {
        match tab.group_id.filter(|&id| directory.group(id).is_some()) {
            Some(group_id) => match group_slots.get(&group_id) {
                Some(&slot) => {
                    let (key, entry) = &mut entries[slot];
                    *key = (*key).min(tab.index);
                    if let Entry::Group(_, members) = entry {
                        members.push(tab);
                    }
                }
                None => {
                    group_slots.insert(group_id, entries.len());
                    entries.push((tab.index, Entry::Group(group_id, vec![tab])));
                }
            },
            None => entries.push((tab.index, Entry::Single(tab))),
        }
    }

    entries.sort_by_key(|(key, _)| *key);

    entries
        .into_iter()
        .filter_map(|(_, entry)| match entry {
            Entry::Single(tab) => {
                passes(filter, tab).then(|| RenderNode::Tab(tab_node(directory, window, tab)))
            }
            Entry::Group(group_id, members) => {
                let group = directory.group(group_id)?;
                let tabs: Vec<TabNode> = members
                    .into_iter()
                    .filter(|tab| passes(filter, tab))
                    .map(|tab| tab_node(directory, window, tab))
                    .collect();
                (!tabs.is_empty()).then(|| {
                    RenderNode::Group(GroupNode {
                        group_id,
                        title: group.title.clone(),
                        color: group.color,
                        collapsed: group.collapsed,
                        tabs,
                    })
                })
            }
        })
        .collect()
}

fn project_all_windows(directory: &TabDirectory, filter: Option<&TabFilter>) -> Vec<RenderNode> {
    let populated: Vec<(&Window, Vec<TabNode>)> = directory
        .windows_in_display_order()
        .into_iter()
        .filter_map(|window| {
            let tabs: Vec<TabNode> = window
                .tabs
                .iter()
                .filter(|tab| passes(filter, tab))
                .map(|tab| tab_node(directory, window, tab))
                .collect();
            (!tabs.is_empty()).then_some((window, tabs))
        })
        .collect();

    if populated.len() <= 1 {
        return populated
            .into_iter()
            .flat_map(|(_, tabs)| tabs.into_iter().map(RenderNode::Tab))
            .collect();
    }

    let current = directory.current_window_id();
    let mut others = 0;
    populated
        .into_iter()
        .map(|(window, tabs)| {
            let label = if Some(window.id) == current {
                WindowLabel::ThisWindow
            } else {
                others += 1;
                WindowLabel::Numbered(directory.window_number(window.id).unwrap_or(others))
            };
            RenderNode::Window(WindowNode {
                window_id: window.id,
                label,
                incognito: window.incognito,
                tabs,
            })
        })
        .collect()
}
