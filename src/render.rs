//! Render sink - the UI side of the popup
//!
//! A [`RenderSink`] receives full renders plus incremental row instructions.
//! Each sink keeps a [`RowMap`] so a UI event on a row resolves straight to the
//! entity it shows, without inspecting rendered text.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::model::{AudioState, EmptiedContainers, GroupId, TabId, WindowId};
use crate::projection::{Projection, RenderNode, TabNode};

/// The entity behind a clickable tab row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowTarget {
    pub tab_id: TabId,
    pub window_id: WindowId,
}

impl From<&TabNode> for RowTarget {
    fn from(node: &TabNode) -> Self {
        RowTarget {
            tab_id: node.tab_id,
            window_id: node.window_id,
        }
    }
}

/// What a rendered line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    WindowHeader(WindowId),
    GroupHeader(GroupId),
    Tab(RowTarget),
}

/// Consumer of projections and row-level updates
pub trait RenderSink {
    /// Replace everything shown with `projection`
    fn render(&mut self, projection: &Projection);

    /// Remove one tab row, plus the headers of any container it emptied
    fn on_row_removed(&mut self, tab_id: TabId, emptied: EmptiedContainers);

    fn on_mute_state_changed(&mut self, tab_id: TabId, muted: bool);

    /// `index` counts tab rows only
    fn on_highlight_changed(&mut self, index: Option<usize>, visible: bool);
}

// ============================================================================
// Row map
// ============================================================================

/// Line-number to entity lookup for a rendered list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowMap {
    rows: Vec<RowKind>,
}

impl RowMap {
    /// Lay out `projection` one line per header or tab
    pub fn build(projection: &Projection) -> Self {
        let mut rows = Vec::with_capacity(projection.tab_count() + projection.nodes().len());
        for node in projection.nodes() {
            match node {
                RenderNode::Tab(_) => {}
                RenderNode::Group(group) => rows.push(RowKind::GroupHeader(group.group_id)),
                RenderNode::Window(window) => rows.push(RowKind::WindowHeader(window.window_id)),
            }
            rows.extend(node.tabs().iter().map(|tab| RowKind::Tab(tab.into())));
        }
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, line: usize) -> Option<RowKind> {
        self.rows.get(line).copied()
    }

    pub fn tab_at(&self, line: usize) -> Option<RowTarget> {
        match self.get(line)? {
            RowKind::Tab(target) => Some(target),
            _ => None,
        }
    }

    pub fn group_at(&self, line: usize) -> Option<GroupId> {
        match self.get(line)? {
            RowKind::GroupHeader(group_id) => Some(group_id),
            _ => None,
        }
    }

    pub fn line_of(&self, tab_id: TabId) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| matches!(row, RowKind::Tab(t) if t.tab_id == tab_id))
    }

    /// Line of the `nth` tab row (the navigation index)
    pub fn tab_line(&self, nth: usize) -> Option<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| matches!(row, RowKind::Tab(_)))
            .nth(nth)
            .map(|(line, _)| line)
    }

    /// Drop a tab line and any header it emptied. Returns removed lines, ascending.
    pub fn remove_tab(&mut self, tab_id: TabId, emptied: EmptiedContainers) -> Vec<usize> {
        let removed: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| match row {
                RowKind::Tab(target) => target.tab_id == tab_id,
                RowKind::GroupHeader(group_id) => emptied.group == Some(*group_id),
                RowKind::WindowHeader(window_id) => emptied.window == Some(*window_id),
            })
            .map(|(line, _)| line)
            .collect();
        for &line in removed.iter().rev() {
            self.rows.remove(line);
        }
        removed
    }
}

// ============================================================================
// Text sink
// ============================================================================

/// Plain-text renderer used by the binary and by tests
#[derive(Debug, Clone, Default)]
pub struct TextSink {
    lines: Vec<String>,
    row_map: RowMap,
    tabs: HashMap<TabId, TabNode>,
    highlight: Option<usize>,
    highlight_visible: bool,
    renders: usize,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_map(&self) -> &RowMap {
        &self.row_map
    }

    /// Number of full renders received
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The list with line numbers and the highlight marker
    pub fn output(&self) -> String {
        let highlighted = self
            .highlight
            .filter(|_| self.highlight_visible)
            .and_then(|nth| self.row_map.tab_line(nth));
        let mut out = String::new();
        if self.lines.is_empty() {
            out.push_str("  (no tabs)\n");
        }
        for (line, text) in self.lines.iter().enumerate() {
            let marker = if highlighted == Some(line) { '>' } else { ' ' };
            let _ = writeln!(out, "{:>3} {} {}", line, marker, text);
        }
        out
    }
}

fn format_tab(node: &TabNode, nested: bool) -> String {
    let mut text = String::new();
    if nested {
        text.push_str("  ");
    }
    text.push(if node.is_current { '*' } else { '-' });
    text.push(' ');
    text.push_str(if node.title.is_empty() { &node.url } else { &node.title });
    match node.audio {
        AudioState::Silent => {}
        AudioState::Playing => text.push_str(" [playing]"),
        AudioState::Muted => text.push_str(" [muted]"),
    }
    let _ = write!(text, "  <{}>", node.url);
    text
}

impl RenderSink for TextSink {
    fn render(&mut self, projection: &Projection) {
        self.row_map = RowMap::build(projection);
        self.lines.clear();
        self.tabs.clear();
        for node in projection.nodes() {
            let nested = match node {
                RenderNode::Tab(_) => false,
                RenderNode::Group(group) => {
                    let arrow = if group.collapsed { '>' } else { 'v' };
                    let title = if group.title.is_empty() {
                        "(untitled group)"
                    } else {
                        group.title.as_str()
                    };
                    self.lines.push(format!("{} {} [{}]", arrow, title, group.color));
                    true
                }
                RenderNode::Window(window) => {
                    let incognito = if window.incognito { " (incognito)" } else { "" };
                    self.lines.push(format!("== {}{} ==", window.label, incognito));
                    true
                }
            };
            for tab in node.tabs() {
                self.lines.push(format_tab(tab, nested));
                self.tabs.insert(tab.tab_id, tab.clone());
            }
        }
        self.highlight = None;
        self.highlight_visible = false;
        self.renders += 1;
    }

    fn on_row_removed(&mut self, tab_id: TabId, emptied: EmptiedContainers) {
        let removed = self.row_map.remove_tab(tab_id, emptied);
        for &line in removed.iter().rev() {
            self.lines.remove(line);
        }
        self.tabs.remove(&tab_id);
    }

    fn on_mute_state_changed(&mut self, tab_id: TabId, muted: bool) {
        let Some(line) = self.row_map.line_of(tab_id) else {
            return;
        };
        let Some(node) = self.tabs.get_mut(&tab_id) else {
            return;
        };
        node.muted = muted;
        node.audio = match (node.audio, muted) {
            (AudioState::Silent, _) => AudioState::Silent,
            (_, true) => AudioState::Muted,
            (_, false) => AudioState::Playing,
        };
        if let Some(text) = self.lines.get_mut(line) {
            let nested = text.starts_with("  ");
            *text = format_tab(node, nested);
        }
    }

    fn on_highlight_changed(&mut self, index: Option<usize>, visible: bool) {
        self.highlight = index;
        self.highlight_visible = visible;
    }
}
