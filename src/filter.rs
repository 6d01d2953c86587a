//! Filter engine - turns the filter box text into a tab predicate
//!
//! An empty query is not an always-true predicate: it means filter mode is off,
//! which also puts navigation back on the unfiltered bound.

use crate::keymap::KeyCode;
use crate::model::Tab;

/// A compiled, case-insensitive substring match over title and url
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabFilter {
    query: String,
    needle: String,
}

impl TabFilter {
    /// The text as the user typed it
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self, tab: &Tab) -> bool {
        self.matches_text(&tab.title, &tab.url)
    }

    pub fn matches_text(&self, title: &str, url: &str) -> bool {
        title.to_lowercase().contains(&self.needle) || url.to_lowercase().contains(&self.needle)
    }
}

/// Compile query text. `None` means "no filter".
///
/// Whitespace is significant: `" mail"` only matches text containing a space
/// before "mail".
pub fn compile(query: &str) -> Option<TabFilter> {
    if query.is_empty() {
        return None;
    }
    Some(TabFilter {
        query: query.to_string(),
        needle: query.to_lowercase(),
    })
}

/// Whether a key released in the filter box may have changed its text.
///
/// Arrow keys and Enter belong to navigation. `F22`, `Shift`, `Control` and
/// `Meta` arrive in bursts when a touchpad emulates a middle click.
pub fn is_content_key(key: KeyCode) -> bool {
    !(key.is_navigation() || key.is_modifier_artifact())
}

/// Outcome of feeding new text to the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    /// Same text as before; nothing recompiled
    Unchanged,
    /// A new non-empty query is in effect
    Applied,
    /// The query became empty and filter mode is off
    Cleared,
}

/// Current filter box text and its compiled predicate
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    query: String,
    compiled: Option<TabFilter>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The predicate in effect, if filter mode is on
    pub fn active(&self) -> Option<&TabFilter> {
        self.compiled.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.compiled.is_some()
    }

    /// Replace the query text, recompiling only when it changed
    pub fn set_query(&mut self, text: &str) -> FilterChange {
        if text == self.query {
            return FilterChange::Unchanged;
        }
        self.query = text.to_string();
        self.compiled = compile(text);
        if self.compiled.is_some() {
            FilterChange::Applied
        } else {
            FilterChange::Cleared
        }
    }

    /// Empty the query. Returns false if filter mode was already off.
    pub fn clear(&mut self) -> bool {
        let was_active = self.is_active();
        self.query.clear();
        self.compiled = None;
        was_active
    }
}
