//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update:
//! requests to the tab source and instructions to the render sink.

use crate::model::{EmptiedContainers, GroupId, TabId, WindowId};

// ============================================================================
// Tab Source Requests
// ============================================================================

/// A single-shot call to the tab source. Each one yields exactly one `SourceMsg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRequest {
    LoadSnapshot { only_current_window: bool },
    Activate { tab_id: TabId, window_id: WindowId },
    SetMuted { tab_id: TabId, muted: bool },
    Close { tab_id: TabId },
    SetGroupCollapsed { group_id: GroupId, collapsed: bool },
}

// ============================================================================
// Side-Effect Commands (returned from update)
// ============================================================================

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Rebuild the whole list from the current projection
    Render,
    /// Drop one tab row, plus any group/window wrapper it left empty
    RemoveRow {
        tab_id: TabId,
        emptied: EmptiedContainers,
    },
    /// Swap the speaker icon of one row
    UpdateMute { tab_id: TabId, muted: bool },
    /// Move or hide the keyboard highlight (`None` = nothing highlighted)
    Highlight { index: Option<usize>, visible: bool },
    /// Call the tab source; the result comes back as a message
    Source(SourceRequest),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, dropping no-ops
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Check if this command asks for a full render
    pub fn needs_render(&self) -> bool {
        match self {
            Cmd::Render => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_render()),
            _ => false,
        }
    }

    /// Tab source requests carried by this command, in execution order
    pub fn source_requests(&self) -> Vec<SourceRequest> {
        match self {
            Cmd::Source(request) => vec![*request],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.source_requests()).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_flattens_trivial_cases() {
        assert_eq!(Cmd::batch(vec![]), Cmd::None);
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::Render]), Cmd::Render);
        assert!(matches!(
            Cmd::batch(vec![Cmd::Render, Cmd::None, Cmd::Render]),
            Cmd::Batch(ref cmds) if cmds.len() == 2
        ));
    }

    #[test]
    fn test_needs_render_looks_inside_batches() {
        let cmd = Cmd::batch(vec![
            Cmd::UpdateMute {
                tab_id: TabId(1),
                muted: true,
            },
            Cmd::Render,
        ]);
        assert!(cmd.needs_render());
        assert!(!Cmd::Highlight {
            index: None,
            visible: false
        }
        .needs_render());
    }

    #[test]
    fn test_source_requests_in_order() {
        let cmd = Cmd::batch(vec![
            Cmd::Source(SourceRequest::Close { tab_id: TabId(4) }),
            Cmd::Render,
            Cmd::Source(SourceRequest::LoadSnapshot {
                only_current_window: true,
            }),
        ]);
        assert_eq!(
            cmd.source_requests(),
            vec![
                SourceRequest::Close { tab_id: TabId(4) },
                SourceRequest::LoadSnapshot {
                    only_current_window: true
                },
            ]
        );
    }
}
