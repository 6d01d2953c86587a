//! Popup model - the complete state of one popup session
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod directory;

pub use directory::{
    AudioState, DirectoryError, DirectoryModel, EmptiedContainers, Group, GroupColor, GroupId,
    GroupListing, RemovedTab, SessionMode, Snapshot, Tab, TabDirectory, TabId, Window, WindowId,
};

use crate::config::PopupConfig;
use crate::filter::FilterState;
use crate::navigation::NavigationController;
use crate::projection::{project, Projection};

/// The complete popup model
#[derive(Debug, Clone)]
pub struct PopupModel {
    /// Windows, tabs and groups as last reported by the tab source
    pub directory: TabDirectory,
    /// Filter box text and compiled predicate
    pub filter: FilterState,
    /// Keyboard highlight
    pub navigation: NavigationController,
    /// Session configuration, fixed at startup
    pub config: PopupConfig,
    /// Cached view of `directory` under `filter`
    projection: Projection,
}

impl PopupModel {
    pub fn new(config: PopupConfig) -> Self {
        Self {
            directory: TabDirectory::new(config.session_mode()),
            filter: FilterState::new(),
            navigation: NavigationController::new(),
            config,
            projection: Projection::default(),
        }
    }

    /// The latest projection, as last handed to the render sink
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Re-derive the projection from the directory and filter and re-evaluate
    /// the highlight bound against it. Returns the new bound.
    pub fn refresh_projection(&mut self) -> usize {
        self.projection = project(&self.directory, self.filter.active());
        let bound = self.projection.tab_count();
        self.navigation.sync_bound(bound);
        bound
    }

    /// Check cross-component invariants (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self, context: &str) {
        self.navigation.assert_invariants(context);
        assert_eq!(
            self.navigation.bound(),
            self.projection.tab_count(),
            "[{}] navigation bound out of sync with projection",
            context
        );
    }
}
