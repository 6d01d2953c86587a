//! Tablist - Elm-style state engine for a browser tab popup
//!
//! This crate provides the tab directory, the view projection, the filter and
//! the keyboard highlight of a tab-management popup, wired together with the
//! Elm Architecture pattern. Browser access and drawing sit behind the
//! [`source::TabSource`] and [`render::RenderSink`] traits.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod filter;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod navigation;
pub mod projection;
pub mod render;
pub mod source;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::PopupConfig;
pub use messages::Msg;
pub use model::PopupModel;
pub use projection::{project, Projection};
