//! Runtime module - drives the popup from a terminal
//!
//! This module contains the binary-only glue around the library:
//! - `app` - event loop, tab source workers and the text sink
//! - `input` - stdin command lines to messages

pub mod app;
pub mod input;

pub use app::App;
