//! Command-line argument parsing for the popup driver
//!
//! Supports:
//! - Loading browser state from a JSON fixture
//! - Overriding the window scope and theme from the config file
//! - Pointing at an alternative config file

use clap::Parser;
use std::path::PathBuf;

use crate::config::{PopupConfig, ThemeName};

/// Drive the tab popup against a browser snapshot
#[derive(Parser, Debug)]
#[command(
    name = "tablist",
    version,
    about = "Browse, filter and manage browser tabs from a snapshot"
)]
pub struct CliArgs {
    /// Browser state fixture (JSON)
    #[arg(short = 's', long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// List only the tabs of the current window
    #[arg(long, conflicts_with = "all_windows")]
    pub only_current_window: bool,

    /// List the tabs of every window
    #[arg(long)]
    pub all_windows: bool,

    /// Colour scheme (auto, light, dark, black)
    #[arg(long, value_name = "NAME")]
    pub theme: Option<ThemeName>,

    /// Config file to use instead of ~/.config/tablist/config.yaml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub snapshot: PathBuf,
    /// Config file contents with command-line overrides applied
    pub popup: PopupConfig,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration, reading the config file
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let base = match &self.config {
            Some(path) if !path.exists() => {
                return Err(format!("Config file not found: {}", path.display()));
            }
            Some(path) => PopupConfig::load_from(path),
            None => PopupConfig::load(),
        };
        self.apply(base)
    }

    /// Apply command-line overrides on top of `base`
    pub fn apply(self, base: PopupConfig) -> Result<StartupConfig, String> {
        if !self.snapshot.is_file() {
            return Err(format!(
                "Snapshot fixture not found: {}",
                self.snapshot.display()
            ));
        }

        let mut popup = base;
        if self.only_current_window {
            popup.only_current_window = true;
        }
        if self.all_windows {
            popup.only_current_window = false;
        }
        if let Some(theme) = self.theme {
            popup.theme = theme;
        }

        Ok(StartupConfig {
            snapshot: self.snapshot,
            popup,
        })
    }
}
