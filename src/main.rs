use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use tablist::cli::CliArgs;
use tablist::source::FixtureTabSource;

mod runtime;

use runtime::App;

fn main() -> Result<()> {
    tablist::tracing::init();

    let args = CliArgs::parse();
    let startup = args.into_config().map_err(anyhow::Error::msg)?;
    tracing::info!(
        snapshot = %startup.snapshot.display(),
        only_current_window = startup.popup.only_current_window,
        theme = %startup.popup.theme,
        "Starting popup session"
    );

    let source = FixtureTabSource::load(&startup.snapshot)
        .with_context(|| format!("Failed to load {}", startup.snapshot.display()))?;

    let mut app = App::new(startup.popup, Arc::new(source));
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    app.run(stdin.lock(), &mut stdout.lock())
}
