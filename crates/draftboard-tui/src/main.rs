// Draftboard entry point.
//
// Startup sequence:
// 1. Load config (copying defaults on first run)
// 2. Initialize tracing (log to file, not terminal)
// 3. Build the draft service client
// 4. Resolve the initial route from the first CLI argument
// 5. Run the TUI until the user quits

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use draftboard_core::api::HttpDraftClient;
use draftboard_core::config::{self, LoggingConfig};
use draftboard_core::route::Route;
use draftboard_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;
    info!("Draftboard starting up");
    info!(base_url = %config.service.base_url, "Config loaded");

    // 3. Draft service client
    let client = HttpDraftClient::from_config(&config).context("invalid draft service URL")?;

    // 4. Initial route, e.g. `draftboard /draft/abc123`
    let route = std::env::args()
        .nth(1)
        .map(|path| Route::parse(&path))
        .unwrap_or_default();
    info!(route = %route, "Opening");

    // 5. Run the TUI (blocks until the user quits)
    if let Err(e) = tui::run(Arc::new(client), route).await {
        error!("TUI error: {e:#}");
        return Err(e);
    }

    info!("Draftboard shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join(Path::new(&logging.directory));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("draftboard.log"))
        .context("failed to create log file")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
