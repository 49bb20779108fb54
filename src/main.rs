// TubeRank entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Ensure and load config
// 3. Create mpsc channels
// 4. Build the Gemini client
// 5. Initialize AppState
// 6. Spawn the controller task
// 7. Run the TUI event loop (blocking until user quits)
// 8. Cleanup on exit

use tuberank::app;
use tuberank::config;
use tuberank::llm;
use tuberank::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("TubeRank starting up");

    // 2. Ensure and load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: model={}, export dir={}, {} niche presets",
        config.api.model,
        config.export.directory,
        config.niche.presets.len()
    );

    // 3. Create mpsc channels
    let (fetch_tx, fetch_rx) = mpsc::channel(256);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 4. Build the Gemini client from config
    let llm_client = llm::client::LlmClient::from_config(&config);
    match &llm_client {
        llm::client::LlmClient::Active(_) => info!("Gemini client initialized (API key configured)"),
        llm::client::LlmClient::Disabled => info!("Gemini client disabled (no API key)"),
    }

    // 5. Initialize AppState
    let niche_presets = config.niche.presets.clone();
    let app_state = app::AppState::new(config, llm_client, fetch_tx);

    // 6. Spawn the controller task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(fetch_rx, cmd_rx, ui_tx, app_state).await {
            error!("Controller loop error: {}", e);
        }
    });

    // 7. Run the TUI event loop (blocking until user quits)
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx, niche_presets).await {
        error!("TUI error: {}", e);
    }

    // 8. Cleanup: wait for the controller to drain (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("TubeRank shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("tuberank.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tuberank=info,warn")),
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
