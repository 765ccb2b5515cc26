// Auction page client entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Read the CSRF token from the session cookie
// 4. Build the page from its contract
// 5. Create mpsc channels
// 6. Spawn app logic task
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use aste_core::config;
use aste_core::csrf;
use aste_core::page::Page;
use aste_tui::api::{AuctionApi, SiteClient};
use aste_tui::app;
use aste_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Auction client starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!("Config loaded: server={}", config.server.base_url);

    let cookie = config.credentials.cookie.clone();
    let csrf_token = cookie.as_deref().and_then(csrf::csrf_token);
    if csrf_token.is_none() {
        warn!("no csrftoken cookie configured; POSTs will be sent without {}", csrf::CSRF_HEADER);
    }

    let api: Arc<dyn AuctionApi> = Arc::new(
        SiteClient::new(&config.server, cookie, csrf_token)
            .context("failed to build HTTP client")?,
    );

    let (page, startup) = Page::load(&config.page);
    info!(
        "Page loaded: {} wishlist buttons, bid form: {}, countdown: {}, live feed: {}, slider: {}",
        page.wishlist.len(),
        page.bid_form.is_some(),
        page.countdown.is_some(),
        page.live.is_some(),
        page.slider.is_some()
    );

    let (net_tx, net_rx) = mpsc::channel(256);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(page, api, net_tx);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(app_state, startup, net_rx, cmd_rx, ui_tx).await {
            error!("Application loop error: {}", e);
        }
    });

    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Auction client shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("aste-client.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aste_tui=info,aste_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
