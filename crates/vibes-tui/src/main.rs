mod action;
mod app;
mod app_state;
mod callback;
mod component;
mod components;
mod theme;
mod widgets;

use vibes_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = vibes_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("vibes.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {e}");
        Config::default().with_env_overrides()
    });
    let client = reqwest::Client::new();

    // Headless mode: `vibes snapshot` refreshes the cached JSON and exits
    // without touching the terminal.
    if std::env::args().nth(1).as_deref() == Some("snapshot") {
        let path = vibes_core::snapshot::run(&client, &config.paths.snapshot_path).await?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("vibes log: {}", log_path.display());
    tracing::info!("vibes starting…");

    let app = app::App::new(config, client);
    app.run().await?;

    Ok(())
}
