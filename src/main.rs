use drawfeed_rs::api::HistoryClient;
use drawfeed_rs::config::Config;
use drawfeed_rs::display;
use drawfeed_rs::events::Event;
use drawfeed_rs::feeds::{Engine, FeedPoller};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "DRAWFEED_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let cfg = Config::load_or_default(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.general.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!(config = ?cfg, "loaded config");

    let client = HistoryClient::new(&cfg.feed.base_url, cfg.timeout())?;
    let poller = FeedPoller::new(client, cfg.prediction);

    // Create the event channel
    let (tx, mut rx) = mpsc::channel::<Event>(100);
    let handle = Engine::new(poller, cfg.schedule()).spawn(tx);
    let mut view_rx = handle.subscribe();

    println!("Watching {} (Ctrl+C to quit)\n", cfg.feed.base_url);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("Shutting down...");
                break;
            }
            Some(event) = rx.recv() => match event {
                Event::NewIssue { issue, previous, .. } => {
                    // Bell stands in for the vibration/sound cue
                    print!("\x07");
                    info!(%issue, %previous, "new result");
                }
                Event::FetchFailed { error } => {
                    warn!(%error, "showing last known draws");
                }
                Event::Shutdown => break,
            },
            Ok(()) = view_rx.changed() => {
                let view = view_rx.borrow_and_update().clone();
                // Clear screen, cursor home
                print!("\x1B[2J\x1B[H{}", display::render(&view));
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}
