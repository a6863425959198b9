use anyhow::Result;
use std::time::{Duration, Instant};

use drawfeed_rs::api::history::DEFAULT_BASE_URL;
use drawfeed_rs::api::HistoryClient;
use drawfeed_rs::prediction::{Prediction, SizePolicy};

/// Fetch the history page once and print what the engine would derive.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let base_url = std::env::var("DRAWFEED_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = HistoryClient::new(&base_url, Duration::from_secs(5))?;

    println!("Fetching {}...", base_url);
    let start = Instant::now();
    let snapshot = client.get_history().await?;
    println!("Got {} draws in {}ms\n", snapshot.len(), start.elapsed().as_millis());

    let policy = SizePolicy::default();
    for draw in snapshot.draws.iter().take(5) {
        println!(
            "{}  {}  {:<5}  {}",
            draw.issue_number,
            draw.number,
            draw.size_class(),
            draw.color
        );
    }

    match snapshot.latest() {
        Some(latest) => {
            let p = Prediction::derive(latest, &policy)?;
            println!("\nNext #{}: {} / {}", p.next_issue_number, p.size_class, p.color_class);
        }
        None => println!("Feed has no draws yet"),
    }

    Ok(())
}
