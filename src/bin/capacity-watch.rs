// src/bin/capacity-watch.rs
//! Terminal companion to the dashboard: paints the current figures, then
//! keeps a deferred auto-refresh armed against the running server.

use reqwest::Client;

use capacity_dashboard::config::WatchConfig;
use capacity_dashboard::errors::Result;
use capacity_dashboard::models::{format_count, format_mw, CapacitySnapshot};
use capacity_dashboard::refresh::{self, Page};

struct TerminalPage;

impl Page for TerminalPage {
    fn reload(&self) {
        println!("🔄 Refresh succeeded, repainting dashboard...");
    }

    fn alert(&self, message: &str) {
        eprintln!("⚠️  {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = WatchConfig::from_env();
    let client = Client::new();
    let page = TerminalPage;

    render_dashboard(&client, &config.dashboard_url).await?;

    // One deferred refresh per paint, the way the page script arms a single
    // timer per load. A failed refresh leaves the last paint on screen.
    loop {
        if !refresh::delayed_refresh(&client, &config.dashboard_url, &page).await {
            break;
        }
        render_dashboard(&client, &config.dashboard_url).await?;
    }

    Ok(())
}

/// Fetches the current snapshot and repaints the terminal with it.
async fn render_dashboard(client: &Client, base_url: &str) -> Result<()> {
    let url = format!("{}/api/data", base_url.trim_end_matches('/'));
    let snapshot = client
        .get(&url)
        .send()
        .await?
        .json::<CapacitySnapshot>()
        .await?;

    // Clear the screen and move the cursor home.
    print!("\x1B[2J\x1B[1;1H");
    println!("SSE Scotland Capacity Dashboard");
    println!("===============================");
    println!();
    println!(
        "  Accepted to connect:  {:>14} MW",
        format_mw(snapshot.summary.accepted_capacity)
    );
    println!(
        "  Already connected:    {:>14} MW",
        format_mw(snapshot.summary.connected_capacity)
    );
    println!(
        "  Maximum export:       {:>14} MW",
        format_mw(snapshot.summary.max_export_capacity)
    );
    println!(
        "  Maximum import:       {:>14} MW",
        format_mw(snapshot.summary.max_import_capacity)
    );
    println!(
        "  Grand total:          {:>14} MW",
        format_mw(snapshot.summary.grand_total)
    );
    println!();
    println!("  Records analyzed: {}", format_count(snapshot.records_count));
    println!("  Last updated:     {}", snapshot.last_updated);

    Ok(())
}
