//! Fetch one page of headlines and print them
//!
//! Usage: cargo run --example headlines
//!
//! Reads NEWSFEED_API_KEY, NEWSFEED_TERM, NEWSFEED_ORDER_BY and NEWSFEED_PAGE_SIZE
//! from the environment (or a .env file). Set RUST_LOG=newsfeed=debug to see the
//! pipeline's logs.

use newsfeed::{Config, FeedSnapshot, LoadController, LoadState, build_query_url};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = Config::default();
    if let Ok(key) = std::env::var("NEWSFEED_API_KEY") {
        config.query.api_key = key;
    }
    if let Ok(term) = std::env::var("NEWSFEED_TERM") {
        config.query.search_term = term;
    }
    if let Ok(order) = std::env::var("NEWSFEED_ORDER_BY") {
        config.query.order_by = order.parse()?;
    }
    if let Some(size) = std::env::var("NEWSFEED_PAGE_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        config.query.page_size = size;
    }

    let url = build_query_url(&config.query)?;

    println!("═══════════════════════════════════════════════════════════");
    println!("  newsfeed headlines");
    println!("═══════════════════════════════════════════════════════════");
    println!("  Term:     {}", config.query.search_term);
    println!("  Order by: {}", config.query.order_by);
    println!("  Page:     {}", config.query.page_size);
    println!("═══════════════════════════════════════════════════════════");

    let mut controller = LoadController::from_config(&config, |articles: FeedSnapshot| {
        for (i, article) in articles.iter().enumerate() {
            let date = article
                .published_at()
                .map(|d| d.format("%b %-d, %Y %H:%M").to_string())
                .unwrap_or_else(|| article.publication_date().to_string());

            println!("{:>2}. {}", i + 1, article.title());
            println!("    {} · {} · {}", article.section_name(), article.author_name(), date);
            println!("    {}", article.url());
        }
    })?;

    controller.start(url.as_str());
    controller.next_delivery().await;

    match controller.state() {
        LoadState::Delivered if controller.current().is_empty() => {
            println!("No news available.");
        }
        LoadState::Failed => {
            if let Some(e) = controller.last_error() {
                eprintln!("Load failed: {e}");
            }
        }
        _ => {}
    }

    Ok(())
}
