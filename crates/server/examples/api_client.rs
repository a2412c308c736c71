//! Example client for the friends search API
//!
//! Start the server first (`cargo run -p friendfinder-server`), then run
//! `cargo run -p friendfinder-server --example api_client`.

use reqwest::{Client, StatusCode};
use serde_json::Value;

const SERVER_URL: &str = "http://localhost:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Search a few queries, retrying simulated failures
    for (n, q) in ["", "al", "RENO", "zzz"].iter().enumerate() {
        println!("{}. Search q={q:?}:", n + 2);
        for attempt in 1..=5 {
            let resp = client
                .get(format!("{SERVER_URL}/api/friends"))
                .query(&[("q", q)])
                .send()
                .await?;

            if resp.status() == StatusCode::INTERNAL_SERVER_ERROR {
                println!("  attempt {attempt}: {}", resp.text().await?);
                continue;
            }

            let body: Value = resp.json().await?;
            println!("  count: {}", body["count"]);
            if let Some(results) = body["results"].as_array() {
                for friend in results.iter().take(3) {
                    println!("  - {friend}");
                }
            }
            break;
        }
        println!();
    }

    Ok(())
}
