//! friendfinder server binary
//!
//! Serves `GET /api/friends` on port 8000 by default. Settings come from an
//! optional `server.{toml,json,yaml}` file, a `.env` file, and
//! `FRIENDS_SERVER__*` environment variables.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;

    server::start_server(config).await?;

    Ok(())
}
