//! friendfinder server - HTTP API for case-insensitive friend search
//!
//! This crate serves the `friendfinder` search over HTTP. It exists to give a
//! frontend something realistic to talk to, so every search request passes
//! through a [`fault::FaultPolicy`] that adds a random delay and sometimes
//! fails on purpose.
//!
//! - **Search**: `GET /api/friends?q=<text>` filters the collection
//! - **Fault injection**: configurable failure rate and delay ceiling
//! - **Middleware**: CORS, compression, request ID tracking, structured logging
//! - **Configuration**: environment variable and file-based configuration
//! - **Health & Metrics**: liveness/readiness probes and Prometheus metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/friends?q=<text>` - Search friends
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod fault;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use fault::{FaultDecision, FaultPolicy, NoFaults, RandomFaults};
pub use server::{build_router, start_server};
pub use state::ServerState;
