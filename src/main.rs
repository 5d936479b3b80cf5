//! `calcd` binary.
//!
//! Run with:
//!   RUST_LOG=calcd=debug cargo run -- --port 3000
//!
//! Try:
//!   curl 'http://localhost:3000/add?num1=2&num2=3'
//!   curl 'http://localhost:3000/sqrt?num1=-4'

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use calcd::{Config, Server, api};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    init_tracing(&config);

    match Server::bind(config.addr()).serve(api::router()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over `--log-level` when set.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
