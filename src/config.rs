//! Process configuration: command-line flags with environment fallbacks.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// Stateless arithmetic microservice.
#[derive(Clone, Debug, Parser)]
#[command(name = "calcd", version, about, long_about = None)]
pub struct Config {
    /// IP address to listen on
    #[arg(long, env = "CALCD_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "CALCD_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Log filter used when RUST_LOG is not set (e.g. `info`, `calcd=debug`)
    #[arg(long, env = "CALCD_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "CALCD_LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
