//! lineircd - a small IRC daemon built on a single-threaded readiness loop.
//!
//! Clients pick a nickname, join channels and exchange messages. There is
//! no registration handshake, no server linking and no channel modes.

mod config;
mod error;
mod handlers;
mod network;
mod state;

use crate::config::{Config, LogConfig, LogFormat};
use crate::handlers::Registry;
use crate::network::Reactor;
use crate::state::Matrix;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn main() -> anyhow::Result<()> {
    // An explicit path must exist; the default one may be absent.
    let config_arg = std::env::args().nth(1);
    let config = match &config_arg {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH)?,
    };

    init_tracing(&config.log);

    let config_path = config_arg.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(path = %config_path, error = %e, "Invalid configuration");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    info!(
        server = %config.server.name,
        address = %config.listen.address,
        "Starting lineircd"
    );

    if let Some(tls) = &config.tls {
        warn!(
            cert = %tls.cert_path,
            key = %tls.key_path,
            "TLS material found but the listener only speaks plaintext"
        );
    }
    if let Some(limit) = config.limits.line_cap() {
        info!(limit, "Inbound line length capped");
    }

    let matrix = Arc::new(Matrix::new(&config));
    let registry = Registry::new();

    let mut reactor = Reactor::bind(config.listen.address, matrix, registry)?;
    reactor.run()?;

    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match log.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
