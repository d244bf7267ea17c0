use std::sync::Arc;

use clap::Parser;
use nullserv::config::{Cli, Config};
use nullserv::server::state::ServerState;
use nullserv::server::NullServer;
use nullserv::server::signals::{self, ControlSignals};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load(Cli::parse())?;
    if cfg.verbose >= 2 {
        tracing::info!(
            max_age = cfg.max_age,
            verbose = cfg.verbose,
            http = %cfg.http.bind_addr(),
            https = %cfg.https.bind_addr(),
            read_timeout = cfg.read_timeout,
            "Effective configuration"
        );
    }

    let state = Arc::new(ServerState::start(&cfg));
    let controls = ControlSignals::register()?;
    let server = NullServer::bind(&cfg, state.clone()).await?;
    tokio::spawn(controls.dispatch(state.clone()));

    tokio::select! {
        res = server.run() => {
            res?;
        }

        _ = signals::shutdown_signal() => {
            state.log.notice("Exiting on shutdown signal").await;
        }
    }

    Ok(())
}
