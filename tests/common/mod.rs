#![allow(dead_code)]

use std::sync::Arc;

use nullserv::config::{Config, ListenConfig};
use nullserv::content::ContentTable;
use nullserv::logging::{ConsoleBackend, Logger};
use nullserv::server::state::ServerState;
use nullserv::stats::Stats;

/// Loopback configuration on ephemeral ports.
pub fn config(verbose: u8) -> Config {
    Config {
        http: ListenConfig {
            address: "127.0.0.1".to_string(),
            port: 0,
        },
        https: ListenConfig {
            address: "127.0.0.1".to_string(),
            port: 0,
        },
        max_age: 3600,
        verbose,
        log_file: None,
        read_timeout: 5,
    }
}

/// Fresh state with its own stats and log actors.
pub fn state(verbose: u8) -> Arc<ServerState> {
    let cfg = config(verbose);
    Arc::new(ServerState::with_parts(
        &cfg,
        ContentTable::default(),
        Stats::spawn(),
        Logger::spawn(Box::new(ConsoleBackend)),
    ))
}
