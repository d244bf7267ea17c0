//! Unix signals mapped onto the [`ServerState`] control API.
//!
//! | signal  | action                          |
//! |---------|---------------------------------|
//! | SIGUSR1 | log a counter snapshot          |
//! | SIGUSR2 | raise verbosity (wraps past 9)  |
//! | SIGHUP  | reset counters and version date |
//!
//! SIGTERM and Ctrl-C are handled by [`shutdown_signal`].

use std::sync::Arc;

use crate::server::state::ServerState;

/// Registered control signal streams.
///
/// Registration happens up front in [`ControlSignals::register`] so that a
/// failure stops startup instead of vanishing inside a spawned task.
#[cfg(unix)]
pub struct ControlSignals {
    usr1: tokio::signal::unix::Signal,
    usr2: tokio::signal::unix::Signal,
    hup: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ControlSignals {
    pub fn register() -> anyhow::Result<Self> {
        use anyhow::Context;
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            usr1: signal(SignalKind::user_defined1()).context("failed to listen for SIGUSR1")?,
            usr2: signal(SignalKind::user_defined2()).context("failed to listen for SIGUSR2")?,
            hup: signal(SignalKind::hangup()).context("failed to listen for SIGHUP")?,
        })
    }

    /// Runs until the process exits, dispatching control signals.
    pub async fn dispatch(mut self, state: Arc<ServerState>) {
        loop {
            tokio::select! {
                Some(()) = self.usr1.recv() => state.request_snapshot().await,
                Some(()) = self.usr2.recv() => {
                    state.increase_verbosity().await;
                }
                Some(()) = self.hup.recv() => state.request_reset().await,
                else => break,
            }
        }
    }
}

#[cfg(not(unix))]
pub struct ControlSignals;

#[cfg(not(unix))]
impl ControlSignals {
    pub fn register() -> anyhow::Result<Self> {
        Ok(Self)
    }

    pub async fn dispatch(self, _state: Arc<ServerState>) {
        std::future::pending::<()>().await;
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
