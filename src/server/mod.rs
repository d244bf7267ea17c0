//! Listeners, shared state and signal handling.

pub mod https;
pub mod listener;
pub mod signals;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::Config;
use state::ServerState;

/// Pause after a failed accept so a persistent error does not spin.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// Both bound listeners and the state they share.
pub struct NullServer {
    http: TcpListener,
    https: TcpListener,
    state: Arc<ServerState>,
}

impl NullServer {
    /// Binds both listeners. Any bind failure is fatal.
    pub async fn bind(cfg: &Config, state: Arc<ServerState>) -> anyhow::Result<Self> {
        let http_addr = cfg.http.bind_addr();
        let http = TcpListener::bind(&http_addr)
            .await
            .with_context(|| format!("HTTP listen error on {}", http_addr))?;
        state
            .log
            .notice(format!("Starting HTTP service on {}", http.local_addr()?))
            .await;

        let https_addr = cfg.https.bind_addr();
        let https = TcpListener::bind(&https_addr)
            .await
            .with_context(|| format!("HTTPS listen error on {}", https_addr))?;
        state
            .log
            .notice(format!("Starting fake HTTPS service on {}", https.local_addr()?))
            .await;

        Ok(Self { http, https, state })
    }

    pub fn http_addr(&self) -> std::io::Result<SocketAddr> {
        self.http.local_addr()
    }

    pub fn https_addr(&self) -> std::io::Result<SocketAddr> {
        self.https.local_addr()
    }

    pub fn state(&self) -> Arc<ServerState> {
        self.state.clone()
    }

    /// Serves both listeners until one of them fails.
    pub async fn run(self) -> anyhow::Result<()> {
        tokio::try_join!(
            listener::serve_http(self.http, self.state.clone()),
            https::serve_https(self.https, self.state),
        )?;
        Ok(())
    }
}
