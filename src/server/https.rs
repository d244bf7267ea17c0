//! Fake HTTPS listener: sniff the handshake, send one alert, hang up.

use std::fmt::Display;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::debug;

use crate::server::ACCEPT_BACKOFF;
use crate::server::state::ServerState;
use crate::stats::TRANSPORT_HTTPS;
use crate::tls::{self, Handshake};

/// Accepts connections on the HTTPS port forever, one task per connection.
pub async fn serve_https(listener: TcpListener, state: Arc<ServerState>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                state.log.error(format!("HTTPS accept error {}", e)).await;
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };

        let state = state.clone();
        tokio::spawn(async move {
            handle_connection(&state, socket, peer).await;
        });
    }
}

/// Classifies one connection and answers a handshake with the alert.
///
/// The stream is dropped (and so closed) on return.
pub async fn handle_connection<S, P>(state: &ServerState, mut stream: S, peer: P) -> Handshake
where
    S: AsyncRead + AsyncWrite + Unpin,
    P: Display,
{
    let handshake = tls::sniff(&mut stream, state.read_deadline()).await;

    state.stats.increment(TRANSPORT_HTTPS).await;
    state.stats.increment(handshake.label()).await;

    if state.verbosity() > 0 {
        state
            .log
            .notice(format!("HTTPS {} ({})", peer, handshake.label()))
            .await;
    }

    if handshake.is_tls() {
        if let Err(e) = tls::abort_handshake(&mut stream).await {
            state
                .log
                .error(format!("HTTPS alert to {} failed: {}", peer, e))
                .await;
        }
    } else {
        debug!("No TLS handshake from {}, closing", peer);
    }

    handshake
}
