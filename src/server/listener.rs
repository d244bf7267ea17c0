use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::debug;

use crate::http::connection::Connection;
use crate::server::ACCEPT_BACKOFF;
use crate::server::state::ServerState;

/// Accepts HTTP connections forever, one task per connection.
///
/// Accept errors are logged and the loop keeps serving.
pub async fn serve_http(listener: TcpListener, state: Arc<ServerState>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                state.log.error(format!("HTTP accept error {}", e)).await;
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        debug!("Accepted HTTP connection from {}", peer);

        let state = state.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, state.clone());
            if let Err(e) = conn.run().await {
                state
                    .log
                    .error(format!("HTTP connection error from {}: {}", peer, e))
                    .await;
            }
        });
    }
}
