use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::http::handler;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::state::ServerState;

pub struct Connection<S> {
    stream: S,
    state: Arc<ServerState>,
    buffer: Vec<u8>,
    phase: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, state: Arc<ServerState>) -> Self {
        Self {
            stream,
            state,
            buffer: Vec::with_capacity(4096),
            phase: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.phase {
                ConnectionState::Reading => {
                    match self.read_request().await? {
                        Some(req) => {
                            self.phase = ConnectionState::Processing(req);
                        }
                        None => {
                            self.phase = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let keep_alive = req.keep_alive();
                    let mut response = handler::handle(&self.state, req).await;
                    if !keep_alive {
                        response
                            .headers
                            .insert("Connection".to_string(), "close".to_string());
                    }

                    let writer = ResponseWriter::new(&response);
                    self.phase = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_alive {
                        self.phase = ConnectionState::Reading; // go back for next request
                    } else {
                        self.phase = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Next request, or `None` once the client closed or went idle.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.drain(..consumed);
                    return Ok(Some(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    // Malformed framing: answer once, then hang up
                    let mut writer = ResponseWriter::new(&Response::bad_request());
                    let _ = writer.write_to_stream(&mut self.stream).await;
                    return Err(anyhow::anyhow!("HTTP parse error: {:?}", e));
                }
            }

            let mut temp = [0u8; 1024];
            let read = self.stream.read(&mut temp);
            let n = match self.state.read_deadline() {
                Some(limit) => match tokio::time::timeout(limit, read).await {
                    Ok(res) => res?,
                    Err(_) => {
                        tracing::debug!("HTTP read timed out, closing");
                        return Ok(None);
                    }
                },
                None => read.await?,
            };

            if n == 0 {
                // Client closed connection
                return Ok(None);
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }
}
