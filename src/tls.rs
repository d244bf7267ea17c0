//! TLS handshake sniffing.
//!
//! Only the first three bytes of a connection are inspected:
//!
//! ```text
//!   ContentType(1) | Version major(1) | Version minor(1)
//! ```
//!
//! A handshake record (content type 22, major version 3) is answered with a
//! single fatal "unknown CA" alert, which makes the client give up cleanly.
//! Nothing else of TLS is implemented.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// TLS record type of a handshake message.
pub const HANDSHAKE_RECORD: u8 = 0x16;

/// Fatal `unknown_ca` alert, versioned TLS 1.0 so every 1.x peer accepts it.
pub const ALERT_UNKNOWN_CA: [u8; 7] = [
    0x15, // alert record
    0x03, 0x01, // TLS 1.0
    0x00, 0x02, // length
    0x02, // fatal
    0x30, // unknown certificate authority
];

/// What the first bytes of a connection looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handshake {
    Ssl30,
    Tls10,
    Tls11,
    Tls12,
    Tls13,
    /// Short read, read error, or anything that is not a known handshake.
    Invalid,
}

impl Handshake {
    /// Classifies a record header.
    ///
    /// Anything other than exactly three bytes, or an unknown minor version,
    /// is [`Handshake::Invalid`].
    pub fn classify(header: &[u8]) -> Self {
        match header {
            [HANDSHAKE_RECORD, 3, minor] => match *minor {
                0 => Handshake::Ssl30,
                1 => Handshake::Tls10,
                2 => Handshake::Tls11,
                3 => Handshake::Tls12,
                4 => Handshake::Tls13,
                _ => Handshake::Invalid,
            },
            _ => Handshake::Invalid,
        }
    }

    /// Counter label for this classification.
    pub fn label(&self) -> &'static str {
        match self {
            Handshake::Ssl30 => "https_ssl3.0",
            Handshake::Tls10 => "https_tls1.0",
            Handshake::Tls11 => "https_tls1.1",
            Handshake::Tls12 => "https_tls1.2",
            Handshake::Tls13 => "https_tls1.3",
            Handshake::Invalid => "https_invalid",
        }
    }

    pub fn is_tls(&self) -> bool {
        *self != Handshake::Invalid
    }
}

/// Reads the record header from `stream` and classifies it.
///
/// A read that fails, ends early, or outlives `deadline` yields
/// [`Handshake::Invalid`].
pub async fn sniff<S>(stream: &mut S, deadline: Option<Duration>) -> Handshake
where
    S: AsyncRead + Unpin,
{
    let mut header = [0u8; 3];

    let read = stream.read_exact(&mut header);
    let result = match deadline {
        Some(limit) => match tokio::time::timeout(limit, read).await {
            Ok(res) => res,
            Err(_) => Err(io::Error::new(io::ErrorKind::TimedOut, "handshake read timeout")),
        },
        None => read.await,
    };

    match result {
        Ok(_) => Handshake::classify(&header),
        Err(e) => {
            tracing::debug!("TLS sniff read failed: {}", e);
            Handshake::Invalid
        }
    }
}

/// Sends the alert and closes the write side.
pub async fn abort_handshake<S>(stream: &mut S) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    stream.write_all(&ALERT_UNKNOWN_CA).await?;
    stream.shutdown().await
}
