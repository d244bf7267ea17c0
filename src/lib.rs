//! nullserv - null content responder
//!
//! Answers every HTTP request with the smallest valid file for the requested
//! extension, and every connection on the HTTPS port with a single TLS alert.

pub mod config;
pub mod content;
pub mod http;
pub mod logging;
pub mod server;
pub mod stats;
pub mod tls;
