//! Tests for the HTTPS port: handshake sniffing and the alert record

mod common;

use std::time::Duration;

use nullserv::server::https::handle_connection;
use nullserv::tls::{ALERT_UNKNOWN_CA, Handshake, sniff};
use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

#[test]
fn test_alert_bytes() {
    assert_eq!(ALERT_UNKNOWN_CA, [0x15, 0x03, 0x01, 0x00, 0x02, 0x02, 0x30]);
}

#[tokio::test]
async fn test_sniff_reads_only_the_record_header() {
    let (mut client, mut server) = duplex(64);
    client.write_all(&[0x16, 0x03, 0x01, 0x02, 0x00]).await.unwrap();

    assert_eq!(sniff(&mut server, None).await, Handshake::Tls10);

    let mut rest = [0u8; 2];
    server.read_exact(&mut rest).await.unwrap();
    assert_eq!(rest, [0x02, 0x00]);
}

#[tokio::test]
async fn test_sniff_times_out_on_silent_client() {
    let (_client, mut server) = duplex(64);

    let handshake = sniff(&mut server, Some(Duration::from_millis(20))).await;
    assert_eq!(handshake, Handshake::Invalid);
}

#[tokio::test]
async fn test_tls12_handshake_gets_alert() {
    let state = common::state(0);
    let (mut client, server) = duplex(64);

    client.write_all(&[0x16, 0x03, 0x03]).await.unwrap();
    client.shutdown().await.unwrap();

    let handshake = handle_connection(&state, server, "test-peer").await;
    assert_eq!(handshake, Handshake::Tls12);

    let mut reply = Vec::new();
    client.read_to_end(&mut reply).await.unwrap();
    assert_eq!(reply, vec![0x15, 0x03, 0x01, 0x00, 0x02, 0x02, 0x30]);

    let counters = state.stats.snapshot().await;
    assert_eq!(counters.get("_transport_https"), Some(&1));
    assert_eq!(counters.get("https_tls1.2"), Some(&1));
    assert_eq!(counters.get("https_invalid"), None);
}

#[tokio::test]
async fn test_short_read_gets_no_alert() {
    let state = common::state(0);
    let (mut client, server) = duplex(64);

    client.write_all(&[0x16, 0x03]).await.unwrap();
    client.shutdown().await.unwrap();

    let handshake = handle_connection(&state, server, "test-peer").await;
    assert_eq!(handshake, Handshake::Invalid);

    let mut reply = Vec::new();
    client.read_to_end(&mut reply).await.unwrap();
    assert!(reply.is_empty());

    let counters = state.stats.snapshot().await;
    assert_eq!(counters.get("https_invalid"), Some(&1));
    assert_eq!(counters.get("_transport_https"), Some(&1));
}

#[tokio::test]
async fn test_unknown_minor_version_counts_as_invalid() {
    let state = common::state(0);
    let (mut client, server) = duplex(64);

    client.write_all(&[0x16, 0x03, 0x09]).await.unwrap();
    client.shutdown().await.unwrap();

    let handshake = handle_connection(&state, server, "test-peer").await;
    assert_eq!(handshake, Handshake::Invalid);

    let mut reply = Vec::new();
    client.read_to_end(&mut reply).await.unwrap();
    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_every_version_gets_the_same_alert() {
    let state = common::state(0);

    for minor in 0u8..=4 {
        let (mut client, server) = duplex(64);
        client.write_all(&[0x16, 0x03, minor]).await.unwrap();

        let handshake = handle_connection(&state, server, "test-peer").await;
        assert!(handshake.is_tls());

        let mut reply = Vec::new();
        client.read_to_end(&mut reply).await.unwrap();
        assert_eq!(reply, ALERT_UNKNOWN_CA.to_vec());
    }

    let counters = state.stats.snapshot().await;
    for label in ["https_ssl3.0", "https_tls1.0", "https_tls1.1", "https_tls1.2", "https_tls1.3"] {
        assert_eq!(counters.get(label), Some(&1), "{label}");
    }
    assert_eq!(counters.get("_transport_https"), Some(&5));
}
