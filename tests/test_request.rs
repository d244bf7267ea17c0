use nullserv::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

fn request(version: &str, headers: &[(&str, &str)]) -> Request {
    Request {
        method: Method::GET,
        path: "/".to_string(),
        version: version.to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    }
}

#[test]
fn test_request_header_lookup_ignores_case() {
    let req = request("HTTP/1.1", &[("host", "ads.example.com")]);

    assert_eq!(req.header("Host"), Some("ads.example.com"));
    assert_eq!(req.header("HOST"), Some("ads.example.com"));
    assert_eq!(req.header("Missing"), None);
    assert_eq!(req.host(), "ads.example.com");
}

#[test]
fn test_request_host_missing() {
    let req = request("HTTP/1.1", &[]);
    assert_eq!(req.host(), "");
}

#[test]
fn test_request_protocol_label() {
    assert_eq!(request("HTTP/1.1", &[]).protocol_label(), "http_1.1");
    assert_eq!(request("HTTP/1.0", &[]).protocol_label(), "http_1.0");
}

#[test]
fn test_request_keep_alive_http11_default() {
    assert!(request("HTTP/1.1", &[]).keep_alive());
}

#[test]
fn test_request_keep_alive_http10_default() {
    assert!(!request("HTTP/1.0", &[]).keep_alive());
    assert!(request("HTTP/1.0", &[("Connection", "keep-alive")]).keep_alive());
}

#[test]
fn test_request_keep_alive_close() {
    assert!(!request("HTTP/1.1", &[("Connection", "close")]).keep_alive());
    assert!(!request("HTTP/1.1", &[("connection", "Close")]).keep_alive());
}

#[test]
fn test_request_keep_alive_case_insensitive() {
    assert!(request("HTTP/1.1", &[("Connection", "Keep-Alive")]).keep_alive());
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("HEAD"), Some(Method::HEAD));
    assert_eq!(Method::from_str("PURGE"), Some(Method::Other("PURGE".to_string())));
    assert_eq!(Method::from_str("get"), Some(Method::Other("get".to_string()))); // Case-sensitive
    assert_eq!(Method::from_str("GE T"), None);
    assert_eq!(Method::from_str(""), None);
}

#[test]
fn test_request_builder_defaults() {
    let req = RequestBuilder::new().path("/x.css").build().unwrap();

    assert_eq!(req.method, Method::GET);
    assert_eq!(req.version, "HTTP/1.1");
    assert!(req.headers.is_empty());
}

#[test]
fn test_request_builder_requires_path() {
    assert!(RequestBuilder::new().method(Method::HEAD).build().is_err());
}
