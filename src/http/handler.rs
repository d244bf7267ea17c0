//! Null content request handling.

use url::Url;

use crate::config::NO_CACHE;
use crate::content::resolve;
use crate::content::table::{RESET_EXTENSION, STATS_EXTENSION, VERSION_EXTENSION};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::server::state::ServerState;
use crate::stats::{INVALID_URL, TRANSPORT_HTTP};

/// Answers one request.
///
/// Never produces a server error: an undecodable target gets an empty 200,
/// a blocked extension a 404, and anything unknown the HTML null file.
pub async fn handle(state: &ServerState, req: &Request) -> Response {
    let response = respond(state, req).await;
    if req.method == Method::HEAD {
        response.without_body()
    } else {
        response
    }
}

async fn respond(state: &ServerState, req: &Request) -> Response {
    state.stats.increment(TRANSPORT_HTTP).await;

    let verbose = state.verbosity();
    if verbose > 0 {
        state.log.notice(format!("HTTP {} {}", req.host(), req.path)).await;
    }

    let mut extension = match resolve(&origin_target(&req.path)) {
        Ok(ext) => ext,
        Err(e) => {
            state.stats.increment(INVALID_URL).await;
            if verbose > 0 {
                state.log.notice(format!("HTTP invalid url {}: {}", req.path, e)).await;
            }
            return Response::empty();
        }
    };

    if extension == RESET_EXTENSION {
        state.request_reset().await;
        extension = STATS_EXTENSION.to_string();
    }

    if verbose > 1 {
        state.log.notice(format!("HTTP ({})", extension)).await;
    }

    state.stats.increment(req.protocol_label()).await;
    state.stats.increment(extension.as_str()).await;

    if state.table.is_blocked(&extension) {
        return Response::not_found();
    }

    if extension == STATS_EXTENSION {
        let counters = state.stats.snapshot().await;
        let body = serde_json::to_vec_pretty(&counters).unwrap_or_else(|_| b"{}".to_vec());
        return Response::json(body, NO_CACHE);
    }

    let cache_control = if extension == VERSION_EXTENSION {
        NO_CACHE
    } else {
        state.cache_control()
    };

    Response::null_file(&state.table.lookup(&extension), cache_control)
}

/// Path and query of an absolute-form target, or the target unchanged.
///
/// Keeps the host name (which always contains dots) out of suffix
/// resolution for proxy-style requests.
fn origin_target(target: &str) -> String {
    if !(target.starts_with("http://") || target.starts_with("https://")) {
        return target.to_string();
    }

    match Url::parse(target) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        },
        Err(_) => target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_target_strips_scheme_and_host() {
        assert_eq!(origin_target("http://ads.example.com/banner"), "/banner");
        assert_eq!(origin_target("http://ads.example.com/x.gif?a=1"), "/x.gif?a=1");
        assert_eq!(origin_target("/already/origin.js"), "/already/origin.js");
    }
}
