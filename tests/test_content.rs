use chrono::{Local, TimeZone};
use nullserv::content::payloads::{BLOCKED, NULL_FILES};
use nullserv::content::{ContentTable, InvalidUrl, resolve};

#[test]
fn test_resolve_strips_query_and_fragment() {
    assert_eq!(resolve("/ads/banner.JPEG?x=1#frag").unwrap(), "jpg");
    assert_eq!(resolve("/a/b/c.js;jsessionid=1").unwrap(), "js");
    assert_eq!(resolve("/pixel.gif#top").unwrap(), "gif");
}

#[test]
fn test_resolve_without_dot_is_catch_all() {
    assert_eq!(resolve("/index").unwrap(), "");
    assert_eq!(resolve("/").unwrap(), "");
    assert_eq!(resolve("/?img=x.png").unwrap(), "");
}

#[test]
fn test_resolve_decodes_before_splitting() {
    assert_eq!(resolve("/banner%2Epng").unwrap(), "png");
    // An escaped '?' still ends the path
    assert_eq!(resolve("/x.css%3Fv=2.js").unwrap(), "css");
}

#[test]
fn test_resolve_uses_last_dot() {
    assert_eq!(resolve("/jquery.min.js").unwrap(), "js");
    assert_eq!(resolve("/archive.tar.gz").unwrap(), "gz");
}

#[test]
fn test_resolve_applies_aliases() {
    assert_eq!(resolve("/a.htm").unwrap(), "html");
    assert_eq!(resolve("/a.aspx").unwrap(), "html");
    assert_eq!(resolve("/a.tif").unwrap(), "tiff");
    assert_eq!(resolve("/a.m4v").unwrap(), "mp4");
    assert_eq!(resolve("/.stat").unwrap(), "stats");
    assert_eq!(resolve("/.res").unwrap(), "reset");
    assert_eq!(resolve("/.vers").unwrap(), "version");
}

#[test]
fn test_resolve_alias_idempotence() {
    let table = ContentTable::default();
    let jpeg = resolve("/a.jpeg").unwrap();
    let jpg = resolve("/a.jpg").unwrap();

    assert_eq!(jpeg, jpg);
    assert_eq!(table.lookup(&jpeg), table.lookup(&jpg));
}

#[test]
fn test_resolve_invalid_escape() {
    assert!(matches!(resolve("/x.gif%zz"), Err(InvalidUrl::BadEscape(_))));
    assert!(matches!(resolve("/x.gif%"), Err(InvalidUrl::BadEscape(_))));
    assert_eq!(resolve("/%c3%28.png"), Err(InvalidUrl::NotUtf8));
}

#[test]
fn test_lookup_is_deterministic() {
    let table = ContentTable::default();
    for (ext, _, _) in NULL_FILES {
        let first = table.lookup(ext);
        let second = table.lookup(ext);
        assert_eq!(first.mime, second.mime);
        assert_eq!(first.len(), second.len());
    }
}

#[test]
fn test_lookup_unknown_falls_back_to_html() {
    let table = ContentTable::default();
    let html = table.lookup("html");

    assert_eq!(html.mime, "text/html");
    assert_eq!(html.payload.as_deref(), Some(&b"<!DOCTYPE html><title>x</title>"[..]));
    for ext in ["xyz", "php", "foo/bar", "7z"] {
        assert_eq!(table.lookup(ext), html, "{ext}");
    }
}

#[test]
fn test_lookup_catch_all_has_no_payload() {
    let table = ContentTable::default();
    let file = table.lookup("");

    assert_eq!(file.mime, "text/plain");
    assert!(file.payload.is_none());
}

#[test]
fn test_blocked_is_case_insensitive_after_resolution() {
    let table = ContentTable::default();
    let upper = resolve("/setup.ZIP").unwrap();
    let lower = resolve("/setup.zip").unwrap();

    assert_eq!(upper, lower);
    assert!(table.is_blocked(&upper));
    for ext in BLOCKED {
        assert!(table.is_blocked(ext));
        assert!(!table.contains(ext));
    }
    assert!(!table.is_blocked("gif"));
}

#[test]
fn test_generated_entries_are_registered() {
    let table = ContentTable::default();

    assert!(table.contains("stats"));
    assert!(table.contains("version"));
    assert!(!table.contains("xyz"));
}

#[test]
fn test_version_entry_tracks_reset_date() {
    let table = ContentTable::default();
    let reset_at = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    table.regenerate_version(reset_at);

    let file = table.lookup("version");
    assert_eq!(file.mime, "application/json");

    let body: serde_json::Value = serde_json::from_slice(file.payload.as_deref().unwrap()).unwrap();
    assert_eq!(body["reset_date"], reset_at.to_rfc2822());
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    for key in ["build_date", "commit_date", "sha"] {
        assert!(body[key].is_string(), "{key}");
    }
}
