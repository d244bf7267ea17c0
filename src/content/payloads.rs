//! Canned payloads, extension aliases and blocked extensions.
//!
//! Every payload is the smallest byte stream a browser accepts as a valid
//! (and invisible) resource of its type.

/// 1x1 24-bit BMP.
pub static BMP: &[u8] = &[
    0x42, 0x4d, 0x1e, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1a, 0x00, 0x00, 0x00, 0x0c, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0x00, 0x00, 0x00, 0xff, 0x00,
];

/// 1x1 transparent GIF89a.
pub static GIF: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xff, 0xff, 0xff,
    0x00, 0x00, 0x00, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

pub static HTML: &[u8] = b"<!DOCTYPE html><title>x</title>";

/// 1x1 icon with a single 24-bit image.
pub static ICO: &[u8] = &[
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x18, 0x00, 0x30, 0x00,
    0x00, 0x00, 0x16, 0x00, 0x00, 0x00, 0x28, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0xff, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// 1x1 greyscale baseline JPEG.
pub static JPG: &[u8] = &[
    0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, 0x4a, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x01, 0x00, 0x01,
    0x00, 0x01, 0x00, 0x00, 0xff, 0xdb, 0x00, 0x43, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xc0, 0x00, 0x0b, 0x08, 0x00, 0x01,
    0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xff, 0xc4, 0x00, 0x14, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0xff, 0xc4, 0x00, 0x14,
    0x10, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0xff, 0xda, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3f, 0x00, 0x47, 0xff, 0xd9,
];

pub static JSON: &[u8] = b"{}";

/// 1x1 transparent RGBA PNG.
pub static PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4,
    0x89, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae,
    0x42, 0x60, 0x82,
];

pub static SVG: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>";

/// Big-endian 1x1 bilevel TIFF.
pub static TIFF: &[u8] = &[
    0x4d, 0x4d, 0x00, 0x2a, 0x00, 0x00, 0x00, 0x08, 0x00, 0x07, 0x01, 0x00, 0x00, 0x03, 0x00, 0x00,
    0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x01, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01,
    0x00, 0x00, 0x01, 0x06, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x11,
    0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, 0x17, 0x00, 0x03, 0x00, 0x00,
    0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x1a, 0x00, 0x05, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00,
    0x00, 0x64, 0x01, 0x1b, 0x00, 0x05, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x64, 0x00, 0x00,
    0x00, 0x00, 0x20, 0x20, 0x20, 0x62, 0x79, 0x20, 0x61, 0x6c, 0x6f, 0x6b,
];

/// Empty WebAssembly module (magic + version 1).
pub static WASM: &[u8] = &[0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];

pub static XHTML: &[u8] = b"<html xmlns=\"http://www.w3.org/1999/xhtml\"/>";

pub static XML: &[u8] = b"<!DOCTYPE _[<!ELEMENT _ EMPTY>]><_/>";

/// Registered extensions: (extension, payload, MIME type).
///
/// `None` means headers only. The `stats` and `version` bodies are generated
/// at runtime and are not part of this list.
pub static NULL_FILES: &[(&str, Option<&[u8]>, &str)] = &[
    ("", None, "text/plain"),
    ("bmp", Some(BMP), "image/bmp"),
    ("css", None, "text/css"),
    ("csv", None, "text/csv"),
    ("gif", Some(GIF), "image/gif"),
    ("html", Some(HTML), "text/html"),
    ("ico", Some(ICO), "image/x-icon"),
    ("jpg", Some(JPG), "image/jpeg"),
    ("js", None, "application/javascript"),
    ("json", Some(JSON), "application/json"),
    ("png", Some(PNG), "image/png"),
    ("svg", Some(SVG), "image/svg+xml"),
    ("tiff", Some(TIFF), "image/tiff"),
    ("wasm", Some(WASM), "application/wasm"),
    ("xhtml", Some(XHTML), "application/xhtml+xml"),
    ("xml", Some(XML), "application/xml"),
];

/// Alternate spellings mapped onto the extension that serves them.
pub static ALIASES: &[(&str, &str)] = &[
    ("asp", "html"),
    ("aspx", "html"),
    ("cgi", "html"),
    ("dll", "html"),
    ("do", "html"),
    ("htm", "html"),
    ("jpeg", "jpg"),
    ("m4a", "mp4"),
    ("m4b", "mp4"),
    ("m4p", "mp4"),
    ("m4r", "mp4"),
    ("m4v", "mp4"),
    ("res", "reset"),
    ("stat", "stats"),
    ("tif", "tiff"),
    ("ver", "version"),
    ("vers", "version"),
    ("xht", "xhtml"),
];

/// Archives, executables and large media: answered with 404.
pub static BLOCKED: &[&str] = &[
    "7z", "avi", "bin", "bz2", "doc", "docx", "exe", "gz", "iso", "java", "lz", "lzma", "mov",
    "mp3", "mp4", "pdf", "ppt", "pptx", "rar", "sh", "swf", "tar", "tb2", "tbz", "tbz2", "tgz",
    "txz", "webm", "webp", "xls", "xlsx", "xz", "zip",
];
