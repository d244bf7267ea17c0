//! Request target to canonical extension.

use std::fmt;

use crate::content::payloads::ALIASES;

/// Characters that end the path component (RFC 3986 section 3).
const PATH_DELIMITERS: [char; 3] = ['?', ';', '#'];

/// The request target could not be unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidUrl {
    /// A `%` not followed by two hex digits.
    BadEscape(usize),
    /// The unescaped bytes are not UTF-8.
    NotUtf8,
}

impl fmt::Display for InvalidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidUrl::BadEscape(pos) => write!(f, "invalid escape at byte {}", pos),
            InvalidUrl::NotUtf8 => write!(f, "unescaped target is not UTF-8"),
        }
    }
}

impl std::error::Error for InvalidUrl {}

/// Derives the canonical extension of a request target.
///
/// The target is query-unescaped, cut at the first path delimiter, and the
/// text after the last `.` is lower-cased and run through the alias table.
/// A target without a `.` resolves to the empty extension.
///
/// ```
/// # use nullserv::content::suffix::resolve;
/// assert_eq!(resolve("/ads/banner.JPEG?x=1#frag").unwrap(), "jpg");
/// assert_eq!(resolve("/index").unwrap(), "");
/// ```
pub fn resolve(target: &str) -> Result<String, InvalidUrl> {
    let decoded = unescape(target)?;

    let path = match decoded.find(PATH_DELIMITERS) {
        Some(idx) => &decoded[..idx],
        None => decoded.as_str(),
    };

    let extension = match path.rfind('.') {
        Some(idx) => path[idx + 1..].to_lowercase(),
        None => String::new(),
    };

    Ok(canonical(&extension)
        .map(str::to_string)
        .unwrap_or(extension))
}

/// Canonical spelling for an alternate extension.
pub fn canonical(extension: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == extension)
        .map(|(_, target)| *target)
}

/// Query-style unescaping: `+` is a space and every `%` must start a
/// two digit hex escape.
fn unescape(target: &str) -> Result<String, InvalidUrl> {
    let bytes = target.as_bytes();
    let mut pos = 0;
    while let Some(offset) = bytes[pos..].iter().position(|b| *b == b'%') {
        let at = pos + offset;
        let escape = bytes.get(at + 1..at + 3).ok_or(InvalidUrl::BadEscape(at))?;
        if !escape.iter().all(u8::is_ascii_hexdigit) {
            return Err(InvalidUrl::BadEscape(at));
        }
        pos = at + 3;
    }

    let spaced = target.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| InvalidUrl::NotUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_handles_plus_and_hex() {
        assert_eq!(unescape("/a+b%2Ejs").unwrap(), "/a b.js");
    }

    #[test]
    fn unescape_rejects_truncated_escape() {
        assert_eq!(unescape("/x.gif%2"), Err(InvalidUrl::BadEscape(6)));
        assert_eq!(unescape("/%zz"), Err(InvalidUrl::BadEscape(1)));
    }

    #[test]
    fn unescape_rejects_invalid_utf8() {
        assert_eq!(unescape("/%ff%fe.png"), Err(InvalidUrl::NotUtf8));
    }
}
