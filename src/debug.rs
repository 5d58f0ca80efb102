//! Deterministic rendering of composed multipart requests.
//!
//! Boundaries are random per message, so a literal comparison of two
//! requests never matches. The functions here swap every boundary for
//! [`FIXED_BOUNDARY`] and normalize line endings, which keeps the rendering
//! usable as a snapshot while any change in parts, headers or ordering still
//! shows up.

use std::{
    io::{self, Write},
    sync::LazyLock,
};

use regex::{NoExpand, Regex};

/// Boundary token substituted for the real one in rendered output.
pub const FIXED_BOUNDARY: &str = "1879bcd06ac39a4d8fa5";

static CONTENT_TYPE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("boundary=.+").expect("content type boundary pattern is valid"));
static BODY_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?m)^--[0-9a-z]+").expect("body boundary pattern is valid"));

/// Replaces the `boundary=` parameter of `content_type` with [`FIXED_BOUNDARY`].
pub fn normalize_content_type(content_type: &str) -> String {
    let replacement = format!("boundary={FIXED_BOUNDARY}");
    CONTENT_TYPE_BOUNDARY
        .replace_all(content_type, NoExpand(&replacement))
        .into_owned()
}

/// Normalizes a composed body for display.
///
/// CRLF becomes LF, each `\n\n\n` is collapsed to `\n\n`, and every line
/// starting with a boundary delimiter gets [`FIXED_BOUNDARY`] instead. Any
/// text after the delimiter token, such as the closing `--`, is kept.
pub fn normalize_body(body: &[u8]) -> String {
    // The triple newline shows up after empty parts; only that exact run is collapsed.
    let text = String::from_utf8_lossy(body)
        .replace("\r\n", "\n")
        .replace("\n\n\n", "\n\n");

    let replacement = format!("--{FIXED_BOUNDARY}");
    BODY_BOUNDARY
        .replace_all(&text, NoExpand(&replacement))
        .into_owned()
}

/// Renders a request as its content type, content length, a blank line and
/// the normalized body.
///
/// `Content-Length` is the length of `body` as given, not of the
/// normalized text.
pub fn render(content_type: &str, body: &[u8]) -> String {
    format!(
        "Content-Type: {}\nContent-Length: {}\n\n{}\n",
        normalize_content_type(content_type),
        body.len(),
        normalize_body(body)
    )
}

/// Writes [`render`] output to `out`.
pub fn write_request<W: Write>(mut out: W, content_type: &str, body: &[u8]) -> io::Result<()> {
    out.write_all(render(content_type, body).as_bytes())?;
    out.flush()
}

/// Prints [`render`] output to standard output.
pub fn print_request(content_type: &str, body: &[u8]) -> io::Result<()> {
    write_request(io::stdout().lock(), content_type, body)
}
