//! Multipart message framing.
//!
//! [`FormWriter`] is the seam the file part helpers drive. [`MultipartWriter`]
//! is the built-in implementation: it frames parts with a boundary and writes
//! them to any [`std::io::Write`], but leaves part bodies untouched.

use std::io::{self, Write};

use http::{HeaderMap, header};
use uuid::Uuid;

use crate::{
    error::{ConfigError, MultipartError},
    helpers::{escape_quotes, header_value},
};

const MAX_BOUNDARY_LEN: usize = 70;
const TSPECIALS: &str = "()<>@,;:\\\"/[]?= ";

/// A writer able to open tagged sections of a multipart message.
pub trait FormWriter {
    /// Sink receiving the body of a part opened by [`FormWriter::create_part`].
    type Part<'a>: Write
    where
        Self: 'a;

    /// Opens a new part carrying `headers` and returns a sink for its body.
    fn create_part(&mut self, headers: &HeaderMap) -> Result<Self::Part<'_>, MultipartError>;

    /// Returns the `Content-Type` of the composed message, boundary included.
    fn form_data_content_type(&self) -> String;
}

/// Writes `multipart/form-data` framing around caller-supplied parts.
#[derive(Debug)]
pub struct MultipartWriter<W> {
    inner: W,
    boundary: String,
    has_parts: bool,
    closed: bool,
}

impl<W: Write> MultipartWriter<W> {
    /// Creates a writer with a random 32 character boundary.
    pub fn new(inner: W) -> Self {
        Self::from_parts(inner, Uuid::new_v4().simple().to_string())
    }

    /// Creates a writer using an explicit, validated boundary.
    pub fn with_boundary(inner: W, boundary: impl Into<String>) -> Result<Self, ConfigError> {
        let boundary = boundary.into();
        validate_boundary(&boundary)?;
        Ok(Self::from_parts(inner, boundary))
    }

    fn from_parts(inner: W, boundary: String) -> Self {
        Self {
            inner,
            boundary,
            has_parts: false,
            closed: false,
        }
    }

    /// Returns the boundary separating parts of this message.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Returns `true` once [`MultipartWriter::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Writes a plain text form field.
    pub fn write_field(&mut self, name: &str, value: &str) -> Result<(), MultipartError> {
        let mut headers = HeaderMap::with_capacity(1);
        let disposition = format!("form-data; name=\"{}\"", escape_quotes(name));
        headers.insert(
            header::CONTENT_DISPOSITION,
            header_value(&header::CONTENT_DISPOSITION, &disposition)?,
        );

        let mut part = self.create_part(&headers)?;
        part.write_all(value.as_bytes())?;
        Ok(())
    }

    /// Finishes the message by writing the closing boundary.
    ///
    /// No part can be created afterwards.
    pub fn close(&mut self) -> Result<(), MultipartError> {
        if self.closed {
            return Err(MultipartError::WriterClosed);
        }
        self.closed = true;

        if self.has_parts {
            write!(self.inner, "\r\n--{}--\r\n", self.boundary)?;
        } else {
            write!(self.inner, "--{}--\r\n", self.boundary)?;
        }
        self.inner.flush()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            boundary = self.boundary.as_str(),
            has_parts = self.has_parts,
            "multipart writer: closed message"
        );

        Ok(())
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Consumes the multipart writer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> FormWriter for MultipartWriter<W> {
    type Part<'a>
        = Part<'a, W>
    where
        Self: 'a;

    fn create_part(&mut self, headers: &HeaderMap) -> Result<Part<'_, W>, MultipartError> {
        if self.closed {
            return Err(MultipartError::WriterClosed);
        }

        let mut head = Vec::with_capacity(self.boundary.len() + 128);
        if self.has_parts {
            head.extend_from_slice(b"\r\n");
        }
        head.extend_from_slice(b"--");
        head.extend_from_slice(self.boundary.as_bytes());
        head.extend_from_slice(b"\r\n");

        let mut names = headers
            .keys()
            .map(|name| (canonical_header_name(name.as_str()), name))
            .collect::<Vec<_>>();
        names.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (canonical, name) in names {
            for value in headers.get_all(name) {
                head.extend_from_slice(canonical.as_bytes());
                head.extend_from_slice(b": ");
                head.extend_from_slice(value.as_bytes());
                head.extend_from_slice(b"\r\n");
            }
        }
        head.extend_from_slice(b"\r\n");

        self.inner.write_all(&head)?;
        self.has_parts = true;

        Ok(Part {
            inner: &mut self.inner,
        })
    }

    fn form_data_content_type(&self) -> String {
        if self.boundary.contains(|c: char| TSPECIALS.contains(c)) {
            format!("multipart/form-data; boundary=\"{}\"", self.boundary)
        } else {
            format!("multipart/form-data; boundary={}", self.boundary)
        }
    }
}

/// Body sink of a part opened on a [`MultipartWriter`].
#[derive(Debug)]
pub struct Part<'a, W> {
    inner: &'a mut W,
}

impl<W: Write> Write for Part<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;

    for ch in name.chars() {
        if upper {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch.to_ascii_lowercase());
        }
        upper = ch == '-';
    }

    out
}

fn validate_boundary(boundary: &str) -> Result<(), ConfigError> {
    if boundary.is_empty() {
        return Err(ConfigError::InvalidBoundary {
            reason: "boundary cannot be empty",
        });
    }

    if boundary.len() > MAX_BOUNDARY_LEN {
        return Err(ConfigError::InvalidBoundary {
            reason: "boundary cannot exceed 70 characters",
        });
    }

    if boundary.ends_with(' ') {
        return Err(ConfigError::InvalidBoundary {
            reason: "boundary cannot end with whitespace",
        });
    }

    if !boundary.chars().all(is_boundary_char) {
        return Err(ConfigError::InvalidBoundary {
            reason: "boundary contains invalid characters",
        });
    }

    Ok(())
}

fn is_boundary_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '\'' | '(' | ')' | '+' | '_' | ',' | '-' | '.' | '/' | ':' | '=' | '?' | ' '
        )
}
