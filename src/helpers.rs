//! File part helpers.
//!
//! A plain form file part is usually tagged `application/octet-stream`. The
//! helpers here tag it with the content type matching its file extension
//! instead, then stream the file content into the part.

use std::{
    borrow::Cow,
    fs::File,
    io::{self, Read},
    path::Path,
    sync::LazyLock,
};

use http::{HeaderMap, HeaderName, HeaderValue, header};

use crate::{
    builder::FilePartWriterBuilder, error::MultipartError, registry::MimeRegistry,
    writer::FormWriter,
};

static DEFAULT_WRITER: LazyLock<FilePartWriter> = LazyLock::new(FilePartWriter::new);

/// Writes files into multipart messages as parts tagged with their content type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePartWriter {
    registry: MimeRegistry,
}

impl FilePartWriter {
    /// Creates a part writer backed by the built-in [`MimeRegistry`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a part writer using `registry` for content type inference.
    pub fn with_registry(registry: MimeRegistry) -> Self {
        Self { registry }
    }

    /// Creates a fluent builder starting from the built-in registry.
    pub fn builder() -> FilePartWriterBuilder {
        FilePartWriterBuilder::default()
    }

    /// Returns the registry used for content type inference.
    pub fn registry(&self) -> &MimeRegistry {
        &self.registry
    }

    /// Infers the content type of `file_name` from its extension.
    pub fn content_type(&self, file_name: &str) -> &str {
        self.registry.content_type_for(file_name)
    }

    /// Builds the `Content-Disposition` and `Content-Type` headers of a file part.
    pub fn part_headers(
        &self,
        field_name: &str,
        file_name: &str,
    ) -> Result<HeaderMap, MultipartError> {
        let disposition = format!(
            "form-data; name=\"{}\"; filename=\"{}\"",
            escape_quotes(field_name),
            escape_quotes(file_name)
        );

        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(
            header::CONTENT_DISPOSITION,
            header_value(&header::CONTENT_DISPOSITION, &disposition)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header_value(&header::CONTENT_TYPE, self.content_type(file_name))?,
        );
        Ok(headers)
    }

    /// Opens a file part on `writer` and returns the sink for its content.
    pub fn create_part<'w, F: FormWriter>(
        &self,
        writer: &'w mut F,
        field_name: &str,
        file_name: &str,
    ) -> Result<F::Part<'w>, MultipartError> {
        let headers = self.part_headers(field_name, file_name)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            field_name = field_name,
            file_name = file_name,
            content_type = self.content_type(file_name),
            "file part: creating part"
        );

        writer.create_part(&headers)
    }

    /// Writes the file at `path` as a part named `field_name`.
    ///
    /// The part's file name is the last component of `path`. A file that
    /// cannot be opened is reported as [`MultipartError::Io`] carrying the
    /// original error, and nothing is written to `writer` in that case.
    pub fn write_file<F, P>(
        &self,
        writer: &mut F,
        field_name: &str,
        path: P,
    ) -> Result<u64, MultipartError>
    where
        F: FormWriter,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), "file part: opened source file");

        self.write_file_reader(writer, field_name, &file_name_of(path), file)
    }

    /// Writes everything `reader` yields as a part named `field_name` and
    /// returns the number of bytes copied.
    ///
    /// A failure while copying leaves a truncated part behind; the writer
    /// should not be reused afterwards.
    pub fn write_file_reader<F, R>(
        &self,
        writer: &mut F,
        field_name: &str,
        file_name: &str,
        mut reader: R,
    ) -> Result<u64, MultipartError>
    where
        F: FormWriter,
        R: Read,
    {
        let mut part = self.create_part(writer, field_name, base_name(file_name))?;
        let copied = io::copy(&mut reader, &mut part)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            field_name = field_name,
            size = copied,
            "file part: copied content"
        );

        Ok(copied)
    }
}

pub(crate) fn default_writer() -> &'static FilePartWriter {
    &DEFAULT_WRITER
}

/// Infers the content type of `file_name` with the built-in registry.
pub fn content_type(file_name: &str) -> &'static str {
    DEFAULT_WRITER.content_type(file_name)
}

/// Opens a file part on `writer` using the built-in registry.
pub fn create_file_part<'w, F: FormWriter>(
    writer: &'w mut F,
    field_name: &str,
    file_name: &str,
) -> Result<F::Part<'w>, MultipartError> {
    DEFAULT_WRITER.create_part(writer, field_name, file_name)
}

/// Writes the file at `path` as a part using the built-in registry.
pub fn write_file<F, P>(writer: &mut F, field_name: &str, path: P) -> Result<u64, MultipartError>
where
    F: FormWriter,
    P: AsRef<Path>,
{
    DEFAULT_WRITER.write_file(writer, field_name, path)
}

/// Writes `reader` as a file part using the built-in registry.
pub fn write_file_reader<F, R>(
    writer: &mut F,
    field_name: &str,
    file_name: &str,
    reader: R,
) -> Result<u64, MultipartError>
where
    F: FormWriter,
    R: Read,
{
    DEFAULT_WRITER.write_file_reader(writer, field_name, file_name, reader)
}

/// Escapes backslashes and double quotes for a quoted header parameter.
pub(crate) fn escape_quotes(value: &str) -> Cow<'_, str> {
    if !value.contains(|c: char| matches!(c, '\\' | '"')) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 4);
    for ch in value.chars() {
        if matches!(ch, '\\' | '"') {
            out.push('\\');
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

pub(crate) fn header_value(name: &HeaderName, value: &str) -> Result<HeaderValue, MultipartError> {
    HeaderValue::from_bytes(value.as_bytes()).map_err(|_| MultipartError::InvalidHeaderValue {
        name: name.as_str().to_owned(),
    })
}

pub(crate) fn base_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name)
}

pub(crate) fn file_name_of(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}
