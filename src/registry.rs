//! Extension to content type mapping used to tag file parts.

use std::collections::HashMap;

use crate::error::ConfigError;

/// Content type used when a file name has no known extension.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("avif", "image/avif"),
    ("css", "text/css; charset=utf-8"),
    ("gif", "image/gif"),
    ("htm", "text/html; charset=utf-8"),
    ("html", "text/html; charset=utf-8"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "text/javascript; charset=utf-8"),
    ("json", "application/json"),
    ("mjs", "text/javascript; charset=utf-8"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("txt", "text/plain; charset=utf-8"),
    ("wasm", "application/wasm"),
    ("webp", "image/webp"),
    ("xml", "text/xml; charset=utf-8"),
];

/// Read-only lookup table from lowercase file extensions to content types.
///
/// Keys are stored without the leading dot. Lookups that miss resolve to the
/// registry's fallback, which defaults to [`DEFAULT_CONTENT_TYPE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeRegistry {
    types: HashMap<String, String>,
    fallback: String,
}

impl MimeRegistry {
    /// Creates a registry holding the built-in table of common web types.
    pub fn new() -> Self {
        let types = BUILTIN_TYPES
            .iter()
            .map(|(ext, content_type)| ((*ext).to_owned(), (*content_type).to_owned()))
            .collect();

        Self {
            types,
            fallback: DEFAULT_CONTENT_TYPE.to_owned(),
        }
    }

    /// Creates a registry without any mappings.
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
            fallback: DEFAULT_CONTENT_TYPE.to_owned(),
        }
    }

    /// Registers `content_type` for `extension`, returning the replaced mapping.
    ///
    /// The extension may be given with or without its leading dot and is
    /// matched case-insensitively.
    pub fn insert(
        &mut self,
        extension: &str,
        content_type: &str,
    ) -> Result<Option<String>, ConfigError> {
        let key = normalize_extension(extension)?;
        let value = validate_content_type(content_type)?;
        Ok(self.types.insert(key, value))
    }

    /// Replaces the content type returned for unknown extensions.
    pub fn set_fallback(&mut self, content_type: &str) -> Result<(), ConfigError> {
        self.fallback = validate_content_type(content_type)?;
        Ok(())
    }

    /// Returns the content type used for unknown extensions.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Looks up the content type registered for `extension`.
    pub fn lookup(&self, extension: &str) -> Option<&str> {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        if extension.is_empty() {
            return None;
        }

        self.types
            .get(&extension.to_lowercase())
            .map(String::as_str)
    }

    /// Infers the content type of `file_name` from its final extension.
    ///
    /// Never fails: names without an extension, or with an unknown one,
    /// resolve to [`MimeRegistry::fallback`].
    pub fn content_type_for(&self, file_name: &str) -> &str {
        extension(file_name)
            .and_then(|ext| self.lookup(ext))
            .unwrap_or(self.fallback.as_str())
    }

    /// Returns the number of registered extensions.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` when no extension is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for MimeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the text after the last `.` in the final path element of `file_name`.
pub fn extension(file_name: &str) -> Option<&str> {
    let base = file_name
        .rsplit(std::path::is_separator)
        .next()
        .unwrap_or(file_name);

    base.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

fn normalize_extension(extension: &str) -> Result<String, ConfigError> {
    let trimmed = extension.strip_prefix('.').unwrap_or(extension);
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyExtension);
    }

    let invalid = trimmed
        .chars()
        .any(|c| matches!(c, '.' | '/' | '\\') || c.is_whitespace());
    if invalid {
        return Err(ConfigError::InvalidExtension {
            extension: extension.to_owned(),
        });
    }

    Ok(trimmed.to_lowercase())
}

fn validate_content_type(content_type: &str) -> Result<String, ConfigError> {
    let trimmed = content_type.trim();
    trimmed
        .parse::<mime::Mime>()
        .map(|_| trimmed.to_owned())
        .map_err(|_| ConfigError::InvalidMimeType {
            value: content_type.to_owned(),
        })
}
