use crate::{error::ConfigError, helpers::FilePartWriter, registry::MimeRegistry};

/// Builder for configuring a [`FilePartWriter`].
///
/// Mappings are validated when the builder is finalized, so setters can be
/// chained freely.
#[derive(Debug, Clone, Default)]
pub struct FilePartWriterBuilder {
    registry: MimeRegistry,
    mappings: Vec<(String, String)>,
    fallback: Option<String>,
}

impl FilePartWriterBuilder {
    /// Creates a builder starting from the built-in registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the base registry extra mappings are applied on top of.
    pub fn registry(mut self, registry: MimeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Maps `extension` to `content_type`, overriding any existing mapping.
    pub fn mime_type(mut self, extension: impl Into<String>, content_type: impl Into<String>) -> Self {
        self.mappings.push((extension.into(), content_type.into()));
        self
    }

    /// Adds several extension mappings at once.
    pub fn mime_types<I, E, C>(mut self, mappings: I) -> Self
    where
        I: IntoIterator<Item = (E, C)>,
        E: Into<String>,
        C: Into<String>,
    {
        self.mappings.extend(
            mappings
                .into_iter()
                .map(|(extension, content_type)| (extension.into(), content_type.into())),
        );
        self
    }

    /// Sets the content type used for unknown extensions.
    pub fn fallback(mut self, content_type: impl Into<String>) -> Self {
        self.fallback = Some(content_type.into());
        self
    }

    /// Validates builder configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clone().build_registry().map(|_| ())
    }

    /// Finalizes and returns the validated registry.
    pub fn build_registry(self) -> Result<MimeRegistry, ConfigError> {
        let mut registry = self.registry;
        for (extension, content_type) in &self.mappings {
            registry.insert(extension, content_type)?;
        }
        if let Some(fallback) = &self.fallback {
            registry.set_fallback(fallback)?;
        }
        Ok(registry)
    }

    /// Finalizes and returns a part writer using the configured registry.
    pub fn build(self) -> Result<FilePartWriter, ConfigError> {
        self.build_registry().map(FilePartWriter::with_registry)
    }
}
