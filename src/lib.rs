#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Helpers for writing files into `multipart/form-data` messages while
//! keeping the content type implied by each file's extension.
//!
//! ```no_run
//! use multipart_helpers::{MultipartWriter, debug, write_file};
//!
//! # fn main() -> Result<(), multipart_helpers::MultipartError> {
//! let mut writer = MultipartWriter::new(Vec::new());
//! writer.write_field("comment", "a comment")?;
//! write_file(&mut writer, "file", "test.txt")?;
//! writer.close()?;
//!
//! let content_type = multipart_helpers::FormWriter::form_data_content_type(&writer);
//! debug::print_request(&content_type, writer.get_ref())?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "tokio-rt")]
pub mod async_io;
/// Fluent builder API.
pub mod builder;
pub mod debug;
/// Error types exposed by this crate.
pub mod error;
pub mod helpers;
pub mod registry;
pub mod writer;

#[cfg(feature = "tokio-rt")]
pub use async_io::{write_file_async, write_file_from_async_reader};
pub use builder::FilePartWriterBuilder;
pub use error::{ConfigError, MultipartError};
pub use helpers::{
    FilePartWriter, content_type, create_file_part, write_file, write_file_reader,
};
pub use registry::{DEFAULT_CONTENT_TYPE, MimeRegistry};
pub use writer::{FormWriter, MultipartWriter, Part};
