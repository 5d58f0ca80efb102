//! File part helpers fed from `tokio` sources.
//!
//! The message itself is still composed through a blocking [`FormWriter`];
//! only reading the source is asynchronous.

use std::{io::Write, path::Path};

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{
    error::MultipartError,
    helpers::{FilePartWriter, base_name, default_writer, file_name_of},
    writer::FormWriter,
};

const COPY_CHUNK_SIZE: usize = 8 * 1024;

impl FilePartWriter {
    /// Async counterpart of [`FilePartWriter::write_file`].
    pub async fn write_file_async<F, P>(
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
        let file = tokio::fs::File::open(path).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), "file part: opened async source file");

        self.write_file_from_async_reader(writer, field_name, &file_name_of(path), file)
            .await
    }

    /// Async counterpart of [`FilePartWriter::write_file_reader`].
    pub async fn write_file_from_async_reader<F, R>(
        &self,
        writer: &mut F,
        field_name: &str,
        file_name: &str,
        mut reader: R,
    ) -> Result<u64, MultipartError>
    where
        F: FormWriter,
        R: AsyncRead + Unpin,
    {
        let mut part = self.create_part(writer, field_name, base_name(file_name))?;
        let mut chunk = vec![0u8; COPY_CHUNK_SIZE];
        let mut copied = 0u64;

        loop {
            let read = reader.read(&mut chunk).await?;
            if read == 0 {
                break;
            }
            part.write_all(&chunk[..read])?;
            copied += read as u64;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            field_name = field_name,
            size = copied,
            "file part: copied async content"
        );

        Ok(copied)
    }
}

/// Writes the file at `path` as a part using the built-in registry.
pub async fn write_file_async<F, P>(
    writer: &mut F,
    field_name: &str,
    path: P,
) -> Result<u64, MultipartError>
where
    F: FormWriter,
    P: AsRef<Path>,
{
    default_writer()
        .write_file_async(writer, field_name, path)
        .await
}

/// Writes `reader` as a file part using the built-in registry.
pub async fn write_file_from_async_reader<F, R>(
    writer: &mut F,
    field_name: &str,
    file_name: &str,
    reader: R,
) -> Result<u64, MultipartError>
where
    F: FormWriter,
    R: AsyncRead + Unpin,
{
    default_writer()
        .write_file_from_async_reader(writer, field_name, file_name, reader)
        .await
}
