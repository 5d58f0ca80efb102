//! Composes a small form with a text field and a file, then prints it with
//! a stable boundary.

use std::io::Cursor;

use multipart_helpers::{FormWriter, MultipartError, MultipartWriter, debug, write_file_reader};

fn main() -> Result<(), MultipartError> {
    let mut writer = MultipartWriter::new(Vec::new());
    writer.write_field("comment", "a comment")?;
    write_file_reader(
        &mut writer,
        "file",
        "test.txt",
        Cursor::new("text file content"),
    )?;
    writer.close()?;

    debug::print_request(&writer.form_data_content_type(), writer.get_ref())?;
    Ok(())
}
