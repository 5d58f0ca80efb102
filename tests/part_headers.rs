#![allow(missing_docs)]

use http::header;
use multipart_helpers::{FilePartWriter, MultipartError, content_type};

#[test]
fn infers_registered_types_from_extension() {
    assert_eq!(content_type("test.txt"), "text/plain; charset=utf-8");
    assert_eq!(content_type("index.html"), "text/html; charset=utf-8");
    assert_eq!(content_type("photo.jpg"), "image/jpeg");
    assert_eq!(content_type("module.wasm"), "application/wasm");
}

#[test]
fn extension_lookup_is_case_insensitive() {
    assert_eq!(content_type("PHOTO.PNG"), "image/png");
    assert_eq!(content_type("Data.Json"), "application/json");
}

#[test]
fn only_final_extension_segment_is_used() {
    assert_eq!(content_type("report.txt.pdf"), "application/pdf");
    assert_eq!(content_type("archive.tar.gz"), "application/octet-stream");
    assert_eq!(content_type("my.dir/README"), "application/octet-stream");
}

#[test]
fn missing_or_unknown_extension_falls_back() {
    for name in ["test.bin", "README", "trailing.", "", "noext/"] {
        assert_eq!(content_type(name), "application/octet-stream", "name `{name}`");
    }
}

#[test]
fn part_headers_carry_disposition_and_type() {
    let headers = FilePartWriter::new()
        .part_headers("file", "test.bin")
        .expect("headers should build");

    assert_eq!(headers.len(), 2);
    assert_eq!(
        headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok()),
        Some("form-data; name=\"file\"; filename=\"test.bin\"")
    );
    assert_eq!(
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/octet-stream")
    );
}

#[test]
fn quotes_and_backslashes_round_trip_through_disposition() {
    let cases = [
        ("plain", "plain.txt"),
        ("fi\"eld", "te\\st.txt"),
        ("\\\"", "\"quoted\".txt"),
        ("trailing\\", "a\\\\b\"\"c"),
        ("semi;colon", "x; filename=\"evil.exe\""),
    ];

    for (field_name, file_name) in cases {
        let headers = FilePartWriter::new()
            .part_headers(field_name, file_name)
            .expect("headers should build");
        let disposition = headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .expect("disposition should be ASCII");

        let params = parse_disposition_params(disposition);
        assert_eq!(
            params,
            vec![
                ("name".to_owned(), field_name.to_owned()),
                ("filename".to_owned(), file_name.to_owned()),
            ],
            "disposition `{disposition}`"
        );
    }
}

#[test]
fn non_ascii_file_names_are_kept() {
    let headers = FilePartWriter::new()
        .part_headers("file", "naïve 你好.txt")
        .expect("headers should build");
    let disposition = headers
        .get(header::CONTENT_DISPOSITION)
        .expect("disposition present");

    assert_eq!(
        disposition.as_bytes(),
        "form-data; name=\"file\"; filename=\"naïve 你好.txt\"".as_bytes()
    );
}

#[test]
fn line_breaks_in_names_are_rejected() {
    let err = FilePartWriter::new()
        .part_headers("file", "evil.txt\r\nX-Injected: 1")
        .expect_err("must fail");

    assert!(matches!(
        err,
        MultipartError::InvalidHeaderValue { ref name } if name == "content-disposition"
    ));
}

/// Splits `form-data; k="v"; ...` into unescaped parameter pairs.
fn parse_disposition_params(value: &str) -> Vec<(String, String)> {
    let rest = value
        .strip_prefix("form-data")
        .expect("disposition type should be form-data");
    let mut chars = rest.chars().peekable();
    let mut params = Vec::new();

    loop {
        while matches!(chars.peek(), Some(';') | Some(' ')) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let key: String = chars.by_ref().take_while(|&c| c != '=').collect();
        assert_eq!(chars.next(), Some('"'), "parameter value should be quoted");

        let mut value = String::new();
        loop {
            match chars.next().expect("quoted value should be terminated") {
                '\\' => value.push(chars.next().expect("escape should be followed by a char")),
                '"' => break,
                c => value.push(c),
            }
        }
        params.push((key, value));
    }

    params
}
