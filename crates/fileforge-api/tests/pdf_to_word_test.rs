//! PdfToWord endpoint integration tests.
//!
//! Run with: `cargo test -p fileforge-api --test pdf_to_word_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{api_path, fixtures, setup_test_app};
use std::io::Read;

#[tokio::test]
async fn test_text_pdf_returns_docx() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "files",
        Part::bytes(fixtures::text_pdf_bytes("FindableMarkerText"))
            .file_name("report.pdf")
            .mime_type("application/pdf"),
    );
    let response = app
        .client()
        .post(&api_path("/pdf-to-word"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert!(response
        .header("content-disposition")
        .to_str()
        .unwrap()
        .contains("report.docx"));

    // OOXML is a ZIP container; the extracted text must appear in the body
    let body = response.as_bytes().to_vec();
    assert_eq!(&body[..2], b"PK");
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(body)).unwrap();
    let mut document = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut document)
        .unwrap();
    assert!(document.contains("FindableMarkerText"));
}

#[tokio::test]
async fn test_pdf_without_text_is_422() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "files",
        Part::bytes(fixtures::blank_pdf_bytes())
            .file_name("scan.pdf")
            .mime_type("application/pdf"),
    );
    let response = app
        .client()
        .post(&api_path("/pdf-to-word"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 422);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "ALL_ITEMS_FAILED");
}

#[tokio::test]
async fn test_batch_without_pdfs_rejected() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "files",
        Part::bytes(fixtures::png_bytes(10, 10))
            .file_name("photo.png")
            .mime_type("image/png"),
    );
    let response = app
        .client()
        .post(&api_path("/pdf-to-word"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NO_MATCHING_FILES");
}

#[tokio::test]
async fn test_mixed_batch_filters_non_pdfs() {
    let app = setup_test_app().await;

    // The PNG is silently filtered; one accepted PDF means a bare response
    let form = MultipartForm::new()
        .add_part(
            "files",
            Part::bytes(fixtures::text_pdf_bytes("only the pdf counts"))
                .file_name("keep.pdf")
                .mime_type("application/pdf"),
        )
        .add_part(
            "files",
            Part::bytes(fixtures::png_bytes(10, 10))
                .file_name("skip.png")
                .mime_type("image/png"),
        );
    let response = app
        .client()
        .post(&api_path("/pdf-to-word"))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response
        .header("content-disposition")
        .to_str()
        .unwrap()
        .contains("keep.docx"));
}
