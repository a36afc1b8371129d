//! Combine endpoint integration tests.
//!
//! Run with: `cargo test -p fileforge-api --test combine_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{api_path, fixtures, setup_test_app};
use lopdf::Document;

fn pdf_part(text: &str, name: &str) -> Part {
    Part::bytes(fixtures::text_pdf_bytes(text))
        .file_name(name.to_string())
        .mime_type("application/pdf")
}

#[tokio::test]
async fn test_combine_two_pdfs_returns_merged_pdf() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part("files", pdf_part("first document", "first.pdf"))
        .add_part("files", pdf_part("second document", "second.pdf"));
    let response = app.client().post(&api_path("/combine")).multipart(form).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/pdf"
    );
    assert!(response
        .header("content-disposition")
        .to_str()
        .unwrap()
        .contains("combined.pdf"));

    let doc = Document::load_mem(response.as_bytes()).expect("merged output parses");
    assert_eq!(doc.get_pages().len(), 2);
}

#[tokio::test]
async fn test_combine_mixed_image_and_pdf() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part("files", pdf_part("a page", "doc.pdf"))
        .add_part(
            "files",
            Part::bytes(fixtures::png_bytes(30, 20))
                .file_name("photo.png")
                .mime_type("image/png"),
        );
    let response = app.client().post(&api_path("/combine")).multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let doc = Document::load_mem(response.as_bytes()).expect("merged output parses");
    assert_eq!(doc.get_pages().len(), 2);
}

#[tokio::test]
async fn test_combine_large_image_scaled_into_a4_envelope() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "files",
        Part::bytes(fixtures::png_bytes(2000, 1000))
            .file_name("wide.png")
            .mime_type("image/png"),
    );
    let response = app.client().post(&api_path("/combine")).multipart(form).await;
    assert_eq!(response.status_code(), 200);

    let doc = Document::load_mem(response.as_bytes()).expect("merged output parses");
    let (_, page_id) = doc.get_pages().into_iter().next().expect("one page");
    let dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box = dict.get(b"MediaBox").unwrap().as_array().unwrap();
    let as_f32 = |obj: &lopdf::Object| match obj {
        lopdf::Object::Real(v) => *v,
        lopdf::Object::Integer(v) => *v as f32,
        other => panic!("Unexpected MediaBox entry: {other:?}"),
    };
    let width = as_f32(&media_box[2]);
    let height = as_f32(&media_box[3]);

    assert!(width <= 595.5, "width {width} exceeds A4");
    assert!(height <= 842.5, "height {height} exceeds A4");
    assert!((width / height - 2.0).abs() < 0.02, "aspect ratio drifted");
}

#[tokio::test]
async fn test_combine_nothing_usable_is_422() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "files",
        Part::bytes(b"plain text, not a document".to_vec())
            .file_name("notes.txt")
            .mime_type("text/plain"),
    );
    let response = app.client().post(&api_path("/combine")).multipart(form).await;

    assert_eq!(response.status_code(), 422);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NO_VALID_CONTENT");
    assert!(app.scratch_entries().is_empty());
}
