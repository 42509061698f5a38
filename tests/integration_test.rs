use std::fs;
use tempfile::TempDir;

use qrhub::{decode_file, render_to_file, BotConfig, BotError, CodeKind};

#[test]
fn test_qr_file_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("nested").join("qr.png");

    let original = "https://example.com/path?with=query&and=more";
    render_to_file(CodeKind::Qr, original, &output).expect("Encoding failed");

    assert!(output.exists());
    let decoded = decode_file(&output).expect("Decoding failed");
    assert_eq!(decoded, vec![original.to_string()]);
}

#[test]
fn test_barcode_file_is_landscape_png() {
    use image::GenericImageView;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("barcode.png");

    render_to_file(CodeKind::Barcode, "12345", &output).expect("Encoding failed");

    let img = image::open(&output).expect("Failed to open generated barcode");
    let (width, height) = img.dimensions();
    assert!(width > height, "barcode should be wider than tall, got {}x{}", width, height);
}

#[test]
fn test_barcode_rejects_non_ascii_without_writing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("bad.png");

    let err = render_to_file(CodeKind::Barcode, "цифры", &output).unwrap_err();
    assert!(matches!(err, BotError::Encoding(CodeKind::Barcode, _)));
    assert!(!output.exists());
}

#[test]
fn test_decode_image_without_code() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("blank.png");

    image::RgbImage::from_pixel(320, 240, image::Rgb([250, 250, 250]))
        .save(&path)
        .expect("Failed to write blank image");

    let decoded = decode_file(&path).expect("Blank image should still load");
    assert!(decoded.is_empty());
}

#[test]
fn test_decode_non_image_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("notes.png");
    fs::write(&path, "this is not a png").expect("Failed to write file");

    assert!(matches!(decode_file(&path), Err(BotError::Image(_))));
}

#[test]
fn test_missing_token_is_configuration_error() {
    match BotConfig::new(None, 250, 60) {
        Err(BotError::Configuration(msg)) => assert!(msg.contains("TELEGRAM_TOKEN")),
        other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
    }
}
