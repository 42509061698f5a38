use barcoders::sym::code128::Code128;
use image::{DynamicImage, Rgb, RgbImage};

use crate::encode::CodeKind;
use crate::error::{BotError, Result};

pub const DEFAULT_MODULE_WIDTH: u32 = 3;
pub const DEFAULT_BAR_HEIGHT: u32 = 160;
/// Longer text makes the image too wide for chat clients to accept as a photo.
pub const MAX_BARCODE_LEN: usize = 80;

// Code128 needs a leading character-set selector; set B covers printable ASCII.
const CHARSET_B: char = 'Ɓ';
const QUIET_ZONE_MODULES: u32 = 10;

/// Checks the text against Code128 set B before handing it to the encoder,
/// so the user gets told which character was rejected.
fn validate_code128(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(BotError::Encoding(CodeKind::Barcode, "barcode text is empty".to_string()));
    }
    if let Some(bad) = text.chars().find(|c| !(' '..='~').contains(c)) {
        return Err(BotError::Encoding(
            CodeKind::Barcode,
            format!("character {:?} is not allowed in Code128", bad),
        ));
    }
    if text.len() > MAX_BARCODE_LEN {
        return Err(BotError::Encoding(
            CodeKind::Barcode,
            format!("{} characters, at most {} fit", text.len(), MAX_BARCODE_LEN),
        ));
    }
    Ok(())
}

/// Encodes `text` as Code128 and returns the bar pattern, one entry per module (1 = bar).
pub fn encode_code128(text: &str) -> Result<Vec<u8>> {
    validate_code128(text)?;

    let barcode = Code128::new(format!("{}{}", CHARSET_B, text))
        .map_err(|e| BotError::Encoding(CodeKind::Barcode, format!("{:?}", e)))?;

    Ok(barcode.encode())
}

pub fn generate_barcode_image(text: &str, module_width: u32, bar_height: u32) -> Result<RgbImage> {
    let modules = encode_code128(text)?;

    let quiet = QUIET_ZONE_MODULES * module_width;
    let width = modules.len() as u32 * module_width + 2 * quiet;
    let height = bar_height + 2 * quiet;

    let mut image = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    for (i, &module) in modules.iter().enumerate() {
        if module == 0 {
            continue;
        }
        let x0 = quiet + i as u32 * module_width;
        for x in x0..x0 + module_width {
            for y in quiet..quiet + bar_height {
                image.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }

    Ok(image)
}

/// Looks for a linear (1D) barcode in the image. QR codes are left to `rqrr`.
pub fn decode_linear_from_dynamic_image(img: &DynamicImage) -> Vec<String> {
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();

    match rxing::helpers::detect_in_luma(luma.into_raw(), width, height, None) {
        Ok(result) => vec![result.getText().to_string()],
        Err(e) => {
            tracing::debug!("no linear barcode found: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_barcode_renders() {
        let image = generate_barcode_image("12345", DEFAULT_MODULE_WIDTH, DEFAULT_BAR_HEIGHT).unwrap();
        assert!(image.width() > image.height());
        assert_eq!(image.height(), DEFAULT_BAR_HEIGHT + 2 * QUIET_ZONE_MODULES * DEFAULT_MODULE_WIDTH);
    }

    #[test]
    fn test_pattern_is_binary_modules() {
        let modules = encode_code128("ABC-123").unwrap();
        // start, seven symbols, checksum and stop
        assert!(modules.len() >= 11 * 9 + 13);
        assert!(modules.iter().all(|&m| m <= 1));
        assert!(modules.contains(&1));
    }

    #[test]
    fn test_non_ascii_is_rejected() {
        let err = encode_code128("штрихкод").unwrap_err();
        match err {
            BotError::Encoding(CodeKind::Barcode, msg) => assert!(msg.contains("'ш'")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(matches!(encode_code128(""), Err(BotError::Encoding(CodeKind::Barcode, _))));
    }

    #[test]
    fn test_length_cap_keeps_photo_proportions() {
        let longest = "7".repeat(MAX_BARCODE_LEN);
        let image = generate_barcode_image(&longest, DEFAULT_MODULE_WIDTH, DEFAULT_BAR_HEIGHT).unwrap();
        assert!(image.width() < 20 * image.height());

        let too_long = "7".repeat(MAX_BARCODE_LEN + 1);
        let err = encode_code128(&too_long).unwrap_err();
        assert!(matches!(err, BotError::Encoding(CodeKind::Barcode, _)));
    }

    #[test]
    fn test_rendered_barcode_decodes_back() {
        let image = generate_barcode_image("12345", DEFAULT_MODULE_WIDTH, DEFAULT_BAR_HEIGHT).unwrap();
        let decoded = decode_linear_from_dynamic_image(&DynamicImage::ImageRgb8(image));
        assert_eq!(decoded, vec!["12345".to_string()]);
    }

    #[test]
    fn test_blank_image_has_no_barcode() {
        let blank = RgbImage::from_pixel(300, 120, Rgb([255, 255, 255]));
        assert!(decode_linear_from_dynamic_image(&DynamicImage::ImageRgb8(blank)).is_empty());
    }

    #[test]
    fn test_quiet_zone_is_white() {
        let image = generate_barcode_image("42", 2, 50).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(image.width() - 1, image.height() / 2), &Rgb([255, 255, 255]));
    }
}
