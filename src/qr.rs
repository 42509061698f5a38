use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use qrcode::{EcLevel, QrCode};
use rqrr::PreparedImage;

use crate::encode::CodeKind;
use crate::error::{BotError, Result};

pub const DEFAULT_PIXEL_SCALE: u32 = 8;

pub fn generate_qr_image(data: &[u8], pixel_scale: u32) -> Result<RgbImage> {
    let code = QrCode::with_error_correction_level(data, EcLevel::M)
        .map_err(|e| BotError::Encoding(CodeKind::Qr, e.to_string()))?;

    let image = code
        .render::<Rgb<u8>>()
        .quiet_zone(true)
        .module_dimensions(pixel_scale, pixel_scale)
        .build();

    Ok(image)
}

/// Every QR payload found in the image, in detection order.
pub fn decode_qr_from_dynamic_image(img: &DynamicImage) -> Vec<String> {
    decode_qr_from_gray(img.to_luma8())
}

pub fn decode_qr_from_gray(gray: GrayImage) -> Vec<String> {
    let mut prepared = PreparedImage::prepare(gray);
    let grids = prepared.detect_grids();

    let mut payloads = Vec::with_capacity(grids.len());
    for grid in &grids {
        match grid.decode() {
            Ok((_, content)) => payloads.push(content),
            // A detected grid that fails error correction is treated as absent
            Err(e) => tracing::debug!("skipping undecodable QR grid: {:?}", e),
        }
    }
    payloads
}
