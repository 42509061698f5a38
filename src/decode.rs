use image::DynamicImage;
use std::path::Path;

use crate::barcode::decode_linear_from_dynamic_image;
use crate::error::Result;
use crate::qr::decode_qr_from_dynamic_image;

/// QR codes first; a linear barcode is only searched for when no QR code is found.
pub fn decode_dynamic_image(img: &DynamicImage) -> Vec<String> {
    let payloads = decode_qr_from_dynamic_image(img);
    if !payloads.is_empty() {
        return payloads;
    }
    decode_linear_from_dynamic_image(img)
}

/// Decodes a submitted photo. An empty result means the image was readable but
/// held no recognizable code.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<Vec<String>> {
    let img = image::load_from_memory(bytes)?;
    Ok(decode_dynamic_image(&img))
}

pub fn decode_file(path: &Path) -> Result<Vec<String>> {
    let img = image::open(path)?;
    Ok(decode_dynamic_image(&img))
}
