use image::{DynamicImage, ImageFormat, RgbImage};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use crate::barcode::{generate_barcode_image, DEFAULT_BAR_HEIGHT, DEFAULT_MODULE_WIDTH};
use crate::error::{BotError, Result};
use crate::qr::{generate_qr_image, DEFAULT_PIXEL_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Qr,
    Barcode,
}

impl CodeKind {
    pub fn file_name(self) -> &'static str {
        match self {
            CodeKind::Qr => "qr.png",
            CodeKind::Barcode => "barcode.png",
        }
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeKind::Qr => f.write_str("qr"),
            CodeKind::Barcode => f.write_str("barcode"),
        }
    }
}

impl FromStr for CodeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "qr" => Ok(CodeKind::Qr),
            "barcode" | "code128" => Ok(CodeKind::Barcode),
            other => Err(format!("unknown code kind '{}', expected qr or barcode", other)),
        }
    }
}

pub fn render_image(kind: CodeKind, text: &str) -> Result<RgbImage> {
    match kind {
        CodeKind::Qr => generate_qr_image(text.as_bytes(), DEFAULT_PIXEL_SCALE),
        CodeKind::Barcode => generate_barcode_image(text, DEFAULT_MODULE_WIDTH, DEFAULT_BAR_HEIGHT),
    }
}

/// Renders `text` and returns the PNG bytes ready to attach to a reply.
pub fn render_png(kind: CodeKind, text: &str) -> Result<Vec<u8>> {
    let image = render_image(kind, text)?;

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(png)
}

pub fn render_to_file(kind: CodeKind, text: &str, path: &Path) -> Result<()> {
    let image = render_image(kind, text)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    image.save(path).map_err(BotError::from)
}
