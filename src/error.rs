use thiserror::Error;

use crate::encode::CodeKind;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("no code found in image")]
    DecodeNotFound,

    #[error("cannot encode input as {0}: {1}")]
    Encoding(CodeKind, String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unreadable image: {0}")]
    Image(#[from] image::ImageError),

    #[error("request timed out")]
    Timeout,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Text shown to the user when an event fails with this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            BotError::DecodeNotFound => "❌ Code not found",
            BotError::Encoding(CodeKind::Qr, _) => {
                "⚠️ This text is too long for a QR code, please send something shorter."
            }
            BotError::Encoding(CodeKind::Barcode, _) => {
                "⚠️ This text cannot be encoded. Barcodes accept up to 80 printable ASCII characters."
            }
            BotError::Image(_) => "⚠️ Could not read that picture, try another photo.",
            BotError::Timeout => "⚠️ That took too long, please try again.",
            BotError::Transport(_) | BotError::Configuration(_) | BotError::Io(_) => {
                "⚠️ Something went wrong, please try again."
            }
        }
    }
}
