pub mod barcode;
pub mod config;
pub mod decode;
pub mod dispatcher;
pub mod effect;
pub mod encode;
pub mod error;
pub mod menu;
pub mod qr;
pub mod session;
pub mod stats;
pub mod telegram;
pub mod transport;

pub use config::{BotConfig, HubSettings};
pub use decode::{decode_file, decode_image_bytes};
pub use dispatcher::{Event, Hub, Sender};
pub use encode::{render_png, render_to_file, CodeKind};
pub use error::{BotError, Result};
pub use session::{Mode, SessionStore};
pub use stats::{StatsSummary, UsageStats};
pub use telegram::run_bot;
pub use transport::{ChatTransport, MessageRef};
