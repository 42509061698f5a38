use async_trait::async_trait;

use crate::error::Result;
use crate::menu::Keyboard;

pub type ChatId = i64;

/// A message the bot has sent and may edit later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat: ChatId,
    pub id: i32,
}

/// The calls the dispatcher makes on the chat service. Any failure is reported as
/// `BotError::Transport`.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(&self, chat: ChatId, text: &str, keyboard: Option<&Keyboard>) -> Result<MessageRef>;

    async fn edit_text(&self, message: MessageRef, text: &str, keyboard: Option<&Keyboard>) -> Result<()>;

    async fn send_photo(
        &self,
        chat: ChatId,
        png: Vec<u8>,
        file_name: &str,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<()>;

    async fn fetch_file(&self, file_id: &str) -> Result<Vec<u8>>;

    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}
