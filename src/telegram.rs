use async_trait::async_trait;
use std::sync::Arc;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardButtonKind, InlineKeyboardMarkup, InputFile,
    MessageId, PhotoSize, ReplyMarkup, User,
};
use teloxide::utils::command::BotCommands;
use tracing::{error, info};

use crate::config::BotConfig;
use crate::dispatcher::{Event, Hub, Sender};
use crate::error::{BotError, Result};
use crate::menu::Keyboard;
use crate::transport::{ChatTransport, MessageRef};

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "open the main menu")]
    Start,
    #[command(description = "show what the bot can do")]
    Help,
}

pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn transport_error(e: impl std::fmt::Display) -> BotError {
    BotError::Transport(e.to_string())
}

fn to_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = keyboard
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|btn| {
                    InlineKeyboardButton::new(
                        btn.label.clone(),
                        InlineKeyboardButtonKind::CallbackData(btn.action.as_str().to_string()),
                    )
                })
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(rows)
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(&self, chat: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<MessageRef> {
        let mut req = self.bot.send_message(ChatId(chat), text);
        if let Some(keyboard) = keyboard {
            req.reply_markup = Some(ReplyMarkup::InlineKeyboard(to_markup(keyboard)));
        }

        let sent = req.await.map_err(transport_error)?;
        Ok(MessageRef {
            chat,
            id: sent.id.0,
        })
    }

    async fn edit_text(&self, message: MessageRef, text: &str, keyboard: Option<&Keyboard>) -> Result<()> {
        let mut req = self
            .bot
            .edit_message_text(ChatId(message.chat), MessageId(message.id), text);
        if let Some(keyboard) = keyboard {
            req.reply_markup = Some(to_markup(keyboard));
        }

        req.await.map_err(transport_error)?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: i64,
        png: Vec<u8>,
        file_name: &str,
        caption: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<()> {
        let photo = InputFile::memory(png).file_name(file_name.to_string());
        let mut req = self.bot.send_photo(ChatId(chat), photo);
        req.caption = Some(caption.to_string());
        if let Some(keyboard) = keyboard {
            req.reply_markup = Some(ReplyMarkup::InlineKeyboard(to_markup(keyboard)));
        }

        req.await.map_err(transport_error)?;
        Ok(())
    }

    async fn fetch_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(file_id.to_string())
            .await
            .map_err(transport_error)?;

        let mut buf = Vec::new();
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(transport_error)?;

        Ok(buf)
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(callback_id.to_string())
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}

type TelegramHub = Arc<Hub<TelegramTransport>>;

fn sender_of(user: Option<&User>, chat: ChatId) -> Sender {
    match user {
        Some(user) => Sender {
            id: user.id.0,
            username: user.username.clone(),
        },
        // Channel posts carry no author; the chat stands in for the user.
        None => Sender {
            id: chat.0.unsigned_abs(),
            username: None,
        },
    }
}

async fn on_command(msg: Message, cmd: Command, hub: TelegramHub) -> ResponseResult<()> {
    let event = match cmd {
        Command::Start => Event::Start { chat: msg.chat.id.0 },
        Command::Help => Event::Help { chat: msg.chat.id.0 },
    };
    hub.handle(event).await;
    Ok(())
}

async fn on_text(msg: Message, hub: TelegramHub) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        hub.handle(Event::Text {
            chat: msg.chat.id.0,
            sender: sender_of(msg.from.as_ref(), msg.chat.id),
            text: text.to_string(),
        })
        .await;
    }
    Ok(())
}

// Telegram lists sizes smallest first
fn largest_photo_id(sizes: &[PhotoSize]) -> Option<String> {
    sizes.last().map(|largest| largest.file.id.clone())
}

async fn on_photo(msg: Message, hub: TelegramHub) -> ResponseResult<()> {
    if let Some(file_id) = msg.photo().and_then(largest_photo_id) {
        hub.handle(Event::Photo {
            chat: msg.chat.id.0,
            sender: sender_of(msg.from.as_ref(), msg.chat.id),
            file_id,
        })
        .await;
    }
    Ok(())
}

async fn on_callback(q: CallbackQuery, hub: TelegramHub) -> ResponseResult<()> {
    let message = q.message.as_ref().map(|m| MessageRef {
        chat: m.chat().id.0,
        id: m.id().0,
    });
    let chat = message.map(|m| m.chat).unwrap_or(q.from.id.0 as i64);

    hub.handle(Event::Button {
        chat,
        sender: sender_of(Some(&q.from), ChatId(chat)),
        callback_id: q.id.clone(),
        message,
        data: q.data.clone().unwrap_or_default(),
    })
    .await;
    Ok(())
}

fn is_plain_text(msg: Message) -> bool {
    msg.text().is_some_and(|t| !t.starts_with('/'))
}

fn has_photo(msg: Message) -> bool {
    msg.photo().is_some()
}

/// Connects to Telegram and serves updates until Ctrl+C.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    let bot = Bot::new(config.token);

    let me = bot.get_me().await.map_err(transport_error)?;
    info!("logged in as @{}", me.username());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        error!("failed to register command list: {}", e);
    }

    let hub: TelegramHub = Arc::new(Hub::new(TelegramTransport::new(bot.clone()), config.settings));

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .branch(dptree::entry().filter_command::<Command>().endpoint(on_command))
                .branch(dptree::filter(has_photo).endpoint(on_photo))
                .branch(dptree::filter(is_plain_text).endpoint(on_text)),
        )
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![hub])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("dispatcher stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::Action;

    #[test]
    fn test_markup_carries_wire_ids() {
        let markup = to_markup(&Keyboard::main());
        let ids: Vec<String> = markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect();

        let expected: Vec<String> = [Action::Create, Action::Scan, Action::Stats, Action::Help]
            .iter()
            .map(|a| a.as_str().to_string())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_largest_photo_id_picks_last_size() {
        let sizes: Vec<PhotoSize> = serde_json::from_str(
            r#"[
                {"file_id": "small", "file_unique_id": "u1", "file_size": 1200, "width": 90, "height": 90},
                {"file_id": "large", "file_unique_id": "u2", "file_size": 48000, "width": 800, "height": 800}
            ]"#,
        )
        .unwrap();

        assert_eq!(largest_photo_id(&sizes), Some("large".to_string()));
        assert_eq!(largest_photo_id(&[]), None);
    }

    #[test]
    fn test_command_parsing() {
        assert!(matches!(Command::parse("/start", "qrhub_bot"), Ok(Command::Start)));
        assert!(matches!(Command::parse("/help", "qrhub_bot"), Ok(Command::Help)));
        assert!(Command::parse("/scan", "qrhub_bot").is_err());
    }
}
