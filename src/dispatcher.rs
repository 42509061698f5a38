use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::HubSettings;
use crate::decode::decode_image_bytes;
use crate::effect::play_creation_effect;
use crate::encode::{render_png, CodeKind};
use crate::error::{BotError, Result};
use crate::menu::{self, Action, Keyboard};
use crate::session::{Mode, SessionStore, UserId};
use crate::stats::{display_name, StatsSummary, UsageStats};
use crate::transport::{ChatId, ChatTransport, MessageRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub username: Option<String>,
}

/// One inbound user interaction, already stripped of transport types.
#[derive(Debug, Clone)]
pub enum Event {
    Start {
        chat: ChatId,
    },
    Help {
        chat: ChatId,
    },
    Text {
        chat: ChatId,
        sender: Sender,
        text: String,
    },
    Photo {
        chat: ChatId,
        sender: Sender,
        file_id: String,
    },
    Button {
        chat: ChatId,
        sender: Sender,
        callback_id: String,
        message: Option<MessageRef>,
        data: String,
    },
}

impl Event {
    pub fn chat(&self) -> ChatId {
        match self {
            Event::Start { chat }
            | Event::Help { chat }
            | Event::Text { chat, .. }
            | Event::Photo { chat, .. }
            | Event::Button { chat, .. } => *chat,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Event::Start { .. } => "start",
            Event::Help { .. } => "help",
            Event::Text { .. } => "text",
            Event::Photo { .. } => "photo",
            Event::Button { .. } => "button",
        }
    }
}

/// Owns the per-user modes and the scan counter and routes events to handlers.
pub struct Hub<T> {
    transport: T,
    sessions: Mutex<SessionStore>,
    stats: Mutex<UsageStats>,
    settings: HubSettings,
}

impl<T: ChatTransport> Hub<T> {
    pub fn new(transport: T, settings: HubSettings) -> Self {
        Self {
            transport,
            sessions: Mutex::new(SessionStore::new()),
            stats: Mutex::new(UsageStats::new()),
            settings,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn mode(&self, user: UserId) -> Mode {
        self.sessions.lock().await.mode(user)
    }

    pub async fn stats_summary(&self) -> StatsSummary {
        self.stats.lock().await.summary()
    }

    /// Handles one event to completion. Failures are logged and answered with a
    /// short message; nothing is returned to the caller.
    pub async fn handle(&self, event: Event) {
        let outcome = match tokio::time::timeout(self.settings.event_timeout, self.dispatch(&event)).await {
            Ok(result) => result,
            Err(_) => Err(BotError::Timeout),
        };

        if let Err(err) = outcome {
            self.report_failure(&event, err).await;
        }
    }

    async fn dispatch(&self, event: &Event) -> Result<()> {
        match event {
            Event::Start { chat } => {
                self.transport
                    .send_text(*chat, menu::WELCOME_TEXT, Some(&Keyboard::main()))
                    .await?;
                Ok(())
            }
            Event::Help { chat } => {
                self.transport
                    .send_text(*chat, menu::HELP_TEXT, Some(&Keyboard::main()))
                    .await?;
                Ok(())
            }
            Event::Text { chat, sender, text } => self.on_text(*chat, sender, text).await,
            Event::Photo { chat, sender, file_id } => self.on_photo(*chat, sender, file_id).await,
            Event::Button {
                chat,
                sender,
                callback_id,
                message,
                data,
            } => self.on_button(*chat, sender, callback_id, *message, data).await,
        }
    }

    async fn on_button(
        &self,
        chat: ChatId,
        sender: &Sender,
        callback_id: &str,
        message: Option<MessageRef>,
        data: &str,
    ) -> Result<()> {
        if let Err(e) = self.transport.answer_callback(callback_id).await {
            warn!("failed to acknowledge button press: {}", e);
        }

        let Some(action) = Action::parse(data) else {
            debug!("ignoring unknown button '{}' from user {}", data, sender.id);
            return Ok(());
        };

        let new_mode = match action {
            Action::Qr => Some(Mode::Qr),
            Action::Barcode => Some(Mode::Barcode),
            Action::Scan => Some(Mode::Scan),
            Action::Back | Action::Create | Action::Stats | Action::Help => None,
        };
        if let Some(mode) = new_mode {
            self.sessions.lock().await.set_mode(sender.id, mode);
            debug!("user {} switched to {:?}", sender.id, mode);
        }

        let (text, keyboard) = match action {
            Action::Back => (menu::MAIN_MENU_TEXT.to_string(), Keyboard::main()),
            Action::Create => (menu::CREATE_MENU_TEXT.to_string(), Keyboard::create()),
            Action::Qr => (menu::QR_PROMPT_TEXT.to_string(), Keyboard::back()),
            Action::Barcode => (menu::BARCODE_PROMPT_TEXT.to_string(), Keyboard::back()),
            Action::Scan => (menu::SCAN_PROMPT_TEXT.to_string(), Keyboard::back()),
            Action::Stats => (menu::stats_text(&self.stats_summary().await), Keyboard::back()),
            Action::Help => (menu::HELP_TEXT.to_string(), Keyboard::back()),
        };

        match message {
            Some(message) => self.transport.edit_text(message, &text, Some(&keyboard)).await,
            None => self.transport.send_text(chat, &text, Some(&keyboard)).await.map(|_| ()),
        }
    }

    async fn on_text(&self, chat: ChatId, sender: &Sender, text: &str) -> Result<()> {
        let mode = self.mode(sender.id).await;

        match mode.code_kind() {
            Some(kind) => self.create_code(chat, kind, text).await,
            None => {
                self.transport
                    .send_text(chat, menu::IDLE_TEXT, Some(&Keyboard::main()))
                    .await?;
                Ok(())
            }
        }
    }

    async fn create_code(&self, chat: ChatId, kind: CodeKind, text: &str) -> Result<()> {
        play_creation_effect(&self.transport, chat, self.settings.frame_delay).await?;

        let png = render_png(kind, text)?;
        info!("rendered {} for chat {} ({} bytes)", kind, chat, png.len());

        let caption = match kind {
            CodeKind::Qr => menu::QR_READY_CAPTION,
            CodeKind::Barcode => menu::BARCODE_READY_CAPTION,
        };
        self.transport
            .send_photo(chat, png, kind.file_name(), caption, Some(&Keyboard::back()))
            .await
    }

    async fn on_photo(&self, chat: ChatId, sender: &Sender, file_id: &str) -> Result<()> {
        if self.mode(sender.id).await != Mode::Scan {
            debug!("ignoring photo from user {} outside scan mode", sender.id);
            return Ok(());
        }

        let bytes = self.transport.fetch_file(file_id).await?;
        let payloads = decode_image_bytes(&bytes)?;

        let Some(payload) = payloads.into_iter().next() else {
            return Err(BotError::DecodeNotFound);
        };

        let name = display_name(sender.id, sender.username.as_deref());
        {
            let mut stats = self.stats.lock().await;
            stats.record_scan(sender.id, name);
            info!("scan #{} by user {}", stats.total_scans(), sender.id);
        }

        self.transport
            .send_text(chat, &menu::found_text(&payload), Some(&Keyboard::back()))
            .await?;
        Ok(())
    }

    async fn report_failure(&self, event: &Event, err: BotError) {
        match &err {
            BotError::DecodeNotFound => debug!("{} event: {}", event.kind(), err),
            _ => warn!("{} event in chat {} failed: {}", event.kind(), event.chat(), err),
        }

        if let Err(e) = self
            .transport
            .send_text(event.chat(), err.user_message(), Some(&Keyboard::back()))
            .await
        {
            warn!("could not deliver failure notice to chat {}: {}", event.chat(), e);
        }
    }
}
