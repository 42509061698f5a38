use crate::stats::StatsSummary;

/// Inline button identifiers. The strings are the callback payloads carried by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Back,
    Create,
    Qr,
    Barcode,
    Scan,
    Stats,
    Help,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Back => "back",
            Action::Create => "create",
            Action::Qr => "qr",
            Action::Barcode => "barcode",
            Action::Scan => "scan",
            Action::Stats => "stats",
            Action::Help => "help",
        }
    }

    pub fn parse(data: &str) -> Option<Action> {
        match data {
            "back" => Some(Action::Back),
            "create" => Some(Action::Create),
            "qr" => Some(Action::Qr),
            "barcode" => Some(Action::Barcode),
            "scan" => Some(Action::Scan),
            "stats" => Some(Action::Stats),
            "help" => Some(Action::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    fn new(label: &str, action: Action) -> Self {
        Self {
            label: label.to_string(),
            action,
        }
    }
}

/// Transport-neutral inline keyboard, rows of buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn main() -> Self {
        Keyboard {
            rows: vec![
                vec![
                    Button::new("🟨 Create code", Action::Create),
                    Button::new("📷 Scan", Action::Scan),
                ],
                vec![
                    Button::new("📊 Stats", Action::Stats),
                    Button::new("❓ Help", Action::Help),
                ],
            ],
        }
    }

    pub fn create() -> Self {
        Keyboard {
            rows: vec![
                vec![Button::new("🔳 QR code", Action::Qr)],
                vec![Button::new("▌▌ Barcode", Action::Barcode)],
                vec![Button::new("⬅️ Back", Action::Back)],
            ],
        }
    }

    pub fn back() -> Self {
        Keyboard {
            rows: vec![vec![Button::new("⬅️ Back", Action::Back)]],
        }
    }

    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.rows.iter().flatten().map(|b| b.action)
    }
}

pub const WELCOME_TEXT: &str = "━━━━━━━━━━━━━━\n\
🔲 QR / BAR HUB\n\
━━━━━━━━━━━━━━\n\n\
Create • Scan • Share\n\n\
Choose an action 👇";

pub const MAIN_MENU_TEXT: &str = "Main menu 👇";
pub const CREATE_MENU_TEXT: &str = "🔲 What shall we create?";
pub const QR_PROMPT_TEXT: &str = "✍️ Send text or a link for the QR code";
pub const BARCODE_PROMPT_TEXT: &str = "✍️ Send the text for the barcode (digits, Latin letters and symbols)";
pub const SCAN_PROMPT_TEXT: &str = "📷 Send a photo with a QR code or barcode";
pub const IDLE_TEXT: &str = "Choose an action 👇";
pub const CREATING_TEXT: &str = "Creating your code… ⏳";
pub const QR_READY_CAPTION: &str = "✅ QR code ready";
pub const BARCODE_READY_CAPTION: &str = "✅ Barcode ready";

pub const HELP_TEXT: &str = "❓ Help\n\n\
🔲 Create QR codes and barcodes\n\
📷 Scan codes from photos\n\
📊 Shared statistics\n\n\
Just choose an action 👇";

pub fn stats_text(summary: &StatsSummary) -> String {
    let scanners = if summary.scanners.is_empty() {
        "Nobody yet".to_string()
    } else {
        summary
            .scanners
            .iter()
            .map(|name| format!("• {}", name))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "📊 STATISTICS\n\n📷 Total scans: {}\n\n👥 Who scanned:\n{}",
        summary.total_scans, scanners
    )
}

pub fn found_text(payload: &str) -> String {
    format!("✅ Found:\n\n{}", payload)
}
