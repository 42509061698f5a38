use std::collections::HashMap;

use crate::encode::CodeKind;

pub type UserId = u64;

/// How the next text or photo from a user is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    None,
    Qr,
    Barcode,
    Scan,
}

impl Mode {
    pub fn code_kind(self) -> Option<CodeKind> {
        match self {
            Mode::Qr => Some(CodeKind::Qr),
            Mode::Barcode => Some(CodeKind::Barcode),
            Mode::None | Mode::Scan => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    modes: HashMap<UserId, Mode>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, user: UserId, mode: Mode) {
        self.modes.insert(user, mode);
    }

    pub fn mode(&self, user: UserId) -> Mode {
        self.modes.get(&user).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_user_is_idle() {
        let store = SessionStore::new();
        assert_eq!(store.mode(7), Mode::None);
    }

    #[test]
    fn test_set_mode_overwrites() {
        let mut store = SessionStore::new();
        store.set_mode(1, Mode::Qr);
        store.set_mode(1, Mode::Scan);
        store.set_mode(2, Mode::Barcode);

        assert_eq!(store.mode(1), Mode::Scan);
        assert_eq!(store.mode(2), Mode::Barcode);
        assert_eq!(store.mode(3), Mode::None);
    }

    #[test]
    fn test_code_kind_only_for_creation_modes() {
        assert_eq!(Mode::Qr.code_kind(), Some(CodeKind::Qr));
        assert_eq!(Mode::Barcode.code_kind(), Some(CodeKind::Barcode));
        assert_eq!(Mode::Scan.code_kind(), None);
        assert_eq!(Mode::None.code_kind(), None);
    }
}
