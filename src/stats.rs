use std::collections::BTreeMap;

use crate::session::UserId;

#[derive(Debug, Default)]
pub struct UsageStats {
    total_scans: u64,
    scanners: BTreeMap<UserId, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_scans: u64,
    pub scanners: Vec<String>,
}

impl UsageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one successful scan; the user's latest display name replaces any earlier one.
    pub fn record_scan(&mut self, user: UserId, display_name: impl Into<String>) {
        self.total_scans += 1;
        self.scanners.insert(user, display_name.into());
    }

    pub fn total_scans(&self) -> u64 {
        self.total_scans
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            total_scans: self.total_scans,
            scanners: self.scanners.values().cloned().collect(),
        }
    }
}

pub fn display_name(user: UserId, username: Option<&str>) -> String {
    match username {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("id:{}", user),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_scans_keep_one_entry() {
        let mut stats = UsageStats::new();
        for _ in 0..5 {
            stats.record_scan(10, "alice");
        }

        let summary = stats.summary();
        assert_eq!(summary.total_scans, 5);
        assert_eq!(summary.scanners, vec!["alice".to_string()]);
    }

    #[test]
    fn test_last_name_wins() {
        let mut stats = UsageStats::new();
        stats.record_scan(10, "alice");
        stats.record_scan(11, "id:11");
        stats.record_scan(10, "alice_renamed");

        let summary = stats.summary();
        assert_eq!(summary.total_scans, 3);
        assert_eq!(summary.scanners, vec!["alice_renamed".to_string(), "id:11".to_string()]);
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name(42, Some("bob")), "bob");
        assert_eq!(display_name(42, None), "id:42");
        assert_eq!(display_name(42, Some("")), "id:42");
    }
}
