use serde::{Deserialize, Serialize};

/// Severity tiers, declared lowest first so the derived ordering ranks
/// CRITICAL highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UrgencyTier {
    Low,
    Medium,
    High,
    Critical,
}

/// Label substituted when a task carries neither `urgency` nor `priority`.
pub const DEFAULT_URGENCY: &str = "MEDIUM";

const KEYWORDS: [(&str, UrgencyTier); 3] = [
    ("CRITICAL", UrgencyTier::Critical),
    ("HIGH", UrgencyTier::High),
    ("MEDIUM", UrgencyTier::Medium),
];

/// Case-insensitive substring match, first keyword in priority order wins.
/// Anything unrecognised is LOW.
pub fn classify(text: &str) -> UrgencyTier {
    let upper = text.to_uppercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| upper.contains(keyword))
        .map(|(_, tier)| *tier)
        .unwrap_or(UrgencyTier::Low)
}

impl UrgencyTier {
    pub fn label(self) -> &'static str {
        match self {
            UrgencyTier::Critical => "CRITICAL",
            UrgencyTier::High => "HIGH",
            UrgencyTier::Medium => "MEDIUM",
            UrgencyTier::Low => "LOW",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            UrgencyTier::Critical => "red",
            UrgencyTier::High => "orange",
            UrgencyTier::Medium => "yellow",
            UrgencyTier::Low => "blue",
        }
    }
}
