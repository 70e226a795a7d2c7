use serde::{Deserialize, Serialize};

/// Advisory shown alongside every result set
pub const EMERGENCY_ADVISORY: &str = "Chest pain or breathing difficulty? Call 108 immediately!";

/// Action text for the quick-scan result
pub const QUICK_SCAN_ACTION: &str = "Visit doctor soon";

/// Unique identifier for a condition in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionId(pub String);

impl ConditionId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Build an ID slug from a display name: "Heart Attack" -> "heart_attack"
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let slug = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_");
        Self(slug)
    }
}

impl std::fmt::Display for ConditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Confidence level for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// No shared keywords at all
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            Self::High
        } else if score >= 0.40 {
            Self::Medium
        } else if score > 0.0 {
            Self::Low
        } else {
            Self::None
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::None => "NONE",
        }
    }
}
