use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative band for a compatibility score. Ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityLevel {
    Poor,
    Warning,
    Good,
}

impl CompatibilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityLevel::Poor => "poor",
            CompatibilityLevel::Warning => "warning",
            CompatibilityLevel::Good => "good",
        }
    }
}

impl fmt::Display for CompatibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityEntry {
    pub title: String,
    pub description: String,
    /// 0 to 100.
    pub score: f64,
    pub level: CompatibilityLevel,
    pub details: Vec<String>,
}

pub type CompatibilityReport = Vec<CompatibilityEntry>;
