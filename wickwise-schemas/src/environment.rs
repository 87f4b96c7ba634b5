use serde::{Deserialize, Serialize};
use std::fmt;

/// How long the finished strip has been stored before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageAge {
    Fresh,
    Week,
    Month,
    Year,
}

impl StorageAge {
    pub const ALL: [StorageAge; 4] = [
        StorageAge::Fresh,
        StorageAge::Week,
        StorageAge::Month,
        StorageAge::Year,
    ];

    /// Nominal age of the bucket in months.
    pub fn months(&self) -> f64 {
        match self {
            StorageAge::Fresh => 0.0,
            StorageAge::Week => 0.25,
            StorageAge::Month => 1.0,
            StorageAge::Year => 12.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageAge::Fresh => "fresh",
            StorageAge::Week => "week",
            StorageAge::Month => "month",
            StorageAge::Year => "year",
        }
    }
}

impl fmt::Display for StorageAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageAge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageAge::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown storage age '{}'", s))
    }
}

/// Ambient conditions the assay runs (and was stored) under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub temperature_c: f64,
    /// Relative humidity (%).
    pub humidity_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_age: Option<StorageAge>,
}

impl Default for EnvironmentSpec {
    fn default() -> Self {
        Self {
            temperature_c: 25.0,
            humidity_pct: 60.0,
            storage_age: None,
        }
    }
}
