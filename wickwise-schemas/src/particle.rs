//! Detection particle types and the particle configuration of a design.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The label chemistry carried on the conjugate pad.
///
/// Unrecognized names are kept as `Other` rather than rejected; every lookup
/// table keyed on particle type defines an explicit value for `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParticleType {
    GoldNano,
    LatexBeads,
    QuantumDots,
    MagneticBeads,
    Fluorescent,
    Other(String),
}

impl ParticleType {
    pub const KNOWN: [ParticleType; 5] = [
        ParticleType::GoldNano,
        ParticleType::LatexBeads,
        ParticleType::QuantumDots,
        ParticleType::MagneticBeads,
        ParticleType::Fluorescent,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ParticleType::GoldNano => "gold-nano",
            ParticleType::LatexBeads => "latex-beads",
            ParticleType::QuantumDots => "quantum-dots",
            ParticleType::MagneticBeads => "magnetic-beads",
            ParticleType::Fluorescent => "fluorescent",
            ParticleType::Other(name) => name,
        }
    }
}

impl From<String> for ParticleType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "gold-nano" => ParticleType::GoldNano,
            "latex-beads" => ParticleType::LatexBeads,
            "quantum-dots" => ParticleType::QuantumDots,
            "magnetic-beads" => ParticleType::MagneticBeads,
            "fluorescent" => ParticleType::Fluorescent,
            _ => ParticleType::Other(value),
        }
    }
}

impl From<ParticleType> for String {
    fn from(value: ParticleType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ParticleType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ParticleType::from(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concentration {
    Low,
    #[default]
    Medium,
    High,
}

impl Concentration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Concentration::Low => "low",
            Concentration::Medium => "medium",
            Concentration::High => "high",
        }
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literature size window for a particle chemistry (nm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min_nm: f64,
    pub max_nm: f64,
    pub optimum_nm: f64,
}

/// A particle chemistry together with the user's size and loading choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpec {
    pub particle_type: ParticleType,
    /// g/cm³
    pub density_g_cm3: f64,
    pub optimal_size: SizeRange,
    /// Cost of the label per test at medium loading and 40 nm (USD).
    pub cost: f64,
    pub zeta_potential_mv: f64,
    /// Ionic strength above which the colloid starts to aggregate (mM).
    pub aggregation_threshold_mm: f64,
    pub shelf_life_months: f64,
    pub size_nm: f64,
    pub concentration: Concentration,
}
