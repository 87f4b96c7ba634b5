use serde::{Deserialize, Serialize};
use std::fmt;

/// Sample matrix applied to the strip.
///
/// Like [`crate::particle::ParticleType`], unrecognized names become `Other`
/// and resolve to documented defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SampleType {
    Water,
    Urine,
    Saliva,
    Serum,
    Plasma,
    Blood,
    Other(String),
}

impl SampleType {
    pub const KNOWN: [SampleType; 6] = [
        SampleType::Water,
        SampleType::Urine,
        SampleType::Saliva,
        SampleType::Serum,
        SampleType::Plasma,
        SampleType::Blood,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SampleType::Water => "water",
            SampleType::Urine => "urine",
            SampleType::Saliva => "saliva",
            SampleType::Serum => "serum",
            SampleType::Plasma => "plasma",
            SampleType::Blood => "blood",
            SampleType::Other(name) => name,
        }
    }
}

impl From<String> for SampleType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "water" => SampleType::Water,
            "urine" => SampleType::Urine,
            "saliva" => SampleType::Saliva,
            "serum" => SampleType::Serum,
            "plasma" => SampleType::Plasma,
            "blood" => SampleType::Blood,
            _ => SampleType::Other(value),
        }
    }
}

impl From<SampleType> for String {
    fn from(value: SampleType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SampleType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SampleType::from(s.to_string()))
    }
}

/// Physical properties of the sample at 25 °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSpec {
    pub sample_type: SampleType,
    /// Dynamic viscosity (cP).
    pub viscosity_cp: f64,
    /// mN/m
    pub surface_tension_mn_m: f64,
    pub ph: f64,
    /// mM
    pub ionic_strength_mm: f64,
    /// g/mL
    pub density_g_ml: f64,
}
