use serde::{Deserialize, Serialize};
use std::fmt;

/// The four material zones of a lateral-flow strip, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentCategory {
    SamplePad,
    ConjugatePad,
    Membrane,
    AbsorbentPad,
}

impl ComponentCategory {
    /// All categories in the order liquid travels through the strip.
    pub const ALL: [ComponentCategory; 4] = [
        ComponentCategory::SamplePad,
        ComponentCategory::ConjugatePad,
        ComponentCategory::Membrane,
        ComponentCategory::AbsorbentPad,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::SamplePad => "sample-pad",
            ComponentCategory::ConjugatePad => "conjugate-pad",
            ComponentCategory::Membrane => "membrane",
            ComponentCategory::AbsorbentPad => "absorbent-pad",
        }
    }

    /// Human-readable title, e.g. "Conjugate Pad".
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentCategory::SamplePad => "Sample Pad",
            ComponentCategory::ConjugatePad => "Conjugate Pad",
            ComponentCategory::Membrane => "Membrane",
            ComponentCategory::AbsorbentPad => "Absorbent Pad",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComponentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown component category '{}'", s))
    }
}

/// Datasheet properties of one strip material.
///
/// Physical attributes are optional because each category only carries the
/// ones that matter for it: absorbent pads have no rated flow time, only
/// membranes report protein binding, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub material_id: String,
    pub category: ComponentCategory,
    pub manufacturer: String,
    /// Material family, e.g. "Nitrocellulose" or "Glass Fiber".
    pub family: String,
    pub description: String,
    /// Cost per test strip (USD).
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pore_size_um: Option<f64>,
    /// Seconds for liquid to travel a 4 cm reference strip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_time_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_um: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub porosity: Option<f64>,
    /// Membrane only (µg/cm²).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_binding_ug_cm2: Option<f64>,
    /// Absorbent pad only (µL/cm²).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absorption_capacity_ul_cm2: Option<f64>,
    /// Conjugate pad only (fraction).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_efficiency: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chemical_tags: Vec<String>,
}
