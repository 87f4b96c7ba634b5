use crate::design::DesignState;
use serde::{Deserialize, Serialize};

/// Published performance of the commercial device a template mirrors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePerformance {
    /// Intended read time (min).
    pub flow_time_min: f64,
    /// Limit of detection, in `lod_unit`.
    pub lod: f64,
    pub lod_unit: String,
}

/// A validated, ready-to-load design bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub template_id: String,
    pub name: String,
    pub reference: String,
    pub design: DesignState,
    pub performance: TemplatePerformance,
    pub clinical_sensitivity: f64,
    pub clinical_specificity: f64,
}
