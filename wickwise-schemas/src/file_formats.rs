use crate::{
    design::{ComponentSelection, DesignState, PerformanceTargets},
    environment::EnvironmentSpec,
    material::MaterialSpec,
    particle::{Concentration, ParticleType},
    results::{CostBreakdown, SimulationResults},
    sample::SampleType,
};
use serde::{Deserialize, Serialize};

/// A YAML file contributing materials to the reference library.
#[derive(Debug, Deserialize)]
pub struct MaterialFile {
    pub schema_version: String,
    pub materials: Vec<MaterialSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleRequest {
    pub particle_type: ParticleType,
    /// Defaults to the literature optimum for the type.
    #[serde(default)]
    pub size_nm: Option<f64>,
    #[serde(default)]
    pub concentration: Option<Concentration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRequest {
    pub sample_type: SampleType,
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub viscosity_cp: Option<f64>,
    #[serde(default)]
    pub surface_tension_mn_m: Option<f64>,
}

/// Compact, hand-written form of a design: ids and overrides only.
///
/// Resolved against the reference data to produce a full [`DesignState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    pub components: ComponentSelection,
    pub particle: ParticleRequest,
    pub sample: SampleRequest,
    #[serde(default)]
    pub environment: EnvironmentSpec,
    #[serde(default)]
    pub targets: PerformanceTargets,
}

/// Flat export of a design and what it computed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSnapshot {
    pub exported_at: String,
    pub version: String,
    pub application: String,
    pub design: DesignState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<SimulationResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<CostBreakdown>,
}
