//! The mutable design record a caller builds up and hands to the engine.

use crate::{
    environment::{EnvironmentSpec, StorageAge},
    material::ComponentCategory,
    particle::{Concentration, ParticleSpec},
    sample::SampleSpec,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The material id chosen for each strip zone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentSelection {
    #[serde(rename = "sample-pad", default)]
    pub sample_pad: Option<String>,
    #[serde(rename = "conjugate-pad", default)]
    pub conjugate_pad: Option<String>,
    #[serde(default)]
    pub membrane: Option<String>,
    #[serde(rename = "absorbent-pad", default)]
    pub absorbent_pad: Option<String>,
}

impl ComponentSelection {
    pub fn get(&self, category: ComponentCategory) -> Option<&str> {
        match category {
            ComponentCategory::SamplePad => self.sample_pad.as_deref(),
            ComponentCategory::ConjugatePad => self.conjugate_pad.as_deref(),
            ComponentCategory::Membrane => self.membrane.as_deref(),
            ComponentCategory::AbsorbentPad => self.absorbent_pad.as_deref(),
        }
    }

    fn slot_mut(&mut self, category: ComponentCategory) -> &mut Option<String> {
        match category {
            ComponentCategory::SamplePad => &mut self.sample_pad,
            ComponentCategory::ConjugatePad => &mut self.conjugate_pad,
            ComponentCategory::Membrane => &mut self.membrane,
            ComponentCategory::AbsorbentPad => &mut self.absorbent_pad,
        }
    }

    pub fn set(&mut self, category: ComponentCategory, material_id: impl Into<String>) {
        *self.slot_mut(category) = Some(material_id.into());
    }

    pub fn clear(&mut self, category: ComponentCategory) {
        *self.slot_mut(category) = None;
    }

    /// First category, in flow order, with no material selected.
    pub fn first_missing(&self) -> Option<ComponentCategory> {
        ComponentCategory::ALL
            .into_iter()
            .find(|c| self.get(*c).is_none())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowTarget {
    Fast,
    #[default]
    Medium,
    Slow,
}

/// Desired analytical sensitivity. Drives antibody grade and QC effort in the
/// cost model; the predictor itself does not chase it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityTarget {
    Low,
    Medium,
    #[default]
    High,
    Maximum,
}

impl SensitivityTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensitivityTarget::Low => "low",
            SensitivityTarget::Medium => "medium",
            SensitivityTarget::High => "high",
            SensitivityTarget::Maximum => "maximum",
        }
    }
}

impl fmt::Display for SensitivityTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Advisory performance goals attached to a design.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerformanceTargets {
    #[serde(default)]
    pub flow: FlowTarget,
    #[serde(default)]
    pub sensitivity: SensitivityTarget,
    #[serde(default)]
    pub cost_priority: CostPriority,
}

/// Everything the engine needs to evaluate one strip design.
///
/// The caller owns this record and mutates it through the setters below; the
/// engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignState {
    pub components: ComponentSelection,
    pub particle: ParticleSpec,
    pub sample: SampleSpec,
    #[serde(default)]
    pub environment: EnvironmentSpec,
    #[serde(default)]
    pub targets: PerformanceTargets,
}

impl DesignState {
    /// A design with no materials selected yet.
    pub fn new(particle: ParticleSpec, sample: SampleSpec) -> Self {
        Self {
            components: ComponentSelection::default(),
            particle,
            sample,
            environment: EnvironmentSpec::default(),
            targets: PerformanceTargets::default(),
        }
    }

    pub fn select_material(&mut self, category: ComponentCategory, material_id: impl Into<String>) {
        self.components.set(category, material_id);
    }

    pub fn set_particle(&mut self, particle: ParticleSpec) {
        self.particle = particle;
    }

    pub fn set_particle_size(&mut self, size_nm: f64) {
        self.particle.size_nm = size_nm;
    }

    pub fn set_concentration(&mut self, concentration: Concentration) {
        self.particle.concentration = concentration;
    }

    pub fn set_sample(&mut self, sample: SampleSpec) {
        self.sample = sample;
    }

    pub fn set_ph(&mut self, ph: f64) {
        self.sample.ph = ph;
    }

    pub fn set_viscosity(&mut self, viscosity_cp: f64) {
        self.sample.viscosity_cp = viscosity_cp;
    }

    pub fn set_surface_tension(&mut self, surface_tension_mn_m: f64) {
        self.sample.surface_tension_mn_m = surface_tension_mn_m;
    }

    pub fn set_temperature(&mut self, temperature_c: f64) {
        self.environment.temperature_c = temperature_c;
    }

    pub fn set_humidity(&mut self, humidity_pct: f64) {
        self.environment.humidity_pct = humidity_pct;
    }

    pub fn set_storage_age(&mut self, storage_age: Option<StorageAge>) {
        self.environment.storage_age = storage_age;
    }

    pub fn set_sensitivity_target(&mut self, target: SensitivityTarget) {
        self.targets.sensitivity = target;
    }
}
