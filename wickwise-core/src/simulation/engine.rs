use super::{
    flow::{self, FlowConstants},
    scoring, stability,
};
use crate::{
    analysis, compatibility,
    error::Result,
    reference::{ReferenceData, Strip},
    validation,
};
use wickwise_schemas::{
    compatibility::CompatibilityReport,
    design::DesignState,
    results::{CostBreakdown, DesignOutput, FlowDynamics, SimulationResults},
};

/// Stateless calculator over a fixed set of reference data.
///
/// The engine never stores a design: callers own their `DesignState`, mutate
/// it with the setters and pass it back in for a fresh computation.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    pub(super) reference: ReferenceData,
    pub(super) constants: FlowConstants,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self {
            reference: ReferenceData::builtin(),
            constants: FlowConstants::default(),
        }
    }
}

impl SimulationEngine {
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn constants(&self) -> &FlowConstants {
        &self.constants
    }

    /// Looks up every selected material and validates all inputs.
    fn prepare<'a>(&'a self, design: &DesignState) -> Result<Strip<'a>> {
        let strip = self.reference.resolve_strip(&design.components)?;
        validation::validate_design(design, &strip)?;
        Ok(strip)
    }

    pub fn compute_flow_dynamics(&self, design: &DesignState) -> Result<FlowDynamics> {
        let strip = self.prepare(design)?;
        flow::compute_flow_dynamics(&design.sample, &strip, &design.environment, &self.constants)
    }

    pub fn compute_costs(&self, design: &DesignState) -> Result<CostBreakdown> {
        let strip = self.prepare(design)?;
        analysis::compute_costs(design, &strip)
    }

    pub fn analyze_compatibility(&self, design: &DesignState) -> Result<CompatibilityReport> {
        let strip = self.prepare(design)?;
        Ok(compatibility::analyze_compatibility(design, &strip))
    }

    /// Recomputes every result and cost line from scratch.
    ///
    /// Either the whole output is returned or an error is; no partial
    /// results escape.
    ///
    /// # Errors
    ///
    /// - `IncompleteDesignState` if a zone has no material selected.
    /// - `UnknownKey` if a selected material id is not in the library.
    /// - `InvalidInput` if any physical value is out of range.
    pub fn recompute(&self, design: &DesignState) -> Result<DesignOutput> {
        let strip = self.prepare(design)?;

        let flow = flow::compute_flow_dynamics(&design.sample, &strip, &design.environment, &self.constants)?;
        let sensitivity = scoring::predict_sensitivity(&design.particle, strip.membrane, &flow, &design.sample);
        let specificity = scoring::predict_specificity(&design.particle, &design.sample);
        let stability = stability::compute_stability(&design.environment, &design.particle, strip.membrane);
        let costs = analysis::compute_costs(design, &strip)?;

        let results = SimulationResults {
            flow_rate: flow.flow_rate,
            flow_time: flow.flow_time,
            wicking_rate: flow.wicking_rate,
            sensitivity,
            specificity,
            stability,
        };

        log::debug!(
            "Recomputed {} / {} / {}: flow_time={:.2} min sensitivity={:.3} specificity={:.3} stability={:.3} total=${:.3}",
            strip.membrane.material_id,
            design.particle.particle_type,
            design.sample.sample_type,
            results.flow_time,
            results.sensitivity,
            results.specificity,
            results.stability,
            costs.total
        );

        Ok(DesignOutput { results, costs })
    }
}
