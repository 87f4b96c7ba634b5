//! Per-test cost of goods for a strip design.

use crate::{
    error::Result,
    reference::{particle_factors, sample_factors, Strip},
    validation,
};
use wickwise_schemas::{
    design::{DesignState, SensitivityTarget},
    particle::{Concentration, ParticleSpec},
    results::CostBreakdown,
};

const HIGH_BINDING_THRESHOLD: f64 = 1500.0;
const HIGH_BINDING_SURCHARGE: f64 = 0.05;
const HIGH_CAPACITY_THRESHOLD: f64 = 50.0;
const HIGH_CAPACITY_SURCHARGE: f64 = 0.03;
/// Size at which a particle's listed unit cost applies.
const REFERENCE_PARTICLE_SIZE_NM: f64 = 40.0;
const ANTIBODY_BASE_COST: f64 = 0.08;

const MANUFACTURING_BASE_COST: f64 = 0.15;
const FINE_PORE_THRESHOLD_UM: f64 = 10.0;
const FINE_PORE_SURCHARGE: f64 = 0.03;

pub const PACKAGING_COST: f64 = 0.12;
pub const QC_COST: f64 = 0.03;

pub fn concentration_multiplier(concentration: Concentration) -> f64 {
    match concentration {
        Concentration::Low => 0.7,
        Concentration::Medium => 1.0,
        Concentration::High => 1.5,
    }
}

/// More antibody is loaded for tighter detection limits.
pub fn antibody_multiplier(target: SensitivityTarget) -> f64 {
    match target {
        SensitivityTarget::Low => 0.8,
        SensitivityTarget::Medium => 1.0,
        SensitivityTarget::High => 1.2,
        SensitivityTarget::Maximum => 1.5,
    }
}

fn sensitivity_target_surcharge(target: SensitivityTarget) -> f64 {
    match target {
        SensitivityTarget::Low | SensitivityTarget::Medium => 0.0,
        SensitivityTarget::High => 0.02,
        SensitivityTarget::Maximum => 0.04,
    }
}

pub fn particle_cost(particle: &ParticleSpec) -> f64 {
    particle.cost
        * concentration_multiplier(particle.concentration)
        * (particle.size_nm / REFERENCE_PARTICLE_SIZE_NM).sqrt()
}

/// Estimates the cost of one test.
///
/// Every line is floored at zero and `total` is the exact sum of the four
/// lines.
///
/// # Errors
///
/// Returns `InvalidInput` if the particle or any strip material carries a
/// negative cost or non-physical size.
pub fn compute_costs(design: &DesignState, strip: &Strip<'_>) -> Result<CostBreakdown> {
    validation::validate_particle(&design.particle)?;
    for (_, material) in strip.iter() {
        validation::validate_material(material)?;
    }

    let mut materials: f64 = strip.iter().map(|(_, m)| m.cost).sum();
    if strip.membrane.protein_binding_ug_cm2.unwrap_or(0.0) > HIGH_BINDING_THRESHOLD {
        materials += HIGH_BINDING_SURCHARGE;
    }
    if strip.absorbent_pad.absorption_capacity_ul_cm2.unwrap_or(0.0) > HIGH_CAPACITY_THRESHOLD {
        materials += HIGH_CAPACITY_SURCHARGE;
    }
    materials += particle_cost(&design.particle);
    materials += sample_factors(&design.sample.sample_type).complexity_cost;
    materials += ANTIBODY_BASE_COST * antibody_multiplier(design.targets.sensitivity);

    let mut manufacturing =
        MANUFACTURING_BASE_COST * particle_factors(&design.particle.particle_type).manufacturing_complexity;
    manufacturing += sensitivity_target_surcharge(design.targets.sensitivity);
    if strip
        .membrane
        .pore_size_um
        .map_or(false, |pore| pore < FINE_PORE_THRESHOLD_UM)
    {
        manufacturing += FINE_PORE_SURCHARGE;
    }

    let materials = materials.max(0.0);
    let manufacturing = manufacturing.max(0.0);
    let packaging = PACKAGING_COST;
    let qc = QC_COST;

    Ok(CostBreakdown {
        materials,
        manufacturing,
        packaging,
        qc,
        total: materials + manufacturing + packaging + qc,
    })
}
