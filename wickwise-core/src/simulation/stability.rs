//! Shelf-stability score from storage conditions, particle chemistry and membrane.

use crate::reference::particle_factors;
use wickwise_schemas::{
    environment::{EnvironmentSpec, StorageAge},
    material::MaterialSpec,
    particle::ParticleSpec,
};

pub const STABILITY_RANGE: (f64, f64) = (0.50, 0.99);

const BASE_STABILITY: f64 = 0.70;
const OPTIMAL_TEMPERATURE_C: (f64, f64) = (20.0, 30.0);
const OPTIMAL_HUMIDITY_PCT: (f64, f64) = (30.0, 70.0);
const IN_BAND_BONUS: f64 = 0.05;
const BINDING_DIVISOR: f64 = 20_000.0;

/// Piecewise band score: a flat bonus inside `band`, linear penalties outside.
fn band_term(value: f64, band: (f64, f64), below_rate: f64, above_rate: f64) -> f64 {
    if value < band.0 {
        -(band.0 - value) * below_rate
    } else if value > band.1 {
        -(value - band.1) * above_rate
    } else {
        IN_BAND_BONUS
    }
}

/// Additive stability term for strip age. Strictly decreasing with age.
pub fn storage_term(storage_age: Option<StorageAge>) -> f64 {
    match storage_age {
        None => 0.0,
        Some(StorageAge::Fresh) => 0.05,
        Some(StorageAge::Week) => 0.02,
        Some(StorageAge::Month) => -0.03,
        Some(StorageAge::Year) => -0.10,
    }
}

pub fn compute_stability(environment: &EnvironmentSpec, particle: &ParticleSpec, membrane: &MaterialSpec) -> f64 {
    let stability = BASE_STABILITY
        + band_term(environment.temperature_c, OPTIMAL_TEMPERATURE_C, 0.01, 0.015)
        + band_term(environment.humidity_pct, OPTIMAL_HUMIDITY_PCT, 0.008, 0.01)
        + particle_factors(&particle.particle_type).stability_bonus
        + membrane.protein_binding_ug_cm2.unwrap_or(0.0) / BINDING_DIVISOR
        + storage_term(environment.storage_age);

    stability.clamp(STABILITY_RANGE.0, STABILITY_RANGE.1)
}
