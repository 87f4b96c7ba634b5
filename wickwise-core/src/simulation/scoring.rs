//! Heuristic sensitivity and specificity predictors.
//!
//! Both start from a base score, add independent correction terms and clamp
//! the result to a realistic band. They are not fitted models.

use crate::reference::{particle_factors, sample_factors};
use wickwise_schemas::{
    material::MaterialSpec, particle::ParticleSpec, results::FlowDynamics, sample::SampleSpec,
};

pub const SENSITIVITY_RANGE: (f64, f64) = (0.60, 0.99);
pub const SPECIFICITY_RANGE: (f64, f64) = (0.80, 0.995);

/// pH at which antibody–antigen binding is assumed to peak.
pub const OPTIMAL_PH: f64 = 7.2;

const BASE_SENSITIVITY: f64 = 0.80;
const SIZE_PENALTY_WEIGHT: f64 = 0.15;
const BINDING_DIVISOR: f64 = 20_000.0;
const SENSITIVITY_PH_WEIGHT: f64 = 0.04;

const BASE_SPECIFICITY: f64 = 0.90;
const SPECIFICITY_PH_DEADBAND: f64 = 1.0;
const SPECIFICITY_PH_WEIGHT: f64 = 0.02;

/// Penalty for reading a strip too fast (incomplete capture) or too slow.
pub fn flow_time_penalty(flow_time_min: f64) -> f64 {
    if flow_time_min < 3.0 {
        0.15
    } else if flow_time_min < 5.0 {
        0.05
    } else if flow_time_min > 20.0 {
        0.10
    } else {
        0.0
    }
}

/// Relative distance of the chosen size from the particle's optimum.
pub fn size_deviation(particle: &ParticleSpec) -> f64 {
    let optimum = particle.optimal_size.optimum_nm;
    (particle.size_nm - optimum).abs() / optimum
}

pub fn predict_sensitivity(
    particle: &ParticleSpec,
    membrane: &MaterialSpec,
    flow: &FlowDynamics,
    sample: &SampleSpec,
) -> f64 {
    let factors = particle_factors(&particle.particle_type);
    let binding = membrane.protein_binding_ug_cm2.unwrap_or(0.0);

    let sensitivity = BASE_SENSITIVITY + factors.sensitivity_bonus
        - size_deviation(particle) * SIZE_PENALTY_WEIGHT
        - flow_time_penalty(flow.flow_time)
        + binding / BINDING_DIVISOR
        - (sample.ph - OPTIMAL_PH).abs() * SENSITIVITY_PH_WEIGHT;

    sensitivity.clamp(SENSITIVITY_RANGE.0, SENSITIVITY_RANGE.1)
}

pub fn predict_specificity(particle: &ParticleSpec, sample: &SampleSpec) -> f64 {
    let ph_excess = ((sample.ph - OPTIMAL_PH).abs() - SPECIFICITY_PH_DEADBAND).max(0.0);

    let specificity = BASE_SPECIFICITY
        + particle_factors(&particle.particle_type).specificity_bonus
        + sample_factors(&sample.sample_type).specificity_bonus
        - ph_excess * SPECIFICITY_PH_WEIGHT;

    specificity.clamp(SPECIFICITY_RANGE.0, SPECIFICITY_RANGE.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{particle_defaults, sample_defaults, ReferenceData};
    use approx::assert_relative_eq;
    use wickwise_schemas::{material::ComponentCategory, particle::ParticleType, sample::SampleType};

    fn steady_flow(flow_time: f64) -> FlowDynamics {
        FlowDynamics {
            flow_rate: 45.0 / flow_time,
            flow_time,
            wicking_rate: 0.5,
        }
    }

    #[test]
    fn flow_time_bands() {
        assert_eq!(flow_time_penalty(2.0), 0.15);
        assert_eq!(flow_time_penalty(4.0), 0.05);
        assert_eq!(flow_time_penalty(10.0), 0.0);
        assert_eq!(flow_time_penalty(20.0), 0.0);
        assert_eq!(flow_time_penalty(25.0), 0.10);
    }

    #[test]
    fn gold_at_optimum_on_hi_flow_120() {
        let reference = ReferenceData::builtin();
        let membrane = reference
            .get_material(ComponentCategory::Membrane, "hi-flow-plus-120")
            .unwrap();
        let particle = particle_defaults(&ParticleType::GoldNano);
        let sample = sample_defaults(&SampleType::Water);

        let sensitivity = predict_sensitivity(&particle, membrane, &steady_flow(8.0), &sample);
        // 0.80 + 0.08 + 1600/20000 - 0.2 * 0.04
        assert_relative_eq!(sensitivity, 0.952, epsilon = 1e-12);
    }

    #[test]
    fn oversized_particles_lose_sensitivity() {
        let reference = ReferenceData::builtin();
        let membrane = reference
            .get_material(ComponentCategory::Membrane, "prima-40")
            .unwrap();
        let sample = sample_defaults(&SampleType::Serum);
        let mut particle = particle_defaults(&ParticleType::LatexBeads);
        let at_optimum = predict_sensitivity(&particle, membrane, &steady_flow(10.0), &sample);
        particle.size_nm = 300.0;
        let oversized = predict_sensitivity(&particle, membrane, &steady_flow(10.0), &sample);
        assert!(oversized < at_optimum);
    }

    #[test]
    fn specificity_ph_deadband() {
        let particle = particle_defaults(&ParticleType::GoldNano);
        let mut sample = sample_defaults(&SampleType::Urine);
        sample.ph = OPTIMAL_PH - 1.0;
        let edge = predict_specificity(&particle, &sample);
        sample.ph = OPTIMAL_PH;
        assert_relative_eq!(predict_specificity(&particle, &sample), edge);
        sample.ph = 4.2;
        assert!(predict_specificity(&particle, &sample) < edge);
    }

    #[test]
    fn scores_stay_in_band_for_every_known_and_unknown_type() {
        let reference = ReferenceData::builtin();
        let mut particle_types: Vec<ParticleType> = ParticleType::KNOWN.to_vec();
        particle_types.push(ParticleType::Other("europium-chelate".to_string()));
        let mut sample_types: Vec<SampleType> = SampleType::KNOWN.to_vec();
        sample_types.push(SampleType::Other("nasal-swab".to_string()));

        for membrane in reference.materials(ComponentCategory::Membrane) {
            for particle_type in &particle_types {
                for sample_type in &sample_types {
                    for ph in [0.0, 4.0, 7.2, 10.0, 14.0] {
                        for flow_time in [1.0, 4.0, 10.0, 40.0] {
                            let particle = particle_defaults(particle_type);
                            let mut sample = sample_defaults(sample_type);
                            sample.ph = ph;

                            let sensitivity =
                                predict_sensitivity(&particle, membrane, &steady_flow(flow_time), &sample);
                            let specificity = predict_specificity(&particle, &sample);
                            assert!((SENSITIVITY_RANGE.0..=SENSITIVITY_RANGE.1).contains(&sensitivity));
                            assert!((SPECIFICITY_RANGE.0..=SPECIFICITY_RANGE.1).contains(&specificity));
                        }
                    }
                }
            }
        }
    }
}
