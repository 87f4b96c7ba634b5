//! Particle chemistry table.
//!
//! Physical defaults come from manufacturer datasheets; the scoring factors are
//! the empirical weights used by the predictors, cost model and stability
//! scorer. Every function here is total over [`ParticleType`]: `Other` maps to
//! a generic 40 nm colloid with neutral scoring weights.

use wickwise_schemas::particle::{Concentration, ParticleSpec, ParticleType, SizeRange};

/// Scoring weights for one particle chemistry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFactors {
    /// Added to the base sensitivity score.
    pub sensitivity_bonus: f64,
    /// Added to the base specificity score.
    pub specificity_bonus: f64,
    /// Added to the base stability score.
    pub stability_bonus: f64,
    /// Multiplier on the base manufacturing cost.
    pub manufacturing_complexity: f64,
    /// Conjugation and handling need dedicated equipment or training.
    pub specialized_handling: bool,
    pub description: &'static str,
    pub readout: &'static str,
}

/// Weights for `ParticleType::Other`: no sensitivity, specificity or
/// stability bonus and baseline manufacturing complexity.
pub const DEFAULT_PARTICLE_FACTORS: ParticleFactors = ParticleFactors {
    sensitivity_bonus: 0.0,
    specificity_bonus: 0.0,
    stability_bonus: 0.0,
    manufacturing_complexity: 1.0,
    specialized_handling: false,
    description: "Unclassified particle label",
    readout: "Unknown; verify with a reader",
};

pub fn particle_factors(particle_type: &ParticleType) -> ParticleFactors {
    match particle_type {
        ParticleType::GoldNano => ParticleFactors {
            sensitivity_bonus: 0.08,
            specificity_bonus: 0.03,
            stability_bonus: 0.10,
            manufacturing_complexity: 1.1,
            specialized_handling: false,
            description: "Gold nanoparticles, most common in LFAs",
            readout: "Red color, no equipment needed",
        },
        ParticleType::LatexBeads => ParticleFactors {
            sensitivity_bonus: 0.04,
            specificity_bonus: 0.01,
            stability_bonus: 0.08,
            manufacturing_complexity: 1.0,
            specialized_handling: false,
            description: "Polystyrene latex beads",
            readout: "Various colors, no equipment needed",
        },
        ParticleType::QuantumDots => ParticleFactors {
            sensitivity_bonus: 0.12,
            specificity_bonus: 0.04,
            stability_bonus: 0.05,
            manufacturing_complexity: 1.3,
            specialized_handling: true,
            description: "Quantum dots, fluorescent nanocrystals",
            readout: "Requires UV light or reader",
        },
        ParticleType::MagneticBeads => ParticleFactors {
            sensitivity_bonus: 0.06,
            specificity_bonus: 0.05,
            stability_bonus: 0.07,
            manufacturing_complexity: 1.2,
            specialized_handling: false,
            description: "Magnetic nanoparticles",
            readout: "Brown/black, can use magnetic reader",
        },
        ParticleType::Fluorescent => ParticleFactors {
            sensitivity_bonus: 0.10,
            specificity_bonus: 0.02,
            stability_bonus: 0.06,
            manufacturing_complexity: 1.2,
            specialized_handling: false,
            description: "Fluorescent particles",
            readout: "Requires UV light or reader",
        },
        ParticleType::Other(_) => DEFAULT_PARTICLE_FACTORS,
    }
}

/// Datasheet defaults for a particle type, sized at its literature optimum
/// with medium loading.
pub fn particle_defaults(particle_type: &ParticleType) -> ParticleSpec {
    let (density, (min, optimum, max), cost, zeta, aggregation, shelf_life) = match particle_type {
        ParticleType::GoldNano => (19.3, (20.0, 40.0, 60.0), 0.20, -35.0, 150.0, 24.0),
        ParticleType::LatexBeads => (1.05, (100.0, 200.0, 300.0), 0.15, -45.0, 300.0, 36.0),
        ParticleType::QuantumDots => (5.8, (10.0, 15.0, 20.0), 0.40, -25.0, 200.0, 12.0),
        ParticleType::MagneticBeads => (5.2, (150.0, 250.0, 350.0), 0.30, -20.0, 250.0, 24.0),
        ParticleType::Fluorescent => (1.05, (50.0, 100.0, 150.0), 0.25, -40.0, 300.0, 18.0),
        // Generic colloid: gold-sized, moderately charged, one-year shelf life.
        ParticleType::Other(_) => (1.0, (20.0, 40.0, 60.0), 0.20, -30.0, 150.0, 12.0),
    };

    ParticleSpec {
        particle_type: particle_type.clone(),
        density_g_cm3: density,
        optimal_size: SizeRange {
            min_nm: min,
            max_nm: max,
            optimum_nm: optimum,
        },
        cost,
        zeta_potential_mv: zeta,
        aggregation_threshold_mm: aggregation,
        shelf_life_months: shelf_life,
        size_nm: optimum,
        concentration: Concentration::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_start_at_the_optimum() {
        for particle_type in ParticleType::KNOWN.iter() {
            let spec = particle_defaults(particle_type);
            assert_eq!(spec.size_nm, spec.optimal_size.optimum_nm);
            assert!(spec.optimal_size.min_nm < spec.optimal_size.optimum_nm);
            assert!(spec.optimal_size.optimum_nm < spec.optimal_size.max_nm);
        }
    }

    #[test]
    fn unknown_type_keeps_its_name_and_gets_defaults() {
        let other = ParticleType::Other("silica-core".to_string());
        let spec = particle_defaults(&other);
        assert_eq!(spec.particle_type.as_str(), "silica-core");
        assert_eq!(particle_factors(&other), DEFAULT_PARTICLE_FACTORS);
    }
}
