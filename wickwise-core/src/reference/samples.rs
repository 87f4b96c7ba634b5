//! Sample matrix table.
//!
//! Viscosity and surface tension are literature values at 25 °C. Every
//! function is total over [`SampleType`]; `Other` is treated as a dilute
//! aqueous buffer.

use wickwise_schemas::sample::{SampleSpec, SampleType};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleFactors {
    /// Matrix effect on specificity (negative for complex matrices).
    pub specificity_bonus: f64,
    /// Extra sample-preparation reagent cost per test (USD).
    pub complexity_cost: f64,
    pub description: &'static str,
}

/// Factors for `SampleType::Other`: no specificity adjustment and a
/// mid-range preparation cost.
pub const DEFAULT_SAMPLE_FACTORS: SampleFactors = SampleFactors {
    specificity_bonus: 0.0,
    complexity_cost: 0.15,
    description: "Unclassified sample matrix",
};

pub fn sample_factors(sample_type: &SampleType) -> SampleFactors {
    match sample_type {
        SampleType::Water => SampleFactors {
            specificity_bonus: 0.05,
            complexity_cost: 0.10,
            description: "Pure water (control)",
        },
        SampleType::Urine => SampleFactors {
            specificity_bonus: 0.02,
            complexity_cost: 0.12,
            description: "Normal human urine",
        },
        SampleType::Saliva => SampleFactors {
            specificity_bonus: 0.0,
            complexity_cost: 0.15,
            description: "Normal human saliva",
        },
        SampleType::Serum => SampleFactors {
            specificity_bonus: -0.02,
            complexity_cost: 0.18,
            description: "Blood serum (plasma without clotting factors)",
        },
        SampleType::Plasma => SampleFactors {
            specificity_bonus: -0.02,
            complexity_cost: 0.18,
            description: "Blood plasma (contains clotting factors)",
        },
        SampleType::Blood => SampleFactors {
            specificity_bonus: -0.04,
            complexity_cost: 0.22,
            description: "Whole blood (includes cells and plasma)",
        },
        SampleType::Other(_) => DEFAULT_SAMPLE_FACTORS,
    }
}

pub fn sample_defaults(sample_type: &SampleType) -> SampleSpec {
    let (viscosity, surface_tension, ph, ionic_strength, density) = match sample_type {
        SampleType::Water => (1.0, 72.8, 7.0, 0.0, 0.997),
        SampleType::Urine => (1.3, 65.0, 6.2, 150.0, 1.015),
        SampleType::Saliva => (3.0, 53.0, 7.0, 50.0, 1.005),
        SampleType::Serum => (1.8, 58.0, 7.4, 150.0, 1.024),
        SampleType::Plasma => (1.8, 58.0, 7.4, 150.0, 1.025),
        SampleType::Blood => (3.5, 55.0, 7.4, 150.0, 1.060),
        SampleType::Other(_) => (1.0, 72.0, 7.0, 10.0, 1.0),
    };

    SampleSpec {
        sample_type: sample_type.clone(),
        viscosity_cp: viscosity,
        surface_tension_mn_m: surface_tension,
        ph,
        ionic_strength_mm: ionic_strength,
        density_g_ml: density,
    }
}

/// One-line note on how switching to this matrix changes the assay.
pub fn sample_impact_note(sample_type: &SampleType) -> String {
    match sample_type {
        SampleType::Water => "Water is the fastest flowing sample type.".to_string(),
        SampleType::Urine => "Urine has slightly higher viscosity than water.".to_string(),
        SampleType::Saliva => "Saliva has higher viscosity, reducing flow rate.".to_string(),
        SampleType::Serum => "Serum contains proteins that affect binding kinetics.".to_string(),
        SampleType::Plasma => "Plasma contains clotting factors and proteins.".to_string(),
        SampleType::Blood => "Blood has high viscosity and complex matrix effects.".to_string(),
        SampleType::Other(name) => format!("Sample changed to {}.", name),
    }
}

pub fn viscosity_advisory(viscosity_cp: f64) -> Option<&'static str> {
    if viscosity_cp > 3.0 {
        Some("High viscosity reduces flow rate significantly.")
    } else if viscosity_cp < 1.2 {
        Some("Low viscosity increases flow rate.")
    } else {
        None
    }
}

pub fn surface_tension_advisory(surface_tension_mn_m: f64) -> Option<&'static str> {
    if surface_tension_mn_m > 70.0 {
        Some("High surface tension increases capillary action.")
    } else if surface_tension_mn_m < 50.0 {
        Some("Low surface tension reduces wicking force.")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blood_is_the_most_viscous_known_matrix() {
        let blood = sample_defaults(&SampleType::Blood).viscosity_cp;
        for sample_type in SampleType::KNOWN.iter() {
            assert!(sample_defaults(sample_type).viscosity_cp <= blood);
        }
    }

    #[test]
    fn impact_note_names_unknown_matrices() {
        let note = sample_impact_note(&SampleType::Other("sweat".to_string()));
        assert_eq!(note, "Sample changed to sweat.");
    }

    #[test]
    fn advisories_only_fire_outside_the_normal_band() {
        assert!(viscosity_advisory(1.5).is_none());
        assert!(viscosity_advisory(3.5).is_some());
        assert!(surface_tension_advisory(60.0).is_none());
        assert!(surface_tension_advisory(45.0).is_some());
    }
}
