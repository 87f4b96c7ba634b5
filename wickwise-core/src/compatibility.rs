//! Qualitative compatibility checks between strip components, the particle
//! label, the sample matrix and the storage environment.
//!
//! Every analyzer starts from a base score, applies additive adjustments,
//! clamps to [0, 100] and then maps the score to a level. Some findings force
//! at most a warning regardless of the score.

use crate::{
    reference::{particle_factors, Strip},
    simulation::scoring::OPTIMAL_PH,
};
use std::collections::BTreeSet;
use wickwise_schemas::{
    compatibility::{CompatibilityEntry, CompatibilityLevel, CompatibilityReport},
    design::{DesignState, SensitivityTarget},
    environment::{EnvironmentSpec, StorageAge},
    material::{ComponentCategory, MaterialSpec},
    particle::{ParticleSpec, ParticleType},
    sample::{SampleSpec, SampleType},
};

pub const GOOD_THRESHOLD: f64 = 85.0;
pub const WARNING_THRESHOLD: f64 = 70.0;

/// Membranes thinner than this need tighter lamination tolerances.
const THIN_MEMBRANE_UM: f64 = 135.0;
const PH_TOLERANCE: f64 = 1.5;
const STABLE_ZETA_MV: f64 = 30.0;

pub fn level_for_score(score: f64) -> CompatibilityLevel {
    if score >= GOOD_THRESHOLD {
        CompatibilityLevel::Good
    } else if score >= WARNING_THRESHOLD {
        CompatibilityLevel::Warning
    } else {
        CompatibilityLevel::Poor
    }
}

/// Accumulates score adjustments and findings for one entry.
struct Assessment {
    score: f64,
    ceiling: CompatibilityLevel,
    details: Vec<String>,
}

impl Assessment {
    fn new(base: f64) -> Self {
        Self {
            score: base,
            ceiling: CompatibilityLevel::Good,
            details: Vec::new(),
        }
    }

    fn pass(&mut self, delta: f64, detail: impl Into<String>) {
        self.score += delta;
        self.details.push(format!("✓ {}", detail.into()));
    }

    fn flag(&mut self, delta: f64, detail: impl Into<String>) {
        self.score += delta;
        self.details.push(format!("⚠ {}", detail.into()));
    }

    fn force_warning(&mut self) {
        self.ceiling = self.ceiling.min(CompatibilityLevel::Warning);
    }

    fn finish(self, title: impl Into<String>, description: &str) -> CompatibilityEntry {
        let score = self.score.clamp(0.0, 100.0);
        let details = if self.details.is_empty() {
            vec!["Standard compatibility expected".to_string()]
        } else {
            self.details
        };
        CompatibilityEntry {
            title: title.into(),
            description: description.to_string(),
            score,
            level: level_for_score(score).min(self.ceiling),
            details,
        }
    }
}

fn ratio(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) if a > 0.0 && b > 0.0 => Some(a.max(b) / a.min(b)),
        _ => None,
    }
}

/// Scores the interface between two adjacent strip materials.
///
/// Symmetric: swapping `a` and `b` changes only the title.
pub fn analyze_pair_compatibility(a: &MaterialSpec, b: &MaterialSpec) -> CompatibilityEntry {
    let mut assessment = Assessment::new(85.0);

    if let Some(pore_ratio) = ratio(a.pore_size_um, b.pore_size_um) {
        if pore_ratio < 2.0 {
            assessment.pass(10.0, "Good pore size matching");
        } else if pore_ratio > 5.0 {
            assessment.flag(-15.0, format!("Large pore size mismatch ({:.1}x)", pore_ratio));
            assessment.force_warning();
        }
    }

    if let Some(flow_ratio) = ratio(a.flow_time_s, b.flow_time_s) {
        if flow_ratio < 1.5 {
            assessment.pass(5.0, "Flow rates are compatible");
        } else if flow_ratio > 3.0 {
            assessment.flag(-10.0, format!("Flow rates differ by {:.1}x, fluid may pool at the junction", flow_ratio));
        }
    }

    let tags_a: BTreeSet<&str> = a.chemical_tags.iter().map(String::as_str).collect();
    let tags_b: BTreeSet<&str> = b.chemical_tags.iter().map(String::as_str).collect();
    let shared: Vec<&str> = tags_a.intersection(&tags_b).copied().collect();
    if !shared.is_empty() {
        assessment.pass(3.0, format!("Shared chemistry: {}", shared.join(", ")));
    }

    assessment.finish(
        format!("{} ↔ {}", a.category.display_name(), b.category.display_name()),
        "Interface compatibility analysis",
    )
}

pub fn analyze_particle_sample(particle: &ParticleSpec, sample: &SampleSpec) -> CompatibilityEntry {
    let mut assessment = Assessment::new(80.0);

    let interference = match (&sample.sample_type, &particle.particle_type) {
        (SampleType::Blood, ParticleType::GoldNano) => {
            Some((-10.0, "Blood components may interfere with gold nanoparticles"))
        }
        (SampleType::Serum | SampleType::Plasma, ParticleType::LatexBeads) => {
            Some((-5.0, "Serum proteins can adsorb onto latex surfaces"))
        }
        (SampleType::Blood, ParticleType::MagneticBeads) => {
            Some((-5.0, "Iron in hemoglobin can confound magnetic readout"))
        }
        _ => None,
    };
    if let Some((delta, detail)) = interference {
        assessment.flag(delta, detail);
        assessment.force_warning();
    }

    if (sample.ph - OPTIMAL_PH).abs() > PH_TOLERANCE {
        assessment.flag(-15.0, "pH may affect particle stability");
        assessment.force_warning();
    } else {
        assessment.pass(5.0, "pH is optimal for particle stability");
    }

    if particle.zeta_potential_mv.abs() > STABLE_ZETA_MV {
        assessment.pass(5.0, format!("Colloid is charge-stabilised ({} mV)", particle.zeta_potential_mv));
    }

    if sample.ionic_strength_mm > particle.aggregation_threshold_mm {
        assessment.flag(
            -10.0,
            format!(
                "Ionic strength {} mM exceeds the {} mM aggregation threshold",
                sample.ionic_strength_mm, particle.aggregation_threshold_mm
            ),
        );
    }

    assessment.finish(
        "Particle-Sample Compatibility",
        "Analysis of particle behavior in sample matrix",
    )
}

fn storage_penalty(storage_age: StorageAge) -> f64 {
    match storage_age {
        StorageAge::Fresh => 0.0,
        StorageAge::Week => -2.0,
        StorageAge::Month => -5.0,
        StorageAge::Year => -12.0,
    }
}

pub fn analyze_environment(environment: &EnvironmentSpec, particle: &ParticleSpec) -> CompatibilityEntry {
    let mut assessment = Assessment::new(85.0);

    let temperature = environment.temperature_c;
    if temperature < 15.0 {
        assessment.flag(-20.0, "Low temperature slows reaction kinetics");
        assessment.force_warning();
    } else if temperature > 35.0 {
        assessment.flag(-15.0, "High temperature may reduce antibody binding");
        assessment.force_warning();
    } else {
        assessment.pass(10.0, "Temperature is in optimal range");
    }

    let humidity = environment.humidity_pct;
    if (30.0..=70.0).contains(&humidity) {
        assessment.pass(5.0, "Humidity is in the normal operating range");
    } else {
        assessment.flag(-10.0, format!("Humidity of {}% affects pad wetting and drying", humidity));
    }

    if let Some(storage_age) = environment.storage_age {
        let penalty = storage_penalty(storage_age);
        if penalty < 0.0 {
            assessment.flag(penalty, format!("Strips stored for a {}", storage_age));
        }
        if storage_age.months() > particle.shelf_life_months {
            assessment.flag(
                -10.0,
                format!(
                    "Storage exceeds the {}-month shelf life of {}",
                    particle.shelf_life_months, particle.particle_type
                ),
            );
        }
    }

    assessment.finish("Temperature Effect", "Impact of temperature and storage on assay performance")
}

pub fn analyze_manufacturing(design: &DesignState, strip: &Strip<'_>) -> CompatibilityEntry {
    let mut assessment = Assessment::new(95.0);

    if particle_factors(&design.particle.particle_type).specialized_handling {
        assessment.flag(-15.0, format!("{} need specialised conjugation and handling", design.particle.particle_type));
    }
    if let Some(thickness) = strip.membrane.thickness_um {
        if thickness < THIN_MEMBRANE_UM {
            assessment.flag(-10.0, format!("{} µm membrane needs tight lamination tolerances", thickness));
        }
    }
    if design.targets.sensitivity == SensitivityTarget::Maximum {
        assessment.flag(-10.0, "Maximum sensitivity target narrows process windows");
    }

    assessment.finish("Manufacturability", "Ease of scale-up for this design")
}

/// Full report: the three adjacent material interfaces in flow order, then
/// particle/sample, environment and manufacturing.
pub fn analyze_compatibility(design: &DesignState, strip: &Strip<'_>) -> CompatibilityReport {
    let flow_order: Vec<&MaterialSpec> = strip.iter().map(|(_, material)| material).collect();
    let mut report: CompatibilityReport = flow_order
        .windows(2)
        .map(|pair| analyze_pair_compatibility(pair[0], pair[1]))
        .collect();

    report.push(analyze_particle_sample(&design.particle, &design.sample));
    report.push(analyze_environment(&design.environment, &design.particle));
    report.push(analyze_manufacturing(design, strip));

    log::debug!(
        "Compatibility: {}",
        report
            .iter()
            .map(|e| format!("{}={:.0}", e.title, e.score))
            .collect::<Vec<_>>()
            .join(", ")
    );
    debug_assert_eq!(report.len(), ComponentCategory::ALL.len() + 2);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{particle_defaults, sample_defaults, ReferenceData};

    #[test]
    fn thresholds() {
        assert_eq!(level_for_score(85.0), CompatibilityLevel::Good);
        assert_eq!(level_for_score(84.9), CompatibilityLevel::Warning);
        assert_eq!(level_for_score(70.0), CompatibilityLevel::Warning);
        assert_eq!(level_for_score(69.9), CompatibilityLevel::Poor);
    }

    #[test]
    fn glass_fiber_pads_match_well() {
        let reference = ReferenceData::builtin();
        let sample_pad = reference
            .get_material(ComponentCategory::SamplePad, "glass-fiber-standard")
            .unwrap();
        let conjugate = reference
            .get_material(ComponentCategory::ConjugatePad, "glass-fiber")
            .unwrap();
        let entry = analyze_pair_compatibility(sample_pad, conjugate);
        // pores 25/20, flow 65/40 = 1.625, shared surfactant
        assert_eq!(entry.score, 98.0);
        assert_eq!(entry.level, CompatibilityLevel::Good);
        assert_eq!(entry.title, "Sample Pad ↔ Conjugate Pad");
    }

    #[test]
    fn large_pore_mismatch_caps_level_at_warning() {
        let reference = ReferenceData::builtin();
        let mut coarse = reference
            .get_material(ComponentCategory::ConjugatePad, "glass-fiber")
            .unwrap()
            .clone();
        coarse.pore_size_um = Some(60.0);
        coarse.flow_time_s = Some(110.0);
        let membrane = reference
            .get_material(ComponentCategory::Membrane, "hi-flow-plus-120")
            .unwrap();
        let entry = analyze_pair_compatibility(&coarse, membrane);
        // 85 - 15 + 5 + 3
        assert_eq!(entry.score, 78.0);
        assert_eq!(entry.level, CompatibilityLevel::Warning);
    }

    #[test]
    fn absorbent_pair_without_pore_data() {
        let reference = ReferenceData::builtin();
        let membrane = reference
            .get_material(ComponentCategory::Membrane, "prima-40")
            .unwrap();
        let cotton = reference
            .get_material(ComponentCategory::AbsorbentPad, "cotton")
            .unwrap();
        let entry = analyze_pair_compatibility(membrane, cotton);
        assert_eq!(entry.score, 85.0);
        assert_eq!(entry.details, vec!["Standard compatibility expected".to_string()]);
    }

    #[test]
    fn blood_with_gold_is_a_warning() {
        let particle = particle_defaults(&ParticleType::GoldNano);
        let sample = sample_defaults(&SampleType::Blood);
        let entry = analyze_particle_sample(&particle, &sample);
        // 80 - 10 + 5 + 5
        assert_eq!(entry.score, 80.0);
        assert_eq!(entry.level, CompatibilityLevel::Warning);
    }

    #[test]
    fn forced_warning_never_upgrades_a_poor_score() {
        let particle = particle_defaults(&ParticleType::Other("unknown".to_string()));
        let mut sample = sample_defaults(&SampleType::Water);
        sample.ph = 3.0;
        sample.ionic_strength_mm = 500.0;
        let entry = analyze_particle_sample(&particle, &sample);
        // 80 - 15 - 10
        assert_eq!(entry.score, 55.0);
        assert_eq!(entry.level, CompatibilityLevel::Poor);
    }

    #[test]
    fn year_old_quantum_dots_exceed_shelf_life() {
        let particle = particle_defaults(&ParticleType::QuantumDots);
        let environment = EnvironmentSpec {
            temperature_c: 25.0,
            humidity_pct: 50.0,
            storage_age: Some(StorageAge::Year),
        };
        let entry = analyze_environment(&environment, &particle);
        // 85 + 10 + 5 - 12; 12 months is not beyond a 12-month shelf life
        assert_eq!(entry.score, 88.0);

        let particle = particle_defaults(&ParticleType::Other("unknown".to_string()));
        let mut short_lived = particle;
        short_lived.shelf_life_months = 6.0;
        let entry = analyze_environment(&environment, &short_lived);
        assert_eq!(entry.score, 78.0);
    }

    #[test]
    fn report_has_six_entries_in_order() {
        let reference = ReferenceData::builtin();
        let design = reference.default_design();
        let strip = reference.resolve_strip(&design.components).unwrap();
        let report = analyze_compatibility(&design, &strip);
        let titles: Vec<&str> = report.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Sample Pad ↔ Conjugate Pad",
                "Conjugate Pad ↔ Membrane",
                "Membrane ↔ Absorbent Pad",
                "Particle-Sample Compatibility",
                "Temperature Effect",
                "Manufacturability",
            ]
        );
    }

    #[test]
    fn thin_membrane_and_maximum_target_lower_manufacturability() {
        let reference = ReferenceData::builtin();
        let mut design = reference.default_design();
        design.select_material(ComponentCategory::Membrane, "prima-40");
        design.set_sensitivity_target(SensitivityTarget::Maximum);
        let strip = reference.resolve_strip(&design.components).unwrap();
        assert_eq!(analyze_manufacturing(&design, &strip).score, 75.0);
    }
}
