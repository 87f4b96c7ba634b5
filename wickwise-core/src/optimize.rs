//! Rule-based design optimizer.
//!
//! Applies a fixed sequence of recommendations to a copy of the caller's
//! design and reports how the predicted performance moved.

use crate::{error::Result, simulation::engine::SimulationEngine};
use serde::Serialize;
use std::fmt;
use wickwise_schemas::{
    design::{DesignState, SensitivityTarget},
    material::ComponentCategory,
    results::DesignOutput,
    sample::SampleType,
};

/// Flow times inside this window (minutes) are considered readable.
pub const TARGET_FLOW_WINDOW_MIN: (f64, f64) = (5.0, 15.0);
pub const OPTIMAL_TEMPERATURE_C: f64 = 25.0;
pub const OPTIMAL_HUMIDITY_PCT: f64 = 50.0;

pub fn recommended_membrane(sample_type: &SampleType) -> &'static str {
    match sample_type {
        SampleType::Blood => "unisart-cnn-95",
        SampleType::Serum | SampleType::Plasma => "hi-flow-plus-90",
        SampleType::Saliva | SampleType::Urine => "prima-40",
        SampleType::Water | SampleType::Other(_) => "hi-flow-plus-120",
    }
}

pub fn recommended_sample_pad(sample_type: &SampleType) -> &'static str {
    match sample_type {
        SampleType::Blood => "glass-fiber-high-flow",
        SampleType::Urine => "polyester",
        SampleType::Water => "cellulose",
        _ => "glass-fiber-standard",
    }
}

/// Conjugate pad to use for a sensitivity target, if the target calls for a
/// specific one.
pub fn recommended_conjugate_pad(target: SensitivityTarget) -> Option<&'static str> {
    match target {
        SensitivityTarget::High | SensitivityTarget::Maximum => Some("synthetic-pad"),
        SensitivityTarget::Low | SensitivityTarget::Medium => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum OptimizationStep {
    ParticleSize {
        from_nm: f64,
        to_nm: f64,
    },
    Material {
        category: ComponentCategory,
        from: Option<String>,
        to: String,
    },
    Environment {
        temperature_c: f64,
        humidity_pct: f64,
    },
}

impl fmt::Display for OptimizationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationStep::ParticleSize { from_nm, to_nm } => {
                write!(f, "Particle size {} nm -> {} nm", from_nm, to_nm)
            }
            OptimizationStep::Material { category, from, to } => write!(
                f,
                "{}: {} -> {}",
                category.display_name(),
                from.as_deref().unwrap_or("(none)"),
                to
            ),
            OptimizationStep::Environment {
                temperature_c,
                humidity_pct,
            } => write!(f, "Environment set to {} °C / {}% RH", temperature_c, humidity_pct),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricChange {
    pub original: f64,
    pub optimized: f64,
    pub percent: f64,
}

impl MetricChange {
    fn between(original: f64, optimized: f64) -> Self {
        Self {
            original,
            optimized,
            percent: (optimized - original) / original * 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowTimeChange {
    pub original: f64,
    pub optimized: f64,
    /// The optimized time is readable and the original was not.
    pub better: bool,
}

fn in_flow_window(flow_time: f64) -> bool {
    (TARGET_FLOW_WINDOW_MIN.0..=TARGET_FLOW_WINDOW_MIN.1).contains(&flow_time)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Improvement {
    pub sensitivity: MetricChange,
    pub specificity: MetricChange,
    pub flow_time: FlowTimeChange,
}

impl Improvement {
    pub fn between(before: &DesignOutput, after: &DesignOutput) -> Self {
        let (old, new) = (&before.results, &after.results);
        Self {
            sensitivity: MetricChange::between(old.sensitivity, new.sensitivity),
            specificity: MetricChange::between(old.specificity, new.specificity),
            flow_time: FlowTimeChange {
                original: old.flow_time,
                optimized: new.flow_time,
                better: in_flow_window(new.flow_time) && !in_flow_window(old.flow_time),
            },
        }
    }

    pub fn summary(&self) -> String {
        let mut message = String::from("Design optimized!");
        if self.sensitivity.percent > 0.0 {
            message.push_str(&format!(" Sensitivity improved by {:.1}%.", self.sensitivity.percent));
        }
        if self.flow_time.better {
            message.push_str(" Flow time optimized.");
        }
        message
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationOutcome {
    pub design: DesignState,
    pub steps: Vec<OptimizationStep>,
    pub before: DesignOutput,
    pub after: DesignOutput,
    pub improvement: Improvement,
}

fn apply_material(
    engine: &SimulationEngine,
    design: &mut DesignState,
    steps: &mut Vec<OptimizationStep>,
    category: ComponentCategory,
    material_id: &str,
) -> Result<()> {
    let current = design.components.get(category).map(str::to_string);
    if current.as_deref() == Some(material_id) {
        return Ok(());
    }
    engine.reference().select_material(design, category, material_id)?;
    steps.push(OptimizationStep::Material {
        category,
        from: current,
        to: material_id.to_string(),
    });
    Ok(())
}

/// Returns an optimized copy of `design`; the input is left untouched.
///
/// Steps, in order: particle size to the type's optimum, membrane and sample
/// pad by sample matrix, conjugate pad by sensitivity target, environment to
/// 25 °C / 50 % RH. Only steps that changed something are listed.
///
/// # Errors
///
/// Fails if the original design cannot be computed, or a recommended material
/// is missing from the engine's library.
pub fn optimize_design(engine: &SimulationEngine, design: &DesignState) -> Result<OptimizationOutcome> {
    let before = engine.recompute(design)?;
    let mut optimized = design.clone();
    let mut steps = Vec::new();

    let optimum = optimized.particle.optimal_size.optimum_nm;
    if optimized.particle.size_nm != optimum {
        steps.push(OptimizationStep::ParticleSize {
            from_nm: optimized.particle.size_nm,
            to_nm: optimum,
        });
        optimized.set_particle_size(optimum);
    }

    let sample_type = optimized.sample.sample_type.clone();
    apply_material(
        engine,
        &mut optimized,
        &mut steps,
        ComponentCategory::Membrane,
        recommended_membrane(&sample_type),
    )?;
    if let Some(pad) = recommended_conjugate_pad(optimized.targets.sensitivity) {
        apply_material(engine, &mut optimized, &mut steps, ComponentCategory::ConjugatePad, pad)?;
    }
    apply_material(
        engine,
        &mut optimized,
        &mut steps,
        ComponentCategory::SamplePad,
        recommended_sample_pad(&sample_type),
    )?;

    if optimized.environment.temperature_c != OPTIMAL_TEMPERATURE_C
        || optimized.environment.humidity_pct != OPTIMAL_HUMIDITY_PCT
    {
        optimized.set_temperature(OPTIMAL_TEMPERATURE_C);
        optimized.set_humidity(OPTIMAL_HUMIDITY_PCT);
        steps.push(OptimizationStep::Environment {
            temperature_c: OPTIMAL_TEMPERATURE_C,
            humidity_pct: OPTIMAL_HUMIDITY_PCT,
        });
    }

    let after = engine.recompute(&optimized)?;
    let improvement = Improvement::between(&before, &after);
    for step in &steps {
        log::debug!("Optimizer: {}", step);
    }

    Ok(OptimizationOutcome {
        design: optimized,
        steps,
        before,
        after,
        improvement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_design_gets_three_steps() {
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        let outcome = optimize_design(&engine, &design).unwrap();

        assert_eq!(outcome.steps.len(), 3);
        assert_eq!(outcome.design.components.conjugate_pad.as_deref(), Some("synthetic-pad"));
        assert_eq!(outcome.design.components.sample_pad.as_deref(), Some("cellulose"));
        assert_eq!(outcome.design.environment.humidity_pct, 50.0);
        assert_eq!(design, engine.reference().default_design());
    }

    #[test]
    fn blood_design_moves_to_blood_materials() {
        let engine = SimulationEngine::default();
        let mut design = engine.reference().default_design();
        engine.reference().apply_sample_type(&mut design, SampleType::Blood);
        design.set_particle_size(55.0);

        let outcome = optimize_design(&engine, &design).unwrap();
        assert_eq!(outcome.design.particle.size_nm, 40.0);
        assert_eq!(outcome.design.components.membrane.as_deref(), Some("unisart-cnn-95"));
        assert_eq!(
            outcome.design.components.sample_pad.as_deref(),
            Some("glass-fiber-high-flow")
        );
        assert!(matches!(outcome.steps[0], OptimizationStep::ParticleSize { .. }));
    }

    #[test]
    fn optimizing_twice_is_a_no_op() {
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        let first = optimize_design(&engine, &design).unwrap();
        let second = optimize_design(&engine, &first.design).unwrap();
        assert!(second.steps.is_empty());
        assert_eq!(second.before, second.after);
        assert_eq!(second.improvement.sensitivity.percent, 0.0);
    }

    #[test]
    fn flow_time_better_only_when_entering_the_window() {
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        let mut before = engine.recompute(&design).unwrap();
        let after = before;
        before.results.flow_time = 22.0;
        assert!(Improvement::between(&before, &after).flow_time.better);
        assert!(!Improvement::between(&after, &after).flow_time.better);
    }

    #[test]
    fn low_target_keeps_conjugate_pad() {
        assert_eq!(recommended_conjugate_pad(SensitivityTarget::Low), None);
        assert_eq!(recommended_sample_pad(&SampleType::Other("swab".into())), "glass-fiber-standard");
    }
}
