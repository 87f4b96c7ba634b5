//! What-if sweeps over the operating environment.
//!
//! Each point is computed on a private clone of the caller's design.

use crate::{error::Result, error::WickwiseError, simulation::engine::SimulationEngine};
use serde::Serialize;
use wickwise_schemas::{design::DesignState, results::DesignOutput};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub label: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub output: DesignOutput,
}

/// A named operating condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentPreset {
    pub name: &'static str,
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

pub const ENVIRONMENT_PRESETS: [EnvironmentPreset; 4] = [
    EnvironmentPreset {
        name: "refrigerated",
        temperature_c: 4.0,
        humidity_pct: 40.0,
    },
    EnvironmentPreset {
        name: "room",
        temperature_c: 25.0,
        humidity_pct: 50.0,
    },
    EnvironmentPreset {
        name: "tropical",
        temperature_c: 35.0,
        humidity_pct: 85.0,
    },
    EnvironmentPreset {
        name: "desert",
        temperature_c: 40.0,
        humidity_pct: 15.0,
    },
];

pub fn find_preset(name: &str) -> Result<&'static EnvironmentPreset> {
    ENVIRONMENT_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| WickwiseError::unknown("environment presets", name))
}

/// Evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Result<Vec<f64>> {
    if steps < 2 {
        return Err(WickwiseError::invalid("steps", steps, "a sweep needs at least two points"));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(WickwiseError::invalid("range", format!("{}..{}", start, end), "must be finite"));
    }
    let step = (end - start) / (steps - 1) as f64;
    Ok((0..steps).map(|i| start + step * i as f64).collect())
}

fn evaluate(
    engine: &SimulationEngine,
    design: &DesignState,
    label: String,
    apply: impl FnOnce(&mut DesignState),
) -> Result<SweepPoint> {
    let mut variant = design.clone();
    apply(&mut variant);
    let output = engine.recompute(&variant)?;
    Ok(SweepPoint {
        label,
        temperature_c: variant.environment.temperature_c,
        humidity_pct: variant.environment.humidity_pct,
        output,
    })
}

pub fn sweep_temperature(
    engine: &SimulationEngine,
    design: &DesignState,
    temperatures_c: &[f64],
) -> Result<Vec<SweepPoint>> {
    temperatures_c
        .iter()
        .map(|&t| evaluate(engine, design, format!("{} °C", t), |d| d.set_temperature(t)))
        .collect()
}

pub fn sweep_humidity(
    engine: &SimulationEngine,
    design: &DesignState,
    humidities_pct: &[f64],
) -> Result<Vec<SweepPoint>> {
    humidities_pct
        .iter()
        .map(|&h| evaluate(engine, design, format!("{}% RH", h), |d| d.set_humidity(h)))
        .collect()
}

/// Runs the design under every named preset. Storage age is left as the
/// design has it.
pub fn evaluate_environment_presets(engine: &SimulationEngine, design: &DesignState) -> Result<Vec<SweepPoint>> {
    ENVIRONMENT_PRESETS
        .iter()
        .map(|preset| {
            evaluate(engine, design, preset.name.to_string(), |d| {
                d.set_temperature(preset.temperature_c);
                d.set_humidity(preset.humidity_pct);
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        let points = linspace(15.0, 35.0, 5).unwrap();
        assert_eq!(points, vec![15.0, 20.0, 25.0, 30.0, 35.0]);
        assert!(linspace(0.0, 1.0, 1).is_err());
    }

    #[test]
    fn warmer_strips_run_faster() {
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        let points = sweep_temperature(&engine, &design, &[15.0, 25.0, 35.0]).unwrap();
        assert!(points
            .windows(2)
            .all(|w| w[1].output.results.flow_time < w[0].output.results.flow_time));
        assert_eq!(design, engine.reference().default_design());
    }

    #[test]
    fn humidity_only_moves_stability() {
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        let points = sweep_humidity(&engine, &design, &[10.0, 50.0, 90.0]).unwrap();
        assert_eq!(points[0].output.results.flow_rate, points[2].output.results.flow_rate);
        assert!(points[1].output.results.stability > points[0].output.results.stability);
        assert!(points[1].output.results.stability > points[2].output.results.stability);
    }

    #[test]
    fn presets_in_declared_order() {
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        let points = evaluate_environment_presets(&engine, &design).unwrap();
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["refrigerated", "room", "tropical", "desert"]);
        assert_eq!(find_preset("Tropical").unwrap().humidity_pct, 85.0);
        assert!(find_preset("arctic").is_err());
    }

    #[test]
    fn invalid_point_fails_the_whole_sweep() {
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        assert!(sweep_humidity(&engine, &design, &[50.0, 120.0]).is_err());
    }
}
