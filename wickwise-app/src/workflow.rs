use crate::{export, plotting};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use wickwise_core::{
    logger::RunLogger,
    optimize::{self, OptimizationOutcome},
    reference::{particle_factors, sample_impact_note, surface_tension_advisory, viscosity_advisory},
    snapshot,
    sweep::{self, SweepPoint},
    SimulationEngine,
};
use wickwise_schemas::{
    compatibility::{CompatibilityLevel, CompatibilityReport},
    design::DesignState,
    environment::StorageAge,
    material::ComponentCategory,
    particle::ParticleType,
    results::DesignOutput,
    sample::SampleType,
};

/// Where a design comes from, plus command-line overrides applied on top.
#[derive(Debug, Clone, Default)]
pub struct DesignSource {
    pub design_file: Option<PathBuf>,
    pub template: Option<String>,
    pub sample: Option<SampleType>,
    pub particle: Option<ParticleType>,
    pub particle_size_nm: Option<f64>,
    pub ph: Option<f64>,
    pub viscosity_cp: Option<f64>,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub storage: Option<StorageAge>,
}

/// Builds the working design: file or template or the default strip, then
/// overrides in a fixed order (matrix and chemistry first, then values).
pub fn resolve_design(engine: &SimulationEngine, source: &DesignSource) -> Result<DesignState> {
    let reference = engine.reference();
    let mut design = match (&source.design_file, &source.template) {
        (Some(_), Some(_)) => bail!("--design and --template are mutually exclusive"),
        (Some(path), None) => snapshot::load_design(reference, path)
            .with_context(|| format!("Failed to load design from {:?}", path))?,
        (None, Some(id)) => reference.get_template(id)?.design.clone(),
        (None, None) => reference.default_design(),
    };

    if let Some(sample_type) = &source.sample {
        println!("{}", sample_impact_note(sample_type));
        reference.apply_sample_type(&mut design, sample_type.clone());
    }
    if let Some(particle_type) = &source.particle {
        reference.apply_particle_type(&mut design, particle_type.clone());
    }
    if let Some(size) = source.particle_size_nm {
        design.set_particle_size(size);
    }
    if let Some(ph) = source.ph {
        design.set_ph(ph);
    }
    if let Some(viscosity) = source.viscosity_cp {
        design.set_viscosity(viscosity);
    }
    if let Some(temperature) = source.temperature_c {
        design.set_temperature(temperature);
    }
    if let Some(humidity) = source.humidity_pct {
        design.set_humidity(humidity);
    }
    if source.storage.is_some() {
        design.set_storage_age(source.storage);
    }
    Ok(design)
}

pub fn print_design(design: &DesignState) {
    println!("\n--- [Design] ---");
    for category in ComponentCategory::ALL {
        println!(
            "  {:<14} {}",
            category.display_name(),
            design.components.get(category).unwrap_or("(none)")
        );
    }
    let factors = particle_factors(&design.particle.particle_type);
    println!(
        "  {:<14} {} {} nm, {} loading ({})",
        "Particles",
        design.particle.particle_type,
        design.particle.size_nm,
        design.particle.concentration,
        factors.readout
    );
    println!(
        "  {:<14} {} (pH {:.1}, {:.2} cP, {:.1} mN/m)",
        "Sample",
        design.sample.sample_type,
        design.sample.ph,
        design.sample.viscosity_cp,
        design.sample.surface_tension_mn_m
    );
    let storage = design.environment.storage_age.map_or("not set".to_string(), |s| s.to_string());
    println!(
        "  {:<14} {} °C, {}% RH, storage {}",
        "Environment", design.environment.temperature_c, design.environment.humidity_pct, storage
    );
    println!("  {:<14} {}", "Target", design.targets.sensitivity);

    for advisory in [
        viscosity_advisory(design.sample.viscosity_cp),
        surface_tension_advisory(design.sample.surface_tension_mn_m),
    ]
    .into_iter()
    .flatten()
    {
        println!("  Note: {}", advisory);
    }
}

pub fn print_output(output: &DesignOutput) {
    let (results, costs) = (&output.results, &output.costs);
    println!("\n--- [Predicted Performance] ---");
    println!("  Flow rate:     {:>8.2} mm/min", results.flow_rate);
    println!("  Flow time:     {:>8.1} min", results.flow_time);
    println!("  Wicking rate:  {:>8.3} mm/s", results.wicking_rate);
    println!("  Sensitivity:   {:>8.1} %", results.sensitivity * 100.0);
    println!("  Specificity:   {:>8.1} %", results.specificity * 100.0);
    println!("  Stability:     {:>8.1} %", results.stability * 100.0);

    println!("\n--- [Cost per Test] ---");
    println!("  Materials:      ${:.3}", costs.materials);
    println!("  Manufacturing:  ${:.3}", costs.manufacturing);
    println!("  Packaging:      ${:.3}", costs.packaging);
    println!("  QC:             ${:.3}", costs.qc);
    println!("  ------------------------");
    println!("  Total:          ${:.3}", costs.total);
}

pub fn run_simulation(engine: &SimulationEngine, design: &DesignState) -> Result<DesignOutput> {
    print_design(design);
    let output = engine.recompute(design)?;
    print_output(&output);
    Ok(output)
}

pub fn print_templates(engine: &SimulationEngine) -> Result<()> {
    println!("\n--- [Validated Templates] ---");
    for template in engine.reference().list_templates() {
        let output = engine.recompute(&template.design)?;
        println!("\n{} ({})", template.name, template.template_id);
        println!("  {}", template.reference);
        println!(
            "  Documented: {:.1} min, LOD {} {}, clinical sensitivity {:.1}%, specificity {:.1}%",
            template.performance.flow_time_min,
            template.performance.lod,
            template.performance.lod_unit,
            template.clinical_sensitivity * 100.0,
            template.clinical_specificity * 100.0
        );
        println!(
            "  Predicted:  {:.1} min, sensitivity {:.1}%, specificity {:.1}%, ${:.3}/test",
            output.results.flow_time,
            output.results.sensitivity * 100.0,
            output.results.specificity * 100.0,
            output.costs.total
        );
    }
    Ok(())
}

pub fn print_materials(engine: &SimulationEngine, category: Option<ComponentCategory>) {
    let categories: Vec<ComponentCategory> = match category {
        Some(category) => vec![category],
        None => ComponentCategory::ALL.to_vec(),
    };
    for category in categories {
        println!("\n--- [{}] ---", category.display_name());
        for material in engine.reference().materials(category) {
            let flow = material
                .flow_time_s
                .map_or(String::from("-"), |t| format!("{} s/4 cm", t));
            println!(
                "  {:<24} {:<22} ${:<6.3} {:<12} {}",
                material.material_id, material.manufacturer, material.cost, flow, material.description
            );
        }
    }
}

pub fn print_compatibility(report: &CompatibilityReport) {
    println!("\n--- [Compatibility Analysis] ---");
    for entry in report {
        let marker = match entry.level {
            CompatibilityLevel::Good => "OK",
            CompatibilityLevel::Warning => "!!",
            CompatibilityLevel::Poor => "XX",
        };
        println!("\n[{}] {} - {:.0}% ({})", marker, entry.title, entry.score, entry.level);
        println!("     {}", entry.description);
        for detail in &entry.details {
            println!("     {}", detail);
        }
    }
    let worst = report.iter().map(|e| e.level).min();
    if let Some(level) = worst {
        println!("\nOverall: {}", level);
    }
}

pub fn run_compatibility(engine: &SimulationEngine, design: &DesignState) -> Result<CompatibilityReport> {
    let report = engine.analyze_compatibility(design)?;
    print_compatibility(&report);
    Ok(report)
}

pub fn run_optimization(
    engine: &SimulationEngine,
    design: &DesignState,
    output_dir: &Path,
) -> Result<OptimizationOutcome> {
    println!("\n--- [Optimizer] ---");
    let outcome = optimize::optimize_design(engine, design)?;
    if outcome.steps.is_empty() {
        println!("  Design already follows every recommendation.");
    }
    for (i, step) in outcome.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    let improvement = &outcome.improvement;
    println!(
        "\n  Sensitivity: {:.1}% -> {:.1}% ({:+.1}%)",
        improvement.sensitivity.original * 100.0,
        improvement.sensitivity.optimized * 100.0,
        improvement.sensitivity.percent
    );
    println!(
        "  Specificity: {:.1}% -> {:.1}% ({:+.1}%)",
        improvement.specificity.original * 100.0,
        improvement.specificity.optimized * 100.0,
        improvement.specificity.percent
    );
    println!(
        "  Flow time:   {:.1} -> {:.1} min",
        improvement.flow_time.original, improvement.flow_time.optimized
    );
    println!("\n{}", improvement.summary());

    let log_path = output_dir.join("optimization.csv");
    let log_name = log_path.display().to_string();
    let mut logger = RunLogger::create(&log_name)?;
    logger.log_output("original", design, &outcome.before)?;
    logger.log_output("optimized", &outcome.design, &outcome.after)?;
    export::write_design_files(output_dir, "optimized", &outcome.design, Some(&outcome.after))?;
    export::write_json(&output_dir.join("optimization.json"), &outcome)?;
    Ok(outcome)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SweepAxis {
    Temperature,
    Humidity,
    Presets,
}

pub fn run_sweep(
    engine: &SimulationEngine,
    design: &DesignState,
    axis: SweepAxis,
    values: &[f64],
    output_dir: &Path,
) -> Result<Vec<SweepPoint>> {
    let (points, x_label) = match axis {
        SweepAxis::Temperature => (sweep::sweep_temperature(engine, design, values)?, "Temperature (°C)"),
        SweepAxis::Humidity => (sweep::sweep_humidity(engine, design, values)?, "Relative humidity (%)"),
        SweepAxis::Presets => (sweep::evaluate_environment_presets(engine, design)?, "Preset"),
    };

    println!("\n--- [Sweep] ---");
    println!(
        "  {:<14} {:>10} {:>12} {:>12} {:>10}",
        "Point", "Flow (min)", "Sensitivity", "Specificity", "Stability"
    );
    for point in &points {
        let results = &point.output.results;
        println!(
            "  {:<14} {:>10.2} {:>11.1}% {:>11.1}% {:>9.1}%",
            point.label,
            results.flow_time,
            results.sensitivity * 100.0,
            results.specificity * 100.0,
            results.stability * 100.0
        );
    }

    let log_path = output_dir.join("sweep.csv");
    let mut logger = RunLogger::create(&log_path.display().to_string())?;
    for point in &points {
        let mut variant = design.clone();
        variant.set_temperature(point.temperature_c);
        variant.set_humidity(point.humidity_pct);
        logger.log_output(&point.label, &variant, &point.output)?;
    }

    if axis == SweepAxis::Presets {
        plotting::plot_preset_comparison(output_dir, &points)?;
    } else {
        let xs: Vec<f64> = match axis {
            SweepAxis::Humidity => points.iter().map(|p| p.humidity_pct).collect(),
            _ => points.iter().map(|p| p.temperature_c).collect(),
        };
        plotting::plot_sweep(output_dir, x_label, &xs, &points)?;
    }
    Ok(points)
}

pub fn run_export(engine: &SimulationEngine, design: &DesignState, output_dir: &Path) -> Result<()> {
    let output = engine.recompute(design)?;
    export::write_design_files(output_dir, "design", design, Some(&output))?;
    let report = engine.analyze_compatibility(design)?;
    export::write_json(&output_dir.join("compatibility.json"), &report)?;
    println!("\nExported design, summary and compatibility report to '{}'.", output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wickwise_core::WickwiseError;

    #[test]
    fn compatibility_rejects_out_of_range_inputs() {
        let engine = SimulationEngine::default();
        let mut design = engine.reference().default_design();
        design.set_ph(-3.0);
        design.set_humidity(500.0);

        let err = run_compatibility(&engine, &design).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WickwiseError>(),
            Some(WickwiseError::InvalidInput { field, .. }) if field == "sample.ph"
        ));
    }

    #[test]
    fn compatibility_reports_every_section_for_a_valid_design() {
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        assert_eq!(run_compatibility(&engine, &design).unwrap().len(), 6);
    }
}
