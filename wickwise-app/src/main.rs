use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use wickwise_core::{sweep, SimulationBuilder, SimulationEngine};
use wickwise_schemas::{
    environment::StorageAge, material::ComponentCategory, particle::ParticleType, sample::SampleType,
};
use workflow::{DesignSource, SweepAxis};

mod config;
mod export;
mod plotting;
mod workflow;

#[derive(Parser)]
#[command(name = "wickwise", version)]
#[command(about = "Parametric lateral-flow-assay strip designer", long_about = None)]
struct Cli {
    /// Directory of YAML material files layered over the built-in library
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    /// Base directory for run artifacts
    #[arg(long, global = true, default_value = "./runs")]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct DesignArgs {
    /// Design request (YAML/JSON) or exported JSON snapshot
    #[arg(long, conflicts_with = "template")]
    design: Option<PathBuf>,
    /// Start from a validated template (see `wickwise templates`)
    #[arg(long)]
    template: Option<String>,
    /// Sample matrix, e.g. water, urine, saliva, serum, plasma, blood
    #[arg(long)]
    sample: Option<SampleType>,
    /// Particle label, e.g. gold-nano, latex-beads, quantum-dots
    #[arg(long)]
    particle: Option<ParticleType>,
    /// Particle diameter (nm)
    #[arg(long)]
    size: Option<f64>,
    #[arg(long)]
    ph: Option<f64>,
    /// Sample viscosity (cP)
    #[arg(long)]
    viscosity: Option<f64>,
    /// Run temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f64>,
    /// Relative humidity (%)
    #[arg(long)]
    humidity: Option<f64>,
    /// Storage age: fresh, week, month or year
    #[arg(long)]
    storage: Option<StorageAge>,
}

impl From<DesignArgs> for DesignSource {
    fn from(args: DesignArgs) -> Self {
        DesignSource {
            design_file: args.design,
            template: args.template,
            sample: args.sample,
            particle: args.particle,
            particle_size_nm: args.size,
            ph: args.ph,
            viscosity_cp: args.viscosity,
            temperature_c: args.temperature,
            humidity_pct: args.humidity,
            storage: args.storage,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute flow, performance and cost for a design
    Simulate {
        #[command(flatten)]
        design: DesignArgs,
        /// Also print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the validated templates with predicted performance
    Templates,
    /// List library materials
    Materials {
        #[arg(long)]
        category: Option<ComponentCategory>,
    },
    /// Compatibility analysis between components, sample and environment
    Compat {
        #[command(flatten)]
        design: DesignArgs,
    },
    /// Apply the rule-based optimizer and report the improvement
    Optimize {
        #[command(flatten)]
        design: DesignArgs,
    },
    /// What-if sweep over temperature, humidity or named presets
    Sweep {
        #[command(flatten)]
        design: DesignArgs,
        #[arg(long, value_enum, default_value = "temperature")]
        axis: SweepAxis,
        #[arg(long, allow_negative_numbers = true)]
        from: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        to: Option<f64>,
        #[arg(long, default_value_t = 9)]
        steps: usize,
    },
    /// Write a JSON snapshot, CSV summary and compatibility report
    Export {
        #[command(flatten)]
        design: DesignArgs,
    },
}

fn build_engine(library: Option<&Path>) -> Result<SimulationEngine> {
    let mut builder = SimulationBuilder::new();
    if let Some(dir) = library {
        let library = config::Library::load(dir)?;
        builder = builder.with_materials(library.materials);
    }
    builder.build().context("Failed to build the simulation engine")
}

fn sweep_values(axis: SweepAxis, from: Option<f64>, to: Option<f64>, steps: usize) -> Result<Vec<f64>> {
    let (default_from, default_to) = match axis {
        SweepAxis::Temperature => (15.0, 35.0),
        SweepAxis::Humidity => (10.0, 90.0),
        SweepAxis::Presets => return Ok(Vec::new()),
    };
    Ok(sweep::linspace(
        from.unwrap_or(default_from),
        to.unwrap_or(default_to),
        steps,
    )?)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("--- WickWise LFA Designer ---");
    let engine = build_engine(cli.library.as_deref())?;

    match cli.command {
        Commands::Simulate { design, json } => {
            let design = workflow::resolve_design(&engine, &design.into())?;
            let output = workflow::run_simulation(&engine, &design)?;
            if json {
                println!("\n{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Commands::Templates => workflow::print_templates(&engine)?,
        Commands::Materials { category } => workflow::print_materials(&engine, category),
        Commands::Compat { design } => {
            let design = workflow::resolve_design(&engine, &design.into())?;
            workflow::print_design(&design);
            workflow::run_compatibility(&engine, &design)?;
        }
        Commands::Optimize { design } => {
            let design = workflow::resolve_design(&engine, &design.into())?;
            let output_dir = export::create_run_dir(&cli.out_dir, "optimize")?;
            workflow::print_design(&design);
            workflow::run_optimization(&engine, &design, &output_dir)?;
            println!("\nOptimization complete. Results are in '{}'", output_dir.display());
        }
        Commands::Sweep {
            design,
            axis,
            from,
            to,
            steps,
        } => {
            let design = workflow::resolve_design(&engine, &design.into())?;
            let values = sweep_values(axis, from, to, steps)?;
            let output_dir = export::create_run_dir(&cli.out_dir, "sweep")?;
            workflow::run_sweep(&engine, &design, axis, &values, &output_dir)?;
            println!("\nSweep complete. Results are in '{}'", output_dir.display());
        }
        Commands::Export { design } => {
            let design = workflow::resolve_design(&engine, &design.into())?;
            let output_dir = export::create_run_dir(&cli.out_dir, "export")?;
            workflow::run_export(&engine, &design, &output_dir)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_sweep_with_overrides() {
        let cli = Cli::try_parse_from([
            "wickwise", "sweep", "--axis", "humidity", "--sample", "blood", "--storage", "month", "--steps", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Sweep { design, axis, steps, .. } => {
                assert_eq!(axis, SweepAxis::Humidity);
                assert_eq!(steps, 5);
                assert_eq!(design.sample, Some(SampleType::Blood));
                assert_eq!(design.storage, Some(StorageAge::Month));
            }
            _ => panic!("expected sweep"),
        }
    }

    #[test]
    fn default_sweep_ranges() {
        assert_eq!(sweep_values(SweepAxis::Temperature, None, None, 5).unwrap(), vec![15.0, 20.0, 25.0, 30.0, 35.0]);
        assert!(sweep_values(SweepAxis::Presets, None, None, 0).unwrap().is_empty());
    }

    #[test]
    fn overrides_apply_on_top_of_template() {
        let engine = SimulationEngine::default();
        let source = DesignSource {
            template: Some("pregnancy_hcg".to_string()),
            temperature_c: Some(30.0),
            ..DesignSource::default()
        };
        let design = workflow::resolve_design(&engine, &source).unwrap();
        assert_eq!(design.environment.temperature_c, 30.0);
        assert_eq!(design.sample.sample_type, SampleType::Urine);
    }
}
