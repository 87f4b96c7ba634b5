use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use wickwise_core::{logger::RunLogger, snapshot};
use wickwise_schemas::{design::DesignState, results::DesignOutput};

/// Creates `<base>/<kind>_<UTC timestamp>` for one command's artifacts.
pub fn create_run_dir(base: &Path, kind: &str) -> Result<PathBuf> {
    let dir = base.join(format!("{}_{}", kind, chrono::Utc::now().format("%Y%m%d_%H%M%S")));
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    Ok(dir)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))
}

/// Writes `<stem>.json` (snapshot) and `<stem>_summary.csv` (one row).
pub fn write_design_files(
    output_dir: &Path,
    stem: &str,
    design: &DesignState,
    output: Option<&DesignOutput>,
) -> Result<()> {
    let exported_at = chrono::Utc::now().to_rfc3339();
    let snapshot_path = output_dir.join(format!("{}.json", stem));
    snapshot::write_snapshot(&snapshot_path, &snapshot::snapshot(design, output, exported_at))?;

    if let Some(output) = output {
        let summary_path = output_dir.join(format!("{}_summary.csv", stem));
        let mut logger = RunLogger::create(&summary_path.display().to_string())?;
        logger.log_output(stem, design, output)?;
    }
    log::info!("Wrote {:?}", snapshot_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wickwise_core::{logger::read_run_log, SimulationEngine};

    #[test]
    fn design_files_reload() {
        let base = std::env::temp_dir().join(format!("wickwise-export-{}", std::process::id()));
        let dir = create_run_dir(&base, "test").unwrap();
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        let output = engine.recompute(&design).unwrap();

        write_design_files(&dir, "design", &design, Some(&output)).unwrap();

        let loaded = snapshot::load_design(engine.reference(), &dir.join("design.json")).unwrap();
        assert_eq!(loaded, design);
        let rows = read_run_log(&dir.join("design_summary.csv").display().to_string()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "design");
    }
}
