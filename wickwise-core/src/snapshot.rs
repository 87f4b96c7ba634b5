//! Design files and JSON snapshots.
//!
//! A design file is a compact [`DesignRequest`] in YAML or JSON. A snapshot
//! is a complete [`DesignState`] plus the results it produced when exported.
//! Results stored in a snapshot are informational; loading always yields a
//! design that must be recomputed.

use crate::{
    error::{Result, WickwiseError},
    reference::ReferenceData,
    validation,
};
use std::{fs, path::Path};
use wickwise_schemas::{
    design::DesignState,
    file_formats::{DesignRequest, DesignSnapshot},
    results::DesignOutput,
};

pub const APPLICATION: &str = "WickWise LFA Designer";
pub const SNAPSHOT_VERSION: &str = "1.0";

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| WickwiseError::FileIO(path.display().to_string(), e))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

pub fn snapshot(design: &DesignState, output: Option<&DesignOutput>, exported_at: impl Into<String>) -> DesignSnapshot {
    DesignSnapshot {
        exported_at: exported_at.into(),
        version: SNAPSHOT_VERSION.to_string(),
        application: APPLICATION.to_string(),
        design: design.clone(),
        results: output.map(|o| o.results),
        costs: output.map(|o| o.costs),
    }
}

pub fn write_snapshot(path: &Path, snapshot: &DesignSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).map_err(|e| WickwiseError::FileIO(path.display().to_string(), e))
}

pub fn read_snapshot(path: &Path) -> Result<DesignSnapshot> {
    let snapshot: DesignSnapshot = serde_json::from_str(&read_to_string(path)?)?;
    if snapshot.version != SNAPSHOT_VERSION {
        log::warn!(
            "Snapshot {} has version {}, expected {}",
            path.display(),
            snapshot.version,
            SNAPSHOT_VERSION
        );
    }
    Ok(snapshot)
}

/// Reads a design request; `.json` files are parsed as JSON, anything else as
/// YAML.
pub fn read_design_request(path: &Path) -> Result<DesignRequest> {
    let content = read_to_string(path)?;
    if is_json(path) {
        Ok(serde_json::from_str(&content)?)
    } else {
        serde_yaml::from_str(&content).map_err(|e| WickwiseError::YamlParsing(path.display().to_string(), e))
    }
}

/// Loads a design from either a request file or an exported snapshot.
///
/// JSON documents carrying an `exported_at` field are treated as snapshots.
/// Snapshot materials are checked against `reference` and every numeric field
/// is validated before the design is returned.
pub fn load_design(reference: &ReferenceData, path: &Path) -> Result<DesignState> {
    if is_json(path) {
        let value: serde_json::Value = serde_json::from_str(&read_to_string(path)?)?;
        if value.get("exported_at").is_some() {
            let snapshot: DesignSnapshot = serde_json::from_value(value)?;
            let strip = reference.resolve_strip(&snapshot.design.components)?;
            validation::validate_design(&snapshot.design, &strip)?;
            log::info!("Loaded snapshot exported at {}", snapshot.exported_at);
            return Ok(snapshot.design);
        }
        let request: DesignRequest = serde_json::from_value(value)?;
        return reference.design_from_request(&request);
    }
    reference.design_from_request(&read_design_request(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::SimulationEngine;
    use std::path::PathBuf;
    use wickwise_schemas::{particle::ParticleType, sample::SampleType};

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wickwise-snapshot-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn yaml_request_fills_defaults() {
        let path = scratch("request.yaml");
        fs::write(
            &path,
            r#"
components:
  sample-pad: glass-fiber-high-flow
  conjugate-pad: glass-fiber
  membrane: unisart-cnn-95
  absorbent-pad: cellulose-high-capacity
particle:
  particle_type: latex-beads
  concentration: high
sample:
  sample_type: blood
  ph: 7.3
"#,
        )
        .unwrap();

        let reference = ReferenceData::builtin();
        let design = load_design(&reference, &path).unwrap();
        assert_eq!(design.particle.particle_type, ParticleType::LatexBeads);
        assert_eq!(design.particle.size_nm, 200.0);
        assert_eq!(design.sample.sample_type, SampleType::Blood);
        assert_eq!(design.sample.ph, 7.3);
        assert_eq!(design.sample.viscosity_cp, 3.5);
    }

    #[test]
    fn snapshot_round_trip_recomputes_identically() {
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        let output = engine.recompute(&design).unwrap();
        let path = scratch("snapshot.json");
        write_snapshot(&path, &snapshot(&design, Some(&output), "2026-01-01T00:00:00Z")).unwrap();

        let loaded = load_design(engine.reference(), &path).unwrap();
        assert_eq!(loaded, design);
        assert_eq!(engine.recompute(&loaded).unwrap(), output);
        assert_eq!(read_snapshot(&path).unwrap().application, APPLICATION);
    }

    #[test]
    fn tampered_snapshot_is_rejected() {
        let engine = SimulationEngine::default();
        let mut design = engine.reference().default_design();
        design.set_humidity(140.0);
        let path = scratch("tampered.json");
        write_snapshot(&path, &snapshot(&design, None, "2026-01-01T00:00:00Z")).unwrap();
        assert!(matches!(
            load_design(engine.reference(), &path),
            Err(WickwiseError::InvalidInput { .. })
        ));
    }

    #[test]
    fn bad_yaml_names_the_file() {
        let path = scratch("broken.yaml");
        fs::write(&path, "components: [unterminated").unwrap();
        let err = read_design_request(&path).unwrap_err();
        assert!(matches!(err, WickwiseError::YamlParsing(ref file, _) if file.ends_with("broken.yaml")));
    }
}
