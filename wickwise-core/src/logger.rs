use crate::error::{Result, WickwiseError};
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::{fs, io};
use wickwise_schemas::{design::DesignState, results::DesignOutput};

/// One computed design, flattened to a CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub label: String,
    pub sample_type: String,
    pub particle_type: String,
    pub particle_size_nm: f64,
    pub membrane: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub flow_rate_mm_min: f64,
    pub flow_time_min: f64,
    pub wicking_rate_mm_s: f64,
    pub sensitivity: f64,
    pub specificity: f64,
    pub stability: f64,
    pub cost_materials: f64,
    pub cost_manufacturing: f64,
    pub cost_packaging: f64,
    pub cost_qc: f64,
    pub cost_total: f64,
}

impl RunRecord {
    pub fn new(label: &str, design: &DesignState, output: &DesignOutput) -> Self {
        let (results, costs) = (&output.results, &output.costs);
        Self {
            label: label.to_string(),
            sample_type: design.sample.sample_type.to_string(),
            particle_type: design.particle.particle_type.to_string(),
            particle_size_nm: design.particle.size_nm,
            membrane: design.components.membrane.clone().unwrap_or_default(),
            temperature_c: design.environment.temperature_c,
            humidity_pct: design.environment.humidity_pct,
            flow_rate_mm_min: results.flow_rate,
            flow_time_min: results.flow_time,
            wicking_rate_mm_s: results.wicking_rate,
            sensitivity: results.sensitivity,
            specificity: results.specificity,
            stability: results.stability,
            cost_materials: costs.materials,
            cost_manufacturing: costs.manufacturing,
            cost_packaging: costs.packaging,
            cost_qc: costs.qc,
            cost_total: costs.total,
        }
    }
}

/// Appends one row per computed design to a CSV log.
pub struct RunLogger<W: io::Write = fs::File> {
    name: String,
    writer: Writer<W>,
}

impl RunLogger<fs::File> {
    pub fn create(path: &str) -> Result<Self> {
        let writer = Writer::from_path(path).map_err(|e| WickwiseError::CsvError(path.to_string(), e))?;
        Ok(Self {
            name: path.to_string(),
            writer,
        })
    }
}

impl<W: io::Write> RunLogger<W> {
    pub fn from_writer(name: &str, inner: W) -> Self {
        Self {
            name: name.to_string(),
            writer: Writer::from_writer(inner),
        }
    }

    pub fn log(&mut self, record: &RunRecord) -> Result<()> {
        self.writer
            .serialize(record)
            .map_err(|e| WickwiseError::CsvError(self.name.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| WickwiseError::FileIO(self.name.clone(), e))
    }

    pub fn log_output(&mut self, label: &str, design: &DesignState, output: &DesignOutput) -> Result<()> {
        self.log(&RunRecord::new(label, design, output))
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        let name = self.name;
        self.writer
            .into_inner()
            .map_err(|e| WickwiseError::FileIO(name, e.into_error()))
    }
}

pub fn read_run_log(path: &str) -> Result<Vec<RunRecord>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| WickwiseError::CsvError(path.to_string(), e))?;
    reader
        .deserialize()
        .map(|row| row.map_err(|e| WickwiseError::CsvError(path.to_string(), e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::SimulationEngine;

    #[test]
    fn rows_round_trip_through_csv() {
        let engine = SimulationEngine::default();
        let design = engine.reference().default_design();
        let output = engine.recompute(&design).unwrap();

        let mut logger = RunLogger::from_writer("memory", Vec::new());
        logger.log_output("baseline", &design, &output).unwrap();
        logger.log_output("again", &design, &output).unwrap();
        let bytes = logger.into_inner().unwrap();

        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("label,sample_type,particle_type"));
        let rows: Vec<RunRecord> = csv::Reader::from_reader(text.as_bytes())
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].membrane, "hi-flow-plus-120");
        assert_eq!(rows[1].label, "again");
    }

    #[test]
    fn missing_log_file_is_a_csv_error() {
        let err = read_run_log("/nonexistent/wickwise/run.csv").unwrap_err();
        assert!(matches!(err, WickwiseError::CsvError(..)));
    }
}
