use serde::{Deserialize, Serialize};

/// Capillary transport through the strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowDynamics {
    /// mm/min
    pub flow_rate: f64,
    /// Minutes to traverse the full strip.
    pub flow_time: f64,
    /// Initial capillary advance (mm/s).
    pub wicking_rate: f64,
}

/// Performance metrics derived from a design. Scores are fractions in 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub flow_rate: f64,
    pub flow_time: f64,
    pub wicking_rate: f64,
    pub sensitivity: f64,
    pub specificity: f64,
    pub stability: f64,
}

impl SimulationResults {
    pub fn flow_dynamics(&self) -> FlowDynamics {
        FlowDynamics {
            flow_rate: self.flow_rate,
            flow_time: self.flow_time,
            wicking_rate: self.wicking_rate,
        }
    }
}

/// Per-test cost lines (USD). `total` is always the sum of the other lines.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub materials: f64,
    pub manufacturing: f64,
    pub packaging: f64,
    pub qc: f64,
    pub total: f64,
}

/// The output of one full recompute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignOutput {
    pub results: SimulationResults,
    pub costs: CostBreakdown,
}
