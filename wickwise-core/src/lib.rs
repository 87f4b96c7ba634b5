//! Calculation engine for parametric lateral-flow-assay strip design.
//!
//! The caller owns a [`DesignState`](wickwise_schemas::design::DesignState),
//! edits it through its setters and hands it to
//! [`SimulationEngine::recompute`] for a complete, from-scratch set of flow,
//! performance and cost figures.

pub mod analysis;
pub mod compatibility;
pub mod error;
pub mod logger;
pub mod optimize;
pub mod reference;
pub mod simulation;
pub mod snapshot;
pub mod sweep;
pub mod validation;

pub use error::{Result, WickwiseError};
pub use reference::{ReferenceData, Strip};
pub use simulation::{builder::SimulationBuilder, engine::SimulationEngine, flow::FlowConstants};
