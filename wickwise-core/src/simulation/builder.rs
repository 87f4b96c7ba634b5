use crate::{
    error::Result,
    reference::ReferenceData,
    simulation::{engine::SimulationEngine, flow::FlowConstants},
    validation,
};
use wickwise_schemas::material::MaterialSpec;

/// A fluent builder for constructing a `SimulationEngine`.
///
/// Starts from the built-in reference data and default flow constants; both
/// can be replaced, and extra library materials layered on top.
#[derive(Default)]
pub struct SimulationBuilder {
    reference: Option<ReferenceData>,
    constants: Option<FlowConstants>,
    materials: Vec<MaterialSpec>,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the built-in reference data.
    pub fn with_reference(mut self, reference: ReferenceData) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_constants(mut self, constants: FlowConstants) -> Self {
        self.constants = Some(constants);
        self
    }

    /// Adds materials over the reference library. Entries with an existing
    /// category and id replace the library entry.
    pub fn with_materials(mut self, materials: Vec<MaterialSpec>) -> Self {
        self.materials.extend(materials);
        self
    }

    /// Consumes the builder and returns a configured `SimulationEngine`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the flow constants or any added material
    /// fail validation.
    pub fn build(self) -> Result<SimulationEngine> {
        let constants = self.constants.unwrap_or_default();
        validation::validate_constants(&constants)?;

        let mut reference = self.reference.unwrap_or_default();
        for material in self.materials {
            let id = material.material_id.clone();
            let category = material.category;
            if reference.insert_material(material)?.is_some() {
                log::info!("Library material '{}' ({}) overridden", id, category);
            }
        }

        Ok(SimulationEngine {
            reference,
            constants,
        })
    }
}
