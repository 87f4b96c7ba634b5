//! Read-only reference data: the material library, sample and particle tables,
//! and validated templates.

mod materials;
mod particles;
mod samples;
mod templates;

pub use particles::{particle_defaults, particle_factors, ParticleFactors, DEFAULT_PARTICLE_FACTORS};
pub use samples::{
    sample_defaults, sample_factors, sample_impact_note, surface_tension_advisory,
    viscosity_advisory, SampleFactors, DEFAULT_SAMPLE_FACTORS,
};

use crate::{
    error::{Result, WickwiseError},
    validation,
};
use std::collections::BTreeMap;
use wickwise_schemas::{
    design::{ComponentSelection, DesignState},
    file_formats::DesignRequest,
    material::{ComponentCategory, MaterialSpec},
    particle::{ParticleSpec, ParticleType},
    sample::{SampleSpec, SampleType},
    template::Template,
};

/// The four materials of a design, resolved from the library.
#[derive(Debug, Clone, Copy)]
pub struct Strip<'a> {
    pub sample_pad: &'a MaterialSpec,
    pub conjugate_pad: &'a MaterialSpec,
    pub membrane: &'a MaterialSpec,
    pub absorbent_pad: &'a MaterialSpec,
}

impl<'a> Strip<'a> {
    pub fn get(&self, category: ComponentCategory) -> &'a MaterialSpec {
        match category {
            ComponentCategory::SamplePad => self.sample_pad,
            ComponentCategory::ConjugatePad => self.conjugate_pad,
            ComponentCategory::Membrane => self.membrane,
            ComponentCategory::AbsorbentPad => self.absorbent_pad,
        }
    }

    /// Materials in flow order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentCategory, &'a MaterialSpec)> {
        let strip = *self;
        ComponentCategory::ALL.into_iter().map(move |c| (c, strip.get(c)))
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceData {
    materials: BTreeMap<ComponentCategory, BTreeMap<String, MaterialSpec>>,
    templates: BTreeMap<String, Template>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceData {
    /// The library shipped with the application.
    pub fn builtin() -> Self {
        let mut reference = Self {
            materials: BTreeMap::new(),
            templates: BTreeMap::new(),
        };
        for spec in materials::builtin_materials() {
            reference.store_material(spec);
        }

        for seed in templates::builtin_templates() {
            let design = reference.resolve_request(&seed.request);
            reference.templates.insert(
                seed.id.to_string(),
                Template {
                    template_id: seed.id.to_string(),
                    name: seed.name.to_string(),
                    reference: seed.reference.to_string(),
                    design,
                    performance: seed.performance,
                    clinical_sensitivity: seed.clinical_sensitivity,
                    clinical_specificity: seed.clinical_specificity,
                },
            );
        }
        reference
    }

    fn store_material(&mut self, spec: MaterialSpec) -> Option<MaterialSpec> {
        self.materials
            .entry(spec.category)
            .or_default()
            .insert(spec.material_id.clone(), spec)
    }

    /// Adds (or replaces) a library material after validating it.
    ///
    /// Returns the previous entry with the same category and id, if any.
    pub fn insert_material(&mut self, spec: MaterialSpec) -> Result<Option<MaterialSpec>> {
        validation::validate_material(&spec)?;
        Ok(self.store_material(spec))
    }

    pub fn get_material(&self, category: ComponentCategory, material_id: &str) -> Result<&MaterialSpec> {
        self.materials
            .get(&category)
            .and_then(|by_id| by_id.get(material_id))
            .ok_or_else(|| WickwiseError::unknown(format!("{} materials", category), material_id))
    }

    /// All materials of one category, sorted by id.
    pub fn materials(&self, category: ComponentCategory) -> impl Iterator<Item = &MaterialSpec> {
        self.materials.get(&category).into_iter().flat_map(|by_id| by_id.values())
    }

    pub fn get_sample_defaults(&self, sample_type: &SampleType) -> SampleSpec {
        if let SampleType::Other(name) = sample_type {
            log::warn!("Unknown sample type '{}', using generic aqueous defaults", name);
        }
        sample_defaults(sample_type)
    }

    pub fn get_particle_defaults(&self, particle_type: &ParticleType) -> ParticleSpec {
        if let ParticleType::Other(name) = particle_type {
            log::warn!("Unknown particle type '{}', using generic colloid defaults", name);
        }
        particle_defaults(particle_type)
    }

    pub fn list_templates(&self) -> Vec<&Template> {
        self.templates.values().collect()
    }

    pub fn get_template(&self, template_id: &str) -> Result<&Template> {
        self.templates
            .get(template_id)
            .ok_or_else(|| WickwiseError::unknown("templates", template_id))
    }

    /// The starting design: standard glass-fiber pads, Hi-Flow Plus 120
    /// membrane, 40 nm gold at medium loading, water at 25 °C / 60 % RH.
    pub fn default_design(&self) -> DesignState {
        let mut design = DesignState::new(
            particle_defaults(&ParticleType::GoldNano),
            sample_defaults(&SampleType::Water),
        );
        design.select_material(ComponentCategory::SamplePad, "glass-fiber-standard");
        design.select_material(ComponentCategory::ConjugatePad, "glass-fiber");
        design.select_material(ComponentCategory::Membrane, "hi-flow-plus-120");
        design.select_material(ComponentCategory::AbsorbentPad, "cellulose-standard");
        design
    }

    /// Resolves every material id in a selection, failing on the first gap.
    ///
    /// A missing selection is reported before an unknown id.
    pub fn resolve_strip(&self, selection: &ComponentSelection) -> Result<Strip<'_>> {
        if let Some(missing) = selection.first_missing() {
            return Err(WickwiseError::IncompleteDesignState(missing));
        }
        let lookup = |category: ComponentCategory| match selection.get(category) {
            Some(id) => self.get_material(category, id),
            None => Err(WickwiseError::IncompleteDesignState(category)),
        };

        Ok(Strip {
            sample_pad: lookup(ComponentCategory::SamplePad)?,
            conjugate_pad: lookup(ComponentCategory::ConjugatePad)?,
            membrane: lookup(ComponentCategory::Membrane)?,
            absorbent_pad: lookup(ComponentCategory::AbsorbentPad)?,
        })
    }

    /// Expands a compact request into a full design, filling physical
    /// properties from the sample and particle tables.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKey` if a selected material id is not in the library.
    pub fn design_from_request(&self, request: &DesignRequest) -> Result<DesignState> {
        for category in ComponentCategory::ALL {
            if let Some(id) = request.components.get(category) {
                self.get_material(category, id)?;
            }
        }
        Ok(self.resolve_request(request))
    }

    fn resolve_request(&self, request: &DesignRequest) -> DesignState {
        let mut particle = self.get_particle_defaults(&request.particle.particle_type);
        if let Some(size) = request.particle.size_nm {
            particle.size_nm = size;
        }
        if let Some(concentration) = request.particle.concentration {
            particle.concentration = concentration;
        }

        let mut sample = self.get_sample_defaults(&request.sample.sample_type);
        if let Some(ph) = request.sample.ph {
            sample.ph = ph;
        }
        if let Some(viscosity) = request.sample.viscosity_cp {
            sample.viscosity_cp = viscosity;
        }
        if let Some(surface_tension) = request.sample.surface_tension_mn_m {
            sample.surface_tension_mn_m = surface_tension;
        }

        DesignState {
            components: request.components.clone(),
            particle,
            sample,
            environment: request.environment.clone(),
            targets: request.targets.clone(),
        }
    }

    /// Swaps the sample matrix, resetting viscosity, surface tension and pH to
    /// the new type's defaults.
    pub fn apply_sample_type(&self, design: &mut DesignState, sample_type: SampleType) {
        design.set_sample(self.get_sample_defaults(&sample_type));
    }

    /// Swaps the particle chemistry. Size resets to the new type's optimum;
    /// the concentration choice is kept.
    pub fn apply_particle_type(&self, design: &mut DesignState, particle_type: ParticleType) {
        let concentration = design.particle.concentration;
        let mut particle = self.get_particle_defaults(&particle_type);
        particle.concentration = concentration;
        design.set_particle(particle);
    }

    /// Replaces the material in one zone after checking the id exists there.
    pub fn select_material(
        &self,
        design: &mut DesignState,
        category: ComponentCategory,
        material_id: &str,
    ) -> Result<()> {
        self.get_material(category, material_id)?;
        design.select_material(category, material_id);
        Ok(())
    }
}
