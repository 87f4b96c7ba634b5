//! Physical-range checks run before any arithmetic.
//!
//! Inputs are rejected, never clamped. Only the heuristic scorers clamp, and
//! only their outputs.

use crate::{
    error::{Result, WickwiseError},
    reference::Strip,
    simulation::flow::FlowConstants,
};
use wickwise_schemas::{
    design::DesignState,
    environment::EnvironmentSpec,
    material::{ComponentCategory, MaterialSpec},
    particle::ParticleSpec,
    sample::SampleSpec,
};

fn finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WickwiseError::invalid(field, value, "must be a finite number"))
    }
}

pub(crate) fn positive(field: &str, value: f64) -> Result<f64> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(WickwiseError::invalid(field, value, "must be greater than zero"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64> {
    if finite(field, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(WickwiseError::invalid(field, value, "must not be negative"))
    }
}

fn within(field: &str, value: f64, min: f64, max: f64) -> Result<f64> {
    if (min..=max).contains(&finite(field, value)?) {
        Ok(value)
    } else {
        Err(WickwiseError::invalid(
            field,
            value,
            format!("must be between {} and {}", min, max),
        ))
    }
}

/// Membrane attributes the flow model cannot run without.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembraneGeometry {
    pub pore_size_um: f64,
    pub flow_time_s: f64,
    pub porosity: f64,
}

pub fn membrane_geometry(membrane: &MaterialSpec) -> Result<MembraneGeometry> {
    let required = |name: &str, value: Option<f64>| {
        value.ok_or_else(|| {
            WickwiseError::invalid(
                format!("{}.{}", membrane.material_id, name),
                "<missing>",
                "required for membranes",
            )
        })
    };

    Ok(MembraneGeometry {
        pore_size_um: required("pore_size_um", membrane.pore_size_um)?,
        flow_time_s: required("flow_time_s", membrane.flow_time_s)?,
        porosity: required("porosity", membrane.porosity)?,
    })
}

pub fn validate_material(spec: &MaterialSpec) -> Result<()> {
    let field = |name: &str| format!("{}.{}", spec.material_id, name);

    non_negative(&field("cost"), spec.cost)?;
    if let Some(value) = spec.pore_size_um {
        positive(&field("pore_size_um"), value)?;
    }
    if let Some(value) = spec.flow_time_s {
        positive(&field("flow_time_s"), value)?;
    }
    if let Some(value) = spec.thickness_um {
        positive(&field("thickness_um"), value)?;
    }
    if let Some(value) = spec.porosity {
        within(&field("porosity"), value, 0.0, 1.0)?;
    }
    if let Some(value) = spec.protein_binding_ug_cm2 {
        non_negative(&field("protein_binding_ug_cm2"), value)?;
    }
    if let Some(value) = spec.absorption_capacity_ul_cm2 {
        non_negative(&field("absorption_capacity_ul_cm2"), value)?;
    }
    if let Some(value) = spec.release_efficiency {
        within(&field("release_efficiency"), value, 0.0, 1.0)?;
    }
    if spec.category == ComponentCategory::Membrane {
        membrane_geometry(spec)?;
    }
    Ok(())
}

pub fn validate_sample(sample: &SampleSpec) -> Result<()> {
    positive("sample.viscosity_cp", sample.viscosity_cp)?;
    positive("sample.surface_tension_mn_m", sample.surface_tension_mn_m)?;
    within("sample.ph", sample.ph, 0.0, 14.0)?;
    non_negative("sample.ionic_strength_mm", sample.ionic_strength_mm)?;
    positive("sample.density_g_ml", sample.density_g_ml)?;
    Ok(())
}

pub fn validate_particle(particle: &ParticleSpec) -> Result<()> {
    positive("particle.size_nm", particle.size_nm)?;
    positive("particle.density_g_cm3", particle.density_g_cm3)?;
    positive("particle.optimal_size.optimum_nm", particle.optimal_size.optimum_nm)?;
    non_negative("particle.cost", particle.cost)?;
    finite("particle.zeta_potential_mv", particle.zeta_potential_mv)?;
    non_negative("particle.aggregation_threshold_mm", particle.aggregation_threshold_mm)?;
    positive("particle.shelf_life_months", particle.shelf_life_months)?;
    Ok(())
}

pub fn validate_environment(environment: &EnvironmentSpec) -> Result<()> {
    // Below -25 °C the exponential viscosity correction leaves any sane range.
    within("environment.temperature_c", environment.temperature_c, -25.0, 80.0)?;
    within("environment.humidity_pct", environment.humidity_pct, 0.0, 100.0)?;
    Ok(())
}

/// Checks calibration constants so every valid design yields a positive,
/// finite flow time and a real wicking rate.
pub fn validate_constants(constants: &FlowConstants) -> Result<()> {
    non_negative("constants.viscosity_temp_coeff", constants.viscosity_temp_coeff)?;
    non_negative("constants.surface_tension_temp_coeff", constants.surface_tension_temp_coeff)?;
    finite("constants.reference_temp_c", constants.reference_temp_c)?;
    let angle = finite("constants.contact_angle_deg", constants.contact_angle_deg)?;
    if !(0.0..90.0).contains(&angle) {
        return Err(WickwiseError::invalid(
            "constants.contact_angle_deg",
            angle,
            "must be at least 0 and below 90 degrees",
        ));
    }
    positive("constants.washburn_divisor", constants.washburn_divisor)?;
    positive("constants.strip_length_mm", constants.strip_length_mm)?;
    non_negative("constants.pad_weight", constants.pad_weight)?;
    positive("constants.pad_neutral_flow_time_s", constants.pad_neutral_flow_time_s)?;
    finite("constants.viscosity_exponent", constants.viscosity_exponent)?;
    positive("constants.surface_tension_reference", constants.surface_tension_reference)?;
    finite("constants.surface_tension_exponent", constants.surface_tension_exponent)?;
    positive("constants.min_flow_rate", constants.min_flow_rate)?;
    Ok(())
}

/// Checks every numeric field the engine will read for this design.
pub fn validate_design(design: &DesignState, strip: &Strip<'_>) -> Result<()> {
    for (_, material) in strip.iter() {
        validate_material(material)?;
    }
    validate_sample(&design.sample)?;
    validate_particle(&design.particle)?;
    validate_environment(&design.environment)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    #[test]
    fn rejects_non_positive_viscosity() {
        let reference = ReferenceData::builtin();
        let mut sample = reference.get_sample_defaults(&wickwise_schemas::sample::SampleType::Water);
        sample.viscosity_cp = 0.0;
        let err = validate_sample(&sample).unwrap_err();
        assert!(matches!(
            err,
            WickwiseError::InvalidInput { ref field, .. } if field == "sample.viscosity_cp"
        ));
    }

    #[test]
    fn rejects_ph_outside_scale() {
        let reference = ReferenceData::builtin();
        let mut sample = reference.get_sample_defaults(&wickwise_schemas::sample::SampleType::Urine);
        sample.ph = 14.5;
        assert!(validate_sample(&sample).is_err());
        sample.ph = 14.0;
        assert!(validate_sample(&sample).is_ok());
    }

    #[test]
    fn membrane_without_porosity_is_rejected() {
        let reference = ReferenceData::builtin();
        let mut membrane = reference
            .get_material(ComponentCategory::Membrane, "prima-40")
            .unwrap()
            .clone();
        membrane.porosity = None;
        let err = validate_material(&membrane).unwrap_err();
        assert!(err.to_string().contains("prima-40.porosity"));
    }

    #[test]
    fn default_constants_pass() {
        assert!(validate_constants(&FlowConstants::default()).is_ok());
    }

    #[test]
    fn contact_angle_must_stay_below_ninety_degrees() {
        let constants = FlowConstants {
            contact_angle_deg: 90.0,
            ..FlowConstants::default()
        };
        let err = validate_constants(&constants).unwrap_err();
        assert!(matches!(
            err,
            WickwiseError::InvalidInput { ref field, .. } if field == "constants.contact_angle_deg"
        ));
    }

    #[test]
    fn negative_cost_is_rejected() {
        let reference = ReferenceData::builtin();
        let mut pad = reference
            .get_material(ComponentCategory::AbsorbentPad, "cotton")
            .unwrap()
            .clone();
        pad.cost = -0.01;
        assert!(validate_material(&pad).is_err());
    }
}
