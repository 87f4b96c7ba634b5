//! Capillary flow through the strip.
//!
//! A Washburn-type model: viscosity and surface tension are corrected to the
//! run temperature, the membrane's rated flow time sets the baseline speed, and
//! the upstream pads and the sample's rheology scale it.

use crate::{
    error::{Result, WickwiseError},
    reference::Strip,
    validation,
};
use serde::{Deserialize, Serialize};
use wickwise_schemas::{environment::EnvironmentSpec, material::MaterialSpec, results::FlowDynamics, sample::SampleSpec};

/// Calibration constants for the flow model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowConstants {
    /// Exponential viscosity coefficient (1/°C).
    pub viscosity_temp_coeff: f64,
    /// Linear surface-tension coefficient (1/°C).
    pub surface_tension_temp_coeff: f64,
    pub reference_temp_c: f64,
    /// Liquid/nitrocellulose contact angle (degrees).
    pub contact_angle_deg: f64,
    /// Washburn divisor.
    pub washburn_divisor: f64,
    pub strip_length_mm: f64,
    /// Weight of each upstream pad's speed on the overall flow rate.
    pub pad_weight: f64,
    /// Flow time (s per 4 cm) of a pad that neither speeds up nor slows the strip.
    pub pad_neutral_flow_time_s: f64,
    pub viscosity_exponent: f64,
    pub surface_tension_reference: f64,
    pub surface_tension_exponent: f64,
    /// Floor applied to the flow rate before it is used as a divisor (mm/min).
    pub min_flow_rate: f64,
}

impl Default for FlowConstants {
    fn default() -> Self {
        Self {
            viscosity_temp_coeff: 0.022,
            surface_tension_temp_coeff: 0.0012,
            reference_temp_c: 25.0,
            contact_angle_deg: 15.0,
            washburn_divisor: 4.0,
            strip_length_mm: 45.0,
            pad_weight: 0.2,
            pad_neutral_flow_time_s: 200.0,
            viscosity_exponent: -0.7,
            surface_tension_reference: 70.0,
            surface_tension_exponent: 0.5,
            min_flow_rate: 1e-6,
        }
    }
}

/// Seconds per 4 cm converted to mm/min.
const REFERENCE_STRIP_MM_MIN: f64 = 240.0;

pub fn effective_viscosity(viscosity_cp: f64, temperature_c: f64, constants: &FlowConstants) -> f64 {
    viscosity_cp * (-constants.viscosity_temp_coeff * (temperature_c - constants.reference_temp_c)).exp()
}

pub fn effective_surface_tension(surface_tension: f64, temperature_c: f64, constants: &FlowConstants) -> f64 {
    surface_tension * (1.0 - constants.surface_tension_temp_coeff * (temperature_c - constants.reference_temp_c))
}

/// Washburn constant (cm²/s) for the membrane at the corrected fluid properties.
pub fn washburn_constant(
    surface_tension: f64,
    viscosity: f64,
    pore_size_um: f64,
    porosity: f64,
    constants: &FlowConstants,
) -> f64 {
    // Pore diameter in µm to radius in cm.
    let pore_radius_cm = pore_size_um / 20_000.0;
    let cos_theta = constants.contact_angle_deg.to_radians().cos();
    (surface_tension * pore_radius_cm * cos_theta * porosity) / (constants.washburn_divisor * viscosity)
}

fn pad_factor(pad: &MaterialSpec, constants: &FlowConstants) -> f64 {
    match pad.flow_time_s {
        Some(flow_time) => 1.0 + (constants.pad_neutral_flow_time_s / flow_time - 1.0) * constants.pad_weight,
        None => 1.0,
    }
}

pub fn compute_flow_dynamics(
    sample: &SampleSpec,
    strip: &Strip<'_>,
    environment: &EnvironmentSpec,
    constants: &FlowConstants,
) -> Result<FlowDynamics> {
    validation::validate_sample(sample)?;
    validation::validate_environment(environment)?;
    for (_, material) in strip.iter() {
        validation::validate_material(material)?;
    }
    let membrane = validation::membrane_geometry(strip.membrane)?;

    let temperature = environment.temperature_c;
    let viscosity = effective_viscosity(sample.viscosity_cp, temperature, constants);
    let surface_tension = effective_surface_tension(sample.surface_tension_mn_m, temperature, constants);
    if surface_tension <= 0.0 {
        return Err(WickwiseError::invalid(
            "environment.temperature_c",
            temperature,
            "corrected surface tension is no longer positive",
        ));
    }

    let washburn = washburn_constant(
        surface_tension,
        viscosity,
        membrane.pore_size_um,
        membrane.porosity,
        constants,
    );

    let mut flow_rate = REFERENCE_STRIP_MM_MIN / membrane.flow_time_s;
    flow_rate *= pad_factor(strip.sample_pad, constants);
    flow_rate *= pad_factor(strip.conjugate_pad, constants);
    flow_rate *= viscosity.powf(constants.viscosity_exponent);
    flow_rate *= (surface_tension / constants.surface_tension_reference).powf(constants.surface_tension_exponent);
    let flow_rate = flow_rate.max(constants.min_flow_rate);

    let flow_time = constants.strip_length_mm / flow_rate;
    // sqrt(cm²/s) to mm
    let wicking_rate = washburn.sqrt() * 10.0;

    log::debug!(
        "Flow dynamics: membrane={} viscosity={:.3} surface_tension={:.2} rate={:.3} mm/min time={:.2} min",
        strip.membrane.material_id,
        viscosity,
        surface_tension,
        flow_rate,
        flow_time
    );

    Ok(FlowDynamics {
        flow_rate,
        flow_time,
        wicking_rate,
    })
}
