//! Validated template designs based on published and commercial devices.

use wickwise_schemas::{
    design::{ComponentSelection, PerformanceTargets, SensitivityTarget},
    environment::EnvironmentSpec,
    file_formats::{DesignRequest, ParticleRequest, SampleRequest},
    particle::{Concentration, ParticleType},
    sample::SampleType,
    template::TemplatePerformance,
};

/// A template before its design request is resolved against the library.
pub(crate) struct TemplateSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub reference: &'static str,
    pub request: DesignRequest,
    pub performance: TemplatePerformance,
    pub clinical_sensitivity: f64,
    pub clinical_specificity: f64,
}

fn components(sample_pad: &str, conjugate_pad: &str, membrane: &str, absorbent_pad: &str) -> ComponentSelection {
    ComponentSelection {
        sample_pad: Some(sample_pad.to_string()),
        conjugate_pad: Some(conjugate_pad.to_string()),
        membrane: Some(membrane.to_string()),
        absorbent_pad: Some(absorbent_pad.to_string()),
    }
}

fn request(
    components: ComponentSelection,
    particle_type: ParticleType,
    size_nm: f64,
    concentration: Concentration,
    sample_type: SampleType,
    ph: f64,
    sensitivity: SensitivityTarget,
) -> DesignRequest {
    DesignRequest {
        components,
        particle: ParticleRequest {
            particle_type,
            size_nm: Some(size_nm),
            concentration: Some(concentration),
        },
        sample: SampleRequest {
            sample_type,
            ph: Some(ph),
            viscosity_cp: None,
            surface_tension_mn_m: None,
        },
        environment: EnvironmentSpec::default(),
        targets: PerformanceTargets {
            sensitivity,
            ..PerformanceTargets::default()
        },
    }
}

pub(crate) fn builtin_templates() -> Vec<TemplateSeed> {
    vec![
        TemplateSeed {
            id: "covid_antigen",
            name: "COVID-19 Antigen Test",
            reference: "Based on FDA EUA commercial rapid antigen tests",
            request: request(
                components("glass-fiber-high-flow", "synthetic-pad", "hi-flow-plus-90", "cellulose-high-capacity"),
                ParticleType::GoldNano,
                40.0,
                Concentration::High,
                SampleType::Saliva,
                7.0,
                SensitivityTarget::High,
            ),
            performance: TemplatePerformance {
                flow_time_min: 8.0,
                lod: 50.0,
                lod_unit: "ng/mL".to_string(),
            },
            clinical_sensitivity: 0.92,
            clinical_specificity: 0.99,
        },
        TemplateSeed {
            id: "pregnancy_hcg",
            name: "Pregnancy Test (hCG)",
            reference: "Based on commercial pregnancy tests",
            request: request(
                components("glass-fiber-standard", "glass-fiber", "hi-flow-plus-120", "cellulose-standard"),
                ParticleType::GoldNano,
                40.0,
                Concentration::Medium,
                SampleType::Urine,
                6.2,
                SensitivityTarget::High,
            ),
            performance: TemplatePerformance {
                flow_time_min: 10.0,
                lod: 25.0,
                lod_unit: "mIU/mL".to_string(),
            },
            clinical_sensitivity: 0.99,
            clinical_specificity: 0.99,
        },
        TemplateSeed {
            id: "troponin_i",
            name: "Cardiac Troponin I Test",
            reference: "Based on cardiac biomarker literature",
            request: request(
                components("glass-fiber-high-flow", "synthetic-pad", "unisart-cnn-95", "cellulose-high-capacity"),
                ParticleType::Fluorescent,
                100.0,
                Concentration::High,
                SampleType::Blood,
                7.4,
                SensitivityTarget::Maximum,
            ),
            performance: TemplatePerformance {
                flow_time_min: 12.0,
                lod: 0.1,
                lod_unit: "ng/mL".to_string(),
            },
            clinical_sensitivity: 0.95,
            clinical_specificity: 0.98,
        },
    ]
}
