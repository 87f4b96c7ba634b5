//! Built-in material library, transcribed from manufacturer datasheets.

use wickwise_schemas::material::{ComponentCategory, MaterialSpec};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn membrane(
    id: &str,
    manufacturer: &str,
    description: &str,
    pore_size_um: f64,
    flow_time_s: f64,
    thickness_um: f64,
    porosity: f64,
    protein_binding: f64,
    cost: f64,
) -> MaterialSpec {
    MaterialSpec {
        material_id: id.to_string(),
        category: ComponentCategory::Membrane,
        manufacturer: manufacturer.to_string(),
        family: "Nitrocellulose".to_string(),
        description: description.to_string(),
        cost,
        pore_size_um: Some(pore_size_um),
        flow_time_s: Some(flow_time_s),
        thickness_um: Some(thickness_um),
        porosity: Some(porosity),
        protein_binding_ug_cm2: Some(protein_binding),
        absorption_capacity_ul_cm2: None,
        release_efficiency: None,
        chemical_tags: tags(&["blocking-buffer", "protein"]),
    }
}

#[allow(clippy::too_many_arguments)]
fn conjugate_pad(
    id: &str,
    manufacturer: &str,
    family: &str,
    description: &str,
    pore_size_um: f64,
    flow_time_s: f64,
    thickness_um: f64,
    release_efficiency: f64,
    cost: f64,
    chemical_tags: &[&str],
) -> MaterialSpec {
    MaterialSpec {
        material_id: id.to_string(),
        category: ComponentCategory::ConjugatePad,
        manufacturer: manufacturer.to_string(),
        family: family.to_string(),
        description: description.to_string(),
        cost,
        pore_size_um: Some(pore_size_um),
        flow_time_s: Some(flow_time_s),
        thickness_um: Some(thickness_um),
        porosity: None,
        protein_binding_ug_cm2: None,
        absorption_capacity_ul_cm2: None,
        release_efficiency: Some(release_efficiency),
        chemical_tags: tags(chemical_tags),
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_pad(
    id: &str,
    manufacturer: &str,
    family: &str,
    description: &str,
    pore_size_um: f64,
    flow_time_s: f64,
    thickness_um: f64,
    cost: f64,
    chemical_tags: &[&str],
) -> MaterialSpec {
    MaterialSpec {
        material_id: id.to_string(),
        category: ComponentCategory::SamplePad,
        manufacturer: manufacturer.to_string(),
        family: family.to_string(),
        description: description.to_string(),
        cost,
        pore_size_um: Some(pore_size_um),
        flow_time_s: Some(flow_time_s),
        thickness_um: Some(thickness_um),
        porosity: None,
        protein_binding_ug_cm2: None,
        absorption_capacity_ul_cm2: None,
        release_efficiency: None,
        chemical_tags: tags(chemical_tags),
    }
}

fn absorbent_pad(
    id: &str,
    manufacturer: &str,
    family: &str,
    description: &str,
    thickness_um: f64,
    absorption_capacity: f64,
    cost: f64,
    chemical_tags: &[&str],
) -> MaterialSpec {
    MaterialSpec {
        material_id: id.to_string(),
        category: ComponentCategory::AbsorbentPad,
        manufacturer: manufacturer.to_string(),
        family: family.to_string(),
        description: description.to_string(),
        cost,
        pore_size_um: None,
        flow_time_s: None,
        thickness_um: Some(thickness_um),
        porosity: None,
        protein_binding_ug_cm2: None,
        absorption_capacity_ul_cm2: Some(absorption_capacity),
        release_efficiency: None,
        chemical_tags: tags(chemical_tags),
    }
}

pub fn builtin_materials() -> Vec<MaterialSpec> {
    vec![
        membrane("hi-flow-plus-120", "Millipore Sigma", "Nitrocellulose membrane, 120s flow time", 8.0, 120.0, 135.0, 0.85, 1600.0, 0.08),
        membrane("hi-flow-plus-90", "Millipore Sigma", "Nitrocellulose membrane, 90s flow time", 10.0, 90.0, 135.0, 0.87, 1400.0, 0.08),
        membrane("unisart-cnn-95", "Sartorius", "Nitrocellulose membrane, 95s flow time", 12.0, 95.0, 140.0, 0.88, 1500.0, 0.085),
        membrane("prima-40", "GE Healthcare", "Fast flow nitrocellulose membrane", 14.0, 40.0, 130.0, 0.90, 1000.0, 0.075),
        conjugate_pad("glass-fiber", "Ahlstrom-Munksjö", "Glass Fiber", "Standard glass fiber for conjugate release", 20.0, 65.0, 250.0, 0.85, 0.05, &["blocking-buffer", "surfactant"]),
        conjugate_pad("synthetic-pad", "Advanced Microdevices", "Synthetic", "High-performance synthetic conjugate pad", 15.0, 45.0, 220.0, 0.92, 0.07, &["blocking-buffer", "surfactant", "sugar-stabilizer"]),
        conjugate_pad("polyester", "Millipore Sigma", "Polyester", "Polyester fiber conjugate pad", 17.0, 55.0, 230.0, 0.88, 0.06, &["surfactant", "sugar-stabilizer"]),
        sample_pad("glass-fiber-standard", "Ahlstrom-Munksjö", "Glass Fiber", "Standard glass fiber sample pad", 25.0, 40.0, 280.0, 0.04, &["surfactant"]),
        sample_pad("glass-fiber-high-flow", "Ahlstrom-Munksjö", "Glass Fiber", "High flow rate glass fiber for complex samples", 30.0, 30.0, 300.0, 0.05, &["surfactant"]),
        sample_pad("cellulose", "Whatman", "Cellulose", "Cellulose fiber sample pad", 22.0, 50.0, 270.0, 0.03, &["surfactant", "buffer-salts"]),
        sample_pad("polyester", "Advanced Microdevices", "Polyester", "Polyester sample pad", 20.0, 45.0, 250.0, 0.035, &["surfactant"]),
        absorbent_pad("cellulose-standard", "Whatman", "Cellulose", "Standard cellulose absorbent pad", 320.0, 40.0, 0.02, &["buffer-salts"]),
        absorbent_pad("cellulose-high-capacity", "Ahlstrom-Munksjö", "Cellulose", "High capacity cellulose absorbent pad", 400.0, 55.0, 0.03, &["buffer-salts"]),
        absorbent_pad("cotton", "Advanced Microdevices", "Cotton", "Cotton fiber absorbent pad", 350.0, 50.0, 0.025, &[]),
    ]
}
