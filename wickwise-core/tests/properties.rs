use approx::assert_relative_eq;
use wickwise_core::{
    compatibility::analyze_pair_compatibility,
    simulation::flow::effective_viscosity,
    FlowConstants, SimulationEngine, WickwiseError,
};
use wickwise_schemas::{
    material::ComponentCategory,
    particle::ParticleType,
    sample::SampleType,
};

#[test]
fn flow_is_positive_for_every_builtin_combination() {
    let engine = SimulationEngine::default();
    let reference = engine.reference();
    let mut design = reference.default_design();

    for membrane in reference.materials(ComponentCategory::Membrane) {
        for sample_pad in reference.materials(ComponentCategory::SamplePad) {
            for conjugate_pad in reference.materials(ComponentCategory::ConjugatePad) {
                design.select_material(ComponentCategory::Membrane, membrane.material_id.clone());
                design.select_material(ComponentCategory::SamplePad, sample_pad.material_id.clone());
                design.select_material(ComponentCategory::ConjugatePad, conjugate_pad.material_id.clone());
                let results = engine.recompute(&design).unwrap().results;
                assert!(results.flow_rate > 0.0);
                assert!(results.flow_time > 0.0);
                assert!(results.wicking_rate > 0.0);
            }
        }
    }
}

#[test]
fn higher_viscosity_strictly_slows_flow() {
    let engine = SimulationEngine::default();
    let mut design = engine.reference().default_design();
    let rates: Vec<f64> = [1.0, 2.0, 4.0]
        .iter()
        .map(|&viscosity| {
            design.set_viscosity(viscosity);
            engine.recompute(&design).unwrap().results.flow_rate
        })
        .collect();
    assert!(rates[0] > rates[1] && rates[1] > rates[2]);
}

#[test]
fn warming_lowers_effective_viscosity() {
    let constants = FlowConstants::default();
    assert!(effective_viscosity(1.8, 35.0, &constants) < effective_viscosity(1.8, 25.0, &constants));
}

#[test]
fn scores_stay_in_range_for_all_particle_and_sample_types() {
    let engine = SimulationEngine::default();
    let reference = engine.reference();
    let mut particles = ParticleType::KNOWN.to_vec();
    particles.push(ParticleType::Other("carbon-black".to_string()));
    let mut samples = SampleType::KNOWN.to_vec();
    samples.push(SampleType::Other("sweat".to_string()));

    for particle in &particles {
        for sample in &samples {
            let mut design = reference.default_design();
            reference.apply_particle_type(&mut design, particle.clone());
            reference.apply_sample_type(&mut design, sample.clone());
            let results = engine.recompute(&design).unwrap().results;
            assert!((0.60..=0.99).contains(&results.sensitivity));
            assert!((0.80..=0.995).contains(&results.specificity));
            assert!((0.50..=0.99).contains(&results.stability));
        }
    }
}

#[test]
fn cost_total_is_the_sum_of_its_lines() {
    let engine = SimulationEngine::default();
    let reference = engine.reference();
    for template in reference.list_templates() {
        let costs = engine.recompute(&template.design).unwrap().costs;
        assert_eq!(costs.total, costs.materials + costs.manufacturing + costs.packaging + costs.qc);
        assert!(costs.materials >= 0.0 && costs.manufacturing >= 0.0);
    }
}

#[test]
fn recompute_is_idempotent() {
    let engine = SimulationEngine::default();
    let design = engine.reference().default_design();
    let first = engine.recompute(&design).unwrap();
    let second = engine.recompute(&design).unwrap();
    assert_eq!(first.results.flow_rate.to_bits(), second.results.flow_rate.to_bits());
    assert_eq!(first.results.sensitivity.to_bits(), second.results.sensitivity.to_bits());
    assert_eq!(first.costs.total.to_bits(), second.costs.total.to_bits());
    assert_eq!(first, second);
}

#[test]
fn pair_compatibility_is_symmetric() {
    let engine = SimulationEngine::default();
    let reference = engine.reference();
    let all: Vec<_> = ComponentCategory::ALL
        .iter()
        .flat_map(|&c| reference.materials(c))
        .collect();
    for a in &all {
        for b in &all {
            let ab = analyze_pair_compatibility(a, b);
            let ba = analyze_pair_compatibility(b, a);
            assert_eq!(ab.score, ba.score);
            assert_eq!(ab.level, ba.level);
            assert_eq!(ab.details, ba.details);
        }
    }
}

#[test]
fn default_design_reads_in_eight_to_twelve_minutes() {
    let engine = SimulationEngine::default();
    let results = engine.recompute(&engine.reference().default_design()).unwrap().results;
    assert!(results.flow_time >= 8.0 && results.flow_time <= 12.0);
    assert_relative_eq!(results.flow_time, 8.66, epsilon = 0.01);
}

#[test]
fn switching_water_to_blood_lowers_specificity_and_flow() {
    let engine = SimulationEngine::default();
    let reference = engine.reference();
    let mut design = reference.default_design();
    let water = engine.recompute(&design).unwrap().results;
    reference.apply_sample_type(&mut design, SampleType::Blood);
    let blood = engine.recompute(&design).unwrap().results;
    assert!(blood.specificity < water.specificity);
    assert!(blood.flow_rate < water.flow_rate);
}

#[test]
fn each_missing_zone_is_reported() {
    let engine = SimulationEngine::default();
    for category in ComponentCategory::ALL {
        let mut design = engine.reference().default_design();
        design.components.clear(category);
        match engine.recompute(&design) {
            Err(WickwiseError::IncompleteDesignState(missing)) => assert_eq!(missing, category),
            other => panic!("expected IncompleteDesignState, got {:?}", other),
        }
    }
}

#[test]
fn unknown_material_id_is_an_unknown_key() {
    let engine = SimulationEngine::default();
    let mut design = engine.reference().default_design();
    design.select_material(ComponentCategory::ConjugatePad, "unobtainium");
    assert!(matches!(
        engine.recompute(&design),
        Err(WickwiseError::UnknownKey { ref key, .. }) if key == "unobtainium"
    ));
    assert!(engine.analyze_compatibility(&design).is_err());
    assert!(engine.compute_costs(&design).is_err());
}
