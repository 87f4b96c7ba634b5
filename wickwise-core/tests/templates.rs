use wickwise_core::{optimize::optimize_design, SimulationEngine, WickwiseError};

#[test]
fn covid_antigen_is_highly_sensitive() {
    let engine = SimulationEngine::default();
    let template = engine.reference().get_template("covid_antigen").unwrap();
    let results = engine.recompute(&template.design).unwrap().results;
    assert!(results.sensitivity > 0.85);
    assert!(results.flow_time > 5.0 && results.flow_time < 20.0);
}

#[test]
fn every_template_computes_and_reports() {
    let engine = SimulationEngine::default();
    for template in engine.reference().list_templates() {
        let output = engine.recompute(&template.design).unwrap();
        assert!(output.costs.total > 0.0, "{}", template.template_id);
        let report = engine.analyze_compatibility(&template.design).unwrap();
        assert_eq!(report.len(), 6);
        assert!(report.iter().all(|e| (0.0..=100.0).contains(&e.score)));
        assert!(template.clinical_sensitivity > 0.0 && template.clinical_sensitivity <= 1.0);
    }
}

#[test]
fn unknown_template_is_an_unknown_key() {
    let engine = SimulationEngine::default();
    assert!(matches!(
        engine.reference().get_template("malaria_hrp2"),
        Err(WickwiseError::UnknownKey { .. })
    ));
}

#[test]
fn optimizer_leaves_template_untouched() {
    let engine = SimulationEngine::default();
    let template = engine.reference().get_template("troponin_i").unwrap();
    let original = template.design.clone();
    let outcome = optimize_design(&engine, &template.design).unwrap();
    assert_eq!(template.design, original);
    assert_eq!(outcome.design.components.membrane.as_deref(), Some("unisart-cnn-95"));
}
