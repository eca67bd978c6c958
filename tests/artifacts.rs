// tests/artifacts.rs
//
// End-to-end checks against the bundled model artifacts under models/.
// Paths are relative to the crate root, where cargo runs tests from.

use std::path::PathBuf;

use relationship_predictor::blend::BlendedPredictor;
use relationship_predictor::config::PredictorConfig;
use relationship_predictor::features::{BranchCode, PredictorInput};

fn bundled() -> PredictorConfig {
    // Built-in defaults point at models/model_a.json and models/model_b.json.
    PredictorConfig::default()
}

#[test]
fn bundled_artifacts_load_and_predict_in_range() {
    let predictor = BlendedPredictor::load(&bundled()).expect("bundled artifacts load");

    let inputs = [
        PredictorInput::default(),
        PredictorInput {
            name: None,
            age: 35.0,
            height: 200.0,
            weight: 100.0,
            gym_frequency: 7,
            branch: BranchCode::Me,
            social_score: 10.0,
        },
        PredictorInput {
            name: None,
            age: 16.0,
            height: 140.0,
            weight: 40.0,
            gym_frequency: 0,
            branch: BranchCode::Biotech,
            social_score: 0.0,
        },
    ];
    for input in inputs {
        let p = predictor.predict(&input).expect("prediction succeeds");
        assert!(
            (0.0..=100.0).contains(&p.value()),
            "score {} out of range for {input:?}",
            p.value()
        );
    }
}

#[test]
fn bundled_prediction_is_deterministic() {
    let predictor = BlendedPredictor::load(&bundled()).expect("bundled artifacts load");
    let input = PredictorInput {
        name: None,
        age: 24.0,
        height: 182.0,
        weight: 70.0,
        gym_frequency: 5,
        branch: BranchCode::Cse,
        social_score: 7.0,
    };
    let first = predictor.predict(&input).expect("first prediction");
    for _ in 0..5 {
        assert_eq!(predictor.predict(&input).expect("repeat"), first);
    }
}

#[test]
fn default_inputs_hit_the_documented_blend() {
    // Hand-walked through both bundled ensembles:
    //   model_a: 48 - 6 - 4 - 1.5 = 36.5
    //   model_b: 52 + 3 + 1 + 2   = 58.0
    //   0.6*36.5 + 0.4*58.0       = 45.1
    let predictor = BlendedPredictor::load(&bundled()).expect("bundled artifacts load");
    let p = predictor
        .predict(&PredictorInput::default())
        .expect("prediction succeeds");
    assert!((p.value() - 45.1).abs() < 1e-9, "got {}", p.value());
    assert_eq!(p.to_string(), "45.10");
}

#[test]
fn missing_artifact_fails_startup_and_names_the_path() {
    let mut cfg = bundled();
    cfg.models.model_a = PathBuf::from("models/missing_model.json");

    let err = BlendedPredictor::load(&cfg).expect_err("startup must fail");
    let msg = err.to_string();
    assert!(
        msg.contains("models/missing_model.json"),
        "failure report should contain the attempted path: {msg}"
    );
}

#[test]
fn second_artifact_failure_is_also_fatal() {
    let mut cfg = bundled();
    cfg.models.model_b = PathBuf::from("models/missing_model.json");

    let err = BlendedPredictor::load(&cfg).expect_err("startup must fail");
    assert!(err.to_string().contains("models/missing_model.json"));
}
