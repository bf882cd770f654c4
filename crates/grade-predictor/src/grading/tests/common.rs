use axum::response::Response;
use serde_json::Value;

use crate::grading::catalog::SubjectCatalog;
use crate::grading::domain::Subject;
use crate::grading::predictor::GradePredictor;
use crate::grading::scores::{ScoreInputs, ScoreMap};

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn scores(entries: &[(&str, f64)]) -> ScoreMap {
    let mut scores = ScoreMap::new();
    for (id, value) in entries {
        scores.set(id, *value).expect("registered component");
    }
    scores
}

pub(super) fn inputs(value: Value) -> ScoreInputs {
    serde_json::from_value(value).expect("inputs object")
}

pub(super) fn predictor() -> GradePredictor {
    GradePredictor::default()
}

pub(super) fn subject(id: &str) -> &'static Subject {
    SubjectCatalog::global()
        .subject(id)
        .expect("subject in catalog")
}

/// Mathematics I: the standard foundation formula with a bonus term.
pub(super) fn maths_one() -> &'static Subject {
    subject("ds-maths-1")
}

pub(super) fn worked_example_inputs() -> ScoreInputs {
    inputs(serde_json::json!({ "GAA": 80, "Qz1": 70, "Qz2": 90, "BONUS": 2 }))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
