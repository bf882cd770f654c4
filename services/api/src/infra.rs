use grade_predictor::grading::{DegreeType, Grade, Level};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Parse a `COMPONENT=VALUE` pair. The value stays raw so the engine applies its own coercion.
pub(crate) fn parse_score_pair(raw: &str) -> Result<(String, Value), String> {
    let (component, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COMPONENT=VALUE, got '{raw}'"))?;

    let component = component.trim();
    if component.is_empty() {
        return Err(format!("missing component id in '{raw}'"));
    }

    Ok((component.to_string(), Value::String(value.trim().to_string())))
}

pub(crate) fn parse_grade(raw: &str) -> Result<Grade, String> {
    raw.parse::<Grade>().map_err(|err| err.to_string())
}

pub(crate) fn parse_level(raw: &str) -> Result<Level, String> {
    raw.parse::<Level>().map_err(|err| err.to_string())
}

pub(crate) fn parse_degree_type(raw: &str) -> Result<DegreeType, String> {
    raw.parse::<DegreeType>().map_err(|err| err.to_string())
}
