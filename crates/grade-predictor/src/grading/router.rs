use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::classifier::Grade;
use super::components::lookup_component;
use super::domain::{CatalogError, DegreeType, Level};
use super::predictor::{GradePredictor, SubjectSummary};
use super::scores::ScoreInputs;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SubjectQuery {
    #[serde(default)]
    pub(crate) degree_type: Option<String>,
    #[serde(default)]
    pub(crate) level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PredictionRequest {
    #[serde(default)]
    pub(crate) scores: ScoreInputs,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RequirementRequest {
    #[serde(default)]
    pub(crate) scores: ScoreInputs,
    #[serde(default)]
    pub(crate) target: Option<String>,
}

/// Router builder exposing the catalog and prediction endpoints.
pub fn grading_router(predictor: GradePredictor) -> Router {
    Router::new()
        .route("/api/v1/subjects", get(list_subjects_handler))
        .route("/api/v1/subjects/:subject_id", get(subject_handler))
        .route(
            "/api/v1/subjects/:subject_id/prediction",
            post(prediction_handler),
        )
        .route(
            "/api/v1/subjects/:subject_id/requirements",
            post(requirements_handler),
        )
        .route("/api/v1/components/:component_id", get(component_handler))
        .with_state(predictor)
}

pub(crate) async fn list_subjects_handler(
    State(predictor): State<GradePredictor>,
    Query(query): Query<SubjectQuery>,
) -> Response {
    let degree_type = match query.degree_type.as_deref().map(str::parse::<DegreeType>) {
        Some(Err(err)) => return error_response(err),
        Some(Ok(value)) => Some(value),
        None => None,
    };
    let level = match query.level.as_deref().map(str::parse::<Level>) {
        Some(Err(err)) => return error_response(err),
        Some(Ok(value)) => Some(value),
        None => None,
    };

    let subjects: Vec<SubjectSummary> = predictor
        .catalog()
        .subjects()
        .iter()
        .filter(|subject| degree_type.map_or(true, |value| subject.degree_type == value))
        .filter(|subject| level.map_or(true, |value| subject.level == value))
        .map(SubjectSummary::from)
        .collect();

    (StatusCode::OK, Json(subjects)).into_response()
}

pub(crate) async fn subject_handler(
    State(predictor): State<GradePredictor>,
    Path(subject_id): Path<String>,
) -> Response {
    match predictor.subject_detail(&subject_id) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn component_handler(Path(component_id): Path<String>) -> Response {
    match lookup_component(&component_id) {
        Ok(component) => (StatusCode::OK, Json(component)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn prediction_handler(
    State(predictor): State<GradePredictor>,
    Path(subject_id): Path<String>,
    Json(request): Json<PredictionRequest>,
) -> Response {
    match predictor.predict(&subject_id, &request.scores) {
        Ok(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn requirements_handler(
    State(predictor): State<GradePredictor>,
    Path(subject_id): Path<String>,
    Json(request): Json<RequirementRequest>,
) -> Response {
    let Some(target) = request.target.as_deref() else {
        return match predictor.predict(&subject_id, &request.scores) {
            Ok(prediction) => (StatusCode::OK, Json(prediction.required_marks)).into_response(),
            Err(err) => error_response(err),
        };
    };

    let result = target
        .parse::<Grade>()
        .and_then(|grade| predictor.requirement(&subject_id, &request.scores, grade));

    match result {
        Ok(requirement) => (StatusCode::OK, Json(requirement)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: CatalogError) -> Response {
    let status = match err {
        CatalogError::UnknownSubject(_) | CatalogError::UnknownComponent(_) => {
            StatusCode::NOT_FOUND
        }
        CatalogError::UnknownLevel(_)
        | CatalogError::UnknownDegreeType(_)
        | CatalogError::UnknownGrade(_) => StatusCode::BAD_REQUEST,
        CatalogError::DuplicateSubject(_)
        | CatalogError::UnregisteredComponent { .. }
        | CatalogError::NonMonotonicFormula(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
