//! Grade prediction: component registry, subject catalog, formula evaluation, grade
//! classification and the reverse requirement solver.

pub mod catalog;
pub mod classifier;
pub mod completeness;
pub mod components;
pub mod domain;
pub mod formula;
pub mod import;
pub mod predictor;
pub mod router;
pub mod scores;
pub mod solver;

#[cfg(test)]
mod tests;

pub use catalog::SubjectCatalog;
pub use classifier::{classify, Grade};
pub use completeness::{is_ready_to_evaluate, missing_components};
pub use components::lookup_component;
pub use domain::{CatalogError, Component, ComponentId, DegreeType, GradingSchema, Level, Subject};
pub use formula::FormulaShape;
pub use import::{ScoreImportError, ScoreSheet, ScoreSheetImporter};
pub use predictor::{GradePredictor, Prediction, SubjectDetail, SubjectSummary};
pub use router::grading_router;
pub use scores::{coerce_score, ScoreInputs, ScoreMap};
pub use solver::{
    minimal_free_value, required_marks, requirement_table, GradeRequirement, Requirement,
};
