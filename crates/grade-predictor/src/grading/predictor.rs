use serde::Serialize;

use super::catalog::SubjectCatalog;
use super::classifier::{classify, Grade};
use super::completeness::missing_components;
use super::components::lookup_component;
use super::domain::{CatalogError, ComponentId, DegreeType, Level, Subject};
use super::import::ScoreSheet;
use super::scores::{ScoreInputs, ScoreMap};
use super::solver::{required_marks, requirement_table, GradeRequirement, Requirement};

/// Stateless service composing catalog lookup, scoring, classification and the solver.
#[derive(Debug, Clone, Copy)]
pub struct GradePredictor {
    catalog: &'static SubjectCatalog,
}

impl Default for GradePredictor {
    fn default() -> Self {
        Self::new(SubjectCatalog::global())
    }
}

impl GradePredictor {
    pub fn new(catalog: &'static SubjectCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'static SubjectCatalog {
        self.catalog
    }

    pub fn subjects(&self, degree_type: DegreeType, level: Level) -> Vec<SubjectSummary> {
        self.catalog
            .list_subjects(degree_type, level)
            .into_iter()
            .map(SubjectSummary::from)
            .collect()
    }

    pub fn subject_detail(&self, subject_id: &str) -> Result<SubjectDetail, CatalogError> {
        let subject = self.catalog.subject(subject_id)?;
        SubjectDetail::build(subject)
    }

    /// Evaluate raw inputs for a subject and populate the marks-needed table.
    pub fn predict(
        &self,
        subject_id: &str,
        inputs: &ScoreInputs,
    ) -> Result<Prediction, CatalogError> {
        let subject = self.catalog.subject(subject_id)?;
        let (scores, touched) = ScoreMap::from_inputs(&subject.schema, inputs);

        let total_score = subject.schema.calculate_score(&scores);
        let grade = classify(total_score);
        let missing = missing_components(&subject.schema, &touched);
        let required_marks = requirement_table(&scores, subject)?;

        tracing::debug!(
            subject = subject.id,
            total = total_score,
            grade = %grade,
            ready = missing.is_empty(),
            "evaluated grade prediction"
        );

        Ok(Prediction {
            subject_id: subject.id,
            subject_name: subject.name,
            total_score,
            display_total: round_for_display(total_score),
            grade,
            grade_points: grade.grade_points(),
            passed: grade.is_passing(),
            ready: missing.is_empty(),
            missing_components: missing,
            required_marks,
        })
    }

    /// Requirement for a single target grade.
    pub fn requirement(
        &self,
        subject_id: &str,
        inputs: &ScoreInputs,
        target: Grade,
    ) -> Result<GradeRequirement, CatalogError> {
        let subject = self.catalog.subject(subject_id)?;
        let (scores, _) = ScoreMap::from_inputs(&subject.schema, inputs);
        let requirement = required_marks(&scores, target, subject)?;

        Ok(GradeRequirement {
            grade: target,
            threshold: target.threshold(),
            requirement,
        })
    }

    pub fn predict_sheet(&self, sheet: &ScoreSheet) -> Result<Prediction, CatalogError> {
        self.predict(&sheet.subject_id, &sheet.inputs)
    }
}

/// Round to the single decimal shown to students.
pub fn round_for_display(total: f64) -> f64 {
    (total * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub subject_id: &'static str,
    pub subject_name: &'static str,
    pub total_score: f64,
    pub display_total: f64,
    pub grade: Grade,
    pub grade_points: u8,
    pub passed: bool,
    pub ready: bool,
    pub missing_components: Vec<ComponentId>,
    pub required_marks: Vec<GradeRequirement>,
}

impl Prediction {
    pub fn requirement_for(&self, grade: Grade) -> Option<Requirement> {
        self.required_marks
            .iter()
            .find(|row| row.grade == grade)
            .map(|row| row.requirement)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub level: Level,
    pub degree_type: DegreeType,
}

impl From<&Subject> for SubjectSummary {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id,
            name: subject.name,
            level: subject.level,
            degree_type: subject.degree_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectDetail {
    #[serde(flatten)]
    pub summary: SubjectSummary,
    pub formula: super::formula::FormulaShape,
    pub free_variable: ComponentId,
    pub components: Vec<SchemaComponentView>,
}

impl SubjectDetail {
    fn build(subject: &Subject) -> Result<Self, CatalogError> {
        let schema = &subject.schema;
        let components = schema
            .components()
            .iter()
            .map(|id| {
                lookup_component(id).map(|component| SchemaComponentView {
                    id: component.id,
                    label: component.label,
                    max_score: component.max_score,
                    description: component.description,
                    optional: schema.is_optional(id),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            summary: SubjectSummary::from(subject),
            formula: schema.shape(),
            free_variable: schema.free_variable(),
            components,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaComponentView {
    pub id: ComponentId,
    pub label: &'static str,
    pub max_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub optional: bool,
}
