use serde::Serialize;
use std::fmt;

use super::classifier::Grade;
use super::domain::{CatalogError, GradingSchema, Subject};
use super::scores::ScoreMap;

/// Largest candidate value tried for the free variable.
pub const MAX_CANDIDATE: u8 = 100;

/// Marks needed on the free variable to reach a target grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Requirement {
    /// The minimal integer score that reaches the target.
    Marks { marks: u8 },
    /// Not reachable even with full marks.
    Impossible,
    /// The scores as supplied already reach the target.
    AlreadyAchieved,
}

impl Requirement {
    pub fn label(&self) -> String {
        match self {
            Requirement::Marks { marks } => marks.to_string(),
            Requirement::Impossible => "Impossible".to_string(),
            Requirement::AlreadyAchieved => "Already Achieved".to_string(),
        }
    }

    pub fn marks(&self) -> Option<u8> {
        match self {
            Requirement::Marks { marks } => Some(*marks),
            _ => None,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One row of the "marks needed" table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeRequirement {
    pub grade: Grade,
    pub threshold: f64,
    pub requirement: Requirement,
}

/// Smallest integer value of the schema's free variable for which the total reaches `target`.
///
/// Assumes the formula is non-decreasing in the free variable; under that assumption the
/// first passing candidate of the ascending scan is the minimum.
pub fn minimal_free_value(
    scores: &ScoreMap,
    target: Grade,
    schema: &GradingSchema,
) -> Result<Option<u8>, CatalogError> {
    let free = schema.free_variable();
    let threshold = target.threshold();

    for candidate in 0..=MAX_CANDIDATE {
        let trial = scores.with(free, f64::from(candidate))?;
        if schema.calculate_score(&trial) >= threshold {
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}

/// Requirement on the free variable for `subject` to reach `target`.
///
/// Reports [`Requirement::AlreadyAchieved`] when the scores as supplied, including any value
/// already entered for the free variable, clear the threshold.
pub fn required_marks(
    scores: &ScoreMap,
    target: Grade,
    subject: &Subject,
) -> Result<Requirement, CatalogError> {
    let schema = &subject.schema;
    if schema.calculate_score(scores) >= target.threshold() {
        return Ok(Requirement::AlreadyAchieved);
    }

    let requirement = match minimal_free_value(scores, target, schema)? {
        Some(marks) => Requirement::Marks { marks },
        None => Requirement::Impossible,
    };

    tracing::debug!(
        subject = subject.id,
        grade = %target,
        requirement = %requirement,
        "solved reverse requirement"
    );

    Ok(requirement)
}

/// Requirements for every passing grade, highest first.
pub fn requirement_table(
    scores: &ScoreMap,
    subject: &Subject,
) -> Result<Vec<GradeRequirement>, CatalogError> {
    Grade::passing()
        .map(|grade| {
            required_marks(scores, grade, subject).map(|requirement| GradeRequirement {
                grade,
                threshold: grade.threshold(),
                requirement,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::components::{END_TERM, LAB_EXPERIMENTS};
    use crate::grading::domain::{DegreeType, Level};
    use crate::grading::formula::FormulaShape;

    fn lab_subject() -> Subject {
        Subject {
            id: "test-lab",
            name: "Test Lab",
            level: Level::Foundation,
            degree_type: DegreeType::ElectronicSystems,
            schema: GradingSchema::new(FormulaShape::LabSplit),
        }
    }

    #[test]
    fn lab_split_requirements_follow_the_half_weight() {
        let mut scores = ScoreMap::new();
        scores.set(LAB_EXPERIMENTS, 60.0).expect("registered");
        let subject = lab_subject();

        // 0.5·60 + 0.5·F >= 70 -> F >= 80
        assert_eq!(
            required_marks(&scores, Grade::B, &subject),
            Ok(Requirement::Marks { marks: 80 })
        );
        assert_eq!(
            required_marks(&scores, Grade::S, &subject),
            Ok(Requirement::Impossible)
        );
        // 30 + 0.5·F >= 40 -> F >= 20
        assert_eq!(
            required_marks(&scores, Grade::E, &subject),
            Ok(Requirement::Marks { marks: 20 })
        );
    }

    #[test]
    fn current_free_value_counts_towards_already_achieved() {
        let mut scores = ScoreMap::new();
        scores.set(LAB_EXPERIMENTS, 60.0).expect("registered");
        scores.set(END_TERM, 85.0).expect("registered");

        assert_eq!(
            required_marks(&scores, Grade::B, &lab_subject()),
            Ok(Requirement::AlreadyAchieved)
        );
        assert_eq!(
            minimal_free_value(&scores, Grade::B, &lab_subject().schema),
            Ok(Some(80))
        );
    }

    #[test]
    fn table_lists_passing_grades_in_order() {
        let table = requirement_table(&ScoreMap::new(), &lab_subject()).expect("table");
        let grades: Vec<_> = table.iter().map(|row| row.grade).collect();
        assert_eq!(
            grades,
            vec![Grade::S, Grade::A, Grade::B, Grade::C, Grade::D, Grade::E]
        );
        // 0.5·F alone tops out at 50.
        assert_eq!(table[0].requirement, Requirement::Impossible);
        assert_eq!(table[4].requirement, Requirement::Marks { marks: 100 });
        assert_eq!(table[5].requirement, Requirement::Marks { marks: 80 });
    }

    #[test]
    fn requirement_labels_match_the_table_wording() {
        assert_eq!(Requirement::Marks { marks: 42 }.label(), "42");
        assert_eq!(Requirement::Impossible.label(), "Impossible");
        assert_eq!(Requirement::AlreadyAchieved.label(), "Already Achieved");
        assert_eq!(Requirement::AlreadyAchieved.marks(), None);
    }
}
