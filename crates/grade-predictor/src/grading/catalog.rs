use std::collections::HashSet;
use std::sync::OnceLock;

use super::components::{lookup_component, registry};
use super::domain::{CatalogError, DegreeType, GradingSchema, Level, Subject};
use super::formula::FormulaShape;
use super::scores::ScoreMap;
use super::solver::MAX_CANDIDATE;

/// Read-only list of subjects and their grading schemas.
#[derive(Debug)]
pub struct SubjectCatalog {
    subjects: Vec<Subject>,
}

impl SubjectCatalog {
    /// Process-wide catalog, built and validated on first access.
    pub fn global() -> &'static SubjectCatalog {
        static CATALOG: OnceLock<SubjectCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let catalog = SubjectCatalog::standard();
            if let Err(err) = catalog.validate() {
                tracing::warn!(error = %err, "subject catalog failed validation");
            }
            tracing::debug!(subjects = catalog.subjects.len(), "subject catalog loaded");
            catalog
        })
    }

    pub fn standard() -> Self {
        Self {
            subjects: standard_subjects(),
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Subjects for a track and level, in catalog order. Empty when nothing matches.
    pub fn list_subjects(&self, degree_type: DegreeType, level: Level) -> Vec<&Subject> {
        self.subjects
            .iter()
            .filter(|subject| subject.degree_type == degree_type && subject.level == level)
            .collect()
    }

    pub fn find_subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.id == id)
    }

    pub fn subject(&self, id: &str) -> Result<&Subject, CatalogError> {
        self.find_subject(id)
            .ok_or_else(|| CatalogError::UnknownSubject(id.to_string()))
    }

    /// Check ids, component references and free-variable monotonicity.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();

        for subject in &self.subjects {
            if !seen.insert(subject.id) {
                return Err(CatalogError::DuplicateSubject(subject.id));
            }

            let schema = &subject.schema;
            for &component in schema.components() {
                if lookup_component(component).is_err() {
                    return Err(CatalogError::UnregisteredComponent {
                        subject: subject.id,
                        component,
                    });
                }
            }
            if !schema.contains(schema.free_variable()) {
                return Err(CatalogError::UnregisteredComponent {
                    subject: subject.id,
                    component: schema.free_variable(),
                });
            }

            if !is_non_decreasing_in_free_variable(schema) {
                return Err(CatalogError::NonMonotonicFormula(subject.id));
            }
        }

        Ok(())
    }
}

/// Probe the schema with all-zero and all-max fixed scores and confirm the total never drops
/// as the free variable grows.
fn is_non_decreasing_in_free_variable(schema: &GradingSchema) -> bool {
    let free = schema.free_variable();
    let mut probes = vec![ScoreMap::new()];

    let mut saturated = ScoreMap::new();
    for component in registry() {
        if schema.contains(component.id) && component.id != free {
            // Registered component ids always accept a value.
            let _ = saturated.set(component.id, component.max_score);
        }
    }
    probes.push(saturated);

    probes.iter().all(|fixed| {
        let mut previous = f64::NEG_INFINITY;
        (0..=MAX_CANDIDATE).all(|candidate| {
            let Ok(trial) = fixed.with(free, f64::from(candidate)) else {
                return false;
            };
            let total = schema.calculate_score(&trial);
            let ok = total >= previous;
            previous = total;
            ok
        })
    })
}

fn subject(
    id: &'static str,
    name: &'static str,
    level: Level,
    degree_type: DegreeType,
    schema: GradingSchema,
) -> Subject {
    Subject {
        id,
        name,
        level,
        degree_type,
        schema,
    }
}

#[rustfmt::skip]
fn standard_subjects() -> Vec<Subject> {
    use DegreeType::{DataScience, ElectronicSystems};
    use FormulaShape::*;
    use Level::{Degree, Diploma, Foundation};

    let plain = GradingSchema::new;
    let bonus = |shape| GradingSchema::new(shape).with_bonus();

    vec![
        // Data Science, foundation
        subject("ds-maths-1", "Mathematics for Data Science I", Foundation, DataScience, bonus(StandardQuizAlternatives)),
        subject("ds-stats-1", "Statistics for Data Science I", Foundation, DataScience, bonus(StandardQuizAlternatives)),
        subject("ds-ct", "Computational Thinking", Foundation, DataScience, plain(StandardQuizAlternatives)),
        subject("ds-english-1", "English I", Foundation, DataScience, plain(StandardQuizAlternatives)),
        subject("ds-maths-2", "Mathematics for Data Science II", Foundation, DataScience, bonus(StandardQuizAlternatives)),
        subject("ds-stats-2", "Statistics for Data Science II", Foundation, DataScience, bonus(StandardQuizAlternatives)),
        subject("ds-python", "Programming in Python", Foundation, DataScience, bonus(ProgrammingWithOppePair)),
        subject("ds-english-2", "English II", Foundation, DataScience, plain(StandardQuizAlternatives)),
        // Data Science, diploma
        subject("ds-mlf", "Machine Learning Foundations", Diploma, DataScience, plain(WeightedQuizAlternatives)),
        subject("ds-mlt", "Machine Learning Techniques", Diploma, DataScience, plain(TheoryWithTwoQuizzes)),
        subject("ds-mlp", "Machine Learning Practice", Diploma, DataScience, plain(PracticeWithKaggle)),
        subject("ds-bdm", "Business Data Management", Diploma, DataScience, plain(CaseStudyWithRoe)),
        subject("ds-ba", "Business Analytics", Diploma, DataScience, plain(BestQuizWithFinal)),
        subject("ds-tds", "Tools in Data Science", Diploma, DataScience, plain(TheoryWithTwoQuizzes)),
        subject("ds-dbms", "Database Management Systems", Diploma, DataScience, plain(OppeWithQuizPair)),
        subject("ds-pdsa", "Programming, Data Structures and Algorithms using Python", Diploma, DataScience, plain(OppeWithBestQuiz)),
        subject("ds-mad-1", "Modern Application Development I", Diploma, DataScience, plain(WeightedQuizAlternatives)),
        subject("ds-mad-2", "Modern Application Development II", Diploma, DataScience, plain(WeightedQuizAlternatives)),
        subject("ds-java", "Programming Concepts using Java", Diploma, DataScience, plain(GrpaWithOppePair)),
        subject("ds-system-commands", "System Commands", Diploma, DataScience, plain(OppeWithBiweeklyTests)),
        // Data Science, degree
        subject("ds-software-engineering", "Software Engineering", Degree, DataScience, plain(GroupProject)),
        subject("ds-software-testing", "Software Testing", Degree, DataScience, plain(DegreeQuizAlternatives)),
        subject("ds-ai-search", "AI: Search Methods for Problem Solving", Degree, DataScience, plain(DegreeQuizAlternatives)),
        subject("ds-deep-learning", "Deep Learning", Degree, DataScience, plain(NppeElective)),
        subject("ds-big-data", "Introduction to Big Data", Degree, DataScience, plain(NppeElective)),
        subject("ds-llm", "Large Language Models", Degree, DataScience, plain(DegreeQuizAlternatives)),
        subject("ds-professional-growth", "Strategies for Professional Growth", Degree, DataScience, plain(GroupProject)),
        // Electronic Systems, foundation
        subject("es-english-1", "English I", Foundation, ElectronicSystems, plain(StandardQuizAlternatives)),
        subject("es-maths-1", "Math for Electronics I", Foundation, ElectronicSystems, bonus(StandardQuizAlternatives)),
        subject("es-circuits", "Electronic Systems Thinking and Circuits", Foundation, ElectronicSystems, plain(TheoryWithTwoQuizzes)),
        subject("es-circuits-lab", "Electronic Systems Thinking and Circuits Lab", Foundation, ElectronicSystems, plain(LabSplit)),
        subject("es-c-programming", "Introduction to C Programming", Foundation, ElectronicSystems, plain(OppeWithBestQuiz)),
        subject("es-c-programming-lab", "C Programming Laboratory", Foundation, ElectronicSystems, plain(LabSplit)),
        subject("es-digital-systems", "Digital Systems", Foundation, ElectronicSystems, plain(TheoryWithTwoQuizzes)),
        subject("es-signals", "Signals and Systems", Foundation, ElectronicSystems, plain(TheoryWithTwoQuizzes)),
        // Electronic Systems, diploma
        subject("es-analog", "Analog Electronic Systems", Diploma, ElectronicSystems, plain(TheoryWithTwoQuizzes)),
        subject("es-analog-lab", "Analog Electronics Laboratory", Diploma, ElectronicSystems, plain(LabSplit)),
        subject("es-embedded-c", "Embedded C Programming", Diploma, ElectronicSystems, plain(OppeWithBiweeklyTests)),
        subject("es-digital-design", "Digital System Design", Diploma, ElectronicSystems, plain(TheoryWithTwoQuizzes)),
        subject("es-control", "Control Engineering", Diploma, ElectronicSystems, plain(WeightedQuizAlternatives)),
        subject("es-sensors", "Sensors and Applications", Diploma, ElectronicSystems, plain(TheoryWithTwoQuizzes)),
        // Electronic Systems, degree
        subject("es-embedded-linux", "Embedded Linux and FPGAs", Degree, ElectronicSystems, plain(NppeElective)),
        subject("es-dsp", "Digital Signal Processing", Degree, ElectronicSystems, plain(DegreeQuizAlternatives)),
        subject("es-probability", "Probability and Statistics", Degree, ElectronicSystems, bonus(StandardQuizAlternatives)),
    ]
}
