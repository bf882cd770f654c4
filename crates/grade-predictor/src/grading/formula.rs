//! Formula shapes used by the grading schemas.
//!
//! Each [`FormulaShape`] owns one closed-form expression over a fixed set of component ids.
//! Shapes fall into four families: plain weighted sums, best-of-two alternative weightings,
//! best/worst-of-pair weightings, and fixed 50/50 splits.
//!
//! Every shape must be monotonically non-decreasing in its free variable (the end term).
//! The reverse requirement solver relies on this when it scans candidate marks in ascending
//! order, so a new shape must keep the end term's coefficient positive in every branch and
//! never place it inside a `min` with another variable term.

use serde::Serialize;

use super::components::{
    BPTA, COURSE_PARTICIPATION, END_TERM, GAA, GAA1, GAA2, GROUP_PROJECT_1, GROUP_PROJECT_2,
    GRPA, KAGGLE, LAB_EXPERIMENTS, NPPE, OPPE, OPPE_1, OPPE_2, PROJECT_PRESENTATION, QUIZ_1,
    QUIZ_2, ROE,
};
use super::domain::ComponentId;
use super::scores::ScoreMap;

/// Upper bound applied to every computed total.
pub const MAX_TOTAL: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaShape {
    /// `0.1·GAA + max(0.6F + 0.2·max(Qz1,Qz2), 0.4F + 0.2·Qz1 + 0.3·Qz2)`
    StandardQuizAlternatives,
    /// `0.05·GAA + max(0.6F + 0.25·max(Qz1,Qz2), 0.4F + 0.25·Qz1 + 0.3·Qz2)`
    WeightedQuizAlternatives,
    /// `0.1·GAA + max(0.4F + 0.25·Qz1 + 0.25·Qz2, 0.5F + 0.3·max(Qz1,Qz2))`
    DegreeQuizAlternatives,
    /// `0.1·GAA1 + 0.1·GAA2 + 0.1·Qz1 + 0.4F + 0.25·max(PE1,PE2) + 0.15·min(PE1,PE2)`
    ProgrammingWithOppePair,
    /// `0.05·GAA + 0.1·GRPA + 0.1·Qz2 + 0.35F + 0.25·max(PE1,PE2) + 0.15·min(PE1,PE2)`
    GrpaWithOppePair,
    /// `0.1·GAA + 0.25·Qz1 + 0.25·Qz2 + 0.4F`
    TheoryWithTwoQuizzes,
    /// `0.1·GAA + 0.2·PE1 + 0.2·PE2 + 0.2·KA + 0.3F`
    PracticeWithKaggle,
    /// `0.1·GAA + 0.2·OPPE + 0.15·max(Qz1,Qz2) + 0.1·min(Qz1,Qz2) + 0.45F`
    OppeWithQuizPair,
    /// `0.05·GAA + 0.2·OPPE + 0.3·max(Qz1,Qz2) + 0.45F`
    OppeWithBestQuiz,
    /// `0.05·GAA + 0.1·BPTA + 0.25·Qz1 + 0.3·OPPE + 0.3F`
    OppeWithBiweeklyTests,
    /// `0.3·GAA + 0.2·Qz2 + 0.2·ROE + 0.3F`
    CaseStudyWithRoe,
    /// `0.1·GAA + 0.3·max(Qz1,Qz2) + 0.6F`
    BestQuizWithFinal,
    /// `0.05·GAA + 0.2·GP1 + 0.2·GP2 + 0.1·PP + 0.1·CP + 0.35F`
    GroupProject,
    /// `0.1·GAA + 0.2·NPPE + 0.25·Qz1 + 0.45F`
    NppeElective,
    /// `0.5·LE + 0.5·F`
    LabSplit,
}

impl FormulaShape {
    pub const fn ordered() -> [Self; 15] {
        [
            Self::StandardQuizAlternatives,
            Self::WeightedQuizAlternatives,
            Self::DegreeQuizAlternatives,
            Self::ProgrammingWithOppePair,
            Self::GrpaWithOppePair,
            Self::TheoryWithTwoQuizzes,
            Self::PracticeWithKaggle,
            Self::OppeWithQuizPair,
            Self::OppeWithBestQuiz,
            Self::OppeWithBiweeklyTests,
            Self::CaseStudyWithRoe,
            Self::BestQuizWithFinal,
            Self::GroupProject,
            Self::NppeElective,
            Self::LabSplit,
        ]
    }

    /// Components read by the formula, in display order.
    pub fn components(self) -> &'static [ComponentId] {
        match self {
            Self::StandardQuizAlternatives
            | Self::WeightedQuizAlternatives
            | Self::DegreeQuizAlternatives => &[GAA, QUIZ_1, QUIZ_2, END_TERM],
            Self::ProgrammingWithOppePair => &[GAA1, GAA2, QUIZ_1, OPPE_1, OPPE_2, END_TERM],
            Self::GrpaWithOppePair => &[GAA, GRPA, QUIZ_2, OPPE_1, OPPE_2, END_TERM],
            Self::TheoryWithTwoQuizzes => &[GAA, QUIZ_1, QUIZ_2, END_TERM],
            Self::PracticeWithKaggle => &[GAA, OPPE_1, OPPE_2, KAGGLE, END_TERM],
            Self::OppeWithQuizPair | Self::OppeWithBestQuiz => &[GAA, QUIZ_1, QUIZ_2, OPPE, END_TERM],
            Self::OppeWithBiweeklyTests => &[GAA, BPTA, QUIZ_1, OPPE, END_TERM],
            Self::CaseStudyWithRoe => &[GAA, QUIZ_2, ROE, END_TERM],
            Self::BestQuizWithFinal => &[GAA, QUIZ_1, QUIZ_2, END_TERM],
            Self::GroupProject => &[
                GAA,
                GROUP_PROJECT_1,
                GROUP_PROJECT_2,
                PROJECT_PRESENTATION,
                COURSE_PARTICIPATION,
                END_TERM,
            ],
            Self::NppeElective => &[GAA, NPPE, QUIZ_1, END_TERM],
            Self::LabSplit => &[LAB_EXPERIMENTS, END_TERM],
        }
    }

    pub const fn free_variable(self) -> ComponentId {
        END_TERM
    }

    /// Weighted total before the bonus and the 100-cap are applied.
    pub fn weighted_total(self, scores: &ScoreMap) -> f64 {
        let s = |id: ComponentId| scores.get(id);
        let f = s(END_TERM);

        match self {
            Self::StandardQuizAlternatives => {
                0.1 * s(GAA)
                    + best_of(
                        0.6 * f + 0.2 * s(QUIZ_1).max(s(QUIZ_2)),
                        0.4 * f + 0.2 * s(QUIZ_1) + 0.3 * s(QUIZ_2),
                    )
            }
            Self::WeightedQuizAlternatives => {
                0.05 * s(GAA)
                    + best_of(
                        0.6 * f + 0.25 * s(QUIZ_1).max(s(QUIZ_2)),
                        0.4 * f + 0.25 * s(QUIZ_1) + 0.3 * s(QUIZ_2),
                    )
            }
            Self::DegreeQuizAlternatives => {
                0.1 * s(GAA)
                    + best_of(
                        0.4 * f + 0.25 * s(QUIZ_1) + 0.25 * s(QUIZ_2),
                        0.5 * f + 0.3 * s(QUIZ_1).max(s(QUIZ_2)),
                    )
            }
            Self::ProgrammingWithOppePair => {
                0.1 * s(GAA1)
                    + 0.1 * s(GAA2)
                    + 0.1 * s(QUIZ_1)
                    + 0.4 * f
                    + pair(0.25, 0.15, s(OPPE_1), s(OPPE_2))
            }
            Self::GrpaWithOppePair => {
                0.05 * s(GAA)
                    + 0.1 * s(GRPA)
                    + 0.1 * s(QUIZ_2)
                    + 0.35 * f
                    + pair(0.25, 0.15, s(OPPE_1), s(OPPE_2))
            }
            Self::TheoryWithTwoQuizzes => {
                0.1 * s(GAA) + 0.25 * s(QUIZ_1) + 0.25 * s(QUIZ_2) + 0.4 * f
            }
            Self::PracticeWithKaggle => {
                0.1 * s(GAA) + 0.2 * s(OPPE_1) + 0.2 * s(OPPE_2) + 0.2 * s(KAGGLE) + 0.3 * f
            }
            Self::OppeWithQuizPair => {
                0.1 * s(GAA)
                    + 0.2 * s(OPPE)
                    + pair(0.15, 0.1, s(QUIZ_1), s(QUIZ_2))
                    + 0.45 * f
            }
            Self::OppeWithBestQuiz => {
                0.05 * s(GAA) + 0.2 * s(OPPE) + 0.3 * s(QUIZ_1).max(s(QUIZ_2)) + 0.45 * f
            }
            Self::OppeWithBiweeklyTests => {
                0.05 * s(GAA) + 0.1 * s(BPTA) + 0.25 * s(QUIZ_1) + 0.3 * s(OPPE) + 0.3 * f
            }
            Self::CaseStudyWithRoe => 0.3 * s(GAA) + 0.2 * s(QUIZ_2) + 0.2 * s(ROE) + 0.3 * f,
            Self::BestQuizWithFinal => 0.1 * s(GAA) + 0.3 * s(QUIZ_1).max(s(QUIZ_2)) + 0.6 * f,
            Self::GroupProject => {
                0.05 * s(GAA)
                    + 0.2 * s(GROUP_PROJECT_1)
                    + 0.2 * s(GROUP_PROJECT_2)
                    + 0.1 * s(PROJECT_PRESENTATION)
                    + 0.1 * s(COURSE_PARTICIPATION)
                    + 0.35 * f
            }
            Self::NppeElective => 0.1 * s(GAA) + 0.2 * s(NPPE) + 0.25 * s(QUIZ_1) + 0.45 * f,
            Self::LabSplit => split(s(LAB_EXPERIMENTS), f),
        }
    }

    /// Full total: weighted part, then `bonus`, capped at [`MAX_TOTAL`].
    pub fn evaluate(self, scores: &ScoreMap, bonus: Option<ComponentId>) -> f64 {
        let bonus = bonus.map(|id| scores.get(id)).unwrap_or(0.0);
        (self.weighted_total(scores) + bonus).min(MAX_TOTAL)
    }
}

/// Whichever of two weighting schemes benefits the student.
fn best_of(first: f64, second: f64) -> f64 {
    first.max(second)
}

/// Best score weighted by `best`, worst score weighted by `worst`.
fn pair(best: f64, worst: f64, x: f64, y: f64) -> f64 {
    best * x.max(y) + worst * x.min(y)
}

fn split(a: f64, b: f64) -> f64 {
    0.5 * a + 0.5 * b
}
