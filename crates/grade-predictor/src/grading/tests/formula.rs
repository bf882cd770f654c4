use super::common::*;
use crate::grading::classifier::{classify, Grade};
use crate::grading::components::{
    registry, BONUS, END_TERM, GAA, LAB_EXPERIMENTS, OPPE_1, OPPE_2, QUIZ_1, QUIZ_2,
};
use crate::grading::formula::{FormulaShape, MAX_TOTAL};
use crate::grading::scores::ScoreMap;
use crate::grading::solver::{minimal_free_value, required_marks, Requirement};

#[test]
fn worked_example_matches_the_published_numbers() {
    let subject = maths_one();
    let fixed = scores(&[(GAA, 80.0), (QUIZ_1, 70.0), (QUIZ_2, 90.0), (BONUS, 2.0)]);

    let at_zero = subject.schema.calculate_score(&fixed);
    assert_close(at_zero, 51.0);
    assert_eq!(classify(at_zero), Grade::D);

    let at_full = subject
        .schema
        .calculate_score(&fixed.with(END_TERM, 100.0).expect("end term"));
    assert_close(at_full, 91.0);
    assert_eq!(classify(at_full), Grade::S);

    assert_eq!(
        required_marks(&fixed, Grade::C, subject),
        Ok(Requirement::Marks { marks: 23 })
    );
    let at_23 = subject
        .schema
        .calculate_score(&fixed.with(END_TERM, 23.0).expect("end term"));
    assert_close(at_23, 60.2);

    assert_eq!(
        required_marks(&fixed, Grade::B, subject),
        Ok(Requirement::Marks { marks: 48 })
    );
    assert_eq!(
        required_marks(&fixed, Grade::A, subject),
        Ok(Requirement::Marks { marks: 73 })
    );
    assert_eq!(
        required_marks(&fixed, Grade::S, subject),
        Ok(Requirement::Marks { marks: 98 })
    );
    assert_eq!(
        required_marks(&fixed, Grade::D, subject),
        Ok(Requirement::AlreadyAchieved)
    );
}

#[test]
fn all_zero_scores_make_top_grades_impossible() {
    let subject = maths_one();
    let fixed = ScoreMap::new();

    let at_full = subject
        .schema
        .calculate_score(&fixed.with(END_TERM, 100.0).expect("end term"));
    assert_close(at_full, 60.0);

    assert_eq!(
        required_marks(&fixed, Grade::S, subject),
        Ok(Requirement::Impossible)
    );
    assert_eq!(
        required_marks(&fixed, Grade::B, subject),
        Ok(Requirement::Impossible)
    );
    // Only the 0.6·F branch matters with empty quizzes: 0.6·F >= 50 -> F = 84.
    assert_eq!(
        required_marks(&fixed, Grade::D, subject),
        Ok(Requirement::Marks { marks: 84 })
    );
    assert_eq!(
        required_marks(&fixed, Grade::C, subject),
        Ok(Requirement::Marks { marks: 100 })
    );
}

#[test]
fn alternative_weighting_takes_the_better_scheme() {
    let shape = FormulaShape::StandardQuizAlternatives;
    // 0.6·30 + 0.2·100 = 38 versus 0.4·30 + 0.2·20 + 0.3·100 = 46
    let mixed = scores(&[(QUIZ_1, 20.0), (QUIZ_2, 100.0), (END_TERM, 30.0)]);
    assert_close(shape.weighted_total(&mixed), 46.0);

    // 0.6·90 + 0.2·40 = 62 versus 0.4·90 + 0.2·40 + 0.3·10 = 47
    let strong_final = scores(&[(QUIZ_1, 40.0), (QUIZ_2, 10.0), (END_TERM, 90.0)]);
    assert_close(shape.weighted_total(&strong_final), 62.0);
}

#[test]
fn best_and_worst_of_pair_weights_are_order_independent() {
    let shape = FormulaShape::ProgrammingWithOppePair;
    let first = scores(&[(OPPE_1, 40.0), (OPPE_2, 90.0)]);
    let second = scores(&[(OPPE_1, 90.0), (OPPE_2, 40.0)]);

    // 0.25·90 + 0.15·40
    assert_close(shape.weighted_total(&first), 28.5);
    assert_close(shape.weighted_total(&second), 28.5);
}

#[test]
fn lab_split_weights_both_halves_equally() {
    let total = FormulaShape::LabSplit
        .evaluate(&scores(&[(LAB_EXPERIMENTS, 70.0), (END_TERM, 50.0)]), None);
    assert_close(total, 60.0);
}

#[test]
fn missing_components_count_as_zero() {
    for shape in FormulaShape::ordered() {
        assert_eq!(shape.evaluate(&ScoreMap::new(), Some(BONUS)), 0.0, "{shape:?}");
    }
}

#[test]
fn full_marks_reach_exactly_one_hundred() {
    for shape in FormulaShape::ordered() {
        let mut full = ScoreMap::new();
        for component in registry() {
            if shape.components().contains(&component.id) {
                full.set(component.id, component.max_score)
                    .expect("registered component");
            }
        }
        assert_close(shape.evaluate(&full, None), MAX_TOTAL);
    }
}

#[test]
fn bonus_is_added_after_weighting_and_capped() {
    let subject = maths_one();
    let base = scores(&[(GAA, 50.0), (QUIZ_1, 50.0), (QUIZ_2, 50.0), (END_TERM, 50.0)]);
    let without = subject.schema.calculate_score(&base);
    let with = subject
        .schema
        .calculate_score(&base.with(BONUS, 4.0).expect("bonus"));
    assert_close(with - without, 4.0);

    let saturated = scores(&[
        (GAA, 100.0),
        (QUIZ_1, 100.0),
        (QUIZ_2, 100.0),
        (END_TERM, 100.0),
        (BONUS, 5.0),
    ]);
    assert_eq!(subject.schema.calculate_score(&saturated), MAX_TOTAL);
}

#[test]
fn schemas_without_bonus_ignore_bonus_scores() {
    let subject = subject("ds-ct");
    assert_eq!(subject.schema.bonus(), None);
    let with_bonus = scores(&[(GAA, 60.0), (BONUS, 5.0)]);
    assert_close(subject.schema.calculate_score(&with_bonus), 6.0);
}

#[test]
fn free_variable_is_the_end_term_for_every_shape() {
    for shape in FormulaShape::ordered() {
        assert_eq!(shape.free_variable(), END_TERM);
        assert!(shape.components().contains(&END_TERM), "{shape:?}");
    }
}

#[test]
fn minimal_value_is_none_when_threshold_is_out_of_reach() {
    let subject = subject("es-circuits-lab");
    assert_eq!(
        minimal_free_value(&ScoreMap::new(), Grade::A, &subject.schema),
        Ok(None)
    );
}
