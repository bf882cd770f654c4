use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::components::lookup_component;
use super::domain::{CatalogError, ComponentId, GradingSchema};

/// Raw, caller supplied inputs keyed by component id.
pub type ScoreInputs = BTreeMap<String, Value>;

/// Component scores for a single evaluation. Every stored value is clamped to the
/// component's `[0, max_score]` range on write.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreMap {
    scores: BTreeMap<ComponentId, f64>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a score map for `schema`, returning it with the ids the caller touched.
    /// Inputs for components outside the schema are ignored.
    pub fn from_inputs(
        schema: &GradingSchema,
        inputs: &ScoreInputs,
    ) -> (Self, BTreeSet<ComponentId>) {
        let mut scores = Self::new();
        let mut touched = BTreeSet::new();

        for (id, raw) in inputs {
            let Some(component) = schema
                .components()
                .iter()
                .copied()
                .find(|component| *component == id.trim())
            else {
                tracing::debug!(component = %id, "ignoring score outside the active schema");
                continue;
            };

            // Schema components are registered; `validate` guarantees it.
            if scores.set(component, coerce_score(raw)).is_ok() {
                touched.insert(component);
            }
        }

        (scores, touched)
    }

    /// Store a clamped score, returning the value actually kept.
    pub fn set(&mut self, id: &str, raw: f64) -> Result<f64, CatalogError> {
        let component = lookup_component(id)?;
        let value = component.clamp(raw);
        self.scores.insert(component.id, value);
        Ok(value)
    }

    /// Score for `id`; components never supplied count as 0.
    pub fn get(&self, id: &str) -> f64 {
        self.scores.get(id).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scores.contains_key(id)
    }

    /// Copy of this map with `id` replaced, used for trial evaluations.
    pub fn with(&self, id: &str, raw: f64) -> Result<Self, CatalogError> {
        let mut trial = self.clone();
        trial.set(id, raw)?;
        Ok(trial)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, f64)> + '_ {
        self.scores.iter().map(|(id, value)| (*id, *value))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Coerce loosely typed input into a number. Anything that is not a finite number or a
/// numeric string becomes 0.
pub fn coerce_score(raw: &Value) -> f64 {
    let value = match raw {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::components::{BONUS, END_TERM, GAA, QUIZ_1, QUIZ_2};
    use crate::grading::formula::FormulaShape;
    use serde_json::json;

    fn inputs(value: Value) -> ScoreInputs {
        serde_json::from_value(value).expect("object of inputs")
    }

    #[test]
    fn coerce_handles_loose_input() {
        assert_eq!(coerce_score(&json!(72.5)), 72.5);
        assert_eq!(coerce_score(&json!(" 64 ")), 64.0);
        assert_eq!(coerce_score(&json!("sixty")), 0.0);
        assert_eq!(coerce_score(&json!(null)), 0.0);
        assert_eq!(coerce_score(&json!(true)), 0.0);
        assert_eq!(coerce_score(&json!("inf")), 0.0);
        assert_eq!(coerce_score(&json!([80])), 0.0);
    }

    #[test]
    fn set_clamps_and_rejects_unknown_components() {
        let mut scores = ScoreMap::new();
        assert_eq!(scores.set(GAA, 140.0), Ok(100.0));
        assert_eq!(scores.set(BONUS, 9.0), Ok(5.0));
        assert_eq!(scores.set(QUIZ_1, -4.0), Ok(0.0));
        assert!(matches!(
            scores.set("Qz9", 50.0),
            Err(CatalogError::UnknownComponent(id)) if id == "Qz9"
        ));
        assert_eq!(scores.get(GAA), 100.0);
        assert_eq!(scores.get(QUIZ_2), 0.0);
        assert!(!scores.contains(QUIZ_2));
    }

    #[test]
    fn from_inputs_ignores_foreign_components_and_tracks_touches() {
        let schema = GradingSchema::new(FormulaShape::StandardQuizAlternatives).with_bonus();
        let (scores, touched) = ScoreMap::from_inputs(
            &schema,
            &inputs(json!({
                "GAA": "85",
                "Qz1": "absent",
                "KA": 90,
                "Unknown": 10,
                "BONUS": 8
            })),
        );

        assert_eq!(scores.get(GAA), 85.0);
        assert_eq!(scores.get(QUIZ_1), 0.0);
        assert_eq!(scores.get(BONUS), 5.0);
        assert!(!scores.contains("KA"));
        assert_eq!(touched.len(), 3);
        assert!(touched.contains(QUIZ_1));
        assert!(!touched.contains(END_TERM));
    }

    #[test]
    fn with_leaves_the_original_untouched() {
        let mut scores = ScoreMap::new();
        scores.set(END_TERM, 40.0).expect("end term registered");
        let trial = scores.with(END_TERM, 75.0).expect("end term registered");
        assert_eq!(scores.get(END_TERM), 40.0);
        assert_eq!(trial.get(END_TERM), 75.0);
    }
}
