use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::formula::FormulaShape;
use super::scores::ScoreMap;

/// Identifier of a scoring component (`"GAA"`, `"Qz1"`, `"F"`, ...).
pub type ComponentId = &'static str;

/// Academic level a subject is offered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Foundation,
    Diploma,
    Degree,
}

impl Level {
    pub const fn ordered() -> [Self; 3] {
        [Self::Foundation, Self::Diploma, Self::Degree]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Foundation => "Foundation",
            Self::Diploma => "Diploma",
            Self::Degree => "Degree",
        }
    }
}

impl FromStr for Level {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "foundation" => Ok(Self::Foundation),
            "diploma" => Ok(Self::Diploma),
            "degree" | "bsc" | "bs" => Ok(Self::Degree),
            other => Err(CatalogError::UnknownLevel(other.to_string())),
        }
    }
}

/// Degree track a subject belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeType {
    DataScience,
    ElectronicSystems,
}

impl DegreeType {
    pub const fn ordered() -> [Self; 2] {
        [Self::DataScience, Self::ElectronicSystems]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DataScience => "Data Science",
            Self::ElectronicSystems => "Electronic Systems",
        }
    }
}

impl FromStr for DegreeType {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "data_science" | "ds" => Ok(Self::DataScience),
            "electronic_systems" | "es" => Ok(Self::ElectronicSystems),
            other => Err(CatalogError::UnknownDegreeType(other.to_string())),
        }
    }
}

impl fmt::Display for DegreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metadata for one scoring component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub id: ComponentId,
    pub label: &'static str,
    pub max_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl Component {
    /// Clamp a raw value into `[0, max_score]`. NaN is treated as 0.
    pub fn clamp(&self, raw: f64) -> f64 {
        if raw.is_nan() {
            return 0.0;
        }
        raw.min(self.max_score).max(0.0)
    }
}

/// Ordered component list plus the formula that reduces them to a total.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingSchema {
    shape: FormulaShape,
    bonus: Option<ComponentId>,
    components: Vec<ComponentId>,
}

impl GradingSchema {
    pub fn new(shape: FormulaShape) -> Self {
        Self {
            shape,
            bonus: None,
            components: shape.components().to_vec(),
        }
    }

    /// Add the catalog's bonus component, applied after weighting.
    pub fn with_bonus(mut self) -> Self {
        let bonus = super::components::BONUS;
        if self.bonus.is_none() {
            self.bonus = Some(bonus);
            self.components.push(bonus);
        }
        self
    }

    pub fn shape(&self) -> FormulaShape {
        self.shape
    }

    pub fn bonus(&self) -> Option<ComponentId> {
        self.bonus
    }

    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    pub fn contains(&self, id: &str) -> bool {
        self.components.iter().any(|component| *component == id)
    }

    /// Total for `scores`: never panics, capped at 100, missing components count as 0.
    pub fn calculate_score(&self, scores: &ScoreMap) -> f64 {
        self.shape.evaluate(scores, self.bonus)
    }

    /// The component treated as unknown by the reverse solver.
    pub fn free_variable(&self) -> ComponentId {
        self.shape.free_variable()
    }

    /// Components that need not be supplied before a prediction is trusted.
    pub fn is_optional(&self, id: &str) -> bool {
        id == self.free_variable() || self.bonus == Some(id)
    }
}

/// A catalog subject with its grading schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub id: &'static str,
    pub name: &'static str,
    pub level: Level,
    pub degree_type: DegreeType,
    pub schema: GradingSchema,
}

/// Lookup and integrity failures raised by the catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown component '{0}'")]
    UnknownComponent(String),
    #[error("unknown subject '{0}'")]
    UnknownSubject(String),
    #[error("unknown level '{0}'")]
    UnknownLevel(String),
    #[error("unknown degree type '{0}'")]
    UnknownDegreeType(String),
    #[error("unknown grade '{0}'")]
    UnknownGrade(String),
    #[error("subject id '{0}' is defined more than once")]
    DuplicateSubject(&'static str),
    #[error("subject '{subject}' references unregistered component '{component}'")]
    UnregisteredComponent {
        subject: &'static str,
        component: &'static str,
    },
    #[error("formula for subject '{0}' decreases as its free variable grows")]
    NonMonotonicFormula(&'static str),
}
