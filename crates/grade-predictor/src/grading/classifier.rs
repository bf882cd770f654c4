use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::domain::CatalogError;

/// Letter grades. Declaration order runs from lowest to highest so that `Ord` compares by merit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    U,
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Grade {
    /// Highest grade first.
    pub const fn ordered() -> [Self; 7] {
        [
            Self::S,
            Self::A,
            Self::B,
            Self::C,
            Self::D,
            Self::E,
            Self::U,
        ]
    }

    /// Inclusive lower bound on the 0-100 total.
    pub const fn threshold(self) -> f64 {
        match self {
            Self::S => 90.0,
            Self::A => 80.0,
            Self::B => 70.0,
            Self::C => 60.0,
            Self::D => 50.0,
            Self::E => 40.0,
            Self::U => 0.0,
        }
    }

    pub const fn grade_points(self) -> u8 {
        match self {
            Self::S => 10,
            Self::A => 9,
            Self::B => 8,
            Self::C => 7,
            Self::D => 6,
            Self::E => 4,
            Self::U => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::U => "U",
        }
    }

    pub const fn is_passing(self) -> bool {
        !matches!(self, Self::U)
    }

    /// Grades a student can aim for, highest first.
    pub fn passing() -> impl Iterator<Item = Self> {
        Self::ordered().into_iter().filter(|grade| grade.is_passing())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|grade| grade.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CatalogError::UnknownGrade(trimmed.to_string()))
    }
}

/// Highest grade whose threshold does not exceed `total`. The raw value is classified
/// without rounding; NaN falls through to `U`.
pub fn classify(total: f64) -> Grade {
    Grade::ordered()
        .into_iter()
        .find(|grade| total >= grade.threshold())
        .unwrap_or(Grade::U)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(classify(100.0), Grade::S);
        assert_eq!(classify(90.0), Grade::S);
        assert_eq!(classify(89.9999), Grade::A);
        assert_eq!(classify(80.0), Grade::A);
        assert_eq!(classify(79.99), Grade::B);
        assert_eq!(classify(60.0), Grade::C);
        assert_eq!(classify(50.0), Grade::D);
        assert_eq!(classify(40.0), Grade::E);
        assert_eq!(classify(39.9999), Grade::U);
        assert_eq!(classify(0.0), Grade::U);
        assert_eq!(classify(f64::NAN), Grade::U);
    }

    #[test]
    fn grades_order_by_merit() {
        assert!(Grade::S > Grade::A);
        assert!(Grade::E > Grade::U);
        let mut shuffled = vec![Grade::C, Grade::U, Grade::S, Grade::E];
        shuffled.sort();
        assert_eq!(shuffled, vec![Grade::U, Grade::E, Grade::C, Grade::S]);
    }

    #[test]
    fn passing_excludes_u() {
        let passing: Vec<_> = Grade::passing().collect();
        assert_eq!(passing.len(), 6);
        assert_eq!(passing.first(), Some(&Grade::S));
        assert!(!passing.contains(&Grade::U));
        assert!(!Grade::U.is_passing());
        assert_eq!(Grade::E.grade_points(), 4);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("b".parse::<Grade>(), Ok(Grade::B));
        assert_eq!(" S ".parse::<Grade>(), Ok(Grade::S));
        assert!(matches!(
            "F".parse::<Grade>(),
            Err(CatalogError::UnknownGrade(grade)) if grade == "F"
        ));
    }
}
