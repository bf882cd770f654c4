use super::domain::{CatalogError, Component, ComponentId};

pub const GAA: ComponentId = "GAA";
pub const GAA1: ComponentId = "GAA1";
pub const GAA2: ComponentId = "GAA2";
pub const GRPA: ComponentId = "GRPA";
pub const QUIZ_1: ComponentId = "Qz1";
pub const QUIZ_2: ComponentId = "Qz2";
pub const END_TERM: ComponentId = "F";
pub const OPPE: ComponentId = "OPPE";
pub const OPPE_1: ComponentId = "PE1";
pub const OPPE_2: ComponentId = "PE2";
pub const NPPE: ComponentId = "NPPE";
pub const ROE: ComponentId = "ROE";
pub const BPTA: ComponentId = "BPTA";
pub const KAGGLE: ComponentId = "KA";
pub const GROUP_PROJECT_1: ComponentId = "GP1";
pub const GROUP_PROJECT_2: ComponentId = "GP2";
pub const PROJECT_PRESENTATION: ComponentId = "PP";
pub const COURSE_PARTICIPATION: ComponentId = "CP";
pub const LAB_EXPERIMENTS: ComponentId = "LE";
pub const BONUS: ComponentId = "BONUS";

static REGISTRY: [Component; 20] = [
    Component {
        id: GAA,
        label: "Graded Assignment Average",
        max_score: 100.0,
        description: Some("Average of the best weekly graded assignments"),
    },
    Component {
        id: GAA1,
        label: "Graded Assignment Average (Objective)",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: GAA2,
        label: "Graded Assignment Average (Programming)",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: GRPA,
        label: "Graded Programming Assignments",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: QUIZ_1,
        label: "Quiz 1",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: QUIZ_2,
        label: "Quiz 2",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: END_TERM,
        label: "End Term",
        max_score: 100.0,
        description: Some("Final examination score"),
    },
    Component {
        id: OPPE,
        label: "OPPE",
        max_score: 100.0,
        description: Some("Online proctored programming exam"),
    },
    Component {
        id: OPPE_1,
        label: "OPPE 1",
        max_score: 100.0,
        description: Some("First online proctored programming exam"),
    },
    Component {
        id: OPPE_2,
        label: "OPPE 2",
        max_score: 100.0,
        description: Some("Second online proctored programming exam"),
    },
    Component {
        id: NPPE,
        label: "NPPE",
        max_score: 100.0,
        description: Some("Non-proctored programming exam"),
    },
    Component {
        id: ROE,
        label: "ROE",
        max_score: 100.0,
        description: Some("Remote online exam"),
    },
    Component {
        id: BPTA,
        label: "Biweekly Programming Test Average",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: KAGGLE,
        label: "Kaggle Assignment",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: GROUP_PROJECT_1,
        label: "Group Project Milestone 1",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: GROUP_PROJECT_2,
        label: "Group Project Milestone 2",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: PROJECT_PRESENTATION,
        label: "Project Presentation",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: COURSE_PARTICIPATION,
        label: "Course Participation",
        max_score: 100.0,
        description: None,
    },
    Component {
        id: LAB_EXPERIMENTS,
        label: "Lab Experiments",
        max_score: 100.0,
        description: Some("In-semester lab work, averaged"),
    },
    Component {
        id: BONUS,
        label: "Bonus",
        max_score: 5.0,
        description: Some("Mock tests and participation, added after weighting"),
    },
];

/// Every registered component in declaration order.
pub fn registry() -> &'static [Component] {
    &REGISTRY
}

pub fn lookup_component(id: &str) -> Result<&'static Component, CatalogError> {
    REGISTRY
        .iter()
        .find(|component| component.id == id)
        .ok_or_else(|| CatalogError::UnknownComponent(id.to_string()))
}
