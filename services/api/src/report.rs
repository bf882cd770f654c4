use crate::infra::{parse_degree_type, parse_grade, parse_level, parse_score_pair};
use clap::Args;
use grade_predictor::config::AppConfig;
use grade_predictor::error::AppError;
use grade_predictor::grading::{
    DegreeType, Grade, GradePredictor, GradeRequirement, Level, Prediction, ScoreInputs,
    ScoreSheetImporter, SubjectSummary,
};
use grade_predictor::telemetry;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SubjectsArgs {
    /// Degree track (data_science or electronic_systems). Defaults to PREDICTOR_DEFAULT_TRACK.
    #[arg(long, value_parser = parse_degree_type)]
    pub(crate) degree_type: Option<DegreeType>,
    /// Restrict the listing to one level (foundation, diploma, degree)
    #[arg(long, value_parser = parse_level)]
    pub(crate) level: Option<Level>,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Subject id, e.g. ds-maths-1
    #[arg(long)]
    pub(crate) subject: String,
    /// Component score as COMPONENT=VALUE; repeat for each component
    #[arg(long = "score", value_parser = parse_score_pair)]
    pub(crate) scores: Vec<(String, Value)>,
    /// Only report the end-term marks needed for this grade
    #[arg(long, value_parser = parse_grade)]
    pub(crate) target: Option<Grade>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with student,subject,component,score columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

pub(crate) fn run_subject_listing(args: SubjectsArgs) -> Result<(), AppError> {
    let config = init_reporting()?;
    let degree_type = args
        .degree_type
        .unwrap_or(config.predictor.default_degree_type);
    let levels = match args.level {
        Some(level) => vec![level],
        None => Level::ordered().to_vec(),
    };

    let predictor = GradePredictor::default();
    println!("{} subjects", degree_type.label());
    for level in levels {
        let subjects = predictor.subjects(degree_type, level);
        for line in subject_lines(level, &subjects) {
            println!("{line}");
        }
    }

    Ok(())
}

pub(crate) fn run_prediction(args: PredictArgs) -> Result<(), AppError> {
    init_reporting()?;
    let PredictArgs {
        subject,
        scores,
        target,
    } = args;

    let inputs: ScoreInputs = scores.into_iter().collect();
    let predictor = GradePredictor::default();

    match target {
        Some(grade) => {
            let row = predictor.requirement(&subject, &inputs, grade)?;
            println!("{}", requirement_line(&row));
        }
        None => {
            let prediction = predictor.predict(&subject, &inputs)?;
            for line in prediction_lines(&prediction) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    init_reporting()?;
    let sheets = ScoreSheetImporter::from_path(&args.csv)?;
    let predictor = GradePredictor::default();

    println!("Batch prediction for {} sheet(s)", sheets.len());
    for sheet in &sheets {
        println!("\n{} / {}", sheet.student, sheet.subject_id);
        match predictor.predict_sheet(sheet) {
            Ok(prediction) => {
                for line in prediction_lines(&prediction) {
                    println!("  {line}");
                }
            }
            Err(err) => {
                tracing::warn!(student = %sheet.student, subject = %sheet.subject_id, error = %err, "skipping score sheet");
                println!("  Skipped: {err}");
            }
        }
    }

    Ok(())
}

fn init_reporting() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) fn subject_lines(level: Level, subjects: &[SubjectSummary]) -> Vec<String> {
    let mut lines = vec![format!("\n{}", level.label())];
    if subjects.is_empty() {
        lines.push("- none".to_string());
    }
    lines.extend(
        subjects
            .iter()
            .map(|subject| format!("- {} ({})", subject.name, subject.id)),
    );
    lines
}

pub(crate) fn prediction_lines(prediction: &Prediction) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", prediction.subject_name, prediction.subject_id),
        format!(
            "Total: {:.1} | Grade {} ({} points) | {}",
            prediction.display_total,
            prediction.grade,
            prediction.grade_points,
            if prediction.passed { "pass" } else { "fail" }
        ),
    ];

    if !prediction.ready {
        lines.push(format!(
            "Not all scores entered yet, missing: {}",
            prediction.missing_components.join(", ")
        ));
    }

    lines.push("End-term marks needed".to_string());
    lines.extend(
        prediction
            .required_marks
            .iter()
            .map(|row| format!("- {}", requirement_line(row))),
    );
    lines
}

pub(crate) fn requirement_line(row: &GradeRequirement) -> String {
    format!("{} (>= {:.0}): {}", row.grade, row.threshold, row.requirement)
}
