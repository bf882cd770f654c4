use grade_predictor::grading::{
    Grade, GradePredictor, Requirement, ScoreImportError, ScoreSheetImporter,
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/score_sheet.csv");

#[test]
fn fixture_groups_into_one_sheet_per_student_and_subject() {
    let sheets = ScoreSheetImporter::from_path(FIXTURE).expect("fixture imports");

    let keys: Vec<(&str, &str)> = sheets
        .iter()
        .map(|sheet| (sheet.student.as_str(), sheet.subject_id.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("asha", "ds-maths-1"),
            ("asha", "es-circuits-lab"),
            ("ravi", "ds-python"),
            ("meera", "ds-ct"),
        ]
    );
}

#[test]
fn imported_sheets_predict_like_direct_inputs() {
    let predictor = GradePredictor::default();
    let sheets = ScoreSheetImporter::from_path(FIXTURE).expect("fixture imports");

    let maths = predictor.predict_sheet(&sheets[0]).expect("known subject");
    assert_eq!(maths.grade, Grade::D);
    assert_eq!(maths.display_total, 51.0);
    assert_eq!(
        maths.requirement_for(Grade::B),
        Some(Requirement::Marks { marks: 48 })
    );

    let lab = predictor.predict_sheet(&sheets[1]).expect("known subject");
    assert_eq!(lab.grade, Grade::C);
    assert!(lab.required_marks.iter().all(|row| {
        row.grade <= Grade::C || row.requirement != Requirement::AlreadyAchieved
    }));
}

#[test]
fn best_and_worst_oppe_weights_feed_the_python_prediction() {
    let predictor = GradePredictor::default();
    let sheets = ScoreSheetImporter::from_path(FIXTURE).expect("fixture imports");
    let python = predictor.predict_sheet(&sheets[2]).expect("known subject");

    // 10 + 9 + 6.4 + (0.25·90 + 0.15·40) before the final
    assert!((python.total_score - 53.9).abs() < 1e-9);
    assert_eq!(python.grade, Grade::D);
    assert!(python.ready);
    // 53.9 + 0.4·F >= 90 -> F = 91
    assert_eq!(
        python.requirement_for(Grade::S),
        Some(Requirement::Marks { marks: 91 })
    );
}

#[test]
fn blank_cells_count_as_entered_zeroes() {
    let predictor = GradePredictor::default();
    let sheets = ScoreSheetImporter::from_path(FIXTURE).expect("fixture imports");
    let ct = predictor.predict_sheet(&sheets[3]).expect("known subject");

    assert_eq!(ct.missing_components, vec!["Qz2"]);
    assert!(!ct.ready);
}

#[test]
fn rows_for_unknown_subjects_surface_at_prediction_time() {
    let csv = "student,subject,component,score\nasha,ds-alchemy,GAA,80\n";
    let sheets = ScoreSheetImporter::from_reader(csv.as_bytes()).expect("csv is well formed");
    assert_eq!(sheets.len(), 1);

    let error = GradePredictor::default()
        .predict_sheet(&sheets[0])
        .expect_err("unknown subject");
    assert_eq!(error.to_string(), "unknown subject 'ds-alchemy'");
}

#[test]
fn malformed_csv_is_rejected() {
    let csv = "student,subject,component,score\nasha,ds-ct,GAA,80,extra\n";
    let error = ScoreSheetImporter::from_reader(csv.as_bytes()).expect_err("ragged row");
    assert!(matches!(error, ScoreImportError::Csv(_)));
}
