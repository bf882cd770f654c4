mod parser;

use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use super::scores::ScoreInputs;

#[derive(Debug)]
pub enum ScoreImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ScoreImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreImportError::Io(err) => write!(f, "failed to read score sheet: {}", err),
            ScoreImportError::Csv(err) => write!(f, "invalid score sheet CSV data: {}", err),
        }
    }
}

impl std::error::Error for ScoreImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreImportError::Io(err) => Some(err),
            ScoreImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ScoreImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScoreImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Scores one student entered for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSheet {
    pub student: String,
    pub subject_id: String,
    pub inputs: ScoreInputs,
}

/// Reads long-format score sheets: `student,subject,component,score`.
pub struct ScoreSheetImporter;

impl ScoreSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ScoreSheet>, ScoreImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Group rows by student and subject, keeping first-seen order. A repeated component
    /// within a sheet keeps its last value.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ScoreSheet>, ScoreImportError> {
        let mut sheets: Vec<ScoreSheet> = Vec::new();

        for row in parser::parse_rows(reader)? {
            let score = Value::String(row.score.unwrap_or_default());
            let position = sheets
                .iter()
                .position(|sheet| sheet.student == row.student && sheet.subject_id == row.subject);

            match position {
                Some(index) => {
                    sheets[index].inputs.insert(row.component, score);
                }
                None => {
                    let mut inputs = ScoreInputs::new();
                    inputs.insert(row.component, score);
                    sheets.push(ScoreSheet {
                        student: row.student,
                        subject_id: row.subject,
                        inputs,
                    });
                }
            }
        }

        tracing::debug!(sheets = sheets.len(), "imported score sheets");
        Ok(sheets)
    }
}
