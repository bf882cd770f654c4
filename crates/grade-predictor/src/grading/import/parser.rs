use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ScoreRow {
    pub(crate) student: String,
    pub(crate) subject: String,
    pub(crate) component: String,
    pub(crate) score: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ScoreRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RawScoreRow>() {
        let row = record?;
        if row.component.is_empty() {
            continue;
        }

        rows.push(ScoreRow {
            student: row.student,
            subject: row.subject,
            component: row.component,
            score: row.score,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawScoreRow {
    #[serde(alias = "Student")]
    student: String,
    #[serde(alias = "Subject")]
    subject: String,
    #[serde(alias = "Component")]
    component: String,
    #[serde(alias = "Score", default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
