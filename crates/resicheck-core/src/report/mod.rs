//! # Report Module
//!
//! Turns analysis findings and parse errors into the shapes callers consume.
//!
//! The JSON wire shape of one finding is
//! `{"chain", "residue_name", "residue_id", "missing_atoms"}`, with `"insertion_code"`
//! added only when the residue has one. Records are never filtered or reordered here;
//! the analyzer's traversal order is the report order.

use crate::core::io::error::ParseError;
use crate::engine::record::CompletenessRecord;
use crate::workflows::check::BatchOutcome;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

const CSV_HEADER: [&str; 6] = [
    "model",
    "chain",
    "residue_name",
    "residue_id",
    "insertion_code",
    "missing_atoms",
];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error while writing report: {0}")]
    Io(#[from] std::io::Error),
}

/// Wire form of one incomplete residue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingAtomsEntry {
    pub chain: String,
    pub residue_name: String,
    pub residue_id: isize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_code: Option<char>,
    pub missing_atoms: Vec<String>,
}

impl From<&CompletenessRecord> for MissingAtomsEntry {
    fn from(record: &CompletenessRecord) -> Self {
        Self {
            chain: record.chain.clone(),
            residue_name: record.residue_name.clone(),
            residue_id: record.residue_id,
            insertion_code: record.insertion_code,
            missing_atoms: record.missing_atoms.clone(),
        }
    }
}

/// Wire form of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub code: String,
    pub detail: String,
}

impl From<&ParseError> for ErrorEntry {
    fn from(error: &ParseError) -> Self {
        Self {
            code: error.code().to_string(),
            detail: error.to_string(),
        }
    }
}

/// Wire form of one input of a batch: its findings or the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Records {
        input: String,
        records: Vec<MissingAtomsEntry>,
    },
    Error {
        input: String,
        error: ErrorEntry,
    },
}

impl From<&BatchOutcome> for BatchEntry {
    fn from(outcome: &BatchOutcome) -> Self {
        match &outcome.result {
            Ok(report) => BatchEntry::Records {
                input: outcome.label.clone(),
                records: entries(&report.records),
            },
            Err(e) => BatchEntry::Error {
                input: outcome.label.clone(),
                error: ErrorEntry::from(e),
            },
        }
    }
}

/// Maps records to their wire form, preserving order.
pub fn entries(records: &[CompletenessRecord]) -> Vec<MissingAtomsEntry> {
    records.iter().map(MissingAtomsEntry::from).collect()
}

pub fn batch_entries(outcomes: &[BatchOutcome]) -> Vec<BatchEntry> {
    outcomes.iter().map(BatchEntry::from).collect()
}

/// Serializes records as the JSON wire list. An empty input gives `[]`.
pub fn to_json(records: &[CompletenessRecord], pretty: bool) -> Result<String, ReportError> {
    let entries = entries(records);
    let json = if pretty {
        serde_json::to_string_pretty(&entries)?
    } else {
        serde_json::to_string(&entries)?
    };
    Ok(json)
}

pub fn write_json<W: Write>(
    writer: W,
    records: &[CompletenessRecord],
    pretty: bool,
) -> Result<(), ReportError> {
    write_serialized(writer, &entries(records), pretty)
}

pub fn write_batch_json<W: Write>(
    writer: W,
    outcomes: &[BatchOutcome],
    pretty: bool,
) -> Result<(), ReportError> {
    write_serialized(writer, &batch_entries(outcomes), pretty)
}

/// Writes a parse failure as a single `{code, detail}` JSON object.
pub fn write_error_json<W: Write>(
    writer: W,
    error: &ParseError,
    pretty: bool,
) -> Result<(), ReportError> {
    write_serialized(writer, &ErrorEntry::from(error), pretty)
}

/// Writes a parse failure as a `code,detail` CSV table with one row.
pub fn write_error_csv<W: Write>(writer: W, error: &ParseError) -> Result<(), ReportError> {
    let entry = ErrorEntry::from(error);
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(["code", "detail"])?;
    csv_writer.write_record([entry.code.as_str(), entry.detail.as_str()])?;
    csv_writer.flush()?;
    Ok(())
}

fn write_serialized<W: Write, T: Serialize>(
    mut writer: W,
    value: &T,
    pretty: bool,
) -> Result<(), ReportError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn csv_row(record: &CompletenessRecord) -> [String; 6] {
    [
        record.model.to_string(),
        record.chain.clone(),
        record.residue_name.clone(),
        record.residue_id.to_string(),
        record.insertion_code.map(String::from).unwrap_or_default(),
        record.missing_atoms.join(" "),
    ]
}

/// Writes records as CSV, one row per incomplete residue with the missing atom names
/// joined by spaces. The header row is always written.
pub fn write_csv<W: Write>(writer: W, records: &[CompletenessRecord]) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.write_record(csv_row(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes a batch as CSV with a leading `input` column and a trailing `error` column;
/// an input that failed to parse contributes a single row carrying only the error.
pub fn write_batch_csv<W: Write>(writer: W, outcomes: &[BatchOutcome]) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut header = vec!["input"];
    header.extend(CSV_HEADER);
    header.push("error");
    csv_writer.write_record(&header)?;

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                for record in &report.records {
                    let mut row = vec![outcome.label.clone()];
                    row.extend(csv_row(record));
                    row.push(String::new());
                    csv_writer.write_record(&row)?;
                }
            }
            Err(e) => {
                let entry = ErrorEntry::from(e);
                let mut row = vec![outcome.label.clone()];
                row.extend(std::iter::repeat_n(String::new(), CSV_HEADER.len()));
                row.push(format!("{}: {}", entry.code, entry.detail));
                csv_writer.write_record(&row)?;
            }
        }
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::analyzer::AnalysisReport;

    fn record(chain: &str, name: &str, id: isize, icode: Option<char>, missing: &[&str]) -> CompletenessRecord {
        CompletenessRecord {
            model: 1,
            chain: chain.to_string(),
            residue_name: name.to_string(),
            residue_id: id,
            insertion_code: icode,
            missing_atoms: missing.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_records_serialize_to_empty_list() {
        assert_eq!(to_json(&[], false).unwrap(), "[]");
    }

    #[test]
    fn json_matches_wire_shape() {
        let json = to_json(&[record("A", "GLY", 1, None, &["O"])], false).unwrap();
        assert_eq!(
            json,
            r#"[{"chain":"A","residue_name":"GLY","residue_id":1,"missing_atoms":["O"]}]"#
        );
    }

    #[test]
    fn insertion_code_appears_only_when_present() {
        let json = to_json(&[record("A", "SER", 52, Some('A'), &["OG"])], false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["insertion_code"], "A");
        assert_eq!(value[0]["residue_id"], 52);
    }

    #[test]
    fn entries_preserve_order_without_filtering() {
        let records = vec![
            record("B", "ALA", 9, None, &["CB"]),
            record("A", "GLY", 1, None, &["O"]),
        ];
        let chains: Vec<_> = entries(&records).into_iter().map(|e| e.chain).collect();
        assert_eq!(chains, vec!["B", "A"]);
    }

    #[test]
    fn write_json_appends_newline() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &[], false).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "[]\n");
    }

    #[test]
    fn csv_joins_missing_atoms_with_spaces() {
        let mut buffer = Vec::new();
        write_csv(
            &mut buffer,
            &[
                record("A", "ARG", 4, None, &["NH1", "NH2"]),
                record("A", "SER", 52, Some('A'), &["OG"]),
            ],
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "model,chain,residue_name,residue_id,insertion_code,missing_atoms",
                "1,A,ARG,4,,NH1 NH2",
                "1,A,SER,52,A,OG",
            ]
        );
    }

    #[test]
    fn csv_without_records_still_has_header() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "model,chain,residue_name,residue_id,insertion_code,missing_atoms\n"
        );
    }

    #[test]
    fn error_entry_uses_stable_code() {
        let entry = ErrorEntry::from(&ParseError::UnsupportedFormat("xyz".into()));
        assert_eq!(entry.code, "UNSUPPORTED_FORMAT");
        assert!(entry.detail.contains("xyz"));
    }

    #[test]
    fn parse_failure_is_written_with_its_code() {
        let error = ParseError::UnsupportedFormat("xyz".into());

        let mut json = Vec::new();
        write_error_json(&mut json, &error, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["code"], "UNSUPPORTED_FORMAT");
        assert!(value["detail"].as_str().unwrap().contains("xyz"));

        let mut csv = Vec::new();
        write_error_csv(&mut csv, &error).unwrap();
        let text = String::from_utf8(csv).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "code,detail");
        assert!(lines[1].starts_with("UNSUPPORTED_FORMAT,"));
    }

    fn outcomes() -> Vec<BatchOutcome> {
        vec![
            BatchOutcome {
                label: "a.pdb".to_string(),
                result: Ok(AnalysisReport {
                    records: vec![record("A", "GLY", 1, None, &["O"])],
                    ..AnalysisReport::default()
                }),
            },
            BatchOutcome {
                label: "b.psf".to_string(),
                result: Err(ParseError::UnsupportedFormat("psf".into())),
            },
        ]
    }

    #[test]
    fn batch_json_lists_records_or_error_per_input() {
        let mut buffer = Vec::new();
        write_batch_json(&mut buffer, &outcomes(), false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["input"], "a.pdb");
        assert_eq!(value[0]["records"][0]["missing_atoms"][0], "O");
        assert_eq!(value[1]["input"], "b.psf");
        assert_eq!(value[1]["error"]["code"], "UNSUPPORTED_FORMAT");
        assert!(value[1].get("records").is_none());
    }

    #[test]
    fn batch_csv_adds_input_and_error_columns() {
        let mut buffer = Vec::new();
        write_batch_csv(&mut buffer, &outcomes()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "input,model,chain,residue_name,residue_id,insertion_code,missing_atoms,error"
        );
        assert_eq!(lines[1], "a.pdb,1,A,GLY,1,,O,");
        assert!(lines[2].starts_with("b.psf,,,,,,,UNSUPPORTED_FORMAT: "));
    }
}
