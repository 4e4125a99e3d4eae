//! Batch orchestration
//!
//! Plans a set of input files, then runs load -> rewrite -> save on each
//! planned file. One bad drawing never aborts its siblings: every input
//! ends in exactly one terminal state and the report lists them all in
//! original input order.

use crate::error::StampError;
use crate::io::dxf;
use crate::rewrite::{apply_substitutions, Substitutions};
use crate::sequence;
use rayon::prelude::*;
use tracing::debug;

/// One input file: original filename and raw byte content.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Original filename (no directory part)
    pub name: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl FileEntry {
    /// Create a new file entry
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Terminal state of one input file after a batch run.
#[derive(Debug)]
pub enum FileOutcome {
    /// Rewritten and serialized successfully
    Processed {
        /// Original filename
        name: String,
        /// Serialized bytes with the placeholders rewritten
        bytes: Vec<u8>,
    },
    /// Filename did not match the sheet naming convention; not attempted
    Skipped {
        /// Original filename
        name: String,
    },
    /// Loading or serializing the drawing failed
    Failed {
        /// Original filename
        name: String,
        /// The underlying cause
        error: StampError,
    },
}

impl FileOutcome {
    /// The original filename this outcome belongs to
    pub fn name(&self) -> &str {
        match self {
            FileOutcome::Processed { name, .. } => name,
            FileOutcome::Skipped { name } => name,
            FileOutcome::Failed { name, .. } => name,
        }
    }
}

/// Complete accounting of a batch run, in original input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One terminal outcome per input file
    pub files: Vec<FileOutcome>,
}

impl BatchReport {
    /// Successfully processed files as (name, bytes) pairs, in input order
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().filter_map(|f| match f {
            FileOutcome::Processed { name, bytes } => Some((name.as_str(), bytes.as_slice())),
            _ => None,
        })
    }

    /// Names of files skipped for an invalid filename, in input order
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.files.iter().filter_map(|f| match f {
            FileOutcome::Skipped { name } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Failures as (name, error) pairs, in input order
    pub fn failures(&self) -> impl Iterator<Item = (&str, &StampError)> {
        self.files.iter().filter_map(|f| match f {
            FileOutcome::Failed { name, error } => Some((name.as_str(), error)),
            _ => None,
        })
    }

    /// True when no input file carried a valid sheet identifier.
    ///
    /// Callers must treat this as a terminal "nothing to process"
    /// condition rather than a silent success.
    pub fn nothing_to_process(&self) -> bool {
        self.files
            .iter()
            .all(|f| matches!(f, FileOutcome::Skipped { .. }))
    }
}

/// Process a batch of input files.
///
/// Builds the substitution plan over the input order, then rewrites each
/// planned file. Per-file processing runs in parallel; outcomes are
/// collected by input position, so the report order never depends on
/// completion order.
pub fn process(entries: &[FileEntry]) -> BatchReport {
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    let plan = sequence::plan(&names);

    let mut jobs: Vec<Option<&Substitutions>> = vec![None; entries.len()];
    for sheet in &plan.sheets {
        jobs[sheet.index] = Some(&sheet.values);
    }

    let files = entries
        .par_iter()
        .zip(jobs)
        .map(|(entry, values)| match values {
            None => FileOutcome::Skipped {
                name: entry.name.clone(),
            },
            Some(values) => match stamp_one(entry, values) {
                Ok(bytes) => FileOutcome::Processed {
                    name: entry.name.clone(),
                    bytes,
                },
                Err(error) => FileOutcome::Failed {
                    name: entry.name.clone(),
                    error,
                },
            },
        })
        .collect();

    BatchReport { files }
}

/// Load, rewrite and serialize one drawing as an uninterrupted unit.
fn stamp_one(entry: &FileEntry, values: &Substitutions) -> Result<Vec<u8>, StampError> {
    let mut document = dxf::load(&entry.bytes)?;
    let replaced = apply_substitutions(&mut document, values);
    debug!(
        file = entry.name.as_str(),
        replaced,
        sheet = values.sheet.as_str(),
        "placeholders rewritten"
    );
    dxf::save(&document)
}

/// Human-readable one-line status for a file outcome.
pub fn describe(outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Processed { name, .. } => format!("processed: {}", name),
        FileOutcome::Skipped { name } => {
            format!("skipped (no sheet id in filename): {}", name)
        }
        FileOutcome::Failed { name, error } => format!("failed: {}: {}", name, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawing_with_text(content: &str) -> Vec<u8> {
        format!(
            "  0\nSECTION\n  2\nENTITIES\n  0\nTEXT\n  8\n0\n  1\n{}\n  0\nENDSEC\n  0\nEOF\n",
            content
        )
        .into_bytes()
    }

    #[test]
    fn test_outcomes_keep_input_order() {
        let entries = vec![
            FileEntry::new("DWG_A_001_x.dxf", drawing_with_text("SHT")),
            FileEntry::new("bad.dxf", drawing_with_text("SHT")),
            FileEntry::new("DWG_B_002_x.dxf", drawing_with_text("SHT")),
        ];
        let report = process(&entries);

        let names: Vec<&str> = report.files.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["DWG_A_001_x.dxf", "bad.dxf", "DWG_B_002_x.dxf"]);
        assert!(matches!(report.files[1], FileOutcome::Skipped { .. }));
    }

    #[test]
    fn test_parse_failure_does_not_abort_siblings() {
        let entries = vec![
            FileEntry::new("DWG_A_001.dxf", b"not a drawing".to_vec()),
            FileEntry::new("DWG_B_002.dxf", drawing_with_text("SHT")),
        ];
        let report = process(&entries);

        assert!(matches!(report.files[0], FileOutcome::Failed { .. }));
        assert!(matches!(report.files[1], FileOutcome::Processed { .. }));
        assert_eq!(report.outputs().count(), 1);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_nothing_to_process() {
        let entries = vec![
            FileEntry::new("a.dxf", drawing_with_text("SHT")),
            FileEntry::new("b.dxf", drawing_with_text("SHT")),
        ];
        let report = process(&entries);
        assert!(report.nothing_to_process());
        assert_eq!(report.skipped().count(), 2);
    }

    #[test]
    fn test_describe_failed_includes_cause() {
        let outcome = FileOutcome::Failed {
            name: "x.dxf".to_string(),
            error: StampError::Parse("boom".to_string()),
        };
        let line = describe(&outcome);
        assert!(line.contains("x.dxf"));
        assert!(line.contains("boom"));
    }
}
