//! Sheet sequence derivation from filenames
//!
//! Drawing sets follow a naming convention where each file carries a sheet
//! identifier of the form `<letter>_<three digits>` somewhere in its name
//! (`PLANT2_DWG_B_014_REV3.dxf` -> `B_014`). The planner orders files,
//! links each sheet to its successor and assigns positional titles.

use crate::rewrite::Substitutions;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Title value prefix; the 1-based sheet position is appended.
const TITLE_PREFIX: &str = "TITLE ";

/// An underscore, one uppercase letter, an underscore, exactly three
/// digits. The trailing guard rejects four-digit runs without preventing a
/// later occurrence in the same name from matching.
static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_([A-Z])_([0-9]{3})(?:[^0-9]|$)").unwrap());

/// A sheet identifier derived from a filename, `<letter>_<digits>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceKey(String);

impl SequenceKey {
    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the sheet identifier from a filename.
///
/// The first occurrence wins when a name contains several. Returns `None`
/// when the name does not follow the convention.
pub fn extract_sequence_key(filename: &str) -> Option<SequenceKey> {
    KEY_PATTERN.captures(filename).map(|caps| {
        SequenceKey(format!(
            "{}_{}",
            caps.get(1).unwrap().as_str(),
            caps.get(2).unwrap().as_str()
        ))
    })
}

/// One file of a [`SheetPlan`] with its computed substitution values.
#[derive(Debug, Clone)]
pub struct PlannedSheet {
    /// Position of the file in the input list
    pub index: usize,
    /// The sheet identifier derived from the filename
    pub key: SequenceKey,
    /// The values to stamp into this file
    pub values: Substitutions,
}

/// The substitution plan for an ordered list of filenames.
#[derive(Debug, Clone)]
pub struct SheetPlan {
    /// Files with a valid sheet identifier, in input order
    pub sheets: Vec<PlannedSheet>,
    /// Input positions of files without a valid sheet identifier
    pub skipped: Vec<usize>,
}

impl SheetPlan {
    /// True when no file carried a valid sheet identifier
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Build the substitution plan for an ordered list of filenames.
///
/// Input order is preserved; callers sort beforehand for deterministic
/// results. Files without a valid identifier go to the skipped list and do
/// not occupy a position: the continuation lookahead and the title
/// numbering both run over the filtered list only. The last sheet always
/// receives an empty continuation.
pub fn plan<S: AsRef<str>>(names: &[S]) -> SheetPlan {
    let mut keyed = Vec::new();
    let mut skipped = Vec::new();
    for (index, name) in names.iter().enumerate() {
        match extract_sequence_key(name.as_ref()) {
            Some(key) => keyed.push((index, key)),
            None => skipped.push(index),
        }
    }

    let sheets = keyed
        .iter()
        .enumerate()
        .map(|(position, (index, key))| {
            let continuation = keyed
                .get(position + 1)
                .map(|(_, next)| next.as_str().to_string())
                .unwrap_or_default();
            PlannedSheet {
                index: *index,
                key: key.clone(),
                values: Substitutions {
                    sheet: key.as_str().to_string(),
                    continuation,
                    title: format!("{}{}", TITLE_PREFIX, position + 1),
                },
            }
        })
        .collect();

    SheetPlan { sheets, skipped }
}
