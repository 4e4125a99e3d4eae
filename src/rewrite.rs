//! Placeholder substitution inside a drawing
//!
//! Title block templates carry three sentinel strings: `SHT` (this sheet's
//! number), `CONT` (the next sheet's number) and `TITLE1` (the positional
//! title). The rewriter walks a loaded document and replaces exactly those
//! fields, leaving everything else untouched.

use crate::document::DxfDocument;
use crate::entities::{EntityType, Insert};

/// Sentinel replaced by the file's own sheet number
pub const SHEET_PLACEHOLDER: &str = "SHT";
/// Sentinel replaced by the next sheet's number
pub const CONTINUATION_PLACEHOLDER: &str = "CONT";
/// Sentinel replaced by the positional title
pub const TITLE_PLACEHOLDER: &str = "TITLE1";

/// The three values stamped into one drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitutions {
    /// Value for the `SHT` placeholder
    pub sheet: String,
    /// Value for the `CONT` placeholder; empty for the last sheet
    pub continuation: String,
    /// Value for the `TITLE1` placeholder
    pub title: String,
}

impl Substitutions {
    /// The replacement for a placeholder, or `None` for any other content.
    ///
    /// The candidate is trimmed before comparison; the replacement is
    /// written verbatim. Matching is exact and case-sensitive.
    fn replacement_for(&self, content: &str) -> Option<&str> {
        match content.trim() {
            SHEET_PLACEHOLDER => Some(&self.sheet),
            CONTINUATION_PLACEHOLDER => Some(&self.continuation),
            TITLE_PLACEHOLDER => Some(&self.title),
            _ => None,
        }
    }
}

/// Replace the placeholder fields of a document in place.
///
/// Scans, in order: text entities in the primary space, attributes of
/// block references in the primary space, then text entities owned by
/// block definitions. Returns the number of fields replaced.
pub fn apply_substitutions(document: &mut DxfDocument, values: &Substitutions) -> usize {
    let mut replaced = 0;

    for entity in document.modelspace_mut() {
        replaced += match entity {
            EntityType::Insert(insert) => rewrite_attributes(insert, values),
            other => rewrite_text(other, values),
        };
    }

    for block in document.blocks_mut() {
        for entity in &mut block.entities {
            replaced += rewrite_text(entity, values);
        }
    }

    replaced
}

/// Replace a matching TEXT/MTEXT content; other kinds are left alone.
fn rewrite_text(entity: &mut EntityType, values: &Substitutions) -> usize {
    match entity {
        EntityType::Text(text) => {
            if let Some(replacement) = values.replacement_for(text.value()) {
                text.set_value(replacement);
                return 1;
            }
            0
        }
        EntityType::MText(mtext) => {
            if let Some(replacement) = values.replacement_for(&mtext.value()) {
                mtext.set_value(replacement);
                return 1;
            }
            0
        }
        EntityType::Insert(_) | EntityType::Other(_) => 0,
    }
}

/// Replace matching attribute values of a block reference, keyed by tag.
fn rewrite_attributes(insert: &mut Insert, values: &Substitutions) -> usize {
    let mut replaced = 0;
    for attrib in &mut insert.attributes {
        let replacement = match attrib.tag() {
            SHEET_PLACEHOLDER => Some(values.sheet.as_str()),
            CONTINUATION_PLACEHOLDER => Some(values.continuation.as_str()),
            TITLE_PLACEHOLDER => Some(values.title.as_str()),
            _ => None,
        };
        if let Some(replacement) = replacement {
            attrib.set_value(replacement);
            replaced += 1;
        }
    }
    replaced
}
