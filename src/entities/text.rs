//! Text entity

use super::Entity;
use crate::io::dxf::code_pair::{set_string_value, string_value};
use crate::io::dxf::CodePair;

/// A single-line text entity (TEXT).
///
/// The text content lives in group code 1. All other codes (position,
/// height, style, ...) are retained verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pairs: Vec<CodePair>,
}

impl Text {
    /// Create a text entity from its group code pairs
    pub fn from_pairs(pairs: Vec<CodePair>) -> Self {
        Self { pairs }
    }

    /// Get the text content
    pub fn value(&self) -> &str {
        string_value(&self.pairs, 1)
    }

    /// Set the text content
    pub fn set_value(&mut self, value: &str) {
        set_string_value(&mut self.pairs, 1, value);
    }
}

impl Entity for Text {
    fn dxf_name(&self) -> &str {
        "TEXT"
    }

    fn pairs(&self) -> &[CodePair] {
        &self.pairs
    }

    fn pairs_mut(&mut self) -> &mut Vec<CodePair> {
        &mut self.pairs
    }
}
