//! Attribute entity - block attribute instance with its actual value

use super::Entity;
use crate::io::dxf::code_pair::{set_string_value, string_value};
use crate::io::dxf::CodePair;

/// An attribute record (ATTRIB) attached to a block reference.
///
/// The tag lives in group code 2, the value in group code 1.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEntity {
    pairs: Vec<CodePair>,
}

impl AttributeEntity {
    /// Create an attribute from its group code pairs
    pub fn from_pairs(pairs: Vec<CodePair>) -> Self {
        Self { pairs }
    }

    /// Get the attribute tag
    pub fn tag(&self) -> &str {
        string_value(&self.pairs, 2)
    }

    /// Get the attribute value
    pub fn value(&self) -> &str {
        string_value(&self.pairs, 1)
    }

    /// Set the attribute value
    pub fn set_value(&mut self, value: &str) {
        set_string_value(&mut self.pairs, 1, value);
    }
}

impl Entity for AttributeEntity {
    fn dxf_name(&self) -> &str {
        "ATTRIB"
    }

    fn pairs(&self) -> &[CodePair] {
        &self.pairs
    }

    fn pairs_mut(&mut self) -> &mut Vec<CodePair> {
        &mut self.pairs
    }
}
