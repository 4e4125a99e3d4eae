//! Multi-line text entity

use super::Entity;
use crate::io::dxf::CodePair;

/// Maximum characters per text chunk; longer values continue in code 3 pairs.
const CHUNK_LEN: usize = 250;

/// A multi-line text entity (MTEXT).
///
/// The text content spans group codes 3 (leading chunks) and 1 (tail);
/// reading concatenates them in order of appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct MText {
    pairs: Vec<CodePair>,
}

impl MText {
    /// Create an mtext entity from its group code pairs
    pub fn from_pairs(pairs: Vec<CodePair>) -> Self {
        Self { pairs }
    }

    /// Get the full text content
    pub fn value(&self) -> String {
        self.pairs
            .iter()
            .filter(|p| p.code == 1 || p.code == 3)
            .map(|p| p.as_str())
            .collect()
    }

    /// Set the text content, re-chunking values longer than 250 characters
    /// into code 3 continuation pairs followed by a code 1 tail.
    pub fn set_value(&mut self, value: &str) {
        let insert_at = self
            .pairs
            .iter()
            .position(|p| p.code == 1 || p.code == 3)
            .unwrap_or(self.pairs.len());
        self.pairs.retain(|p| p.code != 1 && p.code != 3);

        let chars: Vec<char> = value.chars().collect();
        let mut replacement = Vec::new();
        let mut rest = chars.as_slice();
        while rest.len() > CHUNK_LEN {
            let (chunk, tail) = rest.split_at(CHUNK_LEN);
            replacement.push(CodePair::new(3, chunk.iter().collect::<String>()));
            rest = tail;
        }
        replacement.push(CodePair::new(1, rest.iter().collect::<String>()));

        self.pairs.splice(insert_at..insert_at, replacement);
    }
}

impl Entity for MText {
    fn dxf_name(&self) -> &str {
        "MTEXT"
    }

    fn pairs(&self) -> &[CodePair] {
        &self.pairs
    }

    fn pairs_mut(&mut self) -> &mut Vec<CodePair> {
        &mut self.pairs
    }
}
