//! DXF file writer

use super::code_pair::CodePair;
use crate::document::{BlockDefinition, DxfDocument, Section};
use crate::entities::{Entity, EntityType};
use crate::error::Result;
use std::io::Write;

/// Serialize a document back to DXF bytes.
pub fn save(document: &DxfDocument) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    DxfWriter::new(&mut buf)
        .write_document(document)
        .map_err(|e| crate::error::StampError::Write(e.to_string()))?;
    Ok(buf)
}

/// ASCII DXF stream writer
pub struct DxfWriter<W: Write> {
    writer: W,
}

impl<W: Write> DxfWriter<W> {
    /// Create a new ASCII DXF writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a group code, right-aligned in a three-character field
    fn write_code(&mut self, code: i32) -> Result<()> {
        if code < 10 {
            writeln!(self.writer, "  {}", code)?;
        } else if code < 100 {
            writeln!(self.writer, " {}", code)?;
        } else {
            writeln!(self.writer, "{}", code)?;
        }
        Ok(())
    }

    /// Write one code/value pair
    fn write_pair(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn write_pairs(&mut self, pairs: &[CodePair]) -> Result<()> {
        for pair in pairs {
            self.write_pair(pair.code, &pair.value)?;
        }
        Ok(())
    }

    /// Write a full document: sections in original order, terminated by EOF
    pub fn write_document(&mut self, document: &DxfDocument) -> Result<()> {
        for section in document.sections() {
            match section {
                Section::Raw(raw) => {
                    self.write_pair(0, "SECTION")?;
                    self.write_pair(2, &raw.name)?;
                    self.write_pairs(&raw.pairs)?;
                    self.write_pair(0, "ENDSEC")?;
                }
                Section::Entities(entities) => {
                    self.write_pair(0, "SECTION")?;
                    self.write_pair(2, "ENTITIES")?;
                    for entity in entities {
                        self.write_entity(entity)?;
                    }
                    self.write_pair(0, "ENDSEC")?;
                }
                Section::Blocks(blocks) => {
                    self.write_pair(0, "SECTION")?;
                    self.write_pair(2, "BLOCKS")?;
                    for block in blocks {
                        self.write_block(block)?;
                    }
                    self.write_pair(0, "ENDSEC")?;
                }
            }
        }
        self.write_pair(0, "EOF")?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_entity(&mut self, entity: &EntityType) -> Result<()> {
        self.write_pair(0, entity.as_entity().dxf_name())?;
        self.write_pairs(entity.as_entity().pairs())?;

        if let EntityType::Insert(insert) = entity {
            for attrib in &insert.attributes {
                self.write_pair(0, attrib.dxf_name())?;
                self.write_pairs(attrib.pairs())?;
            }
            match insert.seqend() {
                Some(pairs) => {
                    self.write_pair(0, "SEQEND")?;
                    self.write_pairs(pairs)?;
                }
                None if !insert.attributes.is_empty() => {
                    self.write_pair(0, "SEQEND")?;
                }
                None => {}
            }
        }
        Ok(())
    }

    fn write_block(&mut self, block: &BlockDefinition) -> Result<()> {
        self.write_pair(0, "BLOCK")?;
        self.write_pairs(block.begin_pairs())?;
        for entity in &block.entities {
            self.write_entity(entity)?;
        }
        self.write_pair(0, "ENDBLK")?;
        self.write_pairs(block.end_pairs())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::reader::load;

    #[test]
    fn test_code_formatting() {
        let mut buf = Vec::new();
        {
            let mut writer = DxfWriter::new(&mut buf);
            writer.write_pair(5, "100").unwrap();
            writer.write_pair(62, "7").unwrap();
            writer.write_pair(100, "AcDbEntity").unwrap();
        }
        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("  5\n"));
        assert!(output.contains(" 62\n"));
        assert!(output.contains("100\n"));
    }

    #[test]
    fn test_roundtrip_preserves_unknown_content() {
        let data = concat!(
            "  0\nSECTION\n  2\nHEADER\n  9\n$ACADVER\n  1\nAC1032\n  0\nENDSEC\n",
            "  0\nSECTION\n  2\nENTITIES\n",
            "  0\nLINE\n  8\nWALLS\n 10\n0.0\n 20\n0.0\n 11\n5.0\n 21\n5.0\n",
            "  0\nTEXT\n  8\n0\n  1\nnot a placeholder\n",
            "  0\nENDSEC\n  0\nEOF\n"
        );
        let doc = load(data.as_bytes()).unwrap();
        let out = save(&doc).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), data);
    }

    #[test]
    fn test_synthesizes_seqend_for_attributes() {
        let data = concat!(
            "  0\nSECTION\n  2\nENTITIES\n",
            "  0\nINSERT\n  2\nTB\n 66\n1\n",
            "  0\nATTRIB\n  2\nSHT\n  1\nA_001\n",
            "  0\nENDSEC\n  0\nEOF\n"
        );
        let doc = load(data.as_bytes()).unwrap();
        let out = String::from_utf8(save(&doc).unwrap()).unwrap();
        assert!(out.contains("SEQEND"));
    }
}
