//! DXF file reader

use super::code_pair::CodePair;
use super::encoding::encoding_from_code_page;
use crate::document::{BlockDefinition, DxfDocument, RawSection, Section};
use crate::entities::{AttributeEntity, EntityType, Insert, MText, RawEntity, Text};
use crate::error::{Result, StampError};
use encoding_rs::Encoding;

const BINARY_SENTINEL: &[u8] = b"AutoCAD Binary DXF";

/// First DXF version that stores strings as UTF-8 (AutoCAD 2007).
const UNICODE_VERSION: &str = "AC1021";

/// Load a document from raw DXF bytes.
pub fn load(bytes: &[u8]) -> Result<DxfDocument> {
    DxfReader::new(bytes)?.read()
}

/// ASCII DXF reader operating on in-memory bytes.
pub struct DxfReader<'a> {
    bytes: &'a [u8],
    encoding: Option<&'static Encoding>,
}

impl<'a> DxfReader<'a> {
    /// Create a reader over raw DXF bytes.
    ///
    /// Binary DXF (sentinel `AutoCAD Binary DXF`) is rejected here; only
    /// the ASCII form is supported.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.starts_with(BINARY_SENTINEL) {
            return Err(StampError::UnsupportedFormat(
                "binary DXF is not supported".to_string(),
            ));
        }
        Ok(Self {
            bytes,
            encoding: None,
        })
    }

    /// Read the full document.
    pub fn read(mut self) -> Result<DxfDocument> {
        self.detect_code_page()?;
        let pairs = self.read_pairs()?;
        parse_document(pairs)
    }

    /// Pre-scan the HEADER section for $ACADVER and $DWGCODEPAGE.
    ///
    /// If the version is older than AC1021 (AutoCAD 2007) and a non-UTF-8
    /// code page is declared, subsequent decoding uses that encoding.
    fn detect_code_page(&mut self) -> Result<()> {
        let pairs = self.read_pairs()?;
        let mut version: Option<String> = None;
        let mut code_page: Option<String> = None;

        let mut iter = pairs.iter().peekable();
        while let Some(pair) = iter.next() {
            if pair.code == 0 && pair.value == "ENDSEC" {
                // Header variables only appear in the first section
                break;
            }
            if pair.code == 9 {
                match pair.value.as_str() {
                    "$ACADVER" => {
                        if let Some(p) = iter.peek() {
                            if p.code == 1 {
                                version = Some(p.value.clone());
                            }
                        }
                    }
                    "$DWGCODEPAGE" => {
                        if let Some(p) = iter.peek() {
                            if p.code == 3 {
                                code_page = Some(p.value.clone());
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        let pre_unicode = version.map(|v| v.as_str() < UNICODE_VERSION).unwrap_or(true);
        if pre_unicode {
            if let Some(cp) = code_page {
                self.encoding = encoding_from_code_page(&cp);
            }
        }
        Ok(())
    }

    /// Read all code/value pairs from the byte stream.
    fn read_pairs(&self) -> Result<Vec<CodePair>> {
        let mut pairs = Vec::new();
        let mut lines = self.bytes.split(|&b| b == b'\n');
        let mut line_number = 0usize;

        loop {
            let code_line = match lines.next() {
                Some(line) => line,
                None => break,
            };
            line_number += 1;

            let code_text = self.decode_line(code_line);
            let code_text = code_text.trim();
            // A trailing newline leaves one empty chunk at the end
            if code_text.is_empty() && lines.clone().next().is_none() {
                break;
            }

            let code =
                code_text
                    .parse::<i32>()
                    .map_err(|_| StampError::InvalidDxfCode {
                        line: line_number,
                        value: code_text.to_string(),
                    })?;

            let value_line = lines.next().ok_or_else(|| {
                StampError::Parse(format!(
                    "unexpected EOF after code {} at line {}",
                    code, line_number
                ))
            })?;
            line_number += 1;

            pairs.push(CodePair::new(code, self.decode_line(value_line)));
        }

        Ok(pairs)
    }

    /// Decode one line, stripping the trailing `\r` of CRLF files.
    ///
    /// UTF-8 is tried first; non-UTF-8 bytes fall back to the detected code
    /// page, or Latin-1 when none was declared. Values are otherwise kept
    /// verbatim so unrelated content survives a load/save cycle.
    fn decode_line(&self, line: &[u8]) -> String {
        let line = match line.last() {
            Some(b'\r') => &line[..line.len() - 1],
            _ => line,
        };
        match std::str::from_utf8(line) {
            Ok(s) => s.to_string(),
            Err(_) => {
                if let Some(enc) = self.encoding {
                    let (decoded, _, _) = enc.decode(line);
                    decoded.into_owned()
                } else {
                    // Latin-1 maps bytes 0-255 directly to code points
                    line.iter().map(|&b| b as char).collect()
                }
            }
        }
    }
}

/// Cursor over a pair list for structural parsing.
struct PairCursor {
    pairs: Vec<CodePair>,
    pos: usize,
}

impl PairCursor {
    fn next(&mut self) -> Option<CodePair> {
        let pair = self.pairs.get(self.pos).cloned();
        if pair.is_some() {
            self.pos += 1;
        }
        pair
    }

    fn peek(&self) -> Option<&CodePair> {
        self.pairs.get(self.pos)
    }

    /// Collect pairs up to (not including) the next code 0.
    fn take_record_body(&mut self) -> Vec<CodePair> {
        let start = self.pos;
        while let Some(pair) = self.peek() {
            if pair.code == 0 {
                break;
            }
            self.pos += 1;
        }
        self.pairs[start..self.pos].to_vec()
    }

    /// Check whether the next pair is a record start with the given name.
    fn at_record(&self, name: &str) -> bool {
        matches!(self.peek(), Some(p) if p.code == 0 && p.value == name)
    }
}

fn parse_document(pairs: Vec<CodePair>) -> Result<DxfDocument> {
    let mut cursor = PairCursor { pairs, pos: 0 };
    let mut sections = Vec::new();

    while let Some(pair) = cursor.next() {
        if pair.code != 0 {
            continue;
        }
        match pair.value.as_str() {
            "SECTION" => {
                let name_pair = cursor
                    .next()
                    .ok_or_else(|| StampError::Parse("missing section name".to_string()))?;
                if name_pair.code != 2 {
                    return Err(StampError::Parse(format!(
                        "expected section name, found code {}",
                        name_pair.code
                    )));
                }
                sections.push(read_section(&mut cursor, &name_pair.value)?);
            }
            "EOF" => break,
            _ => {}
        }
    }

    Ok(DxfDocument::new(sections))
}

fn read_section(cursor: &mut PairCursor, name: &str) -> Result<Section> {
    match name {
        "ENTITIES" => Ok(Section::Entities(read_entities(cursor, "ENDSEC")?)),
        "BLOCKS" => Ok(Section::Blocks(read_blocks(cursor)?)),
        _ => {
            let mut pairs = Vec::new();
            loop {
                let pair = cursor.next().ok_or_else(|| {
                    StampError::Parse(format!("{} section not terminated", name))
                })?;
                if pair.code == 0 && pair.value == "ENDSEC" {
                    break;
                }
                pairs.push(pair);
            }
            Ok(Section::Raw(RawSection {
                name: name.to_string(),
                pairs,
            }))
        }
    }
}

/// Read entities up to the given terminator record (ENDSEC or ENDBLK),
/// which is left unconsumed for ENDBLK and consumed for ENDSEC.
fn read_entities(cursor: &mut PairCursor, terminator: &str) -> Result<Vec<EntityType>> {
    let mut entities = Vec::new();

    loop {
        if terminator == "ENDBLK" && cursor.at_record(terminator) {
            return Ok(entities);
        }
        let pair = cursor
            .next()
            .ok_or_else(|| StampError::Parse(format!("missing {} record", terminator)))?;
        if pair.code != 0 {
            continue;
        }
        if pair.value == terminator {
            return Ok(entities);
        }
        entities.push(read_entity(cursor, &pair.value));
    }
}

fn read_entity(cursor: &mut PairCursor, name: &str) -> EntityType {
    let body = cursor.take_record_body();
    match name {
        "TEXT" => EntityType::Text(Text::from_pairs(body)),
        "MTEXT" => EntityType::MText(MText::from_pairs(body)),
        "INSERT" => {
            let mut insert = Insert::from_pairs(body);
            while cursor.at_record("ATTRIB") {
                cursor.next();
                insert
                    .attributes
                    .push(AttributeEntity::from_pairs(cursor.take_record_body()));
            }
            if cursor.at_record("SEQEND") {
                cursor.next();
                insert.set_seqend(cursor.take_record_body());
            }
            EntityType::Insert(insert)
        }
        _ => EntityType::Other(RawEntity::new(name, body)),
    }
}

fn read_blocks(cursor: &mut PairCursor) -> Result<Vec<BlockDefinition>> {
    let mut blocks = Vec::new();

    loop {
        let pair = cursor
            .next()
            .ok_or_else(|| StampError::Parse("BLOCKS section not terminated".to_string()))?;
        if pair.code != 0 {
            continue;
        }
        match pair.value.as_str() {
            "ENDSEC" => return Ok(blocks),
            "BLOCK" => {
                let begin = cursor.take_record_body();
                let entities = read_entities(cursor, "ENDBLK")?;
                // read_entities leaves the ENDBLK record unconsumed
                cursor.next();
                let end = cursor.take_record_body();
                blocks.push(BlockDefinition::new(begin, entities, end));
            }
            other => {
                return Err(StampError::Parse(format!(
                    "expected BLOCK record, found {}",
                    other
                )));
            }
        }
    }
}
