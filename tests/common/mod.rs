//! Shared test utilities for sheetstamp integration tests.
//!
//! DXF fixtures are built as strings: group code right-aligned in a
//! three-character field, value on the following line, matching the
//! writer's output format so unchanged drawings compare byte-identical.

#![allow(dead_code)]

use sheetstamp::entities::EntityType;
use sheetstamp::io::dxf;

/// A minimal drawing whose ENTITIES section holds one TEXT entity per
/// given content string.
pub fn drawing_with_texts(contents: &[&str]) -> Vec<u8> {
    let mut out = String::from("  0\nSECTION\n  2\nENTITIES\n");
    for content in contents {
        out.push_str(&format!("  0\nTEXT\n  8\n0\n 40\n2.5\n  1\n{}\n", content));
    }
    out.push_str("  0\nENDSEC\n  0\nEOF\n");
    out.into_bytes()
}

/// A drawing resembling a real sheet: header, a title block definition
/// holding a `TITLE1` text, a model-space `SHT` text, a `CONT` mtext and
/// an insert of the title block with `SHT`/`CONT` attributes.
pub fn sheet_drawing() -> Vec<u8> {
    concat!(
        "  0\nSECTION\n  2\nHEADER\n",
        "  9\n$ACADVER\n  1\nAC1032\n",
        "  0\nENDSEC\n",
        "  0\nSECTION\n  2\nBLOCKS\n",
        "  0\nBLOCK\n  8\n0\n  2\nTITLEBLOCK\n 70\n0\n",
        "  0\nTEXT\n  8\n0\n  1\nTITLE1\n",
        "  0\nTEXT\n  8\n0\n  1\nDRAWN BY\n",
        "  0\nENDBLK\n  8\n0\n",
        "  0\nENDSEC\n",
        "  0\nSECTION\n  2\nENTITIES\n",
        "  0\nTEXT\n  8\nFRAME\n  1\nSHT\n",
        "  0\nMTEXT\n  8\nFRAME\n  1\nCONT\n",
        "  0\nLINE\n  8\nFRAME\n 10\n0.0\n 20\n0.0\n 11\n420.0\n 21\n297.0\n",
        "  0\nINSERT\n  8\nFRAME\n  2\nTITLEBLOCK\n 66\n1\n",
        "  0\nATTRIB\n  8\nFRAME\n  2\nSHT\n  1\nSHT\n",
        "  0\nATTRIB\n  8\nFRAME\n  2\nREV\n  1\nA\n",
        "  0\nSEQEND\n  8\nFRAME\n",
        "  0\nENDSEC\n",
        "  0\nEOF\n"
    )
    .as_bytes()
    .to_vec()
}

/// Bytes that no DXF parser should accept.
pub fn broken_drawing() -> Vec<u8> {
    b"this is not a drawing".to_vec()
}

/// Collect the content of every model-space TEXT entity.
pub fn model_text_values(bytes: &[u8]) -> Vec<String> {
    let doc = dxf::load(bytes).expect("fixture should parse");
    doc.modelspace()
        .filter_map(|e| match e {
            EntityType::Text(t) => Some(t.value().to_string()),
            _ => None,
        })
        .collect()
}

/// Collect (tag, value) pairs of every model-space insert attribute.
pub fn model_attribute_values(bytes: &[u8]) -> Vec<(String, String)> {
    let doc = dxf::load(bytes).expect("fixture should parse");
    doc.modelspace()
        .filter_map(|e| match e {
            EntityType::Insert(i) => Some(
                i.attributes
                    .iter()
                    .map(|a| (a.tag().to_string(), a.value().to_string()))
                    .collect::<Vec<_>>(),
            ),
            _ => None,
        })
        .flatten()
        .collect()
}
