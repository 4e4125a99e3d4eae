//! End-to-end batch behavior: planning, partial failure, archive round trip.

mod common;

use common::{broken_drawing, model_attribute_values, model_text_values, sheet_drawing};
use sheetstamp::archive;
use sheetstamp::batch::{self, FileEntry, FileOutcome};

#[test]
fn two_sheets_and_one_invalid_name() {
    let entries = vec![
        FileEntry::new("DWG_A_001_x.dxf", sheet_drawing()),
        FileEntry::new("DWG_B_002_x.dxf", sheet_drawing()),
        FileEntry::new("bad.dxf", sheet_drawing()),
    ];
    let report = batch::process(&entries);

    let outputs: Vec<(&str, &[u8])> = report.outputs().collect();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].0, "DWG_A_001_x.dxf");
    assert_eq!(outputs[1].0, "DWG_B_002_x.dxf");
    assert_eq!(report.skipped().collect::<Vec<_>>(), vec!["bad.dxf"]);

    // First sheet: own number, successor's number, first title
    assert_eq!(model_text_values(outputs[0].1), vec!["A_001"]);
    assert_eq!(
        model_attribute_values(outputs[0].1),
        vec![
            ("SHT".to_string(), "A_001".to_string()),
            ("REV".to_string(), "A".to_string()),
        ]
    );

    // Last sheet: empty continuation
    let last = sheetstamp::io::dxf::load(outputs[1].1).unwrap();
    let mtext_value = last
        .modelspace()
        .find_map(|e| match e {
            sheetstamp::EntityType::MText(m) => Some(m.value()),
            _ => None,
        })
        .unwrap();
    assert_eq!(mtext_value, "");

    let block = last.blocks().next().unwrap();
    match &block.entities[0] {
        sheetstamp::EntityType::Text(t) => assert_eq!(t.value(), "TITLE 2"),
        other => panic!("unexpected entity {:?}", other),
    }
}

#[test]
fn skipped_names_occupy_no_position() {
    let entries = vec![
        FileEntry::new("DWG_A_001.dxf", sheet_drawing()),
        FileEntry::new("notes.dxf", sheet_drawing()),
        FileEntry::new("DWG_C_003.dxf", sheet_drawing()),
    ];
    let report = batch::process(&entries);

    let outputs: Vec<(&str, &[u8])> = report.outputs().collect();
    // Lookahead skips the invalid name: A_001 continues to C_003
    let first = sheetstamp::io::dxf::load(outputs[0].1).unwrap();
    let continuation = first
        .modelspace()
        .find_map(|e| match e {
            sheetstamp::EntityType::MText(m) => Some(m.value()),
            _ => None,
        })
        .unwrap();
    assert_eq!(continuation, "C_003");

    // Second valid file holds position two, not three
    let second = sheetstamp::io::dxf::load(outputs[1].1).unwrap();
    match &second.blocks().next().unwrap().entities[0] {
        sheetstamp::EntityType::Text(t) => assert_eq!(t.value(), "TITLE 2"),
        other => panic!("unexpected entity {:?}", other),
    };
}

#[test]
fn one_broken_drawing_does_not_stop_the_batch() {
    let entries = vec![
        FileEntry::new("DWG_A_001.dxf", broken_drawing()),
        FileEntry::new("DWG_B_002.dxf", sheet_drawing()),
    ];
    let report = batch::process(&entries);

    assert!(matches!(report.files[0], FileOutcome::Failed { .. }));
    assert!(matches!(report.files[1], FileOutcome::Processed { .. }));

    let failures: Vec<(&str, _)> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "DWG_A_001.dxf");

    // The surviving sheet is still the last of the filtered list
    let (_, bytes) = report.outputs().next().unwrap();
    assert_eq!(model_text_values(bytes), vec!["B_002"]);
}

#[test]
fn every_file_gets_exactly_one_disposition() {
    let entries = vec![
        FileEntry::new("DWG_A_001.dxf", sheet_drawing()),
        FileEntry::new("unnumbered.dxf", sheet_drawing()),
        FileEntry::new("DWG_B_002.dxf", broken_drawing()),
    ];
    let report = batch::process(&entries);

    assert_eq!(report.files.len(), entries.len());
    for (entry, outcome) in entries.iter().zip(&report.files) {
        assert_eq!(entry.name, outcome.name());
    }
    assert_eq!(report.outputs().count(), 1);
    assert_eq!(report.skipped().count(), 1);
    assert_eq!(report.failures().count(), 1);
}

#[test]
fn archive_in_archive_out() {
    let uploaded = archive::bundle_entries([
        ("DWG_A_001.dxf", sheet_drawing().as_slice()),
        ("DWG_B_002.dxf", sheet_drawing().as_slice()),
    ])
    .unwrap();

    let entries = archive::extract_entries(&uploaded).unwrap();
    let report = batch::process(&entries);
    let result_zip = archive::bundle_entries(report.outputs()).unwrap();

    let results = archive::extract_entries(&result_zip).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "DWG_A_001.dxf");
    assert_eq!(model_text_values(&results[0].bytes), vec!["A_001"]);
    assert_eq!(model_text_values(&results[1].bytes), vec!["B_002"]);
}
