//! Whole-export conversions against the fixture export.

use crate::common::{fixture, transkribus_tables};
use page_tei::annotation::{ConversionWarning, IgnoreWarnings};
use page_tei::page::read_mets;
use page_tei::tei::validate;
use page_tei::{convert_export, convert_folder, ConvertError, ConvertOptions, TagTables};
use std::fs;
use tempfile::tempdir;

#[test]
fn fixture_manifest_lists_page_files_only() {
    let manifest = read_mets(&fixture("export_1/mets.xml")).unwrap();
    assert_eq!(manifest.pages, vec!["page/0001.xml", "page/0002.xml"]);
    assert_eq!(manifest.metadata.title, "Urkunde Brugg 1312");
    assert_eq!(manifest.metadata.collection, "Klosterarchiv");
}

#[test]
fn export_matches_expected_tei() {
    let tei = convert_export(
        &fixture("export_1/mets.xml"),
        &transkribus_tables(),
        &mut IgnoreWarnings,
        "tranScriptorium",
    )
    .unwrap();
    let expected = fs::read_to_string(fixture("export_1.tei.xml")).unwrap();
    assert_eq!(tei.to_xml(), expected);
}

#[test]
fn export_is_well_formed() {
    let tei = convert_export(
        &fixture("export_1/mets.xml"),
        &transkribus_tables(),
        &mut IgnoreWarnings,
        "tranScriptorium",
    )
    .unwrap();
    assert!(validate(&tei.to_xml()).is_ok());
}

#[test]
fn fixture_converts_without_warnings() {
    let mut warnings: Vec<ConversionWarning> = Vec::new();
    convert_export(
        &fixture("export_1/mets.xml"),
        &transkribus_tables(),
        &mut warnings,
        "tranScriptorium",
    )
    .unwrap();
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn batch_writes_one_file_per_export() {
    let output = tempdir().unwrap();
    let report = convert_folder(
        &fixture(""),
        output.path(),
        &transkribus_tables(),
        &ConvertOptions::default(),
    )
    .unwrap();

    assert!(report.is_success());
    assert_eq!(report.converted.len(), 1);
    let written = &report.converted[0];
    assert_eq!(written.output, output.path().join("export_1.xml"));
    assert_eq!(written.valid, Some(true));
    assert_eq!(written.warnings, 0);

    let expected = fs::read_to_string(fixture("export_1.tei.xml")).unwrap();
    assert_eq!(fs::read_to_string(&written.output).unwrap(), expected);
}

#[test]
fn crossing_annotations_are_written_but_flagged() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let export = input.path().join("crossing");
    fs::create_dir_all(export.join("page")).unwrap();
    fs::copy(fixture("export_1/mets.xml"), export.join("mets.xml")).unwrap();
    fs::copy(
        fixture("export_1/page/0002.xml"),
        export.join("page/0002.xml"),
    )
    .unwrap();
    let page = fs::read_to_string(fixture("export_1/page/0001.xml"))
        .unwrap()
        .replace(
            "place {offset:9;length:5;}",
            "place {offset:9;length:8;}",
        );
    fs::write(export.join("page/0001.xml"), page).unwrap();

    let report = convert_folder(
        input.path(),
        output.path(),
        &transkribus_tables(),
        &ConvertOptions::default(),
    )
    .unwrap();
    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.converted[0].valid, Some(false));
    let written = fs::read_to_string(output.path().join("crossing.xml")).unwrap();
    assert!(written.contains(
        r#"Geben ze <placeName>Brugg <date when="1312-11-09">13</placeName>12</date>"#
    ));
}

#[test]
fn missing_page_fails_only_that_export() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    let export = input.path().join("incomplete");
    fs::create_dir_all(&export).unwrap();
    fs::copy(fixture("export_1/mets.xml"), export.join("mets.xml")).unwrap();

    let report = convert_folder(
        input.path(),
        output.path(),
        &TagTables::default(),
        &ConvertOptions::default(),
    )
    .unwrap();
    assert!(!report.is_success());
    assert!(report.converted.is_empty());
    assert!(matches!(report.failed[0].1, ConvertError::Io { .. }));
    assert!(!output.path().join("incomplete.xml").exists());
}
