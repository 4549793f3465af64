//! End-to-end test suite for ctlmatch-core.

use crate::*;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_file(file: &Path, content: &str) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn setup_temp_project() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("ctlmatch_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(dir.join("data")).unwrap();
    dir
}

fn keywords(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Scans in-memory `(identifier, text)` rows with `kw`.
fn scan_rows(kw: &[&str], rows: &[(&str, &str)]) -> CatalogScan {
    let pipeline = EnglishPipeline::new();
    let matchers = build_matchers(&pipeline, &keywords(kw));
    let records = rows
        .iter()
        .map(|&(id, text)| Ok(ControlRecord::new(Some(id), text)));
    scan_catalog(&pipeline, &matchers.as_slice(), records).unwrap()
}

// Phrase matching is exact on the lowercase form, so casing in the control
// text does not matter and the original casing is kept as evidence.
#[test]
fn test_phrase_match_case_insensitive() {
    let scan = scan_rows(
        &["access control"],
        &[("AC-1", "Develop an Access Control policy.")],
    );
    assert_eq!(scan.matches.len(), 1);
    assert_eq!(scan.matches[0].evidence, set(&["Access Control"]));
}

#[test]
fn test_lemma_tolerance() {
    let pipeline = EnglishPipeline::new();
    let matchers = build_matchers(&pipeline, &keywords(&["authorize"]));

    let doc = pipeline.analyze("The owner authorized it and authorizes others.");
    assert!(matchers.phrase.find_matches(&doc).is_empty());
    assert_eq!(
        matchers.lemma.matched_texts(&doc),
        vec!["authorized", "authorizes"]
    );
}

// The same span found by both matchers counts once.
#[test]
fn test_evidence_deduplicated_across_matchers() {
    let scan = scan_rows(&["access control"], &[("AC-1", "access control")]);
    assert_eq!(scan.matches[0].depth(), 1);
}

#[test]
fn test_evidence_keeps_distinct_casings() {
    let scan = scan_rows(
        &["access control"],
        &[("AC-1", "Access Control and access control.")],
    );
    assert_eq!(
        scan.matches[0].evidence,
        set(&["Access Control", "access control"])
    );
}

#[test]
fn test_threshold_boundary() {
    let scan = scan_rows(
        &["audit", "review", "report"],
        &[
            ("TWO", "audit and review"),
            ("THREE", "audit, review and report"),
        ],
    );
    assert_eq!(scan.matches.len(), 2);

    let at_two = classify(scan.matches.clone(), 2);
    assert_eq!(at_two.identifiers(), set(&["THREE"]));

    let at_zero = classify(scan.matches, 0);
    assert_eq!(at_zero.identifiers(), set(&["TWO", "THREE"]));
}

#[test]
fn test_controls_without_evidence_dropped() {
    let scan = scan_rows(
        &["encryption"],
        &[("SC-13", "Use encryption."), ("PE-3", "Lock the doors.")],
    );
    assert_eq!(scan.scanned, 2);
    assert_eq!(scan.matches.len(), 1);
    assert_eq!(scan.matches[0].record.identifier.as_deref(), Some("SC-13"));
}

#[test]
fn test_empty_keyword_list_yields_no_matches() {
    let scan = scan_rows(&[], &[("AC-1", "access control"), ("AC-2", "accounts")]);
    assert_eq!(scan.scanned, 2);
    assert!(scan.matches.is_empty());
}

#[test]
fn test_reconciliation_partition() {
    let result = reconcile(&set(&["A", "B"]), &set(&["B", "C"]));
    assert_eq!(result.agreement, set(&["B"]));
    assert_eq!(result.reference_only, set(&["C"]));
    assert_eq!(result.discovery_only, set(&["A"]));
}

// A row missing the text column aborts the scan before later rows are read.
#[test]
fn test_missing_text_column_is_fatal() {
    let csv = "identifier,control_text\nAC-1,access control\nAC-2\nAC-3,access control\n";
    let pipeline = EnglishPipeline::new();
    let matchers = build_matchers(&pipeline, &keywords(&["access control"]));

    let read = Cell::new(0);
    let records = CatalogReader::from_reader(csv.as_bytes(), "control_text")
        .unwrap()
        .inspect(|_| read.set(read.get() + 1));

    let err = scan_catalog(&pipeline, &matchers.as_slice(), records).unwrap_err();
    assert!(matches!(err, CtlmatchError::MissingField { row: 2, .. }));
    assert_eq!(read.get(), 2);
}

#[test]
fn test_duplicate_identifiers_collapse() {
    let scan = scan_rows(
        &["audit"],
        &[("AU-2", "audit events"), ("AU-2", "audit records")],
    );
    assert_eq!(scan.matches.len(), 2);

    let classification = classify(scan.matches, 0);
    assert_eq!(classification.len(), 2);
    assert_eq!(classification.identifiers(), set(&["AU-2"]));
}

#[test]
fn test_full_run_through_builder() {
    let root = setup_temp_project();
    write_file(
        &root.join("data/keyword_file.txt"),
        "  access control\n\nauthorize\naudit \nencryption\n",
    );
    write_file(
        &root.join("data/NIST_SP-800-53_rev5_catalog_load.csv"),
        "identifier,control_text\n\
         AC-3,\"Enforce access control so only authorized users audit records.\"\n\
         ,\"Audit access control changes; only authorized staff may audit.\"\n\
         SC-13,\"Implement encryption.\"\n",
    );
    write_file(&root.join("data/controls_ids.txt"), "AC-3\nSC-28\n\n");

    let result = Ctlmatch::new(&root).run().unwrap();

    assert_eq!(result.keywords.len(), 4);
    assert_eq!(result.reference_ids, keywords(&["AC-3", "SC-28"]));
    assert_eq!(result.scanned, 3);
    assert_eq!(result.with_evidence, 3);

    // The unidentified control clears the threshold but stays out of the sets.
    assert_eq!(result.classification.len(), 2);
    assert_eq!(result.classification.unidentified(), 1);
    assert_eq!(result.classification.unidentified_rows(), vec![Some(2)]);
    assert_eq!(result.reconciliation.agreement, set(&["AC-3"]));
    assert_eq!(result.reconciliation.reference_only, set(&["SC-28"]));
    assert!(result.reconciliation.discovery_only.is_empty());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_config_file_applied() {
    let root = setup_temp_project();
    write_file(&root.join("kw.txt"), "audit\n");
    write_file(
        &root.join("catalog.csv"),
        "identifier,statement\nAU-6,\"Review and audit records.\"\n",
    );
    write_file(&root.join("ids.txt"), "AU-6\n");
    write_file(
        &root.join(CONFIG_FILE),
        "keyword_file = \"kw.txt\"\n\
         control_catalog = \"catalog.csv\"\n\
         control_ids_file = \"ids.txt\"\n\
         text_column = \"statement\"\n\
         match_depth = 0\n",
    );

    let cfg = load_config(&root).unwrap().unwrap();
    let result = Ctlmatch::new(&root).with_config(&root, &cfg).run().unwrap();

    assert_eq!(result.match_depth(), 0);
    assert!(result.reconciliation.is_exact());
    assert_eq!(result.reconciliation.agreement, set(&["AU-6"]));

    // An explicit setting after the config file wins.
    let result = Ctlmatch::new(&root)
        .with_config(&root, &cfg)
        .match_depth(1)
        .run()
        .unwrap();
    assert!(result.classification.is_empty());
    assert_eq!(result.reconciliation.reference_only, set(&["AU-6"]));

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_missing_input_names_path() {
    let root = setup_temp_project();
    let path = root.join("data/keyword_file.txt");

    let err = load_keywords(&path).unwrap_err();
    assert!(err.to_string().contains("keyword_file.txt"));
    assert_eq!(err.path(), Some(&path));

    fs::remove_dir_all(&root).ok();
}
