//! Builder pattern API for a full ctlmatch run.
//!
//! Composes the stages explicitly: load inputs → build matchers → scan →
//! classify → reconcile.
//!
//! ```rust,ignore
//! use ctlmatch_core::prelude::*;
//!
//! let result = Ctlmatch::new("/path/to/project")
//!     .text_column("statement")
//!     .match_depth(3)
//!     .run()?;
//!
//! for id in &result.reconciliation.reference_only {
//!     println!("Expected but not found: {}", id);
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info_span;

use crate::catalog::CatalogReader;
use crate::classify::{classify, Classification, DEFAULT_MATCH_DEPTH};
use crate::config::{
    CtlmatchConfig, DEFAULT_CONTROL_CATALOG, DEFAULT_CONTROL_IDS_FILE, DEFAULT_KEYWORD_FILE,
    DEFAULT_TEXT_COLUMN,
};
use crate::input::{file_digest, load_keywords, load_reference_ids, reference_set};
use crate::matcher::build_matchers;
use crate::nlp::{EnglishPipeline, Pipeline};
use crate::reconcile::{reconcile, Reconciliation};
use crate::report::InputDigest;
use crate::scan::scan_catalog;

/// Builder for configuring a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ctlmatch {
    /// Keyword list (one keyword per line)
    keyword_file: PathBuf,

    /// Control catalog (CSV)
    control_catalog: PathBuf,

    /// Reference identifier list (one identifier per line)
    control_ids_file: PathBuf,

    /// Catalog column holding the control text
    text_column: String,

    /// Exclusive evidence threshold
    match_depth: usize,
}

impl Ctlmatch {
    /// Create a builder with the default input locations under `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        let base = base_dir.as_ref();
        Self {
            keyword_file: base.join(DEFAULT_KEYWORD_FILE),
            control_catalog: base.join(DEFAULT_CONTROL_CATALOG),
            control_ids_file: base.join(DEFAULT_CONTROL_IDS_FILE),
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            match_depth: DEFAULT_MATCH_DEPTH,
        }
    }

    /// Apply the values set in a config file. Relative paths in the file are
    /// resolved against `base_dir`.
    pub fn with_config(mut self, base_dir: impl AsRef<Path>, cfg: &CtlmatchConfig) -> Self {
        let base = base_dir.as_ref();
        if let Some(p) = &cfg.keyword_file {
            self.keyword_file = base.join(p);
        }
        if let Some(p) = &cfg.control_catalog {
            self.control_catalog = base.join(p);
        }
        if let Some(p) = &cfg.control_ids_file {
            self.control_ids_file = base.join(p);
        }
        if let Some(column) = &cfg.text_column {
            self.text_column = column.clone();
        }
        if let Some(depth) = cfg.match_depth {
            self.match_depth = depth;
        }
        self
    }

    /// Set the keyword list path.
    pub fn keyword_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.keyword_file = path.into();
        self
    }

    /// Set the control catalog path.
    pub fn control_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.control_catalog = path.into();
        self
    }

    /// Set the reference identifier list path.
    pub fn control_ids_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.control_ids_file = path.into();
        self
    }

    /// Set the catalog column holding the control text.
    pub fn text_column(mut self, column: impl Into<String>) -> Self {
        self.text_column = column.into();
        self
    }

    /// Set the exclusive evidence threshold.
    pub fn match_depth(mut self, depth: usize) -> Self {
        self.match_depth = depth;
        self
    }

    pub fn get_match_depth(&self) -> usize {
        self.match_depth
    }

    pub fn get_text_column(&self) -> &str {
        &self.text_column
    }

    /// Input paths in report order: keywords, catalog, reference list.
    pub fn input_paths(&self) -> [(&'static str, &Path); 3] {
        [
            ("keywords", self.keyword_file.as_path()),
            ("catalog", self.control_catalog.as_path()),
            ("reference", self.control_ids_file.as_path()),
        ]
    }

    /// Run with the built-in English pipeline.
    pub fn run(&self) -> Result<AnalysisResult> {
        self.run_with(&EnglishPipeline::new())
    }

    /// Run with a caller-supplied pipeline.
    pub fn run_with<P>(&self, pipeline: &P) -> Result<AnalysisResult>
    where
        P: Pipeline + ?Sized,
    {
        let _span = info_span!("ctlmatch_run", match_depth = self.match_depth).entered();

        // 1. Load line inputs
        let keywords = load_keywords(&self.keyword_file).context("Failed to load keywords")?;
        let reference_ids = load_reference_ids(&self.control_ids_file)
            .context("Failed to load reference identifiers")?;

        // 2. Build matchers
        let matchers = build_matchers(pipeline, &keywords);

        // 3. Scan the catalog
        let records = CatalogReader::open(&self.control_catalog, &self.text_column)
            .context("Failed to open control catalog")?;
        let scan = scan_catalog(pipeline, &matchers.as_slice(), records)
            .context("Failed to scan control catalog")?;
        let scanned = scan.scanned;
        let with_evidence = scan.matches.len();

        // 4. Classify by depth
        let classification = classify(scan.matches, self.match_depth);

        // 5. Reconcile against the reference list
        let reconciliation =
            reconcile(&classification.identifiers(), &reference_set(&reference_ids));

        // 6. Fingerprint inputs for the report
        let inputs = self
            .input_paths()
            .into_iter()
            .map(|(role, path)| -> Result<InputDigest> {
                Ok(InputDigest {
                    role,
                    path: path.display().to_string(),
                    sha256: file_digest(path)?,
                })
            })
            .collect::<Result<Vec<_>>>()
            .context("Failed to fingerprint inputs")?;

        Ok(AnalysisResult {
            inputs,
            keywords,
            reference_ids,
            scanned,
            with_evidence,
            classification,
            reconciliation,
        })
    }
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Input files and their SHA-256 digests
    pub inputs: Vec<InputDigest>,

    /// Keywords as loaded
    pub keywords: Vec<String>,

    /// Reference identifiers as imported (file order, duplicates kept)
    pub reference_ids: Vec<String>,

    /// Catalog rows read
    pub scanned: usize,

    /// Catalog rows with any evidence
    pub with_evidence: usize,

    /// Controls above the match depth
    pub classification: Classification,

    /// Agreement and misses against the reference list
    pub reconciliation: Reconciliation,
}

impl AnalysisResult {
    pub fn match_depth(&self) -> usize {
        self.classification.match_depth()
    }

    /// `true` when discovery and the reference list disagree anywhere.
    pub fn has_misses(&self) -> bool {
        !self.reconciliation.is_exact()
    }
}
