//! ctlmatch-core: keyword-to-control traceability for security control catalogs
//!
//! Given a keyword list, a catalog of controls (CSV) and a reference list of
//! control identifiers, this library finds which controls carry enough
//! keyword evidence and reconciles them against the reference list.
//!
//! # Pipeline
//!
//! 1. Keywords are analyzed into token sequences and loaded into two
//!    matchers: an exact phrase matcher (case-insensitive) and a lemma
//!    matcher that tolerates inflection.
//! 2. Each control text is analyzed and matched; the exact text of every
//!    hit becomes a piece of evidence.
//! 3. Controls with more than `match_depth` distinct evidence strings are
//!    kept.
//! 4. Their identifiers are partitioned against the reference list.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ctlmatch_core::prelude::*;
//!
//! let result = Ctlmatch::new("/path/to/project").match_depth(2).run()?;
//!
//! for id in &result.reconciliation.agreement {
//!     println!("Confirmed: {}", id);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`nlp`]: Tokenization, lemmatization and the [`Pipeline`] seam
//! - [`matcher`]: Phrase and lemma sequence matchers
//! - [`input`]: Keyword and reference identifier lists
//! - [`catalog`]: Streaming CSV control catalog reader
//! - [`scan`]: Evidence collection per control
//! - [`classify`]: Depth threshold
//! - [`reconcile`]: Set partition against the reference list
//! - [`builder`]: Fluent builder API wiring the stages together
//! - [`report`]: Plain and JSON output
//! - [`error`]: Typed error handling

pub mod builder;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod matcher;
pub mod nlp;
pub mod prelude;
pub mod reconcile;
pub mod report;
pub mod scan;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{CtlmatchError, CtlmatchResult, IoResultExt};

// Builder API
pub use builder::{AnalysisResult, Ctlmatch};

// Configuration
pub use config::{load_config, parse_config, CtlmatchConfig, OutputConfig, CONFIG_FILE};

// Logging
pub use logging::{init_structured_logging, log_error, log_event, log_info, log_inputs, log_warn};

// Language pipeline
pub use nlp::{Doc, EnglishPipeline, Lemmatizer, Pipeline, Token, TokenAttr};

// Matching
pub use matcher::{build_matchers, KeywordMatchers, LemmaMatcher, Matcher, PhraseMatcher, SpanMatch};

// Inputs
pub use catalog::{load_catalog, CatalogReader, ControlRecord};
pub use input::{file_digest, load_keywords, load_reference_ids, parse_lines, reference_set};

// Analysis stages
pub use classify::{classify, Classification, DEFAULT_MATCH_DEPTH};
pub use reconcile::{reconcile, Reconciliation};
pub use scan::{collect_evidence, scan_catalog, CatalogScan, ControlMatch, MatchEvidence};

// Reporting
pub use report::{
    to_json, write_json, write_plain, write_report, InputDigest, OutputFormat,
};

#[cfg(test)]
mod tests;
