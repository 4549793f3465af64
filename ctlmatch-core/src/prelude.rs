//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use ctlmatch_core::prelude::*;
//! ```

// Errors
pub use crate::error::{CtlmatchError, CtlmatchResult};

// Builder API
pub use crate::builder::{AnalysisResult, Ctlmatch};

// Configuration
pub use crate::config::{load_config, CtlmatchConfig};

// Language pipeline and matching
pub use crate::matcher::{build_matchers, Matcher};
pub use crate::nlp::{Doc, EnglishPipeline, Pipeline};

// Stages
pub use crate::catalog::{CatalogReader, ControlRecord};
pub use crate::classify::{classify, Classification};
pub use crate::reconcile::{reconcile, Reconciliation};
pub use crate::scan::{scan_catalog, ControlMatch};

// Reporting
pub use crate::report::{write_report, OutputFormat};
