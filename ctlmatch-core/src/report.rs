//! Output formatting - plaintext and JSON.

use crate::builder::AnalysisResult;
use crate::error::CtlmatchError;
use crate::logging::log_warn;
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Rendering of a control without an identifier.
pub const MISSING_IDENTIFIER: &str = "N/A";

const SEPARATOR_WIDTH: usize = 50;

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CtlmatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            other => Err(CtlmatchError::invalid_argument(format!(
                "unknown output format '{}' (expected plain or json)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// An input file and the SHA-256 of its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputDigest {
    /// `keywords`, `catalog` or `reference`
    pub role: &'static str,
    pub path: String,
    pub sha256: String,
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes the plain-text report.
pub fn write_plain<W: Write>(out: &mut W, result: &AnalysisResult) -> io::Result<()> {
    let depth = result.match_depth();
    let classification = &result.classification;
    let recon = &result.reconciliation;

    writeln!(out, "RESULTS-----")?;
    for m in classification.matches() {
        writeln!(out, "ID: {}", m.record.identifier_or(MISSING_IDENTIFIER))?;
        writeln!(out, "Control: {}", m.record.control_text)?;
        writeln!(out, "Matches: [{}]", join(&m.evidence))?;
        writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    }

    let identifiers: Vec<&str> = classification
        .identifier_list()
        .into_iter()
        .map(|id| id.unwrap_or(MISSING_IDENTIFIER))
        .collect();

    writeln!(out, "SUMMARY-----")?;
    writeln!(
        out,
        "Controls scanned: {} (with evidence: {})",
        result.scanned, result.with_evidence
    )?;
    writeln!(out, "Number of matches found > {}: {}", depth, classification.len())?;
    writeln!(out, "Identifiers with >{} match: {}", depth, identifiers.join(", "))?;
    writeln!(
        out,
        "Imported control IDs [{}]: {}",
        result.reference_ids.len(),
        join(&result.reference_ids)
    )?;
    writeln!(
        out,
        "Matches (in both) [{}]: {}",
        recon.agreement.len(),
        join(&recon.agreement)
    )?;
    writeln!(
        out,
        "Left misses (in reference only) [{}]: {}",
        recon.reference_only.len(),
        join(&recon.reference_only)
    )?;
    writeln!(
        out,
        "Right misses (in matches only) [{}]: {}",
        recon.discovery_only.len(),
        join(&recon.discovery_only)
    )?;

    let unidentified = classification.unidentified_rows();
    if !unidentified.is_empty() {
        let rows: Vec<String> = unidentified.iter().map(|row| row_label(*row)).collect();
        writeln!(
            out,
            "Unidentified matches, not reconciled [{}]: {}",
            rows.len(),
            rows.join(", ")
        )?;
    }
    Ok(())
}

fn row_label(row: Option<usize>) -> String {
    match row {
        Some(n) => format!("row {}", n),
        None => "row ?".to_string(),
    }
}

/// Builds the JSON report.
pub fn to_json(result: &AnalysisResult) -> serde_json::Value {
    let classification = &result.classification;
    let recon = &result.reconciliation;
    json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "match_depth": result.match_depth(),
        "inputs": result.inputs,
        "matches": classification.matches(),
        "summary": {
            "keywords": result.keywords.len(),
            "controls_scanned": result.scanned,
            "controls_with_evidence": result.with_evidence,
            "matched": classification.len(),
            "matched_identifiers": classification.identifier_list(),
            "unidentified": classification.unidentified(),
            "reference_ids": result.reference_ids,
        },
        "reconciliation": {
            "agreement": recon.agreement,
            "reference_only": recon.reference_only,
            "discovery_only": recon.discovery_only,
            "unidentified_rows": classification.unidentified_rows(),
            "counts": {
                "agreement": recon.agreement.len(),
                "reference_only": recon.reference_only.len(),
                "discovery_only": recon.discovery_only.len(),
                "unidentified": classification.unidentified(),
            },
        },
    })
}

/// Writes the JSON report, pretty printed.
///
/// Falls back to compact output if pretty printing fails.
pub fn write_json<W: Write>(out: &mut W, result: &AnalysisResult) -> io::Result<()> {
    let value = to_json(result);
    match serde_json::to_string_pretty(&value) {
        Ok(json) => writeln!(out, "{}", json),
        Err(e) => {
            log_warn(&format!("JSON pretty printing failed: {}", e));
            writeln!(out, "{}", value)
        }
    }
}

/// Writes the report in the requested format and flushes `out`.
pub fn write_report<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, result)?,
        OutputFormat::Json => write_json(out, result)?,
    }
    out.flush()
}
