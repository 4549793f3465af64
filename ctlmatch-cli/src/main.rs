//! ctlmatch CLI - traces a keyword list to the controls of a catalog.
//!
//! Features:
//! - Exact phrase and inflection-tolerant lemma matching
//! - Depth threshold on distinct evidence per control
//! - Reconciliation against a reference list of control identifiers
//! - Plain or JSON report on stdout, structured logs on stderr

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ctlmatch_core::{
    init_structured_logging, load_config, log_error, log_event, log_info, log_inputs, write_report,
    Ctlmatch, CtlmatchConfig, OutputFormat,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyword-to-control traceability for security control catalogs")]
pub struct Cli {
    /// Base directory holding the inputs and an optional ctlmatch.toml
    #[arg(default_value = ".")]
    path: String,

    /// Keyword list, one keyword per line
    #[arg(long, value_name = "FILE")]
    keywords: Option<PathBuf>,

    /// Control catalog (CSV with a header row)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Reference list of control identifiers, one per line
    #[arg(long, value_name = "FILE")]
    reference: Option<PathBuf>,

    /// Catalog column holding the control text
    #[arg(long, value_name = "NAME")]
    text_column: Option<String>,

    /// Keep controls with more than this many distinct evidence strings
    #[arg(long, value_name = "N")]
    depth: Option<usize>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Exit with code 1 when discovery and the reference list disagree
    #[arg(long)]
    fail_on_miss: bool,
}

/// Builds the run configuration. Flags override ctlmatch.toml, which
/// overrides the built-in defaults.
fn configure(cli: &Cli, base: &Path, cfg: Option<&CtlmatchConfig>) -> Ctlmatch {
    let mut runner = Ctlmatch::new(base);
    if let Some(cfg) = cfg {
        runner = runner.with_config(base, cfg);
    }
    if let Some(path) = &cli.keywords {
        runner = runner.keyword_file(path);
    }
    if let Some(path) = &cli.catalog {
        runner = runner.control_catalog(path);
    }
    if let Some(path) = &cli.reference {
        runner = runner.control_ids_file(path);
    }
    if let Some(column) = &cli.text_column {
        runner = runner.text_column(column);
    }
    if let Some(depth) = cli.depth {
        runner = runner.match_depth(depth);
    }
    runner
}

/// `--json` wins; otherwise the config file's `[output] format`, else plain.
fn output_format(cli: &Cli, cfg: Option<&CtlmatchConfig>) -> Result<OutputFormat> {
    if cli.json {
        return Ok(OutputFormat::Json);
    }
    match cfg.and_then(CtlmatchConfig::output_format) {
        Some(name) => Ok(name.parse()?),
        None => Ok(OutputFormat::Plain),
    }
}

/// Runs the analysis and writes the report to `out`. Returns whether
/// discovery and the reference list disagree.
fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<bool> {
    let base = Path::new(&cli.path);
    let cfg = load_config(base)
        .with_context(|| format!("Failed to load config from: {}", base.display()))?;
    if cfg.is_some() {
        log_event("config", &format!("loaded config from {}", base.display()));
    }

    let format = output_format(cli, cfg.as_ref())?;
    let runner = configure(cli, base, cfg.as_ref());
    log_info(&format!(
        "starting run: match_depth={} text_column={}",
        runner.get_match_depth(),
        runner.get_text_column()
    ));

    let result = runner.run()?;
    log_inputs(&result.inputs);
    write_report(out, &result, format).context("Failed to write report")?;

    Ok(result.has_misses())
}

fn main() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] ctlmatch internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
    }));

    // JSON logs to stderr, filtered by RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();

    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(has_misses) => {
            std::process::exit(if cli.fail_on_miss && has_misses { 1 } else { 0 });
        }
        Err(e) => {
            log_error(&format!("{:#}", e));
            eprintln!("[ERROR] {:#}", e);
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctlmatch_core::parse_config;
    use std::fs;

    fn create_temp_project(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("ctlmatch_cli_test")
            .join(format!("{}_{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(dir.join("data")).unwrap();
        fs::write(dir.join("data/keyword_file.txt"), "audit\n").unwrap();
        fs::write(
            dir.join("data/NIST_SP-800-53_rev5_catalog_load.csv"),
            "identifier,control_text\nAU-6,\"Review and audit records.\"\n",
        )
        .unwrap();
        fs::write(dir.join("data/controls_ids.txt"), "AU-6\nAU-2\n").unwrap();
        dir
    }

    /// Rejects every write, like stdout redirected to a full device.
    struct FullDevice;

    impl Write for FullDevice {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "No space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ctlmatch").chain(args.iter().copied())).unwrap()
    }

    fn config(content: &str) -> CtlmatchConfig {
        parse_config(content, Path::new("ctlmatch.toml")).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.path, ".");
        assert!(!cli.json);

        let runner = configure(&cli, Path::new("."), None);
        assert_eq!(runner.get_match_depth(), 2);
        assert_eq!(runner.get_text_column(), "control_text");
        assert_eq!(
            runner.input_paths()[0].1,
            Path::new("./data/keyword_file.txt")
        );
        assert_eq!(output_format(&cli, None).unwrap(), OutputFormat::Plain);
    }

    #[test]
    fn test_flags_parsed() {
        let cli = parse(&[
            "project",
            "--keywords",
            "kw.txt",
            "--text-column",
            "statement",
            "--depth",
            "0",
            "--json",
        ]);
        assert_eq!(cli.path, "project");
        assert_eq!(cli.keywords, Some(PathBuf::from("kw.txt")));
        assert_eq!(cli.text_column.as_deref(), Some("statement"));
        assert_eq!(cli.depth, Some(0));
        assert!(cli.json);
    }

    #[test]
    fn test_negative_depth_rejected() {
        let args = ["ctlmatch", "--depth", "-1"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_flag_beats_config_beats_default() {
        let cfg = config("match_depth = 4\ntext_column = \"statement\"\nkeyword_file = \"kw.txt\"");

        let runner = configure(&parse(&["base"]), Path::new("base"), Some(&cfg));
        assert_eq!(runner.get_match_depth(), 4);
        assert_eq!(runner.get_text_column(), "statement");
        assert_eq!(runner.input_paths()[0].1, Path::new("base/kw.txt"));
        assert_eq!(
            runner.input_paths()[2].1,
            Path::new("base/data/controls_ids.txt")
        );

        let cli = parse(&["base", "--depth", "1", "--keywords", "other.txt"]);
        let runner = configure(&cli, Path::new("base"), Some(&cfg));
        assert_eq!(runner.get_match_depth(), 1);
        assert_eq!(runner.get_text_column(), "statement");
        assert_eq!(runner.input_paths()[0].1, Path::new("other.txt"));
    }

    #[test]
    fn test_output_format_precedence() {
        let cfg = config("[output]\nformat = \"json\"");
        assert_eq!(
            output_format(&parse(&[]), Some(&cfg)).unwrap(),
            OutputFormat::Json
        );

        let cfg = config("[output]\nformat = \"plain\"");
        assert_eq!(
            output_format(&parse(&["--json"]), Some(&cfg)).unwrap(),
            OutputFormat::Json
        );

        let cfg = config("[output]\nformat = \"yaml\"");
        assert!(output_format(&parse(&[]), Some(&cfg)).is_err());
    }

    #[test]
    fn test_run_writes_report_and_reports_misses() {
        let dir = create_temp_project("report");
        let cli = parse(&[dir.to_str().unwrap(), "--depth", "0"]);

        let mut out = Vec::new();
        let has_misses = run(&cli, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Matches (in both) [1]: AU-6"));
        assert!(text.contains("Left misses (in reference only) [1]: AU-2"));
        assert!(has_misses);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_run_fails_when_report_cannot_be_written() {
        let dir = create_temp_project("full_device");
        for args in [vec![dir.to_str().unwrap()], vec![dir.to_str().unwrap(), "--json"]] {
            let err = run(&parse(&args), &mut FullDevice).unwrap_err();
            assert!(format!("{:#}", err).contains("Failed to write report"));
        }

        fs::remove_dir_all(&dir).ok();
    }
}
