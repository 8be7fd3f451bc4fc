//! Report command: write the analysis report document to a file.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use toxiscan_core::{Summary, WordRecord, report};

use super::EngineOptions;

/// Arguments for the `report` subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Comment file to analyze.
    pub file: Utf8PathBuf,

    /// Report destination [default: analysis_report.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Number of ranked entries in the report [default: 20]
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct SavedReport<'a> {
    output: &'a Utf8Path,
    summary: Summary,
    entries: usize,
}

/// Render the report document for a ranking and write it to `path`.
///
/// The destination is created or truncated.
pub fn save_report(path: &Utf8Path, ranking: &[WordRecord], limit: usize) -> anyhow::Result<()> {
    let document = report::render_report_document(ranking, limit);
    std::fs::write(path.as_std_path(), document)
        .with_context(|| format!("failed to create report file {path}"))?;
    info!(path = %path, limit, "report saved");
    Ok(())
}

/// Analyze a comment file and save the report document.
#[instrument(name = "cmd_report", skip_all, fields(file = %args.file))]
pub fn cmd_report(
    args: ReportArgs,
    global_json: bool,
    options: &EngineOptions,
    config_output: Utf8PathBuf,
    config_limit: usize,
) -> anyhow::Result<()> {
    let output = args.output.unwrap_or(config_output);
    let limit = args.limit.unwrap_or(config_limit);
    debug!(output = %output, limit, "executing report command");

    let mut session = options.open_session();
    super::load_comments(&mut session, &args.file, options)?;
    let ranking = session.ranking();
    save_report(&output, &ranking, limit)?;

    if global_json {
        let saved = SavedReport {
            output: &output,
            summary: session.summary(),
            entries: report::top_words(&ranking, limit).len(),
        };
        println!("{}", serde_json::to_string_pretty(&saved)?);
    } else {
        println!("{} report saved to {}", "OK:".green(), output.cyan());
    }

    Ok(())
}
