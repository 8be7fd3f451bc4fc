//! Analyze command: statistics plus the top frequent and toxic words.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use toxiscan_core::report;

use super::EngineOptions;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Comment file to analyze.
    pub file: Utf8PathBuf,

    /// Number of entries in each word list [default: 10]
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,
}

/// Load a comment file and print its full analysis.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    options: &EngineOptions,
    config_top: usize,
) -> anyhow::Result<()> {
    let top = args.top.unwrap_or(config_top);
    debug!(file = %args.file, top, "executing analyze command");

    let mut session = options.open_session();
    super::load_comments(&mut session, &args.file, options)?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&session.report(top))?);
        return Ok(());
    }

    let ranking = session.ranking();
    println!("{}", args.file.bold());
    println!();
    print!("{}", report::render_summary(&session.summary()));
    println!();
    print!("{}", report::render_table(&ranking, top));
    println!();
    print!("{}", report::render_toxic_table(&ranking, top));

    Ok(())
}
