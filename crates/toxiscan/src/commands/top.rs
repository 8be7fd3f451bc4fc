//! Top command: list the highest-frequency words.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use toxiscan_core::{WordRecord, report};

use super::EngineOptions;

/// Arguments for the `top` subcommand.
#[derive(Args, Debug)]
pub struct TopArgs {
    /// Comment file to analyze.
    pub file: Utf8PathBuf,

    /// Number of words to list [default: 10]
    #[arg(short = 'n', long = "count", value_name = "N")]
    pub count: Option<usize>,

    /// Only list words found in the dictionary.
    #[arg(long)]
    pub toxic: bool,
}

/// Print the top-N table, or the top-N toxic table with `--toxic`.
#[instrument(name = "cmd_top", skip_all, fields(file = %args.file, toxic = args.toxic))]
pub fn cmd_top(
    args: TopArgs,
    global_json: bool,
    options: &EngineOptions,
    config_top: usize,
) -> anyhow::Result<()> {
    let n = args.count.unwrap_or(config_top);
    debug!(n, "executing top command");

    let mut session = options.open_session();
    super::load_comments(&mut session, &args.file, options)?;
    let ranking = session.ranking();

    if global_json {
        let words: Vec<&WordRecord> = if args.toxic {
            report::top_toxic_words(&ranking, n)
        } else {
            report::top_words(&ranking, n).iter().collect()
        };
        println!("{}", serde_json::to_string_pretty(&words)?);
    } else if args.toxic {
        print!("{}", report::render_toxic_table(&ranking, n));
    } else {
        print!("{}", report::render_table(&ranking, n));
    }

    Ok(())
}
