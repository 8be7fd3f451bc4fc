//! Interactive command: the numbered menu loop.
//!
//! The menu reads choices line by line, so it can be driven by a pipe as
//! well as by a person at a terminal. End of input exits the loop.

use std::io::{BufRead, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use tracing::{debug, instrument, warn};

use toxiscan_core::{AnalysisSession, report};

use super::EngineOptions;
use super::report::save_report;

/// Arguments for the `interactive` subcommand.
#[derive(Args, Debug, Default)]
pub struct InteractiveArgs {
    /// Comment file to load before showing the menu.
    #[arg(long, value_name = "FILE")]
    pub load: Option<Utf8PathBuf>,
}

const MENU: &str = "\
=== CYBERBULLYING TEXT ANALYZER ===
1. Load comment file
2. Show general statistics
3. Show top N frequent words
4. Show top N toxic words
5. Save analysis report
6. Exit";

/// One entry of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Load,
    Statistics,
    TopWords,
    TopToxic,
    SaveReport,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Load),
            "2" => Some(Self::Statistics),
            "3" => Some(Self::TopWords),
            "4" => Some(Self::TopToxic),
            "5" => Some(Self::SaveReport),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Parse a requested list length. Negative values give an empty list.
fn parse_count(input: &str) -> Option<usize> {
    let n: i64 = input.trim().parse().ok()?;
    Some(usize::try_from(n).unwrap_or(0))
}

/// The menu loop over an analysis session.
pub struct Menu<'a, R, W> {
    session: AnalysisSession,
    options: &'a EngineOptions,
    report_path: Utf8PathBuf,
    report_limit: usize,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Create a menu around a session, reading from `input` and writing to `out`.
    pub const fn new(
        session: AnalysisSession,
        options: &'a EngineOptions,
        report_path: Utf8PathBuf,
        report_limit: usize,
        input: R,
        out: W,
    ) -> Self {
        Self {
            session,
            options,
            report_path,
            report_limit,
            input,
            out,
        }
    }

    /// The session the menu operates on.
    pub const fn session(&self) -> &AnalysisSession {
        &self.session
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{MENU}")?;
            let Some(line) = self.prompt("Choice: ")? else {
                debug!("input closed, leaving menu");
                return Ok(());
            };
            let Some(choice) = Choice::parse(&line) else {
                writeln!(self.out, "Invalid choice.")?;
                continue;
            };
            debug!(?choice, "menu selection");

            match choice {
                Choice::Load => self.load()?,
                Choice::Exit => {
                    writeln!(self.out, "Goodbye.")?;
                    return Ok(());
                }
                _ if !self.session.has_data() => {
                    writeln!(self.out, "No comment file loaded yet. Choose 1 first.")?;
                }
                Choice::Statistics => {
                    write!(self.out, "{}", report::render_summary(&self.session.summary()))?;
                }
                Choice::TopWords => {
                    if let Some(n) = self.prompt_count()? {
                        let ranking = self.session.ranking();
                        write!(self.out, "{}", report::render_table(&ranking, n))?;
                    }
                }
                Choice::TopToxic => {
                    if let Some(n) = self.prompt_count()? {
                        let ranking = self.session.ranking();
                        write!(self.out, "{}", report::render_toxic_table(&ranking, n))?;
                    }
                }
                Choice::SaveReport => self.save()?,
            }
        }
    }

    /// Load a comment file into the session.
    ///
    /// A file that cannot be read leaves the session as it was.
    pub fn load_file(&mut self, path: &Utf8Path) -> anyhow::Result<()> {
        match super::load_comments(&mut self.session, path, self.options) {
            Ok(load) => {
                writeln!(
                    self.out,
                    "Loaded {path}: {} words, {} distinct.",
                    load.words_counted, load.unique_words
                )?;
            }
            Err(err) => {
                warn!(error = %err, "comment file not loaded");
                writeln!(self.out, "Error: {err:#}")?;
            }
        }
        Ok(())
    }

    fn load(&mut self) -> anyhow::Result<()> {
        let Some(name) = self.prompt("Enter filename: ")? else {
            return Ok(());
        };
        let name = name.trim();
        if name.is_empty() {
            writeln!(self.out, "Invalid choice.")?;
            return Ok(());
        }
        self.load_file(&Utf8PathBuf::from(name))
    }

    fn save(&mut self) -> anyhow::Result<()> {
        let ranking = self.session.ranking();
        match save_report(&self.report_path, &ranking, self.report_limit) {
            Ok(()) => writeln!(self.out, "Report saved to {}.", self.report_path)?,
            Err(err) => writeln!(self.out, "Error: {err:#}")?,
        }
        Ok(())
    }

    fn prompt_count(&mut self) -> anyhow::Result<Option<usize>> {
        let Some(line) = self.prompt("How many words? ")? else {
            return Ok(None);
        };
        let count = parse_count(&line);
        if count.is_none() {
            writeln!(self.out, "Invalid choice.")?;
        }
        Ok(count)
    }

    /// Print a prompt and read one line. `None` means end of input.
    fn prompt(&mut self, text: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Run the menu on stdin and stdout.
#[instrument(name = "cmd_interactive", skip_all)]
pub fn cmd_interactive(
    args: InteractiveArgs,
    options: &EngineOptions,
    report_path: Utf8PathBuf,
    report_limit: usize,
) -> anyhow::Result<()> {
    let session = options.open_session();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut menu = Menu::new(
        session,
        options,
        report_path,
        report_limit,
        stdin.lock(),
        stdout.lock(),
    );
    if let Some(ref path) = args.load {
        menu.load_file(path)?;
    }
    menu.run()
}
