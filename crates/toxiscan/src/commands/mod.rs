//! Command implementations.

use std::time::Duration;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use toxiscan_core::{AnalysisSession, Config, Dictionary, Limits, LoadSummary};
use tracing::debug;

pub mod analyze;
pub mod info;
pub mod interactive;
pub mod report;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod top;

/// Engine settings resolved from CLI flags layered over configuration.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Toxic-word dictionary file.
    pub dictionary: Utf8PathBuf,
    /// Maximum number of dictionary entries to load.
    pub max_dictionary_words: Option<usize>,
    /// Table and word-length limits.
    pub limits: Limits,
    /// Maximum accepted comment file size.
    pub max_input_bytes: Option<usize>,
    /// Suppress user-facing warnings.
    pub quiet: bool,
}

impl EngineOptions {
    /// Build options from configuration with no CLI overrides.
    pub fn from_config(config: &Config) -> Self {
        Self {
            dictionary: config.dictionary_path(),
            max_dictionary_words: config.max_dictionary_words,
            limits: config.limits(),
            max_input_bytes: config.input_limit(),
            quiet: false,
        }
    }

    /// Load the dictionary and create an empty session.
    pub fn open_session(&self) -> AnalysisSession {
        let dictionary = load_dictionary(&self.dictionary, self.max_dictionary_words, self.quiet);
        AnalysisSession::new(dictionary, self.limits)
    }
}

/// Load the toxic-word dictionary, degrading to an empty one on failure.
///
/// A missing or unreadable dictionary is not fatal: every word is then
/// classified clean and a warning is printed.
pub fn load_dictionary(path: &Utf8Path, capacity: Option<usize>, quiet: bool) -> Dictionary {
    match Dictionary::load_file(path, capacity) {
        Ok(dictionary) => {
            debug!(path = %path, entries = dictionary.len(), "dictionary ready");
            if !quiet {
                if dictionary.skipped() > 0 {
                    warn_user(&format!(
                        "dictionary limit reached; {} entries from {path} were ignored",
                        dictionary.skipped()
                    ));
                }
                if dictionary.is_empty() {
                    warn_user(&format!("dictionary {path} contains no words"));
                }
            }
            dictionary
        }
        Err(err) => {
            tracing::warn!(error = %err, "continuing with an empty dictionary");
            if !quiet {
                warn_user(&format!(
                    "{err}; continuing with an empty dictionary (all words will be CLEAN)"
                ));
            }
            Dictionary::default()
        }
    }
}

/// Read a comment file into the session, replacing any previous contents.
///
/// A spinner is shown on stderr while the text is tokenized.
pub fn load_comments(
    session: &mut AnalysisSession,
    path: &Utf8Path,
    options: &EngineOptions,
) -> anyhow::Result<LoadSummary> {
    let content = read_input_file(path, options.max_input_bytes)?;

    let spinner = if options.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("processing {path}"));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let load = session.load_text(&content);

    spinner.finish_and_clear();
    if !options.quiet {
        print_load_warnings(&load, session.limits());
    }
    Ok(load)
}

/// Tell the user about words that were dropped during a load.
pub fn print_load_warnings(load: &LoadSummary, limits: Limits) {
    if load.capacity_rejected > 0 {
        warn_user(&format!(
            "word table is full ({} distinct words); {} occurrences of new words were not counted",
            load.unique_words, load.capacity_rejected
        ));
    }
    if load.oversized_rejected > 0 {
        let max = limits.max_word_len.unwrap_or(0);
        warn_user(&format!(
            "{} words longer than {max} characters were skipped",
            load.oversized_rejected
        ));
    }
}

fn warn_user(message: &str) {
    eprintln!("{} {message}", "warning:".yellow().bold());
}

/// Read a file and validate its size against the configured limit.
///
/// Bytes that are not valid UTF-8 are decoded lossily; the replacement
/// characters are removed again by normalization.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to open {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let bytes =
        std::fs::read(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
