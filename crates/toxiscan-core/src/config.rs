//! Configuration loading and discovery.
//!
//! Configuration is merged from, lowest precedence first:
//! 1. Built-in defaults
//! 2. User config in the platform config directory
//!    (`~/.config/toxiscan/config.<ext>` on Linux)
//! 3. Project config found by walking up from the working directory:
//!    `.toxiscan.<ext>`, then `toxiscan.<ext>`
//! 4. Explicit files (the `--config` flag)
//! 5. `TOXISCAN_*` environment variables
//!
//! Where `<ext>` is one of `toml`, `yaml`, `yml`, `json`. When several files
//! exist in the same directory they are all merged, later extensions winning.
//! The walk stops at the first directory with any config file, or at a
//! directory containing the boundary marker (`.git` by default).
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use toxiscan_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("dictionary: {}", config.dictionary_path());
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::dictionary::DEFAULT_DICTIONARY_FILE;
use crate::error::{ConfigError, ConfigResult};
use crate::report::DEFAULT_REPORT_LIMIT;
use crate::session::Limits;

/// Default output file for saved reports.
pub const DEFAULT_REPORT_FILE: &str = "analysis_report.txt";

/// Default number of entries shown by `analyze` and `top`.
pub const DEFAULT_TOP: usize = 10;

/// The configuration for toxiscan.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files. No file logging when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Toxic-word dictionary file (default: `toxicwords.txt`).
    pub dictionary: Option<Utf8PathBuf>,
    /// Maximum number of distinct dictionary entries to load.
    pub max_dictionary_words: Option<usize>,
    /// Maximum number of distinct words tracked per analysis run.
    pub max_unique_words: Option<usize>,
    /// Maximum canonical word length; longer words are rejected.
    pub max_word_len: Option<usize>,
    /// Default number of entries for `analyze` and `top`.
    pub top: Option<usize>,
    /// Output file for saved reports (default: `analysis_report.txt`).
    pub report_file: Option<Utf8PathBuf>,
    /// Number of ranked entries in a saved report (default: 20).
    pub report_limit: Option<usize>,
    /// Maximum comment file size in bytes (default: 5 MiB).
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored.
    pub disable_input_limit: bool,
}

impl Config {
    /// Session limits derived from this configuration.
    pub const fn limits(&self) -> Limits {
        Limits {
            max_unique_words: self.max_unique_words,
            max_word_len: self.max_word_len,
        }
    }

    /// The dictionary file to load.
    pub fn dictionary_path(&self) -> Utf8PathBuf {
        self.dictionary
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DICTIONARY_FILE))
    }

    /// The file saved reports are written to.
    pub fn report_path(&self) -> Utf8PathBuf {
        self.report_file
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_REPORT_FILE))
    }

    /// Number of ranked entries in a saved report.
    pub fn report_limit(&self) -> usize {
        self.report_limit.unwrap_or(DEFAULT_REPORT_LIMIT)
    }

    /// Default number of entries for listings.
    pub fn top(&self) -> usize {
        self.top.unwrap_or(DEFAULT_TOP)
    }

    /// Effective input size limit, `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(
                self.max_input_bytes
                    .unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES),
            )
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from the platform config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in merge order).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for directory lookup and config file names.
const APP_NAME: &str = "toxiscan";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "TOXISCAN_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from the platform config directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load.
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include the user config file.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Set a boundary marker to stop directory traversal.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Disable boundary marker (search all the way to filesystem root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, later files taking precedence, and after
    /// any discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // TOXISCAN_DICTIONARY=words.txt, TOXISCAN_MAX_UNIQUE_WORDS=1500, etc.
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            dictionary = %config.dictionary_path(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Load configuration, returning an error if no config file is found.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && self.find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());
        let has_explicit = !self.explicit_files.is_empty();

        if !has_user && !has_project && !has_explicit {
            return Err(ConfigError::NotFound);
        }

        self.load()
    }

    /// Walk up from `start` and return the config files of the closest
    /// directory that has any, dotfiles before regular files.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let dotfiles = CONFIG_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!(".{APP_NAME}.{ext}")));
            let regular = CONFIG_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{APP_NAME}.{ext}")));
            let found: Vec<Utf8PathBuf> = dotfiles.chain(regular).filter(|p| p.is_file()).collect();

            if !found.is_empty() {
                return found;
            }

            // Checked after the config files so a config next to the marker
            // is still found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|p| p.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the user config directory path.
///
/// Returns `~/.config/toxiscan/` on Linux, `~/Library/Application Support/toxiscan/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables via `set_var`/`remove_var`.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    fn load_from(dir: &Utf8Path) -> (Config, ConfigSources) {
        ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(dir)
            .load()
            .unwrap()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert_eq!(config.dictionary_path(), "toxicwords.txt");
        assert_eq!(config.report_path(), "analysis_report.txt");
        assert_eq!(config.report_limit(), 20);
        assert_eq!(config.top(), 10);
        assert_eq!(config.limits(), Limits::default());
        assert_eq!(config.input_limit(), Some(crate::DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn loader_builds_with_defaults() {
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.dictionary.is_none());
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn explicit_file_sets_engine_limits() {
        // Shares a key with the env override test below.
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(
            &path,
            r#"dictionary = "lists/insults.txt"
max_unique_words = 1500
max_word_len = 49
max_dictionary_words = 300
"#,
        )
        .unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load()
            .unwrap();

        assert_eq!(config.dictionary_path(), "lists/insults.txt");
        assert_eq!(config.max_dictionary_words, Some(300));
        assert_eq!(
            config.limits(),
            Limits {
                max_unique_words: Some(1500),
                max_word_len: Some(49),
            }
        );
        assert_eq!(sources.explicit_files.len(), 1);
    }

    #[test]
    fn later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base.toml");
        fs::write(&base, "report_limit = 5\ntop = 3\n").unwrap();
        let over = tmp.path().join("override.toml");
        fs::write(&over, "report_limit = 50\n").unwrap();

        let (config, _) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&base))
            .with_file(utf8(&over))
            .load()
            .unwrap();

        assert_eq!(config.report_limit(), 50);
        assert_eq!(config.top(), 3);
    }

    #[test]
    fn project_config_discovered_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        let deep = project.join("comments").join("2024");
        fs::create_dir_all(&deep).unwrap();
        fs::write(project.join(".toxiscan.toml"), r#"log_level = "debug""#).unwrap();

        let (config, sources) = load_from(&utf8(&deep));

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join(".toxiscan.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(utf8(&work))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn regular_file_overrides_dotfile() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".toxiscan.toml"), "top = 5\n").unwrap();
        fs::write(tmp.path().join("toxiscan.toml"), "top = 7\n").unwrap();

        let (config, sources) = load_from(&utf8(tmp.path()));

        assert_eq!(config.top(), 7);
        assert_eq!(sources.project_files.len(), 2);
        assert!(sources.primary_file().unwrap().as_str().ends_with("toxiscan.toml"));
    }

    #[test]
    fn only_closest_directory_contributes() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();
        fs::write(parent.join(".toxiscan.toml"), "max_word_len = 10\n").unwrap();
        fs::write(child.join(".toxiscan.yaml"), "top: 4\n").unwrap();

        let (config, sources) = load_from(&utf8(&child));

        assert_eq!(config.top(), 4);
        assert_eq!(config.max_word_len, None);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn yaml_and_json_formats() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".toxiscan.yml"), "report_file: out.txt\n").unwrap();
        fs::write(
            tmp.path().join(".toxiscan.json"),
            r#"{"disable_input_limit": true}"#,
        )
        .unwrap();

        let (config, _) = load_from(&utf8(tmp.path()));

        assert_eq!(config.report_path(), "out.txt");
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn invalid_value_is_deserialize_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, r#"max_unique_words = "lots""#).unwrap();

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load();

        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn load_or_error_fails_when_no_config() {
        let result = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load_or_error();

        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn config_deserializes_from_yaml() {
        let yaml = "log_level: warn\nmax_input_bytes: 1024\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.input_limit(), Some(1024));
    }

    #[test]
    #[allow(unsafe_code)]
    fn env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "max_unique_words = 10\n").unwrap();

        // SAFETY: test environment; the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("TOXISCAN_MAX_UNIQUE_WORDS", "25");
        }

        let (config, _) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(&path))
            .load()
            .unwrap();

        assert_eq!(config.max_unique_words, Some(25));

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("TOXISCAN_MAX_UNIQUE_WORDS");
        }
    }
}
