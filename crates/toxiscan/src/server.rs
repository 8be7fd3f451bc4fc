//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the analysis engine over the MCP protocol via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer over the same core library the CLI
//! commands use. Each `#[tool]` method delegates to `toxiscan_core` and only
//! converts results to JSON text.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use toxiscan_core::config::DEFAULT_TOP;
use toxiscan_core::{AnalysisSession, Dictionary, Limits, normalize};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `normalize_word` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct NormalizeWordParams {
    /// The raw token to normalize.
    pub word: String,
}

/// Parameters for the `analyze_comments` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeCommentsParams {
    /// The comment text to analyze.
    pub text: String,
    /// Number of entries in each ranked list (default 10).
    pub top: Option<usize>,
    /// Toxic words to use instead of the server's dictionary.
    pub toxic_words: Option<Vec<String>>,
}

#[derive(Serialize)]
struct NormalizedWord<'a> {
    input: &'a str,
    word: String,
    empty: bool,
    toxic: bool,
}

/// MCP server exposing the analysis engine.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    dictionary: Arc<Dictionary>,
    limits: Limits,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new(
            Dictionary::default(),
            Limits::default(),
            Some(toxiscan_core::DEFAULT_MAX_INPUT_BYTES),
        )
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ProjectServer {
    /// Create a server that classifies words against `dictionary`.
    pub fn new(dictionary: Dictionary, limits: Limits, max_input_bytes: Option<usize>) -> Self {
        Self {
            dictionary: Arc::new(dictionary),
            limits,
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "dictionary_words": self.dictionary.len(),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}\nDictionary: {} words",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
                self.dictionary.len(),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Normalize one token and classify it against the dictionary.
    #[tool(
        description = "Normalize a token the way the analyzer does (ASCII letters and digits, lowercased) and report whether it is in the toxic-word dictionary."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn normalize_word(
        &self,
        Parameters(params): Parameters<NormalizeWordParams>,
    ) -> Result<CallToolResult, McpError> {
        let word = normalize(&params.word);
        let result = NormalizedWord {
            input: &params.word,
            empty: word.is_empty(),
            toxic: self.dictionary.contains(&word),
            word,
        };
        let json = to_json(&result)?;

        tracing::info!(tool = "normalize_word", toxic = result.toxic, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Run a full analysis over comment text.
    #[tool(
        description = "Analyze comment text: word frequencies, toxic word counts, toxicity rate, and the top frequent and toxic words."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn analyze_comments(
        &self,
        Parameters(params): Parameters<AnalyzeCommentsParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(max) = self.max_input_bytes
            && params.text.len() > max
        {
            return Err(McpError::invalid_params(
                format!(
                    "input too large: {} bytes (limit: {max} bytes)",
                    params.text.len()
                ),
                None,
            ));
        }

        let dictionary = match params.toxic_words {
            Some(ref words) => Dictionary::from_words(words, None),
            None => Dictionary::clone(&self.dictionary),
        };
        let top = params.top.unwrap_or(DEFAULT_TOP);
        tracing::debug!(tool = "analyze_comments", top, "executing MCP tool");

        let mut session = AnalysisSession::new(dictionary, self.limits);
        session.load_text(&params.text);
        let report = session.report(top);
        let json = to_json(&report)?;

        tracing::info!(
            tool = "analyze_comments",
            unique_words = report.summary.unique_words,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use analyze_comments to rank words and measure toxicity.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
