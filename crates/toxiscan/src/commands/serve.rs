//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use crate::server::ProjectServer;

use super::EngineOptions;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // Transport is always stdio
}

/// Serve MCP requests until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, options: EngineOptions) -> anyhow::Result<()> {
    let dictionary = super::load_dictionary(
        &options.dictionary,
        options.max_dictionary_words,
        options.quiet,
    );
    info!(
        dictionary = %options.dictionary,
        entries = dictionary.len(),
        "starting MCP server on stdio"
    );

    let server = ProjectServer::new(dictionary, options.limits, options.max_input_bytes);
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server terminated")?;

    info!("MCP server stopped");
    Ok(())
}
