//! `folio serve` command implementation.

use clap::Args;
use folio_config::CliSettings;
use folio_server::{run_server, server_config_from_folio_config};

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and storage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config(CliSettings {
            host: self.host,
            port: self.port,
            ..CliSettings::default()
        })?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Book configuration: {}",
            config.book_resolved.config_file.display()
        ));
        output.info(&format!(
            "Content directory: {}",
            config.book_resolved.content_dir.display()
        ));
        match &config.book_resolved.base_url {
            Some(base_url) => output.info(&format!("Base URL: {base_url}")),
            None => output.info("Base URL: from book configuration"),
        }

        let server_config = server_config_from_folio_config(&config, version.to_string());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
