//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod serve;
pub(crate) mod sitemap;

pub(crate) use check::CheckArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use sitemap::SitemapArgs;

use std::path::PathBuf;

use clap::Args;
use folio_book::Book;
use folio_config::{CliSettings, Config};

use crate::error::CliError;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Book root directory; config, content and assets paths resolve against it.
    #[arg(long)]
    pub(crate) root: Option<PathBuf>,

    /// Public base URL (overrides config and `site.baseUrl`).
    #[arg(long, env = "FOLIO_BASE_URL")]
    pub(crate) base_url: Option<String>,
}

impl CommonArgs {
    /// Load the tool configuration with `settings` layered on top.
    pub(crate) fn load_config(&self, mut settings: CliSettings) -> Result<Config, CliError> {
        settings.root.clone_from(&self.root);
        settings.base_url.clone_from(&self.base_url);
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}

/// Load the book named by `config`, applying the base URL override.
pub(crate) fn load_book(config: &Config) -> Result<Book, CliError> {
    let book = Book::load(&config.book_resolved.config_file)?;
    Ok(match &config.book_resolved.base_url {
        Some(base_url) => book.with_base_url(base_url.clone()),
        None => book,
    })
}
