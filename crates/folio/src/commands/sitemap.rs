//! `folio sitemap` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::CliSettings;
use folio_sitemap::{SitemapGenerator, SitemapReport};
use folio_storage::FsContentStore;

use super::{CommonArgs, load_book};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sitemap command.
#[derive(Args)]
pub(crate) struct SitemapArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Directory receiving sitemap.xml and robots.txt (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SitemapArgs {
    /// Execute the sitemap command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the book cannot be loaded, a
    /// content file cannot be inspected, or an output file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config(CliSettings {
            output_dir: self.output_dir,
            ..CliSettings::default()
        })?;
        let book = load_book(&config)?;
        let store = FsContentStore::new(&config.book_resolved.content_dir);

        let output_dir = &config.sitemap_resolved.output_dir;
        std::fs::create_dir_all(output_dir)?;

        let generator = SitemapGenerator::new(&book, &store);
        if generator.base_url().is_empty() {
            output.warning("No base URL configured, sitemap URLs will be relative");
        }

        let report = generator.write_to(output_dir)?;
        report_written(&output, &report);
        Ok(())
    }
}

fn report_written(output: &Output, report: &SitemapReport) {
    output.success(&format!(
        "Generated sitemap with {} entries at {}",
        report.entries,
        report.sitemap_path.display()
    ));
    output.success(&format!(
        "Updated robots.txt at {}",
        report.robots_path.display()
    ));
}
