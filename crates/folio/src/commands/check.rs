//! `folio check` command implementation.
//!
//! Loads the book the same way `serve` does and reports every chapter file
//! the content store cannot find. Missing files are warnings: the reader
//! shows an error message for them instead of failing.

use clap::Args;
use folio_book::Book;
use folio_config::CliSettings;
use folio_storage::{ContentStore, FsContentStore, StorageError, StorageErrorKind, content_path};

use super::{CommonArgs, load_book};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the book cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config(CliSettings::default())?;
        let book = load_book(&config)?;
        let store = FsContentStore::new(&config.book_resolved.content_dir);

        output.heading(&book.site.title);
        output.field("Languages", book.languages().len());
        output.field("Chapters", book.chapters.len());
        output.field("Default language", &book.default_language().code);
        output.field("Content directory", store.root().display());

        let problems = find_problems(&book, &store);
        for problem in &problems {
            output.warning(&problem.to_string());
        }

        let files = book
            .chapters
            .iter()
            .map(|c| book.languages().iter().filter(|l| c.has_content(&l.code)).count())
            .sum::<usize>();
        if problems.is_empty() {
            output.success(&format!("All {files} content files found"));
        } else {
            output.warning(&format!(
                "{} of {files} content files have problems",
                problems.len()
            ));
        }
        Ok(())
    }
}

/// A chapter file the store could not inspect.
#[derive(Debug)]
struct Problem {
    chapter: String,
    path: String,
    error: StorageError,
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.error.kind {
            StorageErrorKind::NotFound => "not found",
            StorageErrorKind::InvalidPath => "has an invalid path",
            _ => "cannot be read",
        };
        write!(f, "Chapter '{}': {} {what}", self.chapter, self.path)
    }
}

/// Inspect every `(chapter, language)` file, in declaration order.
fn find_problems(book: &Book, store: &dyn ContentStore) -> Vec<Problem> {
    let mut problems = Vec::new();
    for chapter in &book.chapters {
        for language in book.languages() {
            let Some(file) = chapter.file_for(&language.code) else {
                continue;
            };
            if let Err(error) = store.modified(&language.code, file) {
                tracing::debug!(chapter = %chapter.id, error = %error, "Content check failed");
                problems.push(Problem {
                    chapter: chapter.id.clone(),
                    path: content_path(&language.code, file),
                    error,
                });
            }
        }
    }
    problems
}
