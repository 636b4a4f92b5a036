//! Sitemap and robots.txt generation.
//!
//! One sitemap entry is produced for every `(chapter, language)` pair with a
//! content file, in chapter then language declaration order. Output is
//! deterministic for a given book, file timestamps and clock.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use folio_book::Book;
//! use folio_sitemap::SitemapGenerator;
//! use folio_storage::FsContentStore;
//!
//! let book = Book::load(Path::new("config/site.config.json"))?;
//! let store = FsContentStore::new("content");
//! let report = SitemapGenerator::new(&book, &store).write_to(Path::new("."))?;
//! println!("{} entries", report.entries);
//! # Ok(())
//! # }
//! ```

mod generator;

pub use generator::{
    ROBOTS_FILENAME, SITEMAP_FILENAME, SitemapEntry, SitemapError, SitemapGenerator,
    SitemapReport, render_robots, render_sitemap,
};
