//! Sitemap entry collection and serialization.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use folio_book::Book;
use folio_book::url::{normalise_base_url, page_url};
use folio_storage::{ContentStore, StorageError, StorageErrorKind};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use url::Url;

/// File name of the generated sitemap.
pub const SITEMAP_FILENAME: &str = "sitemap.xml";
/// File name of the generated robots file.
pub const ROBOTS_FILENAME: &str = "robots.txt";

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Error returned by sitemap generation.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// Content timestamp could not be read.
    #[error("Cannot read content timestamp: {0}")]
    Storage(#[from] StorageError),
    /// XML serialization failed.
    #[error("Cannot serialize sitemap: {0}")]
    Xml(String),
    /// Output file could not be written.
    #[error("Cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub url: String,
    pub lastmod: DateTime<Utc>,
}

impl SitemapEntry {
    /// `lastmod` as ISO-8601 UTC with milliseconds.
    #[must_use]
    pub fn lastmod_string(&self) -> String {
        self.lastmod.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Outcome of [`SitemapGenerator::write_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapReport {
    /// Number of `<url>` entries written.
    pub entries: usize,
    pub sitemap_path: PathBuf,
    pub robots_path: PathBuf,
}

/// Builds sitemap entries from a book and its content store.
pub struct SitemapGenerator<'a> {
    book: &'a Book,
    store: &'a dyn ContentStore,
    now: DateTime<Utc>,
    base_url: Option<String>,
}

impl<'a> SitemapGenerator<'a> {
    /// Create a generator using the current time as generation time.
    #[must_use]
    pub fn new(book: &'a Book, store: &'a dyn ContentStore) -> Self {
        Self {
            book,
            store,
            now: Utc::now(),
            base_url: None,
        }
    }

    /// Override the generation time.
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Use `base_url` instead of the book's `site.baseUrl`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Normalized base URL, empty when none is configured.
    #[must_use]
    pub fn base_url(&self) -> String {
        let base = self
            .base_url
            .as_deref()
            .or(self.book.site.base_url.as_deref())
            .unwrap_or_default();
        normalise_base_url(base)
    }

    /// Collect one entry per chapter and language with a content file.
    ///
    /// A file missing from the store still gets an entry, dated at the
    /// generation time. `lastmod` never exceeds the generation time.
    ///
    /// # Errors
    ///
    /// Returns `SitemapError::Storage` for storage failures other than a
    /// missing file.
    pub fn entries(&self) -> Result<Vec<SitemapEntry>, SitemapError> {
        let base = self.base_url();
        let mut entries = Vec::new();

        for chapter in &self.book.chapters {
            for language in self.book.languages() {
                let Some(file) = chapter.file_for(&language.code) else {
                    continue;
                };

                let lastmod = match self.store.modified(&language.code, file) {
                    Ok(modified) => DateTime::<Utc>::from(modified).min(self.now),
                    Err(err) if err.kind == StorageErrorKind::NotFound => {
                        tracing::debug!(
                            chapter = %chapter.id,
                            language = %language.code,
                            "Content file missing, using generation time"
                        );
                        self.now
                    }
                    Err(err) => return Err(err.into()),
                };

                entries.push(SitemapEntry {
                    url: page_url(&base, &language.code, Some(&chapter.id)),
                    lastmod,
                });
            }
        }

        Ok(entries)
    }

    /// Write `sitemap.xml` and `robots.txt` into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if entries cannot be collected or a file cannot be
    /// written.
    pub fn write_to(&self, dir: &Path) -> Result<SitemapReport, SitemapError> {
        let entries = self.entries()?;
        let sitemap = render_sitemap(&entries)?;
        let robots = render_robots(&self.base_url());

        let sitemap_path = dir.join(SITEMAP_FILENAME);
        write_file(&sitemap_path, &sitemap)?;
        let robots_path = dir.join(ROBOTS_FILENAME);
        write_file(&robots_path, &robots)?;

        tracing::info!(
            entries = entries.len(),
            path = %sitemap_path.display(),
            "Wrote sitemap"
        );

        Ok(SitemapReport {
            entries: entries.len(),
            sitemap_path,
            robots_path,
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), SitemapError> {
    std::fs::write(path, content).map_err(|source| SitemapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize entries as a sitemap document.
///
/// # Errors
///
/// Returns `SitemapError::Xml` if the XML writer fails.
pub fn render_sitemap(entries: &[SitemapEntry]) -> Result<String, SitemapError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write_event(
        &mut writer,
        Event::Start(BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)])),
    )?;
    for entry in entries {
        write_event(&mut writer, Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &entry.url)?;
        write_text_element(&mut writer, "lastmod", &entry.lastmod_string())?;
        write_event(&mut writer, Event::End(BytesEnd::new("url")))?;
    }
    write_event(&mut writer, Event::End(BytesEnd::new("urlset")))?;

    let mut xml =
        String::from_utf8(writer.into_inner()).map_err(|e| SitemapError::Xml(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), SitemapError> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SitemapError> {
    writer
        .write_event(event)
        .map_err(|e| SitemapError::Xml(e.to_string()))
}

/// Build `robots.txt` pointing at the sitemap.
///
/// The sitemap URL is absolute when `base` is an absolute URL.
#[must_use]
pub fn render_robots(base: &str) -> String {
    let sitemap_url = Url::parse(base)
        .and_then(|base| base.join(SITEMAP_FILENAME))
        .map_or_else(|_| SITEMAP_FILENAME.to_owned(), String::from);
    format!("User-agent: *\nAllow: /\n\nSitemap: {sitemap_url}\n")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{Duration, SystemTime};

    use folio_book::fixtures::sample_book;
    use folio_storage::{FsContentStore, MockContentStore};
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn system_time(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn full_store() -> MockContentStore {
        MockContentStore::new()
            .with_content("en", "intro.md", "")
            .with_content("fr", "intro.md", "")
            .with_content("en", "basics.md", "")
            .with_content("en", "history.md", "")
            .with_content("ar", "history.md", "")
            .with_mtime("en", "intro.md", system_time(1_714_557_600))
    }

    #[test]
    fn test_entries_follow_declaration_order() {
        let book = sample_book();
        let store = full_store();
        let entries = SitemapGenerator::new(&book, &store)
            .with_now(at(1_800_000_000))
            .entries()
            .unwrap();
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://book.example.org/?lang=en&chapter=intro",
                "https://book.example.org/?lang=fr&chapter=intro",
                "https://book.example.org/?lang=en&chapter=basics",
                "https://book.example.org/?lang=en&chapter=history",
                "https://book.example.org/?lang=ar&chapter=history",
            ]
        );
        assert_eq!(entries[0].lastmod_string(), "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_entry_count_matches_defined_files() {
        let book = sample_book();
        let store = full_store();
        let expected = book
            .chapters
            .iter()
            .map(|c| {
                book.languages()
                    .iter()
                    .filter(|l| c.has_content(&l.code))
                    .count()
            })
            .sum::<usize>();
        let entries = SitemapGenerator::new(&book, &store).entries().unwrap();
        assert_eq!(entries.len(), expected);
    }

    #[test]
    fn test_lastmod_clamped_to_now() {
        let book = sample_book();
        let now = at(1_700_000_000);
        let store = full_store().with_mtime("en", "basics.md", system_time(1_900_000_000));
        let entries = SitemapGenerator::new(&book, &store)
            .with_now(now)
            .entries()
            .unwrap();
        assert!(entries.iter().all(|e| e.lastmod <= now));
        assert_eq!(entries[2].lastmod, now);
    }

    #[test]
    fn test_missing_file_uses_generation_time() {
        let book = sample_book();
        let now = at(1_800_000_000);
        let store = MockContentStore::new().with_content("en", "intro.md", "");
        let entries = SitemapGenerator::new(&book, &store)
            .with_now(now)
            .entries()
            .unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[1].lastmod, now);
        assert_eq!(entries[0].lastmod, at(0));
    }

    #[test]
    fn test_storage_failure_aborts() {
        let book = sample_book();
        let store = full_store().with_failure("ar", "history.md", "permission denied");
        let err = SitemapGenerator::new(&book, &store).entries().unwrap_err();
        assert!(matches!(err, SitemapError::Storage(_)));
    }

    #[test]
    fn test_relative_base_url() {
        let mut book = sample_book();
        book.site.base_url = None;
        let store = full_store();
        let entries = SitemapGenerator::new(&book, &store).entries().unwrap();
        assert_eq!(entries[0].url, ".?lang=en&chapter=intro");
    }

    #[test]
    fn test_base_url_without_trailing_slash() {
        let book = sample_book().with_base_url("https://example.org/book");
        let store = full_store();
        let entries = SitemapGenerator::new(&book, &store).entries().unwrap();
        assert_eq!(entries[0].url, "https://example.org/book/?lang=en&chapter=intro");
    }

    #[test]
    fn test_base_url_override() {
        let book = sample_book();
        let store = full_store();
        let generator =
            SitemapGenerator::new(&book, &store).with_base_url("http://127.0.0.1:7878");
        assert_eq!(generator.base_url(), "http://127.0.0.1:7878/");
        assert_eq!(
            generator.entries().unwrap()[0].url,
            "http://127.0.0.1:7878/?lang=en&chapter=intro"
        );
    }

    #[test]
    fn test_render_sitemap() {
        let entries = vec![
            SitemapEntry {
                url: "https://book.example.org/?lang=en&chapter=intro".to_owned(),
                lastmod: at(1_714_557_600),
            },
            SitemapEntry {
                url: "https://book.example.org/?lang=fr&chapter=intro".to_owned(),
                lastmod: DateTime::from_timestamp(1_714_557_600, 123_000_000).unwrap(),
            },
        ];
        assert_eq!(
            render_sitemap(&entries).unwrap(),
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://book.example.org/?lang=en&amp;chapter=intro</loc>
    <lastmod>2024-05-01T10:00:00.000Z</lastmod>
  </url>
  <url>
    <loc>https://book.example.org/?lang=fr&amp;chapter=intro</loc>
    <lastmod>2024-05-01T10:00:00.123Z</lastmod>
  </url>
</urlset>
"#
        );
    }

    #[test]
    fn test_render_robots() {
        assert_eq!(
            render_robots("https://book.example.org/"),
            "User-agent: *\nAllow: /\n\nSitemap: https://book.example.org/sitemap.xml\n"
        );
        assert_eq!(
            render_robots(""),
            "User-agent: *\nAllow: /\n\nSitemap: sitemap.xml\n"
        );
        assert_eq!(
            render_robots("/book/"),
            "User-agent: *\nAllow: /\n\nSitemap: sitemap.xml\n"
        );
    }

    #[test]
    fn test_write_to_directory() {
        let content = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        for (language, file) in [
            ("en", "intro.md"),
            ("fr", "intro.md"),
            ("en", "basics.md"),
            ("en", "history.md"),
        ] {
            let path = content.path().join(language).join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "# x").unwrap();
        }
        // A file dated in the future is clamped to the generation time.
        let future = SystemTime::now() + Duration::from_secs(86_400 * 365);
        fs::File::options()
            .write(true)
            .open(content.path().join("en/basics.md"))
            .unwrap()
            .set_modified(future)
            .unwrap();

        let book = sample_book();
        let store = FsContentStore::new(content.path());
        let now = Utc::now();
        let generator = SitemapGenerator::new(&book, &store).with_now(now);
        let report = generator.write_to(output.path()).unwrap();

        assert_eq!(report.entries, 5);
        assert_eq!(report.sitemap_path, output.path().join("sitemap.xml"));
        let sitemap = fs::read_to_string(&report.sitemap_path).unwrap();
        assert_eq!(sitemap.matches("<url>").count(), 5);
        assert!(sitemap.contains(&format!(
            "<lastmod>{}</lastmod>",
            now.to_rfc3339_opts(SecondsFormat::Millis, true)
        )));
        let robots = fs::read_to_string(&report.robots_path).unwrap();
        assert!(robots.ends_with("Sitemap: https://book.example.org/sitemap.xml\n"));
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let book = sample_book();
        let store = full_store();
        let dir = tempfile::tempdir().unwrap();
        let err = SitemapGenerator::new(&book, &store)
            .write_to(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, SitemapError::Io { .. }));
    }
}
