//! Tool configuration for Folio.
//!
//! `folio.toml` tells the tools where a book lives and how to serve it. The
//! book itself is described by a separate JSON file (see `folio-book`); this
//! crate only locates it and carries tool settings.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 7878
//!
//! [book]
//! config = "config/site.config.json"
//! content_dir = "content"
//! assets_dir = "assets"
//! base_url = "${FOLIO_BASE_URL:-https://book.example.org/}"
//!
//! [sitemap]
//! output_dir = "public"
//! ```
//!
//! Relative paths are resolved against the directory holding `folio.toml`.
//! `server.host` and `book.base_url` accept `${VAR}` and `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File name looked up in the working directory and its ancestors.
const CONFIG_FILENAME: &str = "folio.toml";

const DEFAULT_BOOK_CONFIG: &str = "config/site.config.json";
const DEFAULT_CONTENT_DIR: &str = "content";
const DEFAULT_ASSETS_DIR: &str = "assets";

/// Values given on the command line.
///
/// Each `Some` wins over the file. `root` re-anchors every relative path of
/// the file, the others replace single values after resolution.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root: Option<PathBuf>,
    pub base_url: Option<String>,
    pub output_dir: Option<PathBuf>,
}

/// `folio.toml` as written.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    server: ServerConfig,
    book: BookSection,
    sitemap: SitemapSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BookSection {
    config: Option<String>,
    content_dir: Option<String>,
    assets_dir: Option<String>,
    base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SitemapSection {
    output_dir: Option<String>,
}

/// Listening address of `folio serve`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Where the book's files are, as absolute paths.
#[derive(Debug, Default, Clone)]
pub struct BookConfig {
    /// Directory every relative path was resolved against.
    pub root: PathBuf,
    /// JSON book descriptor.
    pub config_file: PathBuf,
    /// Directory holding `{language}/{file}` markdown content.
    pub content_dir: PathBuf,
    /// Directory of static assets (logo, stylesheets).
    pub assets_dir: PathBuf,
    /// Public base URL, overriding `site.baseUrl` of the descriptor.
    pub base_url: Option<String>,
}

/// Where `folio sitemap` writes its output.
#[derive(Debug, Default, Clone)]
pub struct SitemapConfig {
    /// Directory receiving `sitemap.xml` and `robots.txt`.
    pub output_dir: PathBuf,
}

/// Resolved tool configuration.
#[derive(Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub book_resolved: BookConfig,
    pub sitemap_resolved: SitemapConfig,
    /// The file this was read from, `None` for built-in defaults.
    pub config_path: Option<PathBuf>,
    file: ConfigFile,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// One or more values are unusable; all problems are listed.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// A `${VAR}` reference could not be expanded.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Dotted field name, e.g. `book.base_url`.
        field: String,
        message: String,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

impl Config {
    /// Load the configuration and layer `cli` on top.
    ///
    /// An explicit `config_path` must exist. Without one, the nearest
    /// `folio.toml` in the working directory or its ancestors is used, and
    /// failing that the defaults rooted at the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, the file
    /// cannot be read or parsed, a variable cannot be expanded, or the result
    /// is invalid.
    pub fn load(config_path: Option<&Path>, cli: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let found = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => discover(),
        };

        let mut config = match found {
            Some(path) => Self::read(&path)?,
            None => Self::default_with_base(&std::env::current_dir().unwrap_or_default()),
        };
        if let Some(cli) = cli {
            config.override_with(cli);
        }
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults with paths resolved against `base`.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        Self::resolve(ConfigFile::default(), base, None)
    }

    /// Check values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` listing every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        if self.server.host.is_empty() {
            problems.push("server.host cannot be empty".to_owned());
        }
        if self.server.port == 0 {
            problems.push("server.port cannot be 0".to_owned());
        }
        if let Some(url) = &self.book_resolved.base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            problems.push(format!(
                "book.base_url must start with http:// or https://, got '{url}'"
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems.join("; ")))
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let mut file: ConfigFile = toml::from_str(&std::fs::read_to_string(path)?)?;
        file.server.host = expand::expand_env(&file.server.host, "server.host")?;
        file.book.base_url = file
            .book
            .base_url
            .map(|url| expand::expand_env(&url, "book.base_url"))
            .transpose()?;

        let dir = path.parent().unwrap_or(Path::new("."));
        Ok(Self::resolve(file, dir, Some(path.to_path_buf())))
    }

    fn resolve(file: ConfigFile, root: &Path, config_path: Option<PathBuf>) -> Self {
        let join = |value: Option<&str>, default: &str| root.join(value.unwrap_or(default));
        Self {
            server: file.server.clone(),
            book_resolved: BookConfig {
                root: root.to_path_buf(),
                config_file: join(file.book.config.as_deref(), DEFAULT_BOOK_CONFIG),
                content_dir: join(file.book.content_dir.as_deref(), DEFAULT_CONTENT_DIR),
                assets_dir: join(file.book.assets_dir.as_deref(), DEFAULT_ASSETS_DIR),
                base_url: file.book.base_url.clone(),
            },
            sitemap_resolved: SitemapConfig {
                output_dir: file
                    .sitemap
                    .output_dir
                    .as_deref()
                    .map_or_else(|| root.to_path_buf(), |dir| root.join(dir)),
            },
            config_path,
            file,
        }
    }

    fn override_with(&mut self, cli: &CliSettings) {
        if let Some(root) = &cli.root {
            let file = std::mem::take(&mut self.file);
            *self = Self::resolve(file, root, self.config_path.take());
        }
        if let Some(host) = &cli.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(url) = &cli.base_url {
            self.book_resolved.base_url = Some(url.clone());
        }
        if let Some(dir) = &cli.output_dir {
            self.sitemap_resolved.output_dir.clone_from(dir);
        }
    }
}

/// Nearest `folio.toml` in the working directory or one of its ancestors.
fn discover() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parsed(toml: &str, root: &str) -> Config {
        Config::resolve(toml::from_str(toml).unwrap(), Path::new(root), None)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default_with_base(Path::new("/book"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(
            config.book_resolved.config_file,
            PathBuf::from("/book/config/site.config.json")
        );
        assert_eq!(config.book_resolved.content_dir, PathBuf::from("/book/content"));
        assert_eq!(config.book_resolved.assets_dir, PathBuf::from("/book/assets"));
        assert_eq!(config.sitemap_resolved.output_dir, PathBuf::from("/book"));
        assert!(config.book_resolved.base_url.is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_sections_resolve_against_root() {
        let config = parsed(
            r#"
[book]
config = "book.json"
content_dir = "chapters"
base_url = "https://book.example.org/"

[sitemap]
output_dir = "public"
"#,
            "/project",
        );

        assert_eq!(config.book_resolved.config_file, PathBuf::from("/project/book.json"));
        assert_eq!(config.book_resolved.content_dir, PathBuf::from("/project/chapters"));
        assert_eq!(config.book_resolved.assets_dir, PathBuf::from("/project/assets"));
        assert_eq!(
            config.book_resolved.base_url.as_deref(),
            Some("https://book.example.org/")
        );
        assert_eq!(config.sitemap_resolved.output_dir, PathBuf::from("/project/public"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: Result<ConfigFile, _> = toml::from_str("[book]\ncontent = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_root_override_keeps_file_paths_relative() {
        let mut config = parsed("[book]\ncontent_dir = \"chapters\"\n[server]\nport = 9000\n", "/a");
        config.override_with(&CliSettings {
            root: Some(PathBuf::from("/b")),
            ..Default::default()
        });
        assert_eq!(config.book_resolved.root, PathBuf::from("/b"));
        assert_eq!(config.book_resolved.content_dir, PathBuf::from("/b/chapters"));
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_value_overrides() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.override_with(&CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            base_url: Some("https://example.com/".to_owned()),
            output_dir: Some(PathBuf::from("/out")),
            ..Default::default()
        });

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.book_resolved.base_url.as_deref(),
            Some("https://example.com/")
        );
        assert_eq!(config.sitemap_resolved.output_dir, PathBuf::from("/out"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[server]\nport = 9090\n").unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.book_resolved.content_dir, dir.path().join("content"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[server]\nport = 9090\n").unwrap();

        let cli = CliSettings {
            port: Some(8080),
            ..Default::default()
        };
        let config = Config::load(Some(path.as_path()), Some(&cli)).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/folio.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_expands_base_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_CFG_TEST_URL", "https://preview.example.org");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[book]\nbase_url = \"${FOLIO_CFG_TEST_URL}/book/\"\n").unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();
        assert_eq!(
            config.book_resolved.base_url.as_deref(),
            Some("https://preview.example.org/book/")
        );
        unsafe {
            std::env::remove_var("FOLIO_CFG_TEST_URL");
        }
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();
        config.server.port = 0;
        config.book_resolved.base_url = Some("ftp://example.com".to_owned());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        let msg = err.to_string();
        for expected in ["server.host", "server.port", "book.base_url", "ftp://example.com"] {
            assert!(msg.contains(expected), "missing '{expected}' in: {msg}");
        }
    }

    #[test]
    fn test_validate_defaults_pass() {
        assert!(Config::default_with_base(Path::new("/test")).validate().is_ok());
    }
}
