// Configuration loading and parsing (client.toml, credentials.toml).
//
// `client.toml` carries the server address and the page contract: the
// attributes and initial contents the server rendered into the auction page.
// `credentials.toml` is optional and carries the session cookie string.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub page: PageConfig,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// client.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire client.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ClientFile {
    server: ServerConfig,
    #[serde(default)]
    page: PageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Origin of the auction site, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
}

impl ServerConfig {
    /// Whether the site is served over TLS.
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// `host[:port]` part of the base URL.
    pub fn host(&self) -> &str {
        let rest = self
            .base_url
            .strip_prefix("https://")
            .or_else(|| self.base_url.strip_prefix("http://"))
            .unwrap_or(&self.base_url);
        rest.split(['/', '?', '#']).next().unwrap_or(rest)
    }
}

/// The page contract. Every optional table stands for an element that may
/// or may not be on the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageConfig {
    /// Initial `#prezzo-attuale` text.
    #[serde(default)]
    pub prezzo_attuale: String,
    /// Initial `#acquirente-attuale` text.
    #[serde(default)]
    pub acquirente_attuale: String,
    /// `.desideri-btn` elements.
    #[serde(default)]
    pub wishlist: Vec<WishlistEntry>,
    /// `#offerta-form`.
    #[serde(default)]
    pub offerta: Option<OffertaSection>,
    /// `#countdown`.
    #[serde(default)]
    pub countdown: Option<CountdownSection>,
    /// `#dettaglio-asta-container`.
    #[serde(default)]
    pub dettaglio: Option<DettaglioSection>,
    /// `#price-slider`.
    #[serde(default)]
    pub slider: Option<SliderSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WishlistEntry {
    pub asta_id: String,
    /// Whether the auction is already in the wishlist when the page loads.
    #[serde(default)]
    pub added: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OffertaSection {
    /// `data-url`.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountdownSection {
    /// `data-fine-asta`, ISO-8601.
    pub fine_asta: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DettaglioSection {
    /// `data-asta-id`. Empty means no live feed.
    #[serde(default)]
    pub asta_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SliderSection {
    /// `data-max-price`, raw.
    #[serde(default)]
    pub max_price: Option<String>,
    /// `#id_prezzo_min` value, raw.
    #[serde(default)]
    pub prezzo_min: String,
    /// `#id_prezzo_max` value, raw.
    #[serde(default)]
    pub prezzo_max: String,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    /// Full cookie string for the site, e.g. `csrftoken=...; sessionid=...`.
    pub cookie: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/client.toml` and
/// (optionally) `config/credentials.toml`, relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- client.toml (required) ---
    let client_path = config_dir.join("client.toml");
    let client_text = read_file(&client_path)?;
    let client_file: ClientFile =
        toml::from_str(&client_text).map_err(|e| ConfigError::ParseError {
            path: client_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        server: client_file.server,
        page: client_file.page,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let base = &config.server.base_url;
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "server.base_url".into(),
            message: format!("must start with http:// or https://, got `{base}`"),
        });
    }
    if config.server.host().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "server.base_url".into(),
            message: "missing host".into(),
        });
    }

    for (i, entry) in config.page.wishlist.iter().enumerate() {
        if entry.asta_id.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("page.wishlist[{i}].asta_id"),
                message: "must not be empty".into(),
            });
        }
    }

    if let Some(offerta) = &config.page.offerta {
        if offerta.url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "page.offerta.url".into(),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Repository root, where `defaults/` lives.
    fn project_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    /// Fresh scratch directory with an empty `config/` inside.
    fn scratch(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(format!("aste_config_test_{name}"));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        tmp
    }

    fn write_client(dir: &Path, body: &str) {
        fs::write(dir.join("config/client.toml"), body).unwrap();
    }

    #[test]
    fn load_default_client_toml() {
        let tmp = scratch("defaults");
        fs::copy(
            project_root().join("defaults/client.toml"),
            tmp.join("config/client.toml"),
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("defaults should load");
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
        assert!(!config.server.is_secure());
        assert_eq!(config.server.host(), "127.0.0.1:8000");
        assert_eq!(config.page.wishlist.len(), 1);
        assert_eq!(config.page.offerta.as_ref().unwrap().url, "/asta/1/offerta/");
        assert_eq!(config.page.dettaglio.as_ref().unwrap().asta_id, "1");
        assert!(config.page.countdown.is_some());
        assert!(config.page.slider.is_some());
        assert!(config.credentials.cookie.is_none());
    }

    #[test]
    fn credentials_example_is_valid_toml() {
        let text = fs::read_to_string(project_root().join("defaults/credentials.toml.example"))
            .expect("example should exist");
        let creds: CredentialsConfig = toml::from_str(&text).unwrap();
        assert!(creds.cookie.unwrap().contains("csrftoken="));
    }

    #[test]
    fn minimal_client_toml_has_empty_page() {
        let tmp = scratch("minimal");
        write_client(&tmp, "[server]\nbase_url = \"https://aste.example.it\"\n");

        let config = load_config_from(&tmp).unwrap();
        assert!(config.server.is_secure());
        assert_eq!(config.server.host(), "aste.example.it");
        assert!(config.page.wishlist.is_empty());
        assert!(config.page.offerta.is_none());
        assert!(config.page.countdown.is_none());
        assert!(config.page.dettaglio.is_none());
        assert!(config.page.slider.is_none());
    }

    #[test]
    fn credentials_toml_with_cookie() {
        let tmp = scratch("creds");
        write_client(&tmp, "[server]\nbase_url = \"http://localhost:8000\"\n");
        fs::write(
            tmp.join("config/credentials.toml"),
            "cookie = \"csrftoken=abc; sessionid=def\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(
            config.credentials.cookie.as_deref(),
            Some("csrftoken=abc; sessionid=def")
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        let tmp = scratch("bad_scheme");
        write_client(&tmp, "[server]\nbase_url = \"ftp://example.it\"\n");
        match load_config_from(&tmp) {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "server.base_url")
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_host() {
        let tmp = scratch("no_host");
        write_client(&tmp, "[server]\nbase_url = \"http:///asta\"\n");
        assert!(matches!(
            load_config_from(&tmp),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn rejects_empty_wishlist_id() {
        let tmp = scratch("empty_wish");
        write_client(
            &tmp,
            "[server]\nbase_url = \"http://localhost\"\n\n[[page.wishlist]]\nasta_id = \"\"\n",
        );
        match load_config_from(&tmp) {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "page.wishlist[0].asta_id")
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn file_not_found_for_missing_client_toml() {
        let tmp = scratch("missing");
        assert!(matches!(
            load_config_from(&tmp),
            Err(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch("invalid");
        write_client(&tmp, "[server\nbase_url = ");
        assert!(matches!(
            load_config_from(&tmp),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn ensure_config_files_copies_missing_and_skips_examples() {
        let tmp = std::env::temp_dir().join("aste_config_test_ensure");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults/client.toml"), "x").unwrap();
        fs::write(tmp.join("defaults/credentials.toml.example"), "y").unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(copied, vec![tmp.join("config/client.toml")]);
        assert!(!tmp.join("config/credentials.toml.example").exists());

        // Second run finds everything in place.
        assert!(ensure_config_files(&tmp).unwrap().is_empty());
    }

    #[test]
    fn ensure_config_files_keeps_existing() {
        let tmp = scratch("ensure_keep");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults/client.toml"), "default").unwrap();
        write_client(&tmp, "custom");

        assert!(ensure_config_files(&tmp).unwrap().is_empty());
        assert_eq!(
            fs::read_to_string(tmp.join("config/client.toml")).unwrap(),
            "custom"
        );
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("aste_config_test_nothing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        assert!(matches!(
            ensure_config_files(&tmp),
            Err(ConfigError::DefaultsCopyError { .. })
        ));
    }
}
