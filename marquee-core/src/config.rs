use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use marquee_model::ImageSize;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_VISIBLE_PAGES: u32 = 5;
/// Fixed page size of the discovery API.
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 20;

/// Path of an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "MARQUEE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{key} is not a valid URL ({value}): {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{key} is not a valid duration ({value}): {source}")]
    InvalidDuration {
        key: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("{key} must be a positive integer, got {value}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Runtime settings for the discovery client and paginator.
#[derive(Clone)]
pub struct MarqueeConfig {
    pub api_base_url: Url,
    pub image_base_url: Url,
    pub api_key: Option<String>,
    pub language: Option<String>,
    pub request_timeout: Duration,
    pub max_visible_pages: u32,
    pub results_per_page: u32,
}

impl fmt::Debug for MarqueeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarqueeConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("image_base_url", &self.image_base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("language", &self.language)
            .field("request_timeout", &self.request_timeout)
            .field("max_visible_pages", &self.max_visible_pages)
            .field("results_per_page", &self.results_per_page)
            .finish()
    }
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            image_base_url: Url::parse(DEFAULT_IMAGE_BASE)
                .expect("default image base is a valid URL"),
            api_key: None,
            language: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
        }
    }
}

/// Shape of the optional TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_base_url: Option<String>,
    image_base_url: Option<String>,
    api_key: Option<String>,
    language: Option<String>,
    request_timeout: Option<String>,
    max_visible_pages: Option<u32>,
    results_per_page: Option<u32>,
}

impl MarqueeConfig {
    /// Defaults, then the TOML file (`path`, else `$MARQUEE_CONFIG`), then
    /// `.env`, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let file = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                tracing::info!("Loaded config file {}", path.display());
                toml::from_str(&raw)?
            }
            None => FileConfig::default(),
        };

        let config = Self::from_sources(file, |key| env::var(key).ok())?;
        if config.api_key.is_none() {
            tracing::warn!("TMDB_API_KEY is not set; every discovery request will be rejected");
        }
        Ok(config)
    }

    /// Parse a TOML document and layer `lookup` (environment) over it.
    pub fn from_toml_str(
        raw: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::from_sources(toml::from_str(raw)?, lookup)
    }

    fn from_sources(
        file: FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let pick = |key: &str, file_value: Option<String>| {
            lookup(key).filter(|v| !v.trim().is_empty()).or(file_value)
        };

        let api_base_url = match pick("TMDB_API_BASE", file.api_base_url) {
            Some(raw) => parse_url("TMDB_API_BASE", raw)?,
            None => defaults.api_base_url,
        };
        let image_base_url = match pick("TMDB_IMAGE_BASE", file.image_base_url) {
            Some(raw) => parse_url("TMDB_IMAGE_BASE", raw)?,
            None => defaults.image_base_url,
        };
        let request_timeout = match pick("MARQUEE_REQUEST_TIMEOUT", file.request_timeout) {
            Some(raw) => humantime::parse_duration(raw.trim()).map_err(|source| {
                ConfigError::InvalidDuration {
                    key: "MARQUEE_REQUEST_TIMEOUT",
                    value: raw.clone(),
                    source,
                }
            })?,
            None => defaults.request_timeout,
        };
        let max_visible_pages = match lookup("MARQUEE_MAX_VISIBLE_PAGES") {
            Some(raw) => parse_positive("MARQUEE_MAX_VISIBLE_PAGES", raw)?,
            None => positive_or(
                "max_visible_pages",
                file.max_visible_pages,
                defaults.max_visible_pages,
            )?,
        };
        let results_per_page = positive_or(
            "results_per_page",
            file.results_per_page,
            defaults.results_per_page,
        )?;

        Ok(Self {
            api_base_url,
            image_base_url,
            api_key: pick("TMDB_API_KEY", file.api_key),
            language: pick("TMDB_LANGUAGE", file.language),
            request_timeout,
            max_visible_pages,
            results_per_page,
        })
    }

    /// Absolute image URL for a CDN path such as `/abc.jpg`.
    pub fn image_url(&self, size: ImageSize, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.image_base_url.as_str().trim_end_matches('/'),
            size.segment(),
            path.trim_start_matches('/')
        )
    }
}

fn parse_url(key: &'static str, raw: String) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        key,
        value: raw,
        source,
    })
}

fn parse_positive(key: &'static str, raw: String) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber { key, value: raw }),
    }
}

fn positive_or(
    key: &'static str,
    value: Option<u32>,
    default: u32,
) -> Result<u32, ConfigError> {
    match value {
        Some(0) => Err(ConfigError::InvalidNumber {
            key,
            value: "0".to_string(),
        }),
        Some(value) => Ok(value),
        None => Ok(default),
    }
}
