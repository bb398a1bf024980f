//! Client configuration
//!
//! Settings can come from YAML, from the builder, or from the setters on
//! [`Wikipedia`](crate::Wikipedia). All three paths share the same validation
//! rules.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Marker replaced by the language code in a base URL template
pub const LANGUAGE_PLACEHOLDER: &str = "{lang}";

/// Page-size sentinel understood by the server
pub const MAX_RESULTS: &str = "max";

/// Default endpoint template
pub const DEFAULT_BASE_URL: &str = "https://{lang}.wikipedia.org/w/api.php";

/// Upper bound for `list=random` batches
pub const MAX_RANDOM_COUNT: u32 = 500;

/// Regex for valid language codes: "en", "zh-yue", "be-x-old"
static LANGUAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]*(?:-[a-z0-9]+)*$").unwrap());

// ============================================================================
// Base URL
// ============================================================================

/// Endpoint template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUrl {
    /// `<prefix><language><suffix>`
    Templated {
        /// Text before the language code
        prefix: String,
        /// Text after the language code
        suffix: String,
    },
    /// Used as-is; the language setting does not affect it
    Fixed(String),
}

impl BaseUrl {
    /// Split `template` around [`LANGUAGE_PLACEHOLDER`]
    ///
    /// A template without the placeholder becomes [`BaseUrl::Fixed`].
    pub fn parse(template: &str) -> Self {
        match template.split_once(LANGUAGE_PLACEHOLDER) {
            Some((prefix, suffix)) => Self::Templated {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            },
            None => Self::Fixed(template.to_string()),
        }
    }

    /// Endpoint URL for `language`
    pub fn endpoint(&self, language: &str) -> String {
        match self {
            Self::Templated { prefix, suffix } => format!("{prefix}{language}{suffix}"),
            Self::Fixed(url) => url.clone(),
        }
    }

    /// Check if the language is substituted into the URL
    pub fn is_templated(&self) -> bool {
        matches!(self, Self::Templated { .. })
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::parse(DEFAULT_BASE_URL)
    }
}

// ============================================================================
// Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Target language code
    pub language: String,

    /// Endpoint template, see [`BaseUrl::parse`]
    pub base_url: String,

    /// Result count for search-style calls
    pub search_results: u32,

    /// Page size for image listings ("max" or a positive integer)
    pub images_results: String,

    /// Page size for link and reference listings
    pub links_results: String,

    /// Page size for category listings
    pub categories_results: String,

    /// Redirect hops followed before giving up
    pub max_redirects: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            search_results: 10,
            images_results: MAX_RESULTS.to_string(),
            links_results: MAX_RESULTS.to_string(),
            categories_results: MAX_RESULTS.to_string(),
            max_redirects: 10,
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parsed endpoint template
    pub fn base_url(&self) -> BaseUrl {
        BaseUrl::parse(&self.base_url)
    }

    /// Endpoint URL for the configured language
    pub fn endpoint(&self) -> String {
        self.base_url().endpoint(&self.language)
    }

    /// Validate every setting
    pub fn validate(&self) -> Result<()> {
        validate_language(&self.language)?;
        validate_base_url(&self.base_url)?;
        validate_search_results(self.search_results)?;
        validate_results_limit("images_results", &self.images_results)?;
        validate_results_limit("links_results", &self.links_results)?;
        validate_results_limit("categories_results", &self.categories_results)?;
        if self.timeout_secs == 0 {
            return Err(Error::parameter("timeout_secs", "must be at least 1"));
        }
        Ok(())
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = language.into();
        self
    }

    /// Set the endpoint template
    pub fn base_url(mut self, template: impl Into<String>) -> Self {
        self.config.base_url = template.into();
        self
    }

    /// Set the search result count
    pub fn search_results(mut self, count: u32) -> Self {
        self.config.search_results = count;
        self
    }

    /// Set the image page size
    pub fn images_results(mut self, limit: impl Into<String>) -> Self {
        self.config.images_results = limit.into();
        self
    }

    /// Set the link page size
    pub fn links_results(mut self, limit: impl Into<String>) -> Self {
        self.config.links_results = limit.into();
        self
    }

    /// Set the category page size
    pub fn categories_results(mut self, limit: impl Into<String>) -> Self {
        self.config.categories_results = limit.into();
        self
    }

    /// Set the redirect hop limit
    pub fn max_redirects(mut self, hops: u32) -> Self {
        self.config.max_redirects = hops;
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(agent.into());
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load a client config from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Load a client config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ClientConfig> {
    let config: ClientConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a language code
pub(crate) fn validate_language(language: &str) -> Result<()> {
    if LANGUAGE_REGEX.is_match(language) {
        Ok(())
    } else {
        Err(Error::parameter(
            "language",
            format!("'{language}' is not a valid language code"),
        ))
    }
}

/// Validate an endpoint template
pub(crate) fn validate_base_url(template: &str) -> Result<()> {
    if template.trim().is_empty() {
        return Err(Error::parameter("base_url", "cannot be empty"));
    }
    if template.matches(LANGUAGE_PLACEHOLDER).count() > 1 {
        return Err(Error::parameter(
            "base_url",
            format!("'{LANGUAGE_PLACEHOLDER}' may appear at most once"),
        ));
    }
    Ok(())
}

/// Validate a page-size limit: "max" or a positive integer
pub(crate) fn validate_results_limit(name: &str, limit: &str) -> Result<()> {
    if limit == MAX_RESULTS || limit.parse::<u32>().is_ok_and(|n| n > 0) {
        Ok(())
    } else {
        Err(Error::parameter(
            name,
            format!("'{limit}' must be \"{MAX_RESULTS}\" or a positive integer"),
        ))
    }
}

/// Validate a search result count
pub(crate) fn validate_search_results(count: u32) -> Result<()> {
    if count == 0 {
        return Err(Error::parameter("search_results", "must be at least 1"));
    }
    Ok(())
}
