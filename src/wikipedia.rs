//! Site façade
//!
//! [`Wikipedia`] holds the client configuration and the query executor for
//! one site. It creates [`Page`] handles and answers the site-wide lookups.

use crate::config::{self, BaseUrl, ClientConfig, MAX_RANDOM_COUNT};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, Transport};
use crate::json::{self, Step};
use crate::page::{required_str, Page};
use crate::query::{QueryExecutor, QueryParams};
use crate::redirect::RedirectResolver;
use crate::types::{Language, PageRef};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Geosearch radius bounds in metres
const MIN_RADIUS: u32 = 10;
const MAX_RADIUS: u32 = 10_000;

/// Client for one MediaWiki site
///
/// Cloning is cheap; clones share the transport but not the configuration.
#[derive(Clone)]
pub struct Wikipedia {
    config: ClientConfig,
    executor: QueryExecutor,
}

impl Wikipedia {
    /// Client for English Wikipedia with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Client over HTTP with `config`
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut http = HttpClientConfig::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(agent) = &config.user_agent {
            http = http.user_agent(agent.clone());
        }
        let transport = HttpClient::with_config(http.build())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Client over any [`Transport`]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let executor = QueryExecutor::new(transport, config.endpoint());
        Ok(Self { config, executor })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Language code
    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// Resolved endpoint URL
    pub fn base_url(&self) -> &str {
        self.executor.endpoint()
    }

    /// Result count for search-style calls
    pub fn search_results(&self) -> u32 {
        self.config.search_results
    }

    /// Page size for image listings
    pub fn images_results(&self) -> &str {
        &self.config.images_results
    }

    /// Page size for link and reference listings
    pub fn links_results(&self) -> &str {
        &self.config.links_results
    }

    /// Page size for category listings
    pub fn categories_results(&self) -> &str {
        &self.config.categories_results
    }

    pub(crate) fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    pub(crate) fn resolver(&self) -> RedirectResolver {
        RedirectResolver::new(self.executor.clone(), self.config.max_redirects)
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Change the language; the endpoint follows when the base URL is templated
    pub fn set_language(&mut self, language: impl Into<String>) -> Result<()> {
        let language = language.into();
        config::validate_language(&language)?;
        self.config.language = language;
        self.refresh_endpoint();
        Ok(())
    }

    /// Change the endpoint template, see [`BaseUrl::parse`]
    pub fn set_base_url(&mut self, template: impl Into<String>) -> Result<()> {
        let template = template.into();
        config::validate_base_url(&template)?;
        if !BaseUrl::parse(&template).is_templated() {
            debug!("Base URL '{template}' has no language placeholder");
        }
        self.config.base_url = template;
        self.refresh_endpoint();
        Ok(())
    }

    pub fn set_search_results(&mut self, count: u32) -> Result<()> {
        config::validate_search_results(count)?;
        self.config.search_results = count;
        Ok(())
    }

    pub fn set_images_results(&mut self, limit: impl Into<String>) -> Result<()> {
        let limit = limit.into();
        config::validate_results_limit("images_results", &limit)?;
        self.config.images_results = limit;
        Ok(())
    }

    pub fn set_links_results(&mut self, limit: impl Into<String>) -> Result<()> {
        let limit = limit.into();
        config::validate_results_limit("links_results", &limit)?;
        self.config.links_results = limit;
        Ok(())
    }

    pub fn set_categories_results(&mut self, limit: impl Into<String>) -> Result<()> {
        let limit = limit.into();
        config::validate_results_limit("categories_results", &limit)?;
        self.config.categories_results = limit;
        Ok(())
    }

    /// Redirect hops followed by single-entity accessors
    pub fn set_max_redirects(&mut self, hops: u32) {
        self.config.max_redirects = hops;
    }

    fn refresh_endpoint(&mut self) {
        self.executor = self.executor.with_endpoint(self.config.endpoint());
    }

    // ========================================================================
    // Pages
    // ========================================================================

    /// Page by title
    ///
    /// # Panics
    ///
    /// Panics if `title` is empty.
    pub fn page(&self, title: impl Into<String>) -> Page {
        Page::new(self, PageRef::title(title))
    }

    /// Page by id
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty.
    pub fn page_from_id(&self, id: impl Into<String>) -> Page {
        Page::new(self, PageRef::id(id))
    }

    // ========================================================================
    // Site lookups
    // ========================================================================

    /// Languages the site is available in
    pub async fn languages(&self) -> Result<Vec<Language>> {
        let params = QueryParams::new()
            .with("meta", "siteinfo")
            .with("siprop", "languages");
        let body = self.executor.execute(params).await?;

        let languages = result_list(&body, "languages")?
            .iter()
            .filter_map(|entry| {
                let code = json::lookup_str(entry, &[Step::Key("code")])?;
                let name = json::lookup_str(entry, &[Step::Key("*")])
                    .or_else(|| json::lookup_str(entry, &[Step::Key("name")]))?;
                Some(Language {
                    code: code.to_string(),
                    name: name.to_string(),
                })
            })
            .collect();
        Ok(languages)
    }

    /// Titles matching a full-text search
    pub async fn search(&self, query: &str) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            return Err(Error::parameter("srsearch", "search query cannot be empty"));
        }
        let params = QueryParams::new()
            .with("list", "search")
            .with("srsearch", query)
            .with("srlimit", self.config.search_results.to_string())
            .with("srprop", "");
        let body = self.executor.execute(params).await?;
        titles(&body, "search")
    }

    /// Titles of pages within `radius` metres of a coordinate
    pub async fn geosearch(&self, latitude: f64, longitude: f64, radius: u32) -> Result<Vec<String>> {
        validate_coordinate("latitude", latitude, 90.0)?;
        validate_coordinate("longitude", longitude, 180.0)?;
        if !(MIN_RADIUS..=MAX_RADIUS).contains(&radius) {
            return Err(Error::parameter(
                "gsradius",
                format!("{radius} must be between {MIN_RADIUS} and {MAX_RADIUS} metres"),
            ));
        }

        let params = QueryParams::new()
            .with("list", "geosearch")
            .with("gscoord", format!("{latitude}|{longitude}"))
            .with("gsradius", radius.to_string())
            .with("gslimit", self.config.search_results.to_string());
        let body = self.executor.execute(params).await?;
        titles(&body, "geosearch")
    }

    /// Titles of `count` random articles
    pub async fn random(&self, count: u32) -> Result<Vec<String>> {
        if !(1..=MAX_RANDOM_COUNT).contains(&count) {
            return Err(Error::parameter(
                "rnlimit",
                format!("{count} must be between 1 and {MAX_RANDOM_COUNT}"),
            ));
        }
        let params = QueryParams::new()
            .with("list", "random")
            .with("rnnamespace", "0")
            .with("rnlimit", count.to_string());
        let body = self.executor.execute(params).await?;
        titles(&body, "random")
    }
}

impl std::fmt::Debug for Wikipedia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wikipedia")
            .field("language", &self.config.language)
            .field("endpoint", &self.executor.endpoint())
            .finish_non_exhaustive()
    }
}

fn validate_coordinate(name: &str, value: f64, bound: f64) -> Result<()> {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        Ok(())
    } else {
        Err(Error::parameter(
            name,
            format!("{value} must be between -{bound} and {bound}"),
        ))
    }
}

/// `query.<list>` of a single-shot lookup; an empty array is a valid result
fn result_list<'a>(body: &'a Value, list: &str) -> Result<&'a Vec<Value>> {
    json::lookup_array(body, &[Step::Key("query"), Step::Key(list)])
        .ok_or_else(|| Error::invalid_response(format!("response has no query.{list}")))
}

fn titles(body: &Value, list: &str) -> Result<Vec<String>> {
    result_list(body, list)?
        .iter()
        .map(|entry| required_str(entry, "title", list))
        .collect()
}
