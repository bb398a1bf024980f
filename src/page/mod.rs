//! Page module
//!
//! Accessors for a single page, identified by title or id.
//!
//! # Overview
//!
//! - Single-entity accessors (`id`, `title`, `content`, `html_content`,
//!   `summary`) follow redirects to the canonical page
//! - List accessors (`images`, `references`, `links`, `categories`) return
//!   lazy streams driven by continuation tokens
//! - `sections` and `section_content` work on the resolved page

mod extractors;

pub use extractors::{CategoryExtractor, ImageExtractor, LinkExtractor, ReferenceExtractor};

use crate::error::{Error, Result};
use crate::json::{self, Step};
use crate::pagination::{paginate, ItemStream};
use crate::query::QueryParams;
use crate::types::{Category, Image, Link, PageRef, Reference, Section};
use crate::wikipedia::Wikipedia;
use serde_json::Value;

/// A page on a [`Wikipedia`] site
#[derive(Debug, Clone)]
pub struct Page {
    wikipedia: Wikipedia,
    reference: PageRef,
}

impl Page {
    /// Create a page handle; no request is made
    pub fn new(wikipedia: &Wikipedia, reference: PageRef) -> Self {
        Self {
            wikipedia: wikipedia.clone(),
            reference,
        }
    }

    /// The reference this page was created with
    pub fn reference(&self) -> &PageRef {
        &self.reference
    }

    // ========================================================================
    // Single-entity accessors
    // ========================================================================

    /// Page id of the canonical page
    ///
    /// A page created from an id answers without a request.
    pub async fn id(&self) -> Result<String> {
        if let PageRef::Id(id) = &self.reference {
            return Ok(id.clone());
        }
        self.resolve(info_params(), |body| {
            first_page(body).map(|(id, _)| id.to_string())
        })
        .await
    }

    /// Title of the canonical page
    pub async fn title(&self) -> Result<String> {
        self.resolve(info_params(), |body| {
            let (_, page) = first_page(body)?;
            required_str(page, "title", "page")
        })
        .await
    }

    /// Plain-text content
    pub async fn content(&self) -> Result<String> {
        let params = QueryParams::new()
            .with("prop", "extracts|revisions")
            .with("explaintext", "")
            .with("rvprop", "ids")
            .with("redirects", "");
        self.resolve(params, extract_text).await
    }

    /// HTML content
    pub async fn html_content(&self) -> Result<String> {
        let params = QueryParams::new()
            .with("prop", "extracts")
            .with("redirects", "");
        self.resolve(params, extract_text).await
    }

    /// Plain-text introduction
    pub async fn summary(&self) -> Result<String> {
        let params = QueryParams::new()
            .with("prop", "extracts")
            .with("explaintext", "")
            .with("exintro", "")
            .with("redirects", "");
        self.resolve(params, extract_text).await
    }

    // ========================================================================
    // Paginated accessors
    // ========================================================================

    /// Images used on the page
    pub fn images(&self) -> ItemStream<Image> {
        let params = QueryParams::new()
            .with("generator", "images")
            .with("gimlimit", self.wikipedia.images_results())
            .with("prop", "imageinfo")
            .with("iiprop", "url");
        self.paginate(params, ImageExtractor)
    }

    /// External links cited by the page
    pub fn references(&self) -> ItemStream<Reference> {
        let params = QueryParams::new()
            .with("prop", "extlinks")
            .with("ellimit", self.wikipedia.links_results());
        self.paginate(params, ReferenceExtractor)
    }

    /// Links to other articles
    pub fn links(&self) -> ItemStream<Link> {
        let params = QueryParams::new()
            .with("prop", "links")
            .with("plnamespace", "0")
            .with("pllimit", self.wikipedia.links_results());
        self.paginate(params, LinkExtractor)
    }

    /// Categories the page belongs to
    pub fn categories(&self) -> ItemStream<Category> {
        let params = QueryParams::new()
            .with("prop", "categories")
            .with("cllimit", self.wikipedia.categories_results());
        self.paginate(params, CategoryExtractor)
    }

    // ========================================================================
    // Sections
    // ========================================================================

    /// Section headings, in document order
    pub async fn sections(&self) -> Result<Vec<Section>> {
        let id = self.id().await?;
        let params = QueryParams::new()
            .with("action", "parse")
            .with("prop", "sections")
            .with("pageid", id);
        let body = self.wikipedia.executor().execute(params).await?;

        let sections = json::lookup_array(&body, &[Step::Key("parse"), Step::Key("sections")])
            .ok_or_else(|| Error::invalid_response("response has no parse.sections"))?;
        sections.iter().map(parse_section).collect()
    }

    /// Text of the section headed `title`
    ///
    /// Returns the text between the `== title ==` marker and the next `==`,
    /// or an empty string when the heading does not occur.
    pub async fn section_content(&self, title: &str) -> Result<String> {
        let content = self.content().await?;
        Ok(section_text(&content, title).to_string())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn resolve<T, F>(&self, params: QueryParams, extract: F) -> Result<T>
    where
        F: Fn(&Value) -> Result<T>,
    {
        self.wikipedia
            .resolver()
            .resolve(&self.reference, &params, extract)
            .await
    }

    fn paginate<E: crate::pagination::ItemExtractor>(
        &self,
        params: QueryParams,
        extractor: E,
    ) -> ItemStream<E::Item> {
        let (key, value) = self.reference.discriminant();
        let base = params.with("redirects", "").with(key, value);
        paginate(self.wikipedia.executor().clone(), base, extractor)
    }
}

/// Parameters of the identity queries
fn info_params() -> QueryParams {
    QueryParams::new()
        .with("prop", "info|pageprops")
        .with("inprop", "url")
        .with("ppprop", "disambiguation")
        .with("redirects", "")
}

/// First page object of `query.pages`, with its key
fn first_page(body: &Value) -> Result<(&str, &Value)> {
    let pages = json::lookup_object(body, &[Step::Key("query"), Step::Key("pages")])
        .ok_or_else(|| Error::invalid_response("response has no query.pages"))?;
    let (key, page) = pages
        .iter()
        .next()
        .ok_or_else(|| Error::invalid_response("query.pages is empty"))?;

    if page.get("missing").is_some() || page.get("invalid").is_some() {
        let name = json::lookup_str(page, &[Step::Key("title")]).unwrap_or(key);
        return Err(Error::invalid_response(format!("page '{name}' does not exist")));
    }
    Ok((key.as_str(), page))
}

/// `extract` member of the first page
fn extract_text(body: &Value) -> Result<String> {
    let (_, page) = first_page(body)?;
    required_str(page, "extract", "page")
}

/// Non-empty string member `key` of `value`
pub(crate) fn required_str(value: &Value, key: &str, what: &str) -> Result<String> {
    json::lookup_str(value, &[Step::Key(key)])
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_response(format!("{what} without '{key}'")))
}

/// One `parse.sections[]` entry
fn parse_section(entry: &Value) -> Result<Section> {
    let title = required_str(entry, "line", "section")?;
    let scalar = |key| json::lookup_scalar(entry, &[Step::Key(key)]).unwrap_or_default();
    Ok(Section {
        title,
        level: scalar("level").parse().unwrap_or(0),
        number: scalar("number"),
        index: scalar("index"),
    })
}

/// Text between `== title ==` and the next `==`
pub(crate) fn section_text<'a>(content: &'a str, title: &str) -> &'a str {
    let marker = format!("== {title} ==");
    let Some(start) = content.find(&marker) else {
        return "";
    };
    let rest = &content[start + marker.len()..];
    match rest.find("==") {
        Some(end) => &rest[..end],
        None => rest,
    }
}
