//! Item extractors for the paginated page accessors
//!
//! List props hang off each page object in `query.pages`; the image listing
//! uses a generator, so every page object is itself an item.

use super::required_str;
use crate::error::{Error, Result};
use crate::json::{self, Step};
use crate::pagination::ItemExtractor;
use crate::types::{Category, Image, Link, Reference};
use serde_json::Value;

/// Page objects of `query.pages`, in server order
fn pages<'a>(body: &'a Value) -> impl Iterator<Item = &'a Value> {
    json::lookup_object(body, &[Step::Key("query"), Step::Key("pages")])
        .into_iter()
        .flat_map(|pages| pages.values())
}

/// Entries of the `prop` array of every page object
fn prop_entries<'a>(body: &'a Value, prop: &str) -> Vec<&'a Value> {
    pages(body)
        .filter_map(|page| json::lookup_array(page, &[Step::Key(prop)]))
        .flatten()
        .collect()
}

/// `generator=images` with `prop=imageinfo`
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageExtractor;

impl ItemExtractor for ImageExtractor {
    type Item = Image;

    fn name(&self) -> &'static str {
        "images"
    }

    fn entries<'a>(&self, body: &'a Value) -> Vec<&'a Value> {
        pages(body).collect()
    }

    fn parse(&self, entry: &Value) -> Result<Image> {
        let title = required_str(entry, "title", "image")?;
        let info = json::lookup(entry, &[Step::Key("imageinfo"), Step::Index(0)])
            .ok_or_else(|| Error::invalid_response(format!("image '{title}' without imageinfo")))?;
        Ok(Image {
            url: required_str(info, "url", "imageinfo")?,
            description_url: required_str(info, "descriptionurl", "imageinfo")?,
            title,
        })
    }
}

/// `prop=extlinks`
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceExtractor;

impl ItemExtractor for ReferenceExtractor {
    type Item = Reference;

    fn name(&self) -> &'static str {
        "references"
    }

    fn entries<'a>(&self, body: &'a Value) -> Vec<&'a Value> {
        prop_entries(body, "extlinks")
    }

    fn parse(&self, entry: &Value) -> Result<Reference> {
        // Older servers put the URL under "*"
        let url = json::lookup_str(entry, &[Step::Key("url")])
            .or_else(|| json::lookup_str(entry, &[Step::Key("*")]))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::invalid_response("extlink without url"))?;
        Ok(Reference {
            url: url.to_string(),
        })
    }
}

/// `prop=links`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkExtractor;

impl ItemExtractor for LinkExtractor {
    type Item = Link;

    fn name(&self) -> &'static str {
        "links"
    }

    fn entries<'a>(&self, body: &'a Value) -> Vec<&'a Value> {
        prop_entries(body, "links")
    }

    fn parse(&self, entry: &Value) -> Result<Link> {
        Ok(Link {
            title: required_str(entry, "title", "link")?,
            namespace: json::lookup(entry, &[Step::Key("ns")])
                .and_then(Value::as_i64)
                .unwrap_or(0),
        })
    }
}

/// `prop=categories`
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryExtractor;

impl ItemExtractor for CategoryExtractor {
    type Item = Category;

    fn name(&self) -> &'static str {
        "categories"
    }

    fn entries<'a>(&self, body: &'a Value) -> Vec<&'a Value> {
        prop_entries(body, "categories")
    }

    fn parse(&self, entry: &Value) -> Result<Category> {
        Ok(Category {
            title: required_str(entry, "title", "category")?,
        })
    }
}
