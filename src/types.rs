//! Common types used throughout wikiquery
//!
//! Plain value records produced by parsing API responses. They carry no
//! identity beyond their field values.

use serde::{Deserialize, Serialize};

// ============================================================================
// Page Items
// ============================================================================

/// An image used on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// File page title (e.g. "File:Bikeshed.jpg")
    pub title: String,
    /// Direct URL of the media file
    pub url: String,
    /// URL of the file description page
    pub description_url: String,
}

/// An internal link to another article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Namespace of the target
    pub namespace: i64,
    /// Title of the target
    pub title: String,
}

/// An external link (reference) cited by a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Target URL
    pub url: String,
}

/// A category the page belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category title (e.g. "Category:Adages")
    pub title: String,
}

/// A section heading of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text
    pub title: String,
    /// Heading level (2 for `==`, 3 for `===`, ...)
    pub level: u32,
    /// Outline number (e.g. "1.2")
    pub number: String,
    /// Section index as used by `action=parse&section=`
    pub index: String,
}

// ============================================================================
// Site Items
// ============================================================================

/// A language the site is available in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Language code (e.g. "en")
    pub code: String,
    /// Language name in that language (e.g. "English")
    pub name: String,
}

// ============================================================================
// Entity Reference
// ============================================================================

/// The subject of a page query: a title or a page id, never both
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageRef {
    /// Page title
    Title(String),
    /// Numeric page id, kept as the server's string form
    Id(String),
}

impl PageRef {
    /// Reference a page by title
    ///
    /// # Panics
    ///
    /// Panics if `title` is empty; an empty subject is a programming error.
    pub fn title(title: impl Into<String>) -> Self {
        let title = title.into();
        assert!(!title.is_empty(), "page reference needs a non-empty title");
        Self::Title(title)
    }

    /// Reference a page by id
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty.
    pub fn id(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.is_empty(), "page reference needs a non-empty id");
        Self::Id(id)
    }

    /// Query parameter identifying this page: `titles` or `pageids`
    pub fn discriminant(&self) -> (&'static str, &str) {
        match self {
            Self::Title(title) => ("titles", title),
            Self::Id(id) => ("pageids", id),
        }
    }
}

impl std::fmt::Display for PageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Title(title) => write!(f, "{title}"),
            Self::Id(id) => write!(f, "#{id}"),
        }
    }
}
