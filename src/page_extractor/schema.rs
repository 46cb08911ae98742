//! Extraction schema shared between the JS evaluation layer and the
//! crawl engine.

use serde::{Deserialize, Serialize};

/// One content section discovered on a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Class name or tag of the sectioning element.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A candidate project block (portfolio item, case study).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectBlock {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Structured outline returned by the DOM evaluation script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOutline {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub sections: Vec<PageSection>,
    #[serde(default)]
    pub projects: Vec<ProjectBlock>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub contact: Vec<String>,
}

/// Everything extracted from one successfully loaded page.
///
/// Produced once per page and immutable afterwards. Extraction is
/// best-effort: any of the parts may be empty if its evaluation
/// failed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub text_content: String,
    /// Absolute http(s) image URLs in document order.
    pub images: Vec<String>,
    pub outline: PageOutline,
}

impl PageSnapshot {
    /// True when the page yielded neither text nor images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text_content.is_empty() && self.images.is_empty()
    }
}
