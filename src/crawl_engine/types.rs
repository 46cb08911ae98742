//! Crawl engine data types.

use serde::{Deserialize, Serialize};

use crate::llm::schema::Project;
use crate::page_extractor::schema::{PageSection, PageSnapshot, ProjectBlock};
use crate::page_extractor::ScreenshotRecord;

/// An item in the crawl work queue: a URL and its hop distance from
/// the seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlItem {
    pub url: String,
    pub depth: u8,
}

/// Everything one crawl run accumulates.
///
/// Text, images, and structure come from the seed page only; the
/// screenshot records and visited list cover every node. The
/// `projects`/`skills` decomposition is filled in by the semantic
/// extraction step after the crawl completes.
#[derive(Debug, Clone, Default)]
pub struct ExtractionAggregate {
    pub seed_url: String,
    pub title: String,
    pub meta_description: String,
    pub text_content: String,
    pub images: Vec<String>,
    pub sections: Vec<PageSection>,
    pub project_blocks: Vec<ProjectBlock>,
    pub skill_tags: Vec<String>,
    pub contact: Vec<String>,
    pub screenshots: Vec<ScreenshotRecord>,
    pub visited_urls: Vec<String>,
    pub projects: Vec<Project>,
    pub skills: Vec<String>,
}

impl ExtractionAggregate {
    #[must_use]
    pub fn new(seed_url: &str) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            ..Self::default()
        }
    }

    /// Install the seed page's snapshot as the run's canonical
    /// content. Descendant pages never overwrite these fields.
    pub fn apply_seed_snapshot(&mut self, snapshot: PageSnapshot) {
        self.text_content = snapshot.text_content;
        self.images = snapshot.images;
        self.title = snapshot.outline.title;
        self.meta_description = snapshot.outline.meta_description;
        self.sections = snapshot.outline.sections;
        self.project_blocks = snapshot.outline.projects;
        self.skill_tags = snapshot.outline.skills;
        self.contact = snapshot.outline.contact;
    }

    /// True when the seed yielded any text or images at all.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.text_content.is_empty() || !self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_extractor::schema::PageOutline;

    fn snapshot(text: &str, images: &[&str]) -> PageSnapshot {
        PageSnapshot {
            url: "https://example.com/".to_string(),
            text_content: text.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
            outline: PageOutline {
                title: "Portfolio".to_string(),
                ..PageOutline::default()
            },
        }
    }

    #[test]
    fn seed_snapshot_becomes_canonical_content() {
        let mut aggregate = ExtractionAggregate::new("https://example.com/");
        aggregate.apply_seed_snapshot(snapshot("seed text", &["https://example.com/a.png"]));

        assert_eq!(aggregate.text_content, "seed text");
        assert_eq!(aggregate.images, vec!["https://example.com/a.png"]);
        assert_eq!(aggregate.title, "Portfolio");
        assert!(aggregate.has_content());
    }

    #[test]
    fn content_check_covers_text_or_images() {
        let mut aggregate = ExtractionAggregate::new("https://example.com/");
        assert!(!aggregate.has_content());

        aggregate.apply_seed_snapshot(snapshot("", &["https://example.com/a.png"]));
        assert!(aggregate.has_content());

        aggregate.apply_seed_snapshot(snapshot("", &[]));
        assert!(!aggregate.has_content());
    }
}
