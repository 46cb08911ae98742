//! Shared fakes and fixtures for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;
use url::Url;

use foliolens::crawl_engine::ExtractionAggregate;
use foliolens::llm::{LanguageModel, LlmError};
use foliolens::page_extractor::ScreenshotStore;
use foliolens::pipeline::SiteScraper;

/// Model fake that replays a fixed sequence of responses.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.responses.lock().await.len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        self.responses
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| LlmError::Api("scripted model exhausted".into()))
    }
}

/// Scraper fake that returns a canned aggregate and drops a few fake
/// screenshot files into the run store.
pub struct StaticScraper {
    pub text_content: String,
    pub images: Vec<String>,
    pub screenshot_count: usize,
}

impl StaticScraper {
    pub fn with_content() -> Self {
        Self {
            text_content: "Product designer. Case study: checkout redesign.".to_string(),
            images: vec!["https://example.com/hero.png".to_string()],
            screenshot_count: 2,
        }
    }

    pub fn empty() -> Self {
        Self {
            text_content: String::new(),
            images: Vec::new(),
            screenshot_count: 1,
        }
    }
}

#[async_trait]
impl SiteScraper for StaticScraper {
    async fn scrape(
        &self,
        seed: &Url,
        store: &mut ScreenshotStore,
    ) -> anyhow::Result<ExtractionAggregate> {
        for i in 0..self.screenshot_count {
            let path = store.root().join(format!("shot-{i}.png"));
            tokio::fs::write(&path, b"png").await?;
            store.register(seed.as_str(), path);
        }

        let mut aggregate = ExtractionAggregate::new(seed.as_str());
        aggregate.text_content = self.text_content.clone();
        aggregate.images = self.images.clone();
        aggregate.visited_urls = vec![seed.to_string()];
        aggregate.screenshots = store.records().to_vec();
        Ok(aggregate)
    }
}

/// Scraper fake that always fails after creating a screenshot file,
/// for exercising the error-path cleanup.
pub struct FailingScraper;

#[async_trait]
impl SiteScraper for FailingScraper {
    async fn scrape(
        &self,
        seed: &Url,
        store: &mut ScreenshotStore,
    ) -> anyhow::Result<ExtractionAggregate> {
        let path = store.root().join("partial.png");
        tokio::fs::write(&path, b"png").await?;
        store.register(seed.as_str(), path);
        Err(anyhow::anyhow!("navigation failed after 5 attempts"))
    }
}

/// A valid projects/skills decomposition response.
pub fn decomposition_json() -> String {
    serde_json::json!({
        "projects": [{
            "title": "Checkout redesign",
            "description": "End-to-end redesign of the payment flow",
            "images": ["https://example.com/hero.png"],
            "skills": ["figma", "user research"]
        }],
        "skills": ["figma", "user research", "prototyping"]
    })
    .to_string()
}

/// A valid full analysis response.
pub fn analysis_json() -> String {
    let area = serde_json::json!({"score": 7.5, "feedback": "Strong work overall."});
    serde_json::json!({
        "summary": "A thoughtful portfolio with clear strengths.",
        "areas": {
            "clarity": area,
            "technical_skills": area,
            "innovation": area,
            "user_focus": area,
            "storytelling": area
        },
        "references": {
            "videos": [], "podcasts": [], "articles": [], "decks": [], "books": []
        }
    })
    .to_string()
}

/// A valid enrichment response carrying one article.
pub fn references_json() -> String {
    serde_json::json!({
        "references": {
            "videos": [],
            "podcasts": [],
            "articles": [{
                "title": "Storytelling in case studies",
                "summary": "How to frame design decisions as a narrative",
                "image": "https://example.com/article.png",
                "link": "https://example.com/article"
            }],
            "decks": [],
            "books": []
        }
    })
    .to_string()
}
