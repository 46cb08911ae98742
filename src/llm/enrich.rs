//! Reference enrichment.
//!
//! Optional second pass that replaces a report's references block
//! with curated resources tailored to the feedback already given.

use std::sync::Arc;
use tracing::debug;

use super::client::{LanguageModel, LlmError};
use super::json::extract_json;
use super::schema::{AnalysisReport, References};

pub struct ReferenceEnricher {
    model: Arc<dyn LanguageModel>,
}

impl ReferenceEnricher {
    #[must_use]
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Returns a copy of the report with its references replaced. A
    /// response without a `references` field fails the run.
    pub async fn enrich(&self, analysis: &AnalysisReport) -> Result<AnalysisReport, LlmError> {
        let prompt = build_prompt(analysis)?;
        let raw = self.model.complete(&prompt).await?;
        let value = extract_json(&raw)?;

        let references_value = value
            .get("references")
            .cloned()
            .ok_or_else(|| LlmError::Contract("response missing required 'references' field".into()))?;

        let references: References = serde_json::from_value(references_value)
            .map_err(|e| LlmError::Contract(format!("invalid references shape: {e}")))?;

        debug!(
            videos = references.videos.len(),
            articles = references.articles.len(),
            books = references.books.len(),
            "Reference enrichment completed"
        );

        let mut enriched = analysis.clone();
        enriched.references = references;
        Ok(enriched)
    }
}

fn build_prompt(analysis: &AnalysisReport) -> Result<String, LlmError> {
    let serialized = serde_json::to_string_pretty(analysis)
        .map_err(|e| LlmError::Contract(format!("could not serialize analysis: {e}")))?;

    Ok(format!(
        r#"You are an experienced mentor and coach specializing in design, product management, and portfolio development.

Your task is to enrich the portfolio analysis below with relevant references and resources that would help the person improve their portfolio based on the feedback provided.

PORTFOLIO ANALYSIS:
{serialized}

IMPORTANT: For the references section, provide at least 3-5 REAL resources in each category that are specifically relevant to the person's portfolio. These should be actual, existing resources with real titles, summaries, and working links.

Your response must follow **strictly** the JSON schema below, containing ONLY the references section:
{{
  "references": {{
    "videos": [{{ "title": "", "summary": "", "image": "", "link": "" }}],
    "podcasts": [{{ "title": "", "summary": "", "image": "", "link": "" }}],
    "articles": [{{ "title": "", "summary": "", "image": "", "link": "" }}],
    "decks": [{{ "title": "", "summary": "", "image": "", "link": "" }}],
    "books": [{{ "title": "", "summary": "", "image": "", "link": "" }}]
  }}
}}

DON'T include any additional text before or after the JSON."#
    ))
}
