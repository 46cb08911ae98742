//! Scored-feedback analysis.

use std::sync::Arc;
use tracing::debug;

use super::client::{LanguageModel, LlmError};
use super::extract::{truncate_chars, MAX_IMAGE_REFS, MAX_TEXT_CHARS};
use super::json::extract_json;
use super::schema::AnalysisReport;
use crate::crawl_engine::ExtractionAggregate;

/// Produces the full scored report from the crawl aggregate and the
/// semantic decomposition.
pub struct PortfolioAnalyzer {
    model: Arc<dyn LanguageModel>,
}

impl PortfolioAnalyzer {
    #[must_use]
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// One model call; the response must deserialize into a complete
    /// [`AnalysisReport`] (summary, all five areas, references block)
    /// or the run fails.
    pub async fn analyze(&self, aggregate: &ExtractionAggregate) -> Result<AnalysisReport, LlmError> {
        let prompt = build_prompt(aggregate);
        let raw = self.model.complete(&prompt).await?;
        let value = extract_json(&raw)?;

        let report: AnalysisReport = serde_json::from_value(value)
            .map_err(|e| LlmError::Contract(format!("invalid analysis shape: {e}")))?;

        debug!(summary_len = report.summary.len(), "Analysis completed");
        Ok(report)
    }
}

fn build_prompt(aggregate: &ExtractionAggregate) -> String {
    let bounded_text = truncate_chars(&aggregate.text_content, MAX_TEXT_CHARS);
    let bounded_images = aggregate
        .images
        .iter()
        .take(MAX_IMAGE_REFS)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");

    let structured = serde_json::json!({
        "title": aggregate.title,
        "metaDescription": aggregate.meta_description,
        "sections": aggregate.sections,
        "projectBlocks": aggregate.project_blocks,
        "skillTags": aggregate.skill_tags,
        "contact": aggregate.contact,
        "projects": aggregate.projects,
        "skills": aggregate.skills,
    });
    let structured_content =
        serde_json::to_string_pretty(&structured).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"You are an experienced mentor and coach specializing in design, product management, and portfolio development. You have years of experience helping professionals refine their portfolios and presentations to effectively showcase their work.

Your task is to provide detailed, constructive feedback on the portfolio material provided. The material has been extracted into raw text, images, and structured content. The portfolio is aimed at showcasing the work of a Designer or Product Manager.

Start by identifying the language of the content. Provide feedback in the same language, or use English if unsure.

IMPORTANT: Your feedback should be in a warm, supportive, mentor-to-mentee tone, as if you're sitting down with the person and having a thoughtful conversation about their work. Be specific, detailed, and actionable.

CRITICAL INSTRUCTIONS:
1. Each area's feedback must be completely independent and self-contained. Do not use transitional phrases like "Lastly" or "Additionally" that suggest you're continuing from a previous point.
2. Evaluate the portfolio across 5 key areas: Clarity, Technical Skills, Innovation, User Focus, and Storytelling. For each area, provide a score from 1 to 10 and detailed feedback.
3. When providing feedback in each area, reference specific projects from the structured content whenever possible; feedback tied to their actual work is the most valuable.

SCORING GUIDELINES:
- 1-3: Needs significant improvement
- 4-6: Average performance with room for improvement
- 7-8: Good performance with some areas to enhance
- 9-10: Excellent performance with minor refinements possible

TEXTS:
{bounded_text}

IMAGES:
{bounded_images}

STRUCTURED CONTENT:
{structured_content}

Your response must follow **strictly** the JSON schema below:
{{
  "summary": "A comprehensive analysis of the portfolio in 2-3 paragraphs, written in a warm, mentor-like tone, addressing the person directly, including their overall score (average of all 5 areas) and referencing specific projects.",
  "areas": {{
    "clarity": {{ "score": 0, "feedback": "Detailed feedback (3-4 paragraphs) on how well the portfolio communicates its intended message, reduces cognitive load, and guides attention through layout, typography, color, and imagery." }},
    "technical_skills": {{ "score": 0, "feedback": "Detailed feedback (3-4 paragraphs) on mastery of design tools, ability to execute complex ideas, and adaptability to new technologies." }},
    "innovation": {{ "score": 0, "feedback": "Detailed feedback (3-4 paragraphs) on fresh perspectives, risk taking, experimentation, and challenging conventional thinking." }},
    "user_focus": {{ "score": 0, "feedback": "Detailed feedback (3-4 paragraphs) on understanding of user needs, empathy, accessibility considerations, and focus on user experience." }},
    "storytelling": {{ "score": 0, "feedback": "Detailed feedback (3-4 paragraphs) on narrative, context and depth, and conveying complex ideas simply." }}
  }},
  "references": {{
    "videos": [],
    "podcasts": [],
    "articles": [],
    "decks": [],
    "books": []
  }}
}}

DON'T include any additional text before or after the JSON."#
    )
}
