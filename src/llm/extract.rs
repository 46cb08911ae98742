//! Semantic projects/skills extraction.

use std::sync::Arc;
use tracing::debug;

use super::client::{LanguageModel, LlmError};
use super::json::extract_json;
use super::schema::ProjectsAndSkills;

/// Upper bound on the text prefix submitted for analysis.
pub const MAX_TEXT_CHARS: usize = 8_000;
/// Upper bound on image URLs submitted for analysis.
pub const MAX_IMAGE_REFS: usize = 10;
/// Upper bound on screenshot references submitted for analysis.
pub const MAX_SCREENSHOT_REFS: usize = 10;

/// Truncate to a character-bounded prefix without splitting a
/// code point.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Turns aggregated crawl output into a projects/skills decomposition
/// via one model call with a strict JSON contract.
pub struct SemanticExtractor {
    model: Arc<dyn LanguageModel>,
}

impl SemanticExtractor {
    #[must_use]
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Submit bounded text/image/screenshot references and parse the
    /// decomposition. A response that is not JSON, or that omits
    /// `projects` or `skills`, fails the whole run.
    pub async fn extract_projects_and_skills(
        &self,
        text: &str,
        images: &[String],
        screenshots: &[String],
    ) -> Result<ProjectsAndSkills, LlmError> {
        let prompt = build_prompt(text, images, screenshots);
        let raw = self.model.complete(&prompt).await?;
        let value = extract_json(&raw)?;

        let object = value
            .as_object()
            .ok_or_else(|| LlmError::Contract("response is not a JSON object".into()))?;
        if !object.contains_key("projects") || !object.contains_key("skills") {
            return Err(LlmError::Contract(
                "response missing required 'projects'/'skills' fields".into(),
            ));
        }

        let decomposition: ProjectsAndSkills = serde_json::from_value(value)
            .map_err(|e| LlmError::Contract(format!("invalid projects/skills shape: {e}")))?;

        debug!(
            projects = decomposition.projects.len(),
            skills = decomposition.skills.len(),
            "Semantic extraction completed"
        );
        Ok(decomposition)
    }
}

fn build_prompt(text: &str, images: &[String], screenshots: &[String]) -> String {
    let bounded_text = truncate_chars(text, MAX_TEXT_CHARS);
    let bounded_images = images
        .iter()
        .take(MAX_IMAGE_REFS)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    let bounded_screenshots = screenshots
        .iter()
        .take(MAX_SCREENSHOT_REFS)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are analyzing a design/product portfolio website that has been scraped into raw text, image URLs, and page screenshots.

Your task is to identify the distinct projects presented in the portfolio and the skills the author demonstrates across them.

TEXT:
{bounded_text}

IMAGES:
{bounded_images}

SCREENSHOTS:
{bounded_screenshots}

Your response must follow **strictly** the JSON schema below:
{{
  "projects": [
    {{
      "title": "Name of the project",
      "description": "One-paragraph description of what the project is and the author's role in it",
      "images": ["Image URLs belonging to this project"],
      "skills": ["Skills demonstrated by this project"]
    }}
  ],
  "skills": ["Deduplicated list of all skills demonstrated across the portfolio"]
}}

DON'T include any additional text before or after the JSON."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Multi-byte characters must not be split.
        assert_eq!(truncate_chars("héllo", 2), "hé");
    }

    #[test]
    fn prompt_bounds_inputs() {
        let long_text = "x".repeat(MAX_TEXT_CHARS * 2);
        let images: Vec<String> = (0..30).map(|i| format!("https://e.com/{i}.png")).collect();
        let prompt = build_prompt(&long_text, &images, &[]);
        assert!(!prompt.contains(&"x".repeat(MAX_TEXT_CHARS + 1)));
        assert!(prompt.contains("https://e.com/9.png"));
        assert!(!prompt.contains("https://e.com/10.png"));
    }
}
