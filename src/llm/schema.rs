//! Report and decomposition types.
//!
//! Deserialization doubles as contract validation: fields without a
//! `#[serde(default)]` are required, and a response that omits them
//! fails the run.

use serde::{Deserialize, Serialize};

/// A project identified in the portfolio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Projects/skills decomposition returned by the semantic extraction
/// call. Both fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsAndSkills {
    pub projects: Vec<Project>,
    pub skills: Vec<String>,
}

/// Score and narrative feedback for one evaluation dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaFeedback {
    pub score: f64,
    pub feedback: String,
}

/// The five evaluation dimensions. All are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Areas {
    pub clarity: AreaFeedback,
    pub technical_skills: AreaFeedback,
    pub innovation: AreaFeedback,
    pub user_focus: AreaFeedback,
    pub storytelling: AreaFeedback,
}

/// One recommended resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
}

/// Recommended resources by medium. The block itself is required on a
/// report; the individual lists may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct References {
    #[serde(default)]
    pub videos: Vec<Reference>,
    #[serde(default)]
    pub podcasts: Vec<Reference>,
    #[serde(default)]
    pub articles: Vec<Reference>,
    #[serde(default)]
    pub decks: Vec<Reference>,
    #[serde(default)]
    pub books: Vec<Reference>,
}

/// The externally visible analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub areas: Areas,
    pub references: References,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(score: f64) -> serde_json::Value {
        serde_json::json!({"score": score, "feedback": "solid work"})
    }

    #[test]
    fn report_requires_all_areas() {
        let missing_area = serde_json::json!({
            "summary": "overview",
            "areas": {
                "clarity": area(7.0),
                "technical_skills": area(8.0),
                "innovation": area(6.0),
                "user_focus": area(7.0)
            },
            "references": {}
        });
        assert!(serde_json::from_value::<AnalysisReport>(missing_area).is_err());
    }

    #[test]
    fn report_requires_references_block() {
        let missing_references = serde_json::json!({
            "summary": "overview",
            "areas": {
                "clarity": area(7.0),
                "technical_skills": area(8.0),
                "innovation": area(6.0),
                "user_focus": area(7.0),
                "storytelling": area(9.0)
            }
        });
        assert!(serde_json::from_value::<AnalysisReport>(missing_references).is_err());
    }

    #[test]
    fn empty_reference_lists_are_valid() {
        let report = serde_json::json!({
            "summary": "overview",
            "areas": {
                "clarity": area(7.0),
                "technical_skills": area(8.0),
                "innovation": area(6.0),
                "user_focus": area(7.0),
                "storytelling": area(9.0)
            },
            "references": {}
        });
        let parsed: AnalysisReport = serde_json::from_value(report).unwrap();
        assert!(parsed.references.videos.is_empty());
        assert!(parsed.references.books.is_empty());
    }

    #[test]
    fn decomposition_requires_both_fields() {
        let missing_skills = serde_json::json!({"projects": []});
        assert!(serde_json::from_value::<ProjectsAndSkills>(missing_skills).is_err());

        let missing_projects = serde_json::json!({"skills": ["figma"]});
        assert!(serde_json::from_value::<ProjectsAndSkills>(missing_projects).is_err());
    }
}
