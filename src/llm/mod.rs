//! Language-model boundary.
//!
//! Every call here is an opaque request/response JSON contract:
//! inputs are truncated to the service's limits before submission and
//! responses are validated for their required fields. A response that
//! fails the contract is fatal for the run; no partial result is
//! accepted.

pub mod analyze;
pub mod client;
pub mod enrich;
pub mod extract;
pub mod json;
pub mod schema;

pub use analyze::PortfolioAnalyzer;
pub use client::{LanguageModel, LlmError, OpenAiClient};
pub use enrich::ReferenceEnricher;
pub use extract::SemanticExtractor;
pub use schema::{AnalysisReport, AreaFeedback, ProjectsAndSkills, References};
