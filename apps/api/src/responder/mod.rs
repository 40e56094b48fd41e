// Response generation: prompt assembly → text generation → record + analytics.
// All generation calls go through llm_client::TextGenerator.

pub mod analytics;
pub mod generator;
pub mod handlers;
