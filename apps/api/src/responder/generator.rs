//! Response generation — orchestrates one feedback reply end to end.
//!
//! Flow: validate feedback → resolve configuration → render template →
//!       append length instruction → generate → persist record → analytics.
//!
//! Nothing is persisted unless the generator returns non-empty text.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, LlmError, TextGenerator};
use crate::models::configuration::Configuration;
use crate::models::response::{NewResponseRecord, ResponseRecord};
use crate::prompt::length::LengthPolicy;
use crate::prompt::prompts::{RESPONDER_SYSTEM, SAMPLING_TEMPERATURE};
use crate::prompt::renderer::{render_template, PromptValues};
use crate::responder::analytics::ResponseAnalytics;
use crate::store::{ConfigurationStore, ResponseStore};

/// Request body for response generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// Missing is treated like empty and rejected by `generate_response`.
    #[serde(default)]
    pub feedback_text: String,
    /// Falls back to the latest configuration when absent.
    #[serde(default)]
    pub configuration_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResponse {
    pub response: ResponseRecord,
    pub analytics: ResponseAnalytics,
}

/// Renders the configuration's template and appends its length instruction.
pub fn build_prompt(configuration: &Configuration, feedback_text: &str) -> (String, LengthPolicy) {
    let facts = &configuration.facts;
    let values = PromptValues {
        restaurant: &facts.restaurant_facts,
        customer: &facts.customer_facts,
        feedback_text,
    };
    let rendered = render_template(&facts.system_facts.prompt_template, &values);
    let policy = LengthPolicy::for_length(facts.system_facts.response_length);
    (policy.apply(&rendered), policy)
}

/// Runs the full generation pipeline and persists the result.
pub async fn generate_response(
    configurations: &dyn ConfigurationStore,
    responses: &dyn ResponseStore,
    generator: &dyn TextGenerator,
    request: GenerateRequest,
) -> Result<GeneratedResponse, AppError> {
    if request.feedback_text.trim().is_empty() {
        return Err(AppError::Validation(
            "feedback_text cannot be empty".to_string(),
        ));
    }

    let configuration = resolve_configuration(configurations, request.configuration_id).await?;
    info!(
        "Generating response with configuration {}",
        configuration.id
    );

    let (prompt, policy) = build_prompt(&configuration, &request.feedback_text);
    let generation = GenerationRequest {
        prompt,
        system: RESPONDER_SYSTEM.to_string(),
        max_tokens: policy.max_tokens,
        temperature: SAMPLING_TEMPERATURE,
    };

    let output = generator.generate(&generation).await?;
    if output.trim().is_empty() {
        return Err(LlmError::EmptyContent.into());
    }

    let analytics = ResponseAnalytics::compute(&output, &request.feedback_text);
    let response = responses
        .create(NewResponseRecord {
            feedback_text: request.feedback_text,
            rendered_output: output,
            configuration_id: Some(configuration.id),
        })
        .await?;

    info!(
        "Stored response {} ({} words, {:?})",
        response.id, analytics.word_count, analytics.sentiment
    );

    Ok(GeneratedResponse {
        response,
        analytics,
    })
}

async fn resolve_configuration(
    configurations: &dyn ConfigurationStore,
    id: Option<u64>,
) -> Result<Configuration, AppError> {
    match id {
        Some(id) => configurations
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Configuration {id} not found"))),
        None => configurations
            .latest()
            .await?
            .ok_or_else(|| AppError::NotFound("No configuration has been saved".to_string())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
