//! Unified analysis pipeline.
//!
//! The upstream product grew one endpoint per situation, each a near-copy of
//! the last. Here a single pipeline drives every domain: a domain supplies
//! its prompt, its serialized payload, and the fields the response must
//! carry, and the pipeline handles the provider call, extraction, and
//! backfill.

pub mod decision;
pub mod handlers;
pub mod trip;

use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::extract::{backfill_defaults, extract_object, ExtractionError};
use crate::llm_client::{ChatClient, OutputFormat};

/// Sampling temperature for all analysis calls.
const ANALYSIS_TEMPERATURE: f32 = 0.7;

/// Capability set an analysis domain provides to the pipeline.
pub trait Analysis {
    /// Rejects requests with missing or blank required fields. Failures are
    /// client errors and are never forwarded upstream.
    fn validate(&self) -> Result<(), AppError>;

    /// Domain system prompt, including the response schema.
    fn system_prompt(&self) -> String;

    /// The request serialized as the user message, with optional fields
    /// normalized rather than dropped.
    fn user_payload(&self) -> Value;

    /// Fields the response must carry even if the model omits them.
    fn defaults(&self) -> Map<String, Value>;
}

/// Runs one request through the pipeline: validate, call the model in JSON
/// mode, extract the embedded object, backfill mandated fields.
pub async fn run_analysis<A: Analysis>(
    llm: &ChatClient,
    request: &A,
) -> Result<Map<String, Value>, AppError> {
    request.validate()?;

    let system = request.system_prompt();
    let user = serde_json::to_string(&request.user_payload())
        .map_err(|e| AppError::Internal(e.into()))?;

    let response = llm
        .chat(&system, &user, OutputFormat::Json, ANALYSIS_TEMPERATURE)
        .await?;

    let raw = response.text().ok_or(ExtractionError::Empty)?;

    let mut object = extract_object(raw).map_err(|e| {
        warn!("extraction failed on model output: {raw}");
        e
    })?;

    backfill_defaults(&mut object, &request.defaults());

    Ok(object)
}
