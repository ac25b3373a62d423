//! Personal decision analysis — weighs options and surfaces hidden factors.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::analysis::Analysis;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

const UNSPECIFIED: &str = "unspecified";

/// Always attached to the response, whether or not the model remembers to
/// include it.
const DECISION_DISCLAIMER: &str =
    "This analysis is a structured second opinion, not professional advice. The final call is yours.";

const DECISION_SYSTEM: &str = r#"You are the decision-analysis assistant for "TripReady".
Analyze the user's personal decision and return a balanced, concrete assessment as JSON.

Principles:
1. Treat every option the user names; if none are named, infer the two most plausible ones.
2. Surface factors the user has likely not considered, not just restatements of their input.
3. Recommend one option, with honest confidence. Never hedge into "it depends" without a lean.
4. Follow the JSON schema below exactly.

Response JSON schema:
{
  "summary": "2-3 sentence framing of what is actually being decided",
  "options": [
    {
      "option": "name of the option",
      "pros": ["pro 1", "pro 2"],
      "cons": ["con 1", "con 2"]
    }
  ],
  "hidden_factors": ["factor the user likely has not considered", "another"],
  "recommendation": {
    "choice": "the recommended option",
    "confidence": number 1-10,
    "reasoning": "2-3 sentences on why"
  },
  "next_step": "the single most useful concrete action to take first"
}"#;

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    #[serde(default)]
    pub decision: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub constraints: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Analysis for DecisionRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.decision.trim().is_empty() {
            return Err(AppError::Validation(
                "missing required field: decision".to_string(),
            ));
        }
        Ok(())
    }

    fn system_prompt(&self) -> String {
        format!("{DECISION_SYSTEM}\n\n{JSON_ONLY_SYSTEM}")
    }

    fn user_payload(&self) -> Value {
        json!({
            "decision": self.decision,
            "options": self.options,
            "constraints": self.constraints.as_deref().unwrap_or(UNSPECIFIED),
            "deadline": self.deadline.as_deref().unwrap_or(UNSPECIFIED),
            "notes": self.notes.as_deref().unwrap_or(""),
        })
    }

    fn defaults(&self) -> Map<String, Value> {
        let mut defaults = Map::new();
        defaults.insert("decision".to_string(), json!(self.decision));
        defaults.insert("disclaimer".to_string(), json!(DECISION_DISCLAIMER));
        defaults
    }
}
