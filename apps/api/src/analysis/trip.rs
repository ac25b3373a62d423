//! Trip preparation analysis — what to book, pack, and check before departure.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::analysis::Analysis;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Marker for optional fields the user left blank. Sent to the model
/// explicitly so it does not invent values.
const UNSPECIFIED: &str = "unspecified";

const TRIP_SYSTEM: &str = r#"You are the travel-preparation assistant for "TripReady".
Analyze the user's trip and return the most realistic and useful preparation list and timeline as JSON.

Principles:
1. Give concrete, actionable steps, never vague advice.
2. For overseas trips, check passport validity, visas, roaming, and currency exchange first.
3. Tone: thorough but warm. Do not stoke anxiety; leave the reader feeling prepared.
4. Follow the JSON schema below exactly.

Response JSON schema:
{
  "summary": "2-3 sentence summary of the key preparation points for this trip",
  "timeline": {
    "D-30 (or D-14)": ["task 1", "task 2"],
    "D-7": ["task 1", "task 2"],
    "D-1": ["task 1", "task 2"]
  },
  "checklist": {
    "documents_bookings": ["item 1", "item 2"],
    "clothing": ["item 1", "item 2"],
    "electronics_adapters": ["item 1", "item 2"],
    "toiletries_medicine": ["item 1", "item 2"],
    "extras": ["item 1", "item 2"]
  },
  "common_misses": ["frequently forgotten item", "easy-to-miss step", "local caution"],
  "scores": {
    "prep_complexity": number 1-10 (how involved the preparation is),
    "risk_level": number 1-10 (local risk and variables),
    "forget_risk": number 1-10 (likelihood of leaving something behind),
    "start_now": "right now" or "from D-14" etc. (recommended starting point)
  }
}"#;

#[derive(Debug, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub trip_type: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub people: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub transport: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Analysis for TripRequest {
    fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("destination", &self.destination),
            ("trip_type", &self.trip_type),
            ("duration", &self.duration),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "missing required field: {field}"
                )));
            }
        }
        Ok(())
    }

    fn system_prompt(&self) -> String {
        format!("{TRIP_SYSTEM}\n\n{JSON_ONLY_SYSTEM}")
    }

    fn user_payload(&self) -> Value {
        json!({
            "destination": self.destination,
            "trip_type": self.trip_type,
            "duration": self.duration,
            "start_date": self.start_date.as_deref().unwrap_or(UNSPECIFIED),
            "people": self.people.as_deref().unwrap_or(UNSPECIFIED),
            "season": self.season.as_deref().unwrap_or(UNSPECIFIED),
            "transport": self.transport,
            "notes": self.notes.as_deref().unwrap_or(""),
        })
    }

    /// The response always echoes the trip it analyzed, even if the model
    /// drops the echo from its reply.
    fn defaults(&self) -> Map<String, Value> {
        let mut defaults = Map::new();
        defaults.insert(
            "trip".to_string(),
            json!({
                "destination": self.destination,
                "trip_type": self.trip_type,
                "duration": self.duration,
            }),
        );
        defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> TripRequest {
        serde_json::from_str(
            r#"{
                "destination": "Osaka",
                "trip_type": "family vacation",
                "duration": "5 days",
                "start_date": "2026-10-02",
                "transport": ["flight", "train"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert!(full_request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_required_field() {
        let request: TripRequest =
            serde_json::from_str(r#"{"destination": "  ", "trip_type": "solo", "duration": "3 days"}"#)
                .unwrap();
        let err = request.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("destination")));
    }

    #[test]
    fn test_validate_rejects_missing_required_field() {
        let request: TripRequest = serde_json::from_str(r#"{"destination": "Osaka"}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_user_payload_normalizes_absent_optionals() {
        let payload = full_request().user_payload();
        assert_eq!(payload["start_date"], json!("2026-10-02"));
        assert_eq!(payload["people"], json!(UNSPECIFIED));
        assert_eq!(payload["season"], json!(UNSPECIFIED));
        assert_eq!(payload["notes"], json!(""));
        assert_eq!(payload["transport"], json!(["flight", "train"]));
    }

    #[test]
    fn test_defaults_echo_the_trip() {
        let defaults = full_request().defaults();
        assert_eq!(
            defaults.get("trip"),
            Some(&json!({
                "destination": "Osaka",
                "trip_type": "family vacation",
                "duration": "5 days",
            }))
        );
    }

    #[test]
    fn test_system_prompt_enforces_json_only() {
        assert!(full_request().system_prompt().contains(JSON_ONLY_SYSTEM));
    }
}
