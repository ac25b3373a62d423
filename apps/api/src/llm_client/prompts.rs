// Shared prompt constants. Each analysis domain defines its own prompt
// alongside its request type; this file contains cross-cutting fragments.

/// System prompt fragment that enforces JSON-only output. Appended to every
/// analysis system prompt; the extractor still tolerates models that ignore
/// it and wrap the object in fences or commentary.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with a single valid JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
