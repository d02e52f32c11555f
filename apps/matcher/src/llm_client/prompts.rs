// Shared prompt fragments and prompt-building utilities.
// Each stage that calls the model defines its own prompts next to it;
// cross-cutting fragments live here.

/// Appended to every system prompt so the model answers with a bare JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Joins a stage's system prompt with the JSON-only instruction.
pub fn with_json_only(system: &str) -> String {
    format!("{}\n\n{}", system.trim_end(), JSON_ONLY_INSTRUCTION)
}
