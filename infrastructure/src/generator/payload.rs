//! Prompt building and response parsing for chat-completion generators.
//!
//! Models are asked to answer with bare JSON but regularly wrap it in a
//! Markdown fence or surround it with prose. The text is cleaned before
//! parsing: trim, strip a fence, cut to the outermost `{ ... }`.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};
use trivia_application::GeneratorError;
use trivia_domain::{QuestionDraft, Topic, preview};

/// Build the user prompt asking for `count` questions on `topic`.
pub fn build_prompt(topic: &Topic, count: usize) -> String {
    format!(
        "Create {count} short, fun multiple-choice trivia questions.\n\
         Topic: {topic}\n\
         Rules:\n\
         - Keep each question under 20 words and each option under 6 words\n\
         - Give exactly 4 options\n\
         - Mark the correct option with its index, 0 to 3\n\
         - Add a hint of at most 15 words that helps without giving the answer away\n\
         - Answer only with JSON in exactly this shape:\n\
         {{\n  \"questions\": [\n    {{\n      \"question\": \"...\",\n      \
         \"answers\": [\"...\", \"...\", \"...\", \"...\"],\n      \
         \"correctAnswerIndex\": 0,\n      \"hint\": \"...\"\n    }}\n  ]\n}}"
    )
}

fn fence_regex() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"(?s)^```[A-Za-z0-9_-]*\s*(.*?)\s*```$").ok())
        .as_ref()
}

/// Strip code fences and surrounding prose, leaving the outermost object.
pub fn clean_response(content: &str) -> &str {
    let mut text = content.trim();

    if let Some(inner) = fence_regex()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
    {
        text = inner.as_str();
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Parse a model answer into question drafts.
///
/// Entries that do not even have the draft shape are dropped with a
/// warning; content validation happens later in the supplier. A payload
/// without a `questions` array is [`GeneratorError::Malformed`].
pub fn parse_questions(content: &str) -> Result<Vec<QuestionDraft>, GeneratorError> {
    let cleaned = clean_response(content);
    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        debug!("Unparsable generator payload: {}", preview(cleaned, 120));
        GeneratorError::Malformed(format!("invalid JSON: {}", e))
    })?;

    let Some(entries) = value.get("questions").and_then(Value::as_array) else {
        return Err(GeneratorError::Malformed(
            "payload has no \"questions\" array".to_string(),
        ));
    };

    let drafts: Vec<QuestionDraft> = entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry.clone()) {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!("Dropping generator entry {}: {}", i, e);
                None
            }
        })
        .collect();

    debug!("Parsed {} of {} generator entries", drafts.len(), entries.len());
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"questions": [
        {"question": "2 + 2?", "answers": ["3", "4", "5", "6"], "correctAnswerIndex": 1, "hint": "Even"},
        {"question": "Capital of France?", "answers": ["Paris", "Rome", "Oslo", "Bern"], "correctAnswerIndex": 0}
    ]}"#;

    #[test]
    fn test_parse_plain_payload() {
        let drafts = parse_questions(PAYLOAD).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].prompt, "2 + 2?");
        assert_eq!(drafts[0].correct_index, 1);
        assert_eq!(drafts[0].hint.as_deref(), Some("Even"));
        assert_eq!(drafts[1].hint, None);
    }

    #[test]
    fn test_parse_fenced_payload() {
        let fenced = format!("```json\n{}\n```", PAYLOAD);
        assert_eq!(parse_questions(&fenced).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_payload_with_prose() {
        let chatty = format!("Sure! Here are your questions:\n{}\nHave fun!", PAYLOAD);
        assert_eq!(parse_questions(&chatty).unwrap().len(), 2);
    }

    #[test]
    fn test_clean_response_without_braces_is_unchanged() {
        assert_eq!(clean_response("  no json here "), "no json here");
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = parse_questions("I cannot help with that.").unwrap_err();
        assert!(matches!(err, GeneratorError::Malformed(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_missing_questions_array_is_malformed() {
        let err = parse_questions(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, GeneratorError::Malformed(_)));
    }

    #[test]
    fn test_wrongly_shaped_entry_dropped() {
        let payload = r#"{"questions": [
            {"question": "Bad", "answers": "not a list", "correctAnswerIndex": 0},
            {"question": "Good", "answers": ["a", "b", "c", "d"], "correctAnswerIndex": 3}
        ]}"#;
        let drafts = parse_questions(payload).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].prompt, "Good");
    }

    #[test]
    fn test_prompt_mentions_topic_and_count() {
        let prompt = build_prompt(&Topic::new("astronomy"), 5);
        assert!(prompt.contains("Create 5"));
        assert!(prompt.contains("Topic: astronomy"));
        assert!(prompt.contains("correctAnswerIndex"));
    }
}
