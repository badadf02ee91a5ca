//! Helpers for reading generator output.

/// Extract the JSON payload from a generator response, tolerating markdown
/// code fences and surrounding chatter.
pub fn extract_json_block(response: &str) -> &str {
    if response.contains("```json") {
        response
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(response)
            .trim()
    } else if response.contains("```") {
        response.split("```").nth(1).unwrap_or(response).trim()
    } else {
        match (response.find('{'), response.rfind('}')) {
            (Some(start), Some(end)) if start < end => &response[start..=end],
            _ => response.trim(),
        }
    }
}

/// Cut `text` to at most `max` bytes without splitting a character.
pub fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_passes_through() {
        assert_eq!(extract_json_block(r#" {"en": "x"} "#), r#"{"en": "x"}"#);
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let response = "Here you go:\n```json\n{\"en\": \"Grilled octopus\"}\n```\nEnjoy.";
        assert_eq!(extract_json_block(response), "{\"en\": \"Grilled octopus\"}");
    }

    #[test]
    fn bare_fence_is_unwrapped() {
        let response = "```\n{\"es\": \"Pulpo\"}\n```";
        assert_eq!(extract_json_block(response), "{\"es\": \"Pulpo\"}");
    }

    #[test]
    fn chatter_around_object_is_dropped() {
        let response = "Sure! {\"it\": \"Polpo\"} Hope this helps.";
        assert_eq!(extract_json_block(response), "{\"it\": \"Polpo\"}");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Grillé", 6), "Grill");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
