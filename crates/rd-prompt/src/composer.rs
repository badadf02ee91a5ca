//! Prompt Composer — turns a classified `ReviewRequest` into the instruction
//! and context handed to the text generator.

use rd_core::catalog::Language;
use rd_core::tag::ReviewRequest;
use serde::{Deserialize, Serialize};

/// Instruction/context pair for one review generation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptPair {
    pub instruction: String,
    pub context: String,
}

const SERVICE_LABEL: &str = "Service";
const DISHES_LABEL: &str = "Liked dishes";
const ATMOSPHERE_LABEL: &str = "Atmosphere";
const OCCASION_LABEL: &str = "Occasion";

/// Build the prompt. Deterministic: the same request and language always
/// produce the same strings.
pub fn compose(request: &ReviewRequest, target_language: &str) -> PromptPair {
    PromptPair {
        instruction: instruction(target_language, &request.server_name),
        context: context(request),
    }
}

fn instruction(target_language: &str, server_name: &str) -> String {
    let language = display_language(target_language);
    format!(
        "You are a very satisfied guest of the restaurant writing a short public review.
Write a short review (2 to 4 sentences), warm and authentic.
IMPORTANT: you must answer in the following language: {language}.

The review must include a positive mention of the service provided by \"{server_name}\".
Fluently weave in the points the guest appreciated, which are supplied to you.
If a special occasion is mentioned, include it naturally in the review.
Vary the wording of every review so that each one is unique; never reuse a previous phrasing."
    )
}

/// Known codes are spelled out for the generator; anything else is passed as given.
fn display_language(target_language: &str) -> String {
    match Language::from_code(target_language) {
        Some(lang) => format!("{} ({})", lang.english_name(), lang.code()),
        None => target_language.trim().to_string(),
    }
}

fn context(request: &ReviewRequest) -> String {
    let mut fragments = Vec::new();

    for (label, values) in [
        (SERVICE_LABEL, &request.service_qualities),
        (DISHES_LABEL, &request.liked_dishes),
        (ATMOSPHERE_LABEL, &request.atmosphere_notes),
    ] {
        if !values.is_empty() {
            fragments.push(format!("{label}: {}.", values.join(", ")));
        }
    }

    if request.has_occasion() {
        fragments.push(format!("{OCCASION_LABEL}: {}.", request.visit_reason));
    }

    fragments.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_non_empty_buckets_are_rendered() {
        let req = ReviewRequest {
            service_qualities: vec!["attentive".into()],
            ..Default::default()
        };
        assert_eq!(compose(&req, "en").context, "Service: attentive.");
    }

    #[test]
    fn buckets_follow_fixed_order() {
        let req = ReviewRequest {
            service_qualities: vec!["attentive".into(), "funny".into()],
            liked_dishes: vec!["Burrata".into(), "Tiramisu".into()],
            atmosphere_notes: vec!["cosy".into()],
            visit_reason: "anniversary (25 years)".into(),
            ..Default::default()
        };
        assert_eq!(
            compose(&req, "fr").context,
            "Service: attentive, funny. Liked dishes: Burrata, Tiramisu. \
             Atmosphere: cosy. Occasion: anniversary (25 years)."
        );
    }

    #[test]
    fn empty_request_has_empty_context() {
        assert_eq!(compose(&ReviewRequest::default(), "fr").context, "");
    }

    #[test]
    fn instruction_names_server_and_language() {
        let req = ReviewRequest {
            server_name: "Kewan".into(),
            ..Default::default()
        };
        let prompt = compose(&req, "es");
        assert!(prompt.instruction.contains("\"Kewan\""));
        assert!(prompt.instruction.contains("Spanish (es)"));
        assert!(prompt.instruction.contains("2 to 4 sentences"));
        assert!(prompt.instruction.contains("Vary the wording"));
    }

    #[test]
    fn instruction_ignores_buckets() {
        let plain = ReviewRequest::default();
        let rich = ReviewRequest {
            liked_dishes: vec!["Burrata".into()],
            ..Default::default()
        };
        assert_eq!(compose(&plain, "pt").instruction, compose(&rich, "pt").instruction);
        assert!(compose(&plain, "pt").instruction.contains("language: pt."));
    }
}
