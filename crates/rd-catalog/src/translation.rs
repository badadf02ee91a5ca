//! Translation Cache — obtains every target-language projection of a
//! canonical option text with a single generator call.
//!
//! Called once, when the option is created. Readers never translate.

use crate::CatalogError;
use rd_core::catalog::{Language, Translations};
use rd_prompt::response::{extract_json_block, truncate};
use rd_prompt::{GenerationRequest, SamplingParams, TextGenerator};
use std::collections::BTreeMap;

/// Fixed instruction for the translation call.
pub fn translation_instruction() -> String {
    let source = Language::CANONICAL.english_name();
    let targets: Vec<String> = Language::TARGETS
        .iter()
        .map(|lang| format!("\"{}\" ({})", lang.code(), lang.english_name()))
        .collect();

    format!(
        "You are a professional translator for a restaurant menu and guest feedback form.
Translate the {source} text supplied by the user into each of these languages: {}.
Keep dish names that are usually left untranslated as they are.
Answer with one flat JSON object whose keys are exactly the language codes above \
and whose values are the translated strings.
Return ONLY the JSON object, no markdown code blocks or explanations.",
        targets.join(", ")
    )
}

/// Translate `canonical_text` into every target language.
///
/// Any generator failure, unparsable output or missing language is an error:
/// callers must not persist anything in that case.
pub async fn ensure_translations<G: TextGenerator>(
    generator: &G,
    canonical_text: &str,
) -> Result<Translations, CatalogError> {
    if canonical_text.trim().is_empty() {
        return Err(CatalogError::Validation("canonical text must not be empty".into()));
    }

    let request = GenerationRequest {
        instruction: translation_instruction(),
        context: canonical_text.to_string(),
        params: SamplingParams::precise(),
    };

    let response = generator.generate(&request).await.map_err(|e| {
        tracing::error!("translation call failed for {canonical_text:?}: {e}");
        CatalogError::Translation(e.to_string())
    })?;

    parse_translations(&response)
}

/// Parse the generator's JSON answer into a complete `Translations` value.
pub fn parse_translations(response: &str) -> Result<Translations, CatalogError> {
    let json_str = extract_json_block(response);

    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json_str)
        .map_err(|e| {
            CatalogError::Translation(format!(
                "response is not a JSON object: {e}. Response: {}",
                truncate(json_str, 500)
            ))
        })?;

    let map: BTreeMap<Language, String> = Language::TARGETS
        .iter()
        .filter_map(|lang| {
            object
                .get(lang.code())
                .and_then(|v| v.as_str())
                .map(|text| (*lang, text.trim().to_string()))
        })
        .collect();

    Translations::try_from_map(map).map_err(|missing| {
        let codes: Vec<&str> = missing.iter().map(Language::code).collect();
        CatalogError::Translation(format!("missing languages: {}", codes.join(", ")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_prompt::testing::ScriptedGenerator;

    const OCTOPUS: &str =
        r#"{"en": "Grilled octopus", "es": "Pulpo a la parrilla", "it": "Polpo alla griglia"}"#;

    #[test]
    fn instruction_lists_every_target() {
        let instruction = translation_instruction();
        for lang in Language::TARGETS {
            assert!(instruction.contains(&format!("\"{}\"", lang.code())));
        }
        assert!(instruction.contains("French"));
    }

    #[test]
    fn parse_complete_answer() {
        let translations = parse_translations(OCTOPUS).unwrap();
        assert_eq!(translations.get(Language::Es), Some("Pulpo a la parrilla"));
    }

    #[test]
    fn parse_rejects_partial_answer() {
        let err = parse_translations(r#"{"en": "Grilled octopus", "es": ""}"#).unwrap_err();
        match err {
            CatalogError::Translation(msg) => assert!(msg.contains("es, it")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_non_string_values() {
        let err =
            parse_translations(r#"{"en": "Grilled octopus", "es": 3, "it": null}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Translation(_)));
    }

    #[test]
    fn parse_rejects_prose() {
        let err = parse_translations("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, CatalogError::Translation(_)));
    }

    #[tokio::test]
    async fn ensure_translations_sends_canonical_text() {
        let generator = ScriptedGenerator::replying(OCTOPUS);
        let translations = ensure_translations(&generator, "Poulpe Grillé").await.unwrap();
        assert_eq!(translations.get(Language::It), Some("Polpo alla griglia"));

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].context, "Poulpe Grillé");
        assert_eq!(calls[0].params, SamplingParams::precise());
    }

    #[tokio::test]
    async fn generator_failure_is_translation_error() {
        let generator = ScriptedGenerator::failing();
        let err = ensure_translations(&generator, "Poulpe Grillé").await.unwrap_err();
        assert!(matches!(err, CatalogError::Translation(_)));
    }
}
