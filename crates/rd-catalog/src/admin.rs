//! Option creation: translate → validate → persist.
//!
//! The generator is called before anything touches the store, and the row is
//! written in a single INSERT carrying every language. A failed or incomplete
//! translation therefore leaves the catalog untouched.
//!
//! The canonical text is stored exactly as given; blank text is rejected.

use crate::store::CatalogStore;
use crate::translation::ensure_translations;
use crate::CatalogError;
use rd_core::catalog::{AtmosphereOption, FlavorOption, LocalizedText};
use rd_prompt::TextGenerator;

pub async fn create_flavor<G: TextGenerator>(
    store: &CatalogStore,
    generator: &G,
    canonical_text: &str,
    category: &str,
) -> Result<FlavorOption, CatalogError> {
    if category.trim().is_empty() {
        return Err(CatalogError::Validation("flavor category must not be empty".into()));
    }

    let translations = ensure_translations(generator, canonical_text).await?;
    let text = LocalizedText::with_translations(canonical_text, &translations);
    let option = store.insert_flavor(category, &text)?;

    tracing::info!(
        id = option.id,
        category = %option.category,
        "created flavor option {:?}",
        option.text.canonical
    );
    Ok(option)
}

pub async fn create_atmosphere<G: TextGenerator>(
    store: &CatalogStore,
    generator: &G,
    canonical_text: &str,
) -> Result<AtmosphereOption, CatalogError> {
    let translations = ensure_translations(generator, canonical_text).await?;
    let text = LocalizedText::with_translations(canonical_text, &translations);
    let option = store.insert_atmosphere(&text)?;

    tracing::info!(id = option.id, "created atmosphere option {:?}", option.text.canonical);
    Ok(option)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_prompt::testing::ScriptedGenerator;
    use rd_core::catalog::Language;

    const OCTOPUS: &str =
        r#"{"en": "Grilled octopus", "es": "Pulpo a la parrilla", "it": "Polpo alla griglia"}"#;

    #[tokio::test]
    async fn create_persists_every_language() {
        let store = CatalogStore::in_memory().unwrap();
        let generator = ScriptedGenerator::replying(OCTOPUS);

        create_flavor(&store, &generator, "Poulpe Grillé", "Antipasti")
            .await
            .unwrap();

        let stored = store.list_flavors().unwrap();
        assert_eq!(stored.len(), 1);
        for lang in Language::TARGETS {
            assert!(stored[0].text.get(lang).is_some(), "missing {lang:?}");
        }
        assert_eq!(stored[0].text.project("fr"), "Poulpe Grillé");
    }

    #[tokio::test]
    async fn incomplete_translation_persists_nothing() {
        let store = CatalogStore::in_memory().unwrap();
        let generator = ScriptedGenerator::replying(r#"{"en": "Grilled octopus"}"#);

        let err = create_flavor(&store, &generator, "Poulpe Grillé", "Antipasti")
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Translation(_)));
        assert!(store.list_flavors().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generator_failure_persists_nothing() {
        let store = CatalogStore::in_memory().unwrap();
        let generator = ScriptedGenerator::failing();

        assert!(create_atmosphere(&store, &generator, "Terrasse").await.is_err());
        assert!(store.list_atmospheres().unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_create_retranslates_then_fails_uniqueness() {
        let store = CatalogStore::in_memory().unwrap();
        let generator = ScriptedGenerator::replying(OCTOPUS);

        create_flavor(&store, &generator, "Poulpe Grillé", "Antipasti")
            .await
            .unwrap();
        let err = create_flavor(&store, &generator, "Poulpe Grillé", "Secondi")
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Duplicate(_)));
        assert_eq!(generator.calls().len(), 2);
        assert_eq!(store.list_flavors().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn canonical_text_reads_back_verbatim() {
        let store = CatalogStore::in_memory().unwrap();
        let generator = ScriptedGenerator::replying(
            r#"{"en": "Terrace", "es": "Terraza", "it": "Terrazza"}"#,
        );

        create_atmosphere(&store, &generator, "Terrasse ").await.unwrap();

        let view = crate::reader::list_options(&store, "fr").unwrap();
        assert_eq!(view.atmospheres[0].text, "Terrasse ");
        assert_eq!(generator.calls()[0].context, "Terrasse ");
    }

    #[tokio::test]
    async fn missing_category_skips_translation() {
        let store = CatalogStore::in_memory().unwrap();
        let generator = ScriptedGenerator::replying(OCTOPUS);

        let err = create_flavor(&store, &generator, "Poulpe Grillé", " ")
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(generator.calls().is_empty());
    }
}
