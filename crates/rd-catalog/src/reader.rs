//! Option Catalog Reader — the catalog as a guest sees it, in one language.

use crate::store::CatalogStore;
use crate::CatalogError;
use rd_core::catalog::{CatalogView, OptionView};
use std::collections::BTreeMap;

/// Project the whole catalog to `language_code`.
///
/// Unknown codes and untranslated fields fall back to the canonical text.
/// Read-only: never calls the generator and never writes.
pub fn list_options(store: &CatalogStore, language_code: &str) -> Result<CatalogView, CatalogError> {
    let servers = store
        .list_servers()?
        .into_iter()
        .map(|server| server.name)
        .collect();

    let mut flavors: BTreeMap<String, Vec<OptionView>> = BTreeMap::new();
    for option in store.list_flavors()? {
        flavors.entry(option.category.clone()).or_default().push(OptionView {
            id: option.id,
            text: option.text.project(language_code).to_string(),
        });
    }

    let atmospheres = store
        .list_atmospheres()?
        .into_iter()
        .map(|option| OptionView {
            id: option.id,
            text: option.text.project(language_code).to_string(),
        })
        .collect();

    Ok(CatalogView {
        servers,
        flavors,
        atmospheres,
    })
}
