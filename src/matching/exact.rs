use crate::core::item::CatalogItem;
use crate::utils::validation::compact_model;

/// First catalog item whose model equals `target`, ignoring case and whitespace.
///
/// Items with an empty model never match.
pub fn find_exact<'c>(target: &str, catalog: &'c [CatalogItem]) -> Option<&'c CatalogItem> {
    let key = compact_model(target);
    if key.is_empty() {
        return None;
    }

    catalog
        .iter()
        .filter(|item| item.has_model())
        .find(|item| compact_model(&item.model) == key)
}
