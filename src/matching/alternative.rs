use crate::core::item::CatalogItem;
use crate::matching::exact::find_exact;
use crate::rules::formats::{alternate_spellings, FormatRule};

/// A catalog item found under a regenerated spelling of the candidate
#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeMatch<'c> {
    pub item: &'c CatalogItem,
    pub spelling: String,
}

/// Looks a candidate up under the other spellings its catalog family is known by.
///
/// Rendered spellings keep the family code and capacity, so with the default fuzzy
/// threshold the fuzzy stage accepts them first. The engine only reaches this
/// resolver when fuzzy is switched off (threshold above 100).
#[derive(Debug, Clone, Copy)]
pub struct AlternativeFormatResolver<'a> {
    formats: &'a [FormatRule],
}

impl<'a> AlternativeFormatResolver<'a> {
    pub fn new(formats: &'a [FormatRule]) -> Self {
        Self { formats }
    }

    /// Exact catalog hits for every alternate spelling of `target`, in format order
    pub fn resolve<'c>(&self, target: &str, catalog: &'c [CatalogItem]) -> Vec<AlternativeMatch<'c>> {
        let mut matches: Vec<AlternativeMatch<'c>> = Vec::new();

        for spelling in alternate_spellings(self.formats, target) {
            if let Some(item) = find_exact(&spelling, catalog) {
                if !matches.iter().any(|m| std::ptr::eq(m.item, item)) {
                    matches.push(AlternativeMatch { item, spelling });
                }
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EquipmentKind;
    use crate::rules::{coupling, standby_pump};

    #[test]
    fn test_pump_spelling_without_hyphen() {
        let rules = standby_pump::rule_set().unwrap();
        let catalog = vec![
            CatalogItem::new("2CY14.2/2.5D", EquipmentKind::StandbyPump),
            CatalogItem::new("2CY19.2/2.5D", EquipmentKind::StandbyPump),
        ];
        let resolver = AlternativeFormatResolver::new(&rules.formats);
        let matches = resolver.resolve("2CY-14.2/2.5D", &catalog);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item.model, "2CY14.2/2.5D");
        assert_eq!(matches[0].spelling, "2CY 14.2/2.5D");
    }

    #[test]
    fn test_coupling_suffix_variant() {
        let rules = coupling::rule_set().unwrap();
        let catalog = vec![CatalogItem::new("HGTHB6.3", EquipmentKind::Coupling)];
        let resolver = AlternativeFormatResolver::new(&rules.formats);
        let matches = resolver.resolve("HGTHB6.3A", &catalog);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item.model, "HGTHB6.3");
    }

    #[test]
    fn test_no_pattern_no_matches() {
        let rules = standby_pump::rule_set().unwrap();
        let catalog = vec![CatalogItem::new("2CY14.2/2.5D", EquipmentKind::StandbyPump)];
        let resolver = AlternativeFormatResolver::new(&rules.formats);
        assert!(resolver.resolve("HGTHB5", &catalog).is_empty());
    }
}
