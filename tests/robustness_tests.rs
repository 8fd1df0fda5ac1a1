//! Hostile and degenerate input handling
//!
//! Primary model strings come straight from customer requirements and catalog
//! snapshots are supplied by other systems. These tests check that oversized,
//! malformed and pathological inputs are rejected or contained instead of
//! exhausting resources.

use std::time::{Duration, Instant};

use marine_select::catalog::store::{CatalogError, EquipmentCatalog};
use marine_select::core::types::OutcomeStatus;
use marine_select::matching::{SelectionContext, SelectionEngine};
use marine_select::utils::validation::{
    check_catalog_limit, validate_model, ValidationError, MAX_CATALOG_ITEMS, MAX_MODEL_LENGTH,
};
use marine_select::{CatalogItem, EquipmentKind, RuleRepository};

/// Oversized model strings never reach the rule tables
#[test]
fn test_oversized_model_rejected() {
    let model = format!("GW{}", "9".repeat(MAX_MODEL_LENGTH * 100));
    assert_eq!(validate_model(&model), Err(ValidationError::ModelTooLong));

    let repository = RuleRepository::builtin().unwrap();
    let engine = SelectionEngine::new(repository.get(EquipmentKind::StandbyPump).unwrap());
    let catalog = vec![CatalogItem::new("2CY7.5/2.5D", EquipmentKind::StandbyPump)];

    let outcome = engine.select(&model, &catalog, &SelectionContext::default());
    assert_eq!(outcome.status, OutcomeStatus::InvalidInput);
}

/// Control characters are refused rather than logged or echoed into patterns
#[test]
fn test_control_characters_rejected() {
    for model in ["GW28.30\0", "HC\u{1b}[31m1200", "DT180\r\nHC1000"] {
        assert_eq!(
            validate_model(model),
            Err(ValidationError::ControlCharacters),
            "{model:?}"
        );
    }
}

/// Numeric series codes that overflow or are nonsensical do not panic
#[test]
fn test_pathological_series_numbers() {
    let repository = RuleRepository::builtin().unwrap();
    let catalog = EquipmentCatalog::load_embedded().unwrap();
    let context = SelectionContext::default().with_power(f64::MAX);

    for kind in EquipmentKind::ALL {
        let engine = SelectionEngine::new(repository.get(kind).unwrap());
        for model in [
            "GW99999999999999999999999999999.9",
            "HC000000",
            "DT-1",
            "GWC.",
            "HC1200/1/1/1/1",
            "2CY-7.5/2.5D",
            "ÄÖÜ500",
        ] {
            // Must terminate with some status
            let outcome = engine.select(model, catalog.items_of(kind), &context);
            assert_eq!(outcome.kind, kind);
        }
    }
}

/// Catalog size limits keep a hostile snapshot from growing without bound
#[test]
fn test_catalog_item_limit() {
    assert!(check_catalog_limit(MAX_CATALOG_ITEMS - 1).is_none());
    assert!(check_catalog_limit(MAX_CATALOG_ITEMS).is_some());

    let items: Vec<String> = (0..=MAX_CATALOG_ITEMS)
        .map(|i| format!(r#"{{"model":"P{i}","kind":"standby_pump"}}"#))
        .collect();
    let json = format!(
        r#"{{"version":"1.0.0","created_at":"2026-01-01T00:00:00Z","items":[{}]}}"#,
        items.join(",")
    );

    let result = EquipmentCatalog::from_json(&json);
    assert!(matches!(result, Err(CatalogError::TooManyItems(_))));
}

/// Blank catalog entries are dropped instead of matching everything
#[test]
fn test_blank_catalog_entries_ignored() {
    let json = r#"{
        "version": "1.0.0",
        "created_at": "2026-01-01T00:00:00Z",
        "items": [
            {"model": "", "kind": "standby_pump"},
            {"model": "   ", "kind": "standby_pump"},
            {"model": "2CY7.5/2.5D", "kind": "standby_pump"}
        ]
    }"#;

    let catalog = EquipmentCatalog::from_json(json).unwrap();
    assert_eq!(catalog.len(), 1);
}

/// Fuzzy matching stays linear in the catalog size
#[test]
fn test_large_catalog_selection_is_bounded() {
    let repository = RuleRepository::builtin().unwrap();
    let engine = SelectionEngine::new(repository.get(EquipmentKind::StandbyPump).unwrap());

    let catalog: Vec<CatalogItem> = (0..20_000)
        .map(|i| {
            CatalogItem::new(
                format!("2CY{}.{}/2.5D", i / 10, i % 10),
                EquipmentKind::StandbyPump,
            )
        })
        .collect();

    let start = Instant::now();
    let outcome = engine.select("GW28.30", &catalog, &SelectionContext::default());
    let elapsed = start.elapsed();

    assert_eq!(outcome.status, OutcomeStatus::Resolved);
    assert_eq!(outcome.chosen.unwrap().item.model, "2CY7.5/2.5D");
    assert!(
        elapsed < Duration::from_secs(10),
        "selection over 20k items took {elapsed:?}"
    );
}
