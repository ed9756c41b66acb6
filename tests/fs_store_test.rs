use cardz::model::{BarcodeFormat, CardDraft, SettingsPatch, SortBy, Theme};
use cardz::store::{CardStore, FsBackend, StorageBackend, StoreKey};

fn draft(name: &str, number: &str, format: BarcodeFormat) -> CardDraft {
    CardDraft {
        name: name.to_string(),
        card_number: number.to_string(),
        barcode_format: format,
        category: "other".to_string(),
        color: "#6366f1".to_string(),
        ..CardDraft::default()
    }
}

#[test]
fn test_cards_survive_a_reload() {
    let dir = tempfile::tempdir().unwrap();

    let (mut store, report) = CardStore::load(FsBackend::new(dir.path().to_path_buf()));
    assert!(report.warnings.is_empty());

    let card = store
        .upsert(draft("Cafe", "12345678", BarcodeFormat::Ean8))
        .unwrap();
    store
        .update_settings(SettingsPatch {
            theme: Some(Theme::Dark),
            sort_by: Some(SortBy::Recent),
        })
        .unwrap();
    drop(store);

    let (reloaded, report) = CardStore::load(FsBackend::new(dir.path().to_path_buf()));
    assert!(report.warnings.is_empty());
    assert_eq!(reloaded.cards().len(), 1);
    assert_eq!(reloaded.cards()[0].id, card.id);
    assert_eq!(reloaded.cards()[0].created_at, card.created_at);
    assert_eq!(reloaded.settings().theme, Theme::Dark);
    assert_eq!(reloaded.settings().sort_by, SortBy::Recent);
}

#[test]
fn test_corrupt_cards_file_degrades_to_empty_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cards.json"), "{definitely not json").unwrap();

    let (store, report) = CardStore::load(FsBackend::new(dir.path().to_path_buf()));
    assert!(store.cards().is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("corrupt"));
}

#[test]
fn test_partial_settings_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("settings.json"), r#"{"sortBy":"category"}"#).unwrap();

    let (store, report) = CardStore::load(FsBackend::new(dir.path().to_path_buf()));
    assert!(report.warnings.is_empty());
    assert_eq!(store.settings().sort_by, SortBy::Category);
    assert_eq!(store.settings().theme, Theme::Auto);
}

#[test]
fn test_remove_persists_to_disk() {
    let dir = tempfile::tempdir().unwrap();

    let (mut store, _) = CardStore::load(FsBackend::new(dir.path().to_path_buf()));
    let card = store
        .upsert(draft("Cafe", "12345678", BarcodeFormat::Ean8))
        .unwrap();
    store.remove(&card.id).unwrap();
    drop(store);

    let (reloaded, _) = CardStore::load(FsBackend::new(dir.path().to_path_buf()));
    assert!(reloaded.cards().is_empty());
}

#[test]
fn test_backend_writes_both_keys_as_separate_files() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());

    backend.write(StoreKey::Cards, "[]").unwrap();
    backend.write(StoreKey::Settings, "{}").unwrap();

    assert!(dir.path().join("cards.json").exists());
    assert!(dir.path().join("settings.json").exists());
}
