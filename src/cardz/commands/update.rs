use crate::commands::{CardUpdate, CmdMessage, CmdResult, LocationEdit};
use crate::error::{CardzError, Result};
use crate::model::CardDraft;
use crate::store::{CardStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut CardStore<B>,
    id: &str,
    update: CardUpdate,
) -> Result<CmdResult> {
    let Some(existing) = store.get(id) else {
        return Err(CardzError::CardNotFound(id.to_string()));
    };

    let mut draft = CardDraft::from_card(existing);
    if let Some(name) = update.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(CardzError::Api("Card name cannot be empty".into()));
        }
        draft.name = name;
    }
    if let Some(number) = update.card_number {
        draft.card_number = number.trim().to_string();
    }
    if let Some(format) = update.barcode_format {
        draft.barcode_format = format;
    }
    if let Some(category) = update.category {
        draft.category = category;
    }
    if let Some(color) = update.color {
        draft.color = color;
    }
    if let Some(notes) = update.notes {
        draft.notes = notes;
    }
    if let Some(favorite) = update.favorite {
        draft.favorite = favorite;
    }
    match update.location {
        LocationEdit::Keep => {}
        LocationEdit::Clear => draft.location = None,
        LocationEdit::Set(location) => draft.location = Some(location),
    }

    let card = store.upsert(draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Card updated: {}", card.name)));
    Ok(result.with_affected_cards(vec![card]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BarcodeFormat, CardLocation};
    use crate::store::card_store::fixtures::{draft, empty_store};

    #[test]
    fn test_update_changes_only_named_fields() {
        let mut store = empty_store();
        let card = store
            .upsert(draft("Cafe", "12345678", BarcodeFormat::Ean8))
            .unwrap();

        let result = run(
            &mut store,
            &card.id,
            CardUpdate {
                name: Some("Cafe Nero".to_string()),
                ..CardUpdate::default()
            },
        )
        .unwrap();

        let updated = &result.affected_cards[0];
        assert_eq!(updated.name, "Cafe Nero");
        assert_eq!(updated.card_number, "12345678");
        assert_eq!(updated.created_at, card.created_at);
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut store = empty_store();
        let result = run(&mut store, "card_0_gone", CardUpdate::default());
        assert!(matches!(result, Err(CardzError::CardNotFound(_))));
    }

    #[test]
    fn test_update_invalid_number_keeps_original() {
        let mut store = empty_store();
        let card = store
            .upsert(draft("Cafe", "12345678", BarcodeFormat::Ean8))
            .unwrap();

        let result = run(
            &mut store,
            &card.id,
            CardUpdate {
                card_number: Some("1234567".to_string()),
                ..CardUpdate::default()
            },
        );

        assert!(matches!(result, Err(CardzError::InvalidBarcode { .. })));
        assert_eq!(store.cards()[0].card_number, "12345678");
    }

    #[test]
    fn test_update_number_is_revalidated_against_new_format() {
        let mut store = empty_store();
        let card = store
            .upsert(draft("Cafe", "12345678", BarcodeFormat::Ean8))
            .unwrap();

        // 8 digits is not valid EAN13
        let result = run(
            &mut store,
            &card.id,
            CardUpdate {
                barcode_format: Some(BarcodeFormat::Ean13),
                ..CardUpdate::default()
            },
        );
        assert!(matches!(result, Err(CardzError::InvalidBarcode { .. })));
    }

    #[test]
    fn test_update_sets_and_clears_location() {
        let mut store = empty_store();
        let card = store
            .upsert(draft("Cafe", "12345678", BarcodeFormat::Ean8))
            .unwrap();

        run(
            &mut store,
            &card.id,
            CardUpdate {
                location: LocationEdit::Set(CardLocation::new(-33.87, 151.21, None)),
                ..CardUpdate::default()
            },
        )
        .unwrap();
        assert!(store.cards()[0].location.is_some());

        run(
            &mut store,
            &card.id,
            CardUpdate {
                location: LocationEdit::Clear,
                ..CardUpdate::default()
            },
        )
        .unwrap();
        assert!(store.cards()[0].location.is_none());
    }
}
