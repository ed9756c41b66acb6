use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardzError, Result};
use crate::model::CardDraft;
use crate::store::{CardStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut CardStore<B>, draft: CardDraft) -> Result<CmdResult> {
    let name = draft.name.trim().to_string();
    if name.is_empty() {
        return Err(CardzError::Api("Card name cannot be empty".into()));
    }

    let card = store.upsert(CardDraft {
        id: None,
        name,
        card_number: draft.card_number.trim().to_string(),
        ..draft
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Card added: {}", card.name)));
    Ok(result.with_affected_cards(vec![card]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BarcodeFormat;
    use crate::store::card_store::fixtures::{draft, empty_store};

    #[test]
    fn test_add_creates_card() {
        let mut store = empty_store();
        let result = run(&mut store, draft("Cafe", "12345678", BarcodeFormat::Ean8)).unwrap();

        assert_eq!(result.affected_cards.len(), 1);
        assert_eq!(store.cards().len(), 1);
        assert!(result.messages[0].content.contains("Card added"));
    }

    #[test]
    fn test_add_trims_name_and_number() {
        let mut store = empty_store();
        let result = run(
            &mut store,
            draft("  Cafe  ", " 12345678 ", BarcodeFormat::Ean8),
        )
        .unwrap();

        assert_eq!(result.affected_cards[0].name, "Cafe");
        assert_eq!(result.affected_cards[0].card_number, "12345678");
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut store = empty_store();
        let result = run(&mut store, draft("   ", "12345678", BarcodeFormat::Ean8));
        assert!(matches!(result, Err(CardzError::Api(_))));
        assert!(store.cards().is_empty());
    }

    #[test]
    fn test_add_rejects_invalid_barcode() {
        let mut store = empty_store();
        let result = run(&mut store, draft("Cafe", "1234567", BarcodeFormat::Ean8));
        assert!(matches!(result, Err(CardzError::InvalidBarcode { .. })));
        assert!(store.cards().is_empty());
    }

    #[test]
    fn test_add_ignores_caller_supplied_id() {
        let mut store = empty_store();
        let mut d = draft("Cafe", "12345678", BarcodeFormat::Ean8);
        d.id = Some("card_0_bogus".to_string());
        let result = run(&mut store, d).unwrap();
        assert_ne!(result.affected_cards[0].id, "card_0_bogus");
    }
}
