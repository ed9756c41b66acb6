use crate::backup::{backup_file_name, export_envelope};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardzError, Result};
use crate::store::{CardStore, StorageBackend};
use chrono::Utc;
use std::path::PathBuf;

pub fn run<B: StorageBackend>(
    store: &CardStore<B>,
    output: Option<PathBuf>,
) -> Result<CmdResult> {
    let envelope = export_envelope(store.cards(), store.settings());
    let payload =
        serde_json::to_string_pretty(&envelope).map_err(CardzError::Serialization)?;

    let path = output.unwrap_or_else(|| PathBuf::from(backup_file_name(Utc::now())));
    std::fs::write(&path, payload).map_err(CardzError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} cards to {}",
        envelope.cards.len(),
        path.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::parse_envelope;
    use crate::model::BarcodeFormat;
    use crate::store::card_store::fixtures::{draft, empty_store};

    #[test]
    fn test_export_writes_parsable_envelope() {
        let mut store = empty_store();
        store
            .upsert(draft("Cafe", "12345678", BarcodeFormat::Ean8))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let result = run(&store, Some(path.clone())).unwrap();

        assert!(result.messages[0].content.contains("Exported 1 cards"));

        let payload = std::fs::read_to_string(path).unwrap();
        let envelope = parse_envelope(&payload).unwrap();
        assert_eq!(envelope.cards.len(), 1);
        assert!(envelope.settings.is_some());
    }

    #[test]
    fn test_export_empty_wallet_still_writes() {
        let store = empty_store();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");

        run(&store, Some(path.clone())).unwrap();

        let envelope = parse_envelope(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(envelope.cards.is_empty());
    }
}
