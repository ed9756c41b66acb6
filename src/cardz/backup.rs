//! # Backup Codec
//!
//! Serializes the full wallet (card list + settings) into a versioned JSON
//! envelope and parses an incoming envelope back for merging.
//!
//! ## Envelope shape
//!
//! ```json
//! {
//!   "version": 1,
//!   "exportDate": "2026-08-06T09:00:00Z",
//!   "cards": [ ... ],
//!   "settings": { "theme": "auto", "sortBy": "name" }
//! }
//! ```
//!
//! Parsing is deliberately lenient: the only structural requirement is a
//! `cards` array. `version` and `exportDate` are informational, and
//! `settings` may be absent entirely (older exports). The merge itself
//! lives in [`CardStore::import`](crate::store::CardStore::import).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CardzError, Result};
use crate::model::{Card, Settings, SettingsPatch};

pub const BACKUP_VERSION: u32 = 1;

fn default_version() -> u32 {
    BACKUP_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEnvelope {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "Utc::now")]
    pub export_date: DateTime<Utc>,
    pub cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsPatch>,
}

/// Builds the envelope for a full export, stamped with the current time.
pub fn export_envelope(cards: &[Card], settings: &Settings) -> BackupEnvelope {
    BackupEnvelope {
        version: BACKUP_VERSION,
        export_date: Utc::now(),
        cards: cards.to_vec(),
        settings: Some(SettingsPatch::from(*settings)),
    }
}

/// Parses a backup payload.
///
/// Fails with [`CardzError::MalformedBackup`] when the payload is not JSON,
/// lacks a `cards` array, or holds cards that do not deserialize. Nothing
/// is merged on failure.
pub fn parse_envelope(payload: &str) -> Result<BackupEnvelope> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| CardzError::MalformedBackup(format!("not valid JSON: {}", e)))?;

    if !value.get("cards").map(|c| c.is_array()).unwrap_or(false) {
        return Err(CardzError::MalformedBackup(
            "missing cards array".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| CardzError::MalformedBackup(e.to_string()))
}

/// Conventional backup file name, embedding the export date. The embedded
/// date is informational only and never checked on import.
pub fn backup_file_name(date: DateTime<Utc>) -> String {
    format!("cardz-backup-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BarcodeFormat, SortBy, Theme};
    use chrono::TimeZone;

    fn sample_card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            name: "Cafe".to_string(),
            card_number: "12345678".to_string(),
            barcode_format: BarcodeFormat::Ean8,
            category: "cafe".to_string(),
            color: "#6366f1".to_string(),
            notes: String::new(),
            location: None,
            favorite: false,
            created_at: Utc::now(),
            last_used: None,
        }
    }

    #[test]
    fn test_export_envelope_shape() {
        let envelope = export_envelope(
            &[sample_card("card_1_a")],
            &Settings {
                theme: Theme::Dark,
                sort_by: SortBy::Recent,
            },
        );

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["version"], 1);
        assert!(value["exportDate"].is_string());
        assert!(value["cards"].is_array());
        assert_eq!(value["settings"]["theme"], "dark");
        assert_eq!(value["settings"]["sortBy"], "recent");
    }

    #[test]
    fn test_parse_rejects_missing_cards_array() {
        let err = parse_envelope(r#"{"version":1,"settings":{}}"#).unwrap_err();
        assert!(matches!(err, CardzError::MalformedBackup(_)));

        // cards present but not an array
        let err = parse_envelope(r#"{"cards":"nope"}"#).unwrap_err();
        assert!(matches!(err, CardzError::MalformedBackup(_)));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_envelope("definitely not json").unwrap_err();
        assert!(matches!(err, CardzError::MalformedBackup(_)));
    }

    #[test]
    fn test_parse_minimal_foreign_envelope() {
        // No version, no exportDate, no settings: still importable.
        let payload = r#"{"cards":[]}"#;
        let envelope = parse_envelope(payload).unwrap();
        assert_eq!(envelope.version, BACKUP_VERSION);
        assert!(envelope.cards.is_empty());
        assert!(envelope.settings.is_none());
    }

    #[test]
    fn test_parse_roundtrip() {
        let envelope = export_envelope(&[sample_card("card_1_a")], &Settings::default());
        let json = serde_json::to_string_pretty(&envelope).unwrap();

        let parsed = parse_envelope(&json).unwrap();
        assert_eq!(parsed.cards, envelope.cards);
        assert_eq!(parsed.settings, envelope.settings);
    }

    #[test]
    fn test_parse_partial_settings() {
        let payload = r#"{"cards":[],"settings":{"sortBy":"category"}}"#;
        let envelope = parse_envelope(payload).unwrap();
        let patch = envelope.settings.unwrap();
        assert_eq!(patch.sort_by, Some(SortBy::Category));
        assert_eq!(patch.theme, None);
    }

    #[test]
    fn test_backup_file_name_embeds_date() {
        let date = Utc.with_ymd_and_hms(2026, 8, 6, 12, 30, 0).unwrap();
        assert_eq!(backup_file_name(date), "cardz-backup-2026-08-06.json");
    }
}
