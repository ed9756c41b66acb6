//! # Card Store
//!
//! [`CardStore`] owns the authoritative in-memory card list and settings
//! record for the process lifetime. Every other component reads snapshots
//! through accessors or mutates through explicit calls; nothing else holds
//! an independent copy that could drift.
//!
//! ## Persistence discipline
//!
//! Both records are written back through the backend synchronously after
//! every mutating operation. Loading is infallible by design: corrupt or
//! missing payloads fall back to defaults and are reported, not raised.
//! A failed write after a successful mutation is returned as an error,
//! but the mutation stands: the in-memory state remains authoritative
//! for the rest of the session.
//!
//! ## Validation discipline
//!
//! [`CardStore::upsert`] validates the barcode payload against its format
//! and refuses the whole mutation on mismatch, leaving the list untouched.
//! [`CardStore::import`] deliberately does NOT validate imported cards:
//! a backup is trusted as-written, even if it came from a wallet with
//! looser rules.

use chrono::Utc;

use super::backend::{StorageBackend, StoreKey};
use crate::backup::BackupEnvelope;
use crate::error::{CardzError, Result};
use crate::model::{generate_card_id, Card, CardDraft, Settings, SettingsPatch};

/// What happened while loading persisted state. Warnings are surfaced to
/// the user but never block startup.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub warnings: Vec<String>,
}

/// Outcome of a backup import.
#[derive(Debug)]
pub struct ImportReport {
    pub imported: usize,
    pub settings_merged: bool,
}

pub struct CardStore<B: StorageBackend> {
    backend: B,
    cards: Vec<Card>,
    settings: Settings,
}

impl<B: StorageBackend> CardStore<B> {
    /// Loads persisted cards and settings, falling back to an empty list /
    /// default settings on anything unreadable. Never fails.
    pub fn load(backend: B) -> (Self, LoadReport) {
        let mut report = LoadReport::default();

        let cards = match backend.read(StoreKey::Cards) {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Card>>(&payload) {
                Ok(cards) => cards,
                Err(e) => {
                    report
                        .warnings
                        .push(format!("Stored card list is corrupt ({}); starting empty", e));
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                report
                    .warnings
                    .push(format!("Could not read stored cards ({}); starting empty", e));
                Vec::new()
            }
        };

        let settings = match backend.read(StoreKey::Settings) {
            Ok(Some(payload)) => match serde_json::from_str::<Settings>(&payload) {
                Ok(settings) => settings,
                Err(e) => {
                    report.warnings.push(format!(
                        "Stored settings are corrupt ({}); using defaults",
                        e
                    ));
                    Settings::default()
                }
            },
            Ok(None) => Settings::default(),
            Err(e) => {
                report.warnings.push(format!(
                    "Could not read stored settings ({}); using defaults",
                    e
                ));
                Settings::default()
            }
        };

        (
            Self {
                backend,
                cards,
                settings,
            },
            report,
        )
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Creates or replaces a card.
    ///
    /// The draft's barcode payload must satisfy its format's validity rule;
    /// on mismatch the store returns [`CardzError::InvalidBarcode`] and
    /// nothing changes. A draft whose `id` matches an existing card replaces
    /// it in place, preserving the original `created_at`; any other draft
    /// (no id, or an id the store has never seen) becomes a new card with a
    /// freshly generated id. Either way `last_used` is set to now and the
    /// list is persisted.
    pub fn upsert(&mut self, draft: CardDraft) -> Result<Card> {
        if !draft.barcode_format.is_valid(&draft.card_number) {
            return Err(CardzError::InvalidBarcode {
                format: draft.barcode_format,
                value: draft.card_number,
            });
        }

        let now = Utc::now();
        let existing = draft
            .id
            .as_deref()
            .and_then(|id| self.cards.iter().position(|c| c.id == id));

        let card = match existing {
            Some(pos) => {
                let card = Card {
                    id: self.cards[pos].id.clone(),
                    name: draft.name,
                    card_number: draft.card_number,
                    barcode_format: draft.barcode_format,
                    category: draft.category,
                    color: draft.color,
                    notes: draft.notes,
                    location: draft.location,
                    favorite: draft.favorite,
                    created_at: self.cards[pos].created_at,
                    last_used: Some(now),
                };
                self.cards[pos] = card.clone();
                card
            }
            None => {
                let card = Card {
                    id: generate_card_id(),
                    name: draft.name,
                    card_number: draft.card_number,
                    barcode_format: draft.barcode_format,
                    category: draft.category,
                    color: draft.color,
                    notes: draft.notes,
                    location: draft.location,
                    favorite: draft.favorite,
                    created_at: now,
                    last_used: Some(now),
                };
                self.cards.push(card.clone());
                card
            }
        };

        self.persist_cards()?;
        Ok(card)
    }

    /// Removes the card with the given id. Removing an id that is not
    /// present is a no-op, not an error.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        if self.cards.len() == before {
            return Ok(());
        }
        self.persist_cards()
    }

    /// Stamps `last_used` on the card, if present, and persists.
    /// Called when a card is raised/viewed.
    pub fn touch_last_used(&mut self, id: &str) -> Result<()> {
        let Some(card) = self.cards.iter_mut().find(|c| c.id == id) else {
            return Ok(());
        };
        card.last_used = Some(Utc::now());
        self.persist_cards()
    }

    /// Shallow-merges a settings patch and persists.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        self.settings.apply(patch);
        self.persist_settings()
    }

    /// Merges a backup envelope into the store.
    ///
    /// Replace-by-id union: every incoming card whose id exists here
    /// overwrites the current record wholesale (import wins), current cards
    /// absent from the incoming set are kept, and the result is
    /// kept-current followed by all-incoming. The merged list replaces the
    /// current one in a single step. Envelope settings, when present,
    /// shallow-merge over the current settings.
    pub fn import(&mut self, envelope: BackupEnvelope) -> Result<ImportReport> {
        let imported = envelope.cards.len();

        let mut merged: Vec<Card> = self
            .cards
            .iter()
            .filter(|current| !envelope.cards.iter().any(|inc| inc.id == current.id))
            .cloned()
            .collect();
        merged.extend(envelope.cards);
        self.cards = merged;

        let settings_merged = match envelope.settings {
            Some(patch) => {
                self.settings.apply(patch);
                self.persist_settings()?;
                true
            }
            None => false,
        };

        self.persist_cards()?;
        Ok(ImportReport {
            imported,
            settings_merged,
        })
    }

    fn persist_cards(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.cards).map_err(CardzError::Serialization)?;
        self.backend.write(StoreKey::Cards, &payload)
    }

    fn persist_settings(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.settings).map_err(CardzError::Serialization)?;
        self.backend.write(StoreKey::Settings, &payload)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::BarcodeFormat;
    use crate::store::MemBackend;

    pub fn empty_store() -> CardStore<MemBackend> {
        CardStore::load(MemBackend::new()).0
    }

    pub fn draft(name: &str, number: &str, format: BarcodeFormat) -> CardDraft {
        CardDraft {
            name: name.to_string(),
            card_number: number.to_string(),
            barcode_format: format,
            category: "other".to_string(),
            color: "#6366f1".to_string(),
            ..CardDraft::default()
        }
    }
}
