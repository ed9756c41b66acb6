//! # API Facade
//!
//! The single entry point for all cardz operations, regardless of the UI
//! driving them. The facade dispatches to the command layer, normalizes
//! inputs, and returns structured `Result<CmdResult>` values; it never
//! prints, prompts, or exits.
//!
//! ## Card Identifiers: Id vs Display Index
//!
//! Internally every card has an immutable, globally-unique string id.
//! Ids are the correct technical choice but are cumbersome to type, so the
//! CLI addresses cards by a 1-based **display index** instead.
//!
//! The index is canonical: it is the card's position in the full,
//! unfiltered list ordered by the persisted sort setting. Filtering or
//! searching never renumbers cards, so `cardz delete 2` targets the same
//! card regardless of the current view.
//!
//! ## Generic Over StorageBackend
//!
//! `CardzApi<B: StorageBackend>` is generic over the storage backend:
//! production uses `FsBackend`, tests use `MemBackend`. This enables
//! exercising the full facade without touching the filesystem.

use std::path::{Path, PathBuf};

use crate::commands::{self, CardUpdate, CmdResult};
use crate::error::{CardzError, Result};
use crate::model::{Card, CardDraft, Settings};
use crate::query::{visible_cards, CardQuery};
use crate::selection::Selection;
use crate::store::{CardStore, LoadReport, StorageBackend};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, LocationEdit, MessageLevel};

pub struct CardzApi<B: StorageBackend> {
    store: CardStore<B>,
    selection: Selection,
}

impl<B: StorageBackend> CardzApi<B> {
    pub fn new(backend: B) -> (Self, LoadReport) {
        let (store, report) = CardStore::load(backend);
        (
            Self {
                store,
                selection: Selection::new(),
            },
            report,
        )
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    pub fn raised_card(&self) -> Option<&Card> {
        self.selection.raised().and_then(|id| self.store.get(id))
    }

    pub fn add_card(&mut self, draft: CardDraft) -> Result<CmdResult> {
        commands::add::run(&mut self.store, draft)
    }

    /// Lists cards for the given view inputs. Changing the inputs since the
    /// last listing clears any raised card.
    pub fn list_cards(&mut self, query: &CardQuery) -> Result<CmdResult> {
        self.selection.sync_query(query);
        commands::list::run(&self.store, query)
    }

    pub fn show_card(&mut self, index: usize) -> Result<CmdResult> {
        let id = self.resolve_index(index)?;
        commands::view::run(&mut self.store, &mut self.selection, &id)
    }

    pub fn edit_card(&mut self, index: usize, update: CardUpdate) -> Result<CmdResult> {
        let id = self.resolve_index(index)?;
        commands::update::run(&mut self.store, &id, update)
    }

    pub fn delete_card(&mut self, index: usize) -> Result<CmdResult> {
        let id = self.resolve_index(index)?;
        commands::delete::run(&mut self.store, &id)
    }

    pub fn set_favorite(&mut self, index: usize, favorite: bool) -> Result<CmdResult> {
        let id = self.resolve_index(index)?;
        commands::favorite::run(&mut self.store, &id, favorite)
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    pub fn export_backup(&self, output: Option<PathBuf>) -> Result<CmdResult> {
        commands::export::run(&self.store, output)
    }

    pub fn import_backup(&mut self, path: &Path) -> Result<CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&mut self.store, action)
    }

    /// The canonical listing: every card, no filters, ordered by the
    /// persisted sort setting. Display indexes are positions in this list.
    pub fn canonical_cards(&self) -> Vec<Card> {
        let query = CardQuery::sorted_by(self.store.settings().sort_by);
        visible_cards(self.store.cards(), &query)
    }

    fn resolve_index(&self, index: usize) -> Result<String> {
        let canonical = self.canonical_cards();
        if index == 0 || index > canonical.len() {
            return Err(CardzError::Api(format!(
                "No card at index {} (have {})",
                index,
                canonical.len()
            )));
        }
        Ok(canonical[index - 1].id.clone())
    }
}
