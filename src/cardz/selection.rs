//! # Selection State
//!
//! At most one card is "raised" to the focused, scannable state at a time.
//! This module holds that state as pure data, decoupled from whatever a
//! renderer does about it.
//!
//! Raising a card counts as using it, so [`Selection::select`] stamps the
//! card's `last_used` through the store. Clearing the selection has no
//! persistence side effect. Whenever the view's query inputs change the
//! visible set's composition changes too, so any prior selection is
//! invalidated automatically via [`Selection::sync_query`].

use crate::error::Result;
use crate::query::CardQuery;
use crate::store::{CardStore, StorageBackend};

#[derive(Debug, Default)]
pub struct Selection {
    raised: Option<String>,
    last_query: Option<CardQuery>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the currently raised card, if any.
    pub fn raised(&self) -> Option<&str> {
        self.raised.as_deref()
    }

    /// Raises a card and stamps its `last_used` timestamp.
    ///
    /// A stale id (one no longer in the store) still raises; the touch is
    /// simply a no-op. This keeps select tolerant of results arriving after
    /// the underlying list changed.
    pub fn select<B: StorageBackend>(
        &mut self,
        store: &mut CardStore<B>,
        id: &str,
    ) -> Result<()> {
        store.touch_last_used(id)?;
        self.raised = Some(id.to_string());
        Ok(())
    }

    /// Lowers the raised card. No persistence side effect.
    pub fn deselect(&mut self) {
        self.raised = None;
    }

    /// Records the current query inputs, clearing the selection when they
    /// differ from the last seen ones.
    pub fn sync_query(&mut self, query: &CardQuery) {
        if self.last_query.as_ref() != Some(query) {
            self.raised = None;
            self.last_query = Some(query.clone());
        }
    }
}
