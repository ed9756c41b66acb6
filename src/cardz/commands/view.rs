use crate::commands::CmdResult;
use crate::error::{CardzError, Result};
use crate::selection::Selection;
use crate::store::{CardStore, StorageBackend};

/// Raises a card: marks it selected, stamps its `last_used`, and returns
/// it for rendering.
pub fn run<B: StorageBackend>(
    store: &mut CardStore<B>,
    selection: &mut Selection,
    id: &str,
) -> Result<CmdResult> {
    if store.get(id).is_none() {
        return Err(CardzError::CardNotFound(id.to_string()));
    }

    selection.select(store, id)?;

    // re-fetch: select just stamped last_used
    let card = store
        .get(id)
        .cloned()
        .ok_or_else(|| CardzError::CardNotFound(id.to_string()))?;

    Ok(CmdResult::default().with_listed_cards(vec![card]))
}
