use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CardStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut CardStore<B>, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(card) = store.get(id).cloned() else {
        // Removing an absent card is a no-op, not an error
        result.add_message(CmdMessage::info("Nothing to delete."));
        return Ok(result);
    };

    store.remove(id)?;
    result.add_message(CmdMessage::success(format!("Card deleted: {}", card.name)));
    Ok(result.with_affected_cards(vec![card]))
}
