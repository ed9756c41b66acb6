use crate::commands::CmdResult;
use crate::error::Result;
use crate::query::{visible_cards, CardQuery};
use crate::store::{CardStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &CardStore<B>, query: &CardQuery) -> Result<CmdResult> {
    let visible = visible_cards(store.cards(), query);
    Ok(CmdResult::default().with_listed_cards(visible))
}
