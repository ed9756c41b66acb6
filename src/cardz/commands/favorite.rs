use crate::commands::{update, CardUpdate, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CardStore, StorageBackend};

/// Flips the favorite flag through the regular update path.
pub fn run<B: StorageBackend>(
    store: &mut CardStore<B>,
    id: &str,
    favorite: bool,
) -> Result<CmdResult> {
    let result = update::run(
        store,
        id,
        CardUpdate {
            favorite: Some(favorite),
            ..CardUpdate::default()
        },
    )?;

    let name = result
        .affected_cards
        .first()
        .map(|c| c.name.clone())
        .unwrap_or_default();
    let verb = if favorite { "Favorited" } else { "Unfavorited" };

    let mut result = CmdResult::default().with_affected_cards(result.affected_cards);
    result.add_message(CmdMessage::success(format!("{}: {}", verb, name)));
    Ok(result)
}
