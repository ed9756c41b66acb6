use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{SettingsPatch, SortBy, Theme};
use crate::store::{CardStore, StorageBackend};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    SetTheme(Theme),
    SetSort(SortBy),
}

pub fn run<B: StorageBackend>(
    store: &mut CardStore<B>,
    action: ConfigAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {
            result.add_message(CmdMessage::info(format!("theme = {}", store.settings().theme)));
            result.add_message(CmdMessage::info(format!(
                "sort = {}",
                store.settings().sort_by
            )));
        }
        ConfigAction::ShowKey(key) => {
            let line = match key.as_str() {
                "theme" => format!("theme = {}", store.settings().theme),
                "sort" => format!("sort = {}", store.settings().sort_by),
                other => format!("Unknown config key: {}", other),
            };
            result.add_message(CmdMessage::info(line));
        }
        ConfigAction::SetTheme(theme) => {
            store.update_settings(SettingsPatch {
                theme: Some(theme),
                sort_by: None,
            })?;
            result.add_message(CmdMessage::success(format!("theme = {}", theme)));
        }
        ConfigAction::SetSort(sort_by) => {
            store.update_settings(SettingsPatch {
                theme: None,
                sort_by: Some(sort_by),
            })?;
            result.add_message(CmdMessage::success(format!("sort = {}", sort_by)));
        }
    }

    Ok(result)
}
