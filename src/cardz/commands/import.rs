use crate::backup::parse_envelope;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CardzError, Result};
use crate::store::{CardStore, StorageBackend};
use std::path::Path;

pub fn run<B: StorageBackend>(store: &mut CardStore<B>, path: &Path) -> Result<CmdResult> {
    let payload = std::fs::read_to_string(path).map_err(CardzError::Io)?;

    // Parse the whole envelope before touching the store: a malformed
    // backup must not leave a partial merge behind.
    let envelope = parse_envelope(&payload)?;
    let report = store.import(envelope)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} cards",
        report.imported
    )));
    if report.settings_merged {
        result.add_message(CmdMessage::info("Settings merged from backup"));
    }
    Ok(result)
}
