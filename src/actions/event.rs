//! Reading the platform event payload.

use camino::Utf8Path;
use serde_json::Value;

use crate::trigger::TriggerError;

use super::fs::open_parent;

/// Reads and decodes the JSON event payload written by the platform.
///
/// # Errors
///
/// Returns [`TriggerError::Event`] when the file cannot be read or is not
/// valid JSON.
pub fn read_event_file(path: &Utf8Path) -> Result<Value, TriggerError> {
    let (dir, file_name) = open_parent(path, "event").map_err(|error| TriggerError::Event {
        message: error.to_string(),
    })?;
    let content = dir
        .read_to_string(file_name)
        .map_err(|error| TriggerError::Event {
            message: format!("failed to read event file '{path}': {error}"),
        })?;

    serde_json::from_str(&content).map_err(|error| TriggerError::Event {
        message: format!("event file '{path}' is not valid JSON: {error}"),
    })
}
