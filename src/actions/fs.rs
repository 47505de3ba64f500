//! Capability-based access to files handed over by the platform.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::trigger::TriggerError;

/// Opens the directory containing `path` and returns it with the file name.
pub(crate) fn open_parent<'path>(
    path: &'path Utf8Path,
    purpose: &str,
) -> Result<(Dir, &'path str), TriggerError> {
    let file_name = path.file_name().ok_or_else(|| TriggerError::Io {
        message: format!("invalid {purpose} path '{path}': no file name"),
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        TriggerError::Io {
            message: format!("failed to open {purpose} directory '{parent}': {error}"),
        }
    })?;

    Ok((dir, file_name))
}
