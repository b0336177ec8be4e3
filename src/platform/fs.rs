// CullTracker - platform/fs.rs
//
// Filesystem helpers for export output.

use std::io;
use std::path::Path;

/// Write `contents` to `path` atomically (write temp, then rename).
///
/// Creates parent directories as needed. A crash between write and rename
/// loses the new file but never leaves a half-written export behind.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        e
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "File written");
    Ok(())
}
