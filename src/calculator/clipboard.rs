//! Clipboard support for the calculator display.

use arboard::Clipboard;

use super::display::DisplaySnapshot;

/// Copy the display of `snapshot` to the system clipboard.
///
/// Returns `Ok(false)` when the display shows an error and nothing was
/// copied, or an error message when the clipboard is unavailable.
pub fn copy_display(snapshot: &DisplaySnapshot) -> Result<bool, String> {
    let Some(text) = snapshot.clipboard() else {
        return Ok(false);
    };

    let mut clipboard =
        Clipboard::new().map_err(|e| format!("Failed to access clipboard: {}", e))?;
    clipboard
        .set_text(text)
        .map_err(|e| format!("Failed to copy display: {}", e))?;

    Ok(true)
}
