//! Platform-specific key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Modifier that turns Enter into "confirm" inside multi-line fields
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Confirm shortcut display for multi-line help text
#[cfg(target_os = "macos")]
pub const SUBMIT_SHORTCUT: &str = "Cmd+Enter";

#[cfg(not(target_os = "macos"))]
pub const SUBMIT_SHORTCUT: &str = "Ctrl+Enter";

/// Works everywhere, including terminals that swallow modified Enter
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Whether `key` means "next" for the focused control.
///
/// Plain Enter confirms unless the control is multi-line, where it inserts
/// a newline instead.
pub fn is_confirm(key: &KeyEvent, multiline: bool) -> bool {
    match key.code {
        KeyCode::Enter => {
            !multiline
                || key.modifiers.contains(SUBMIT_MODIFIER)
                || key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
        }
        KeyCode::Char('s') | KeyCode::Char('S') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Alt+1..Alt+9 pick a suggestion pill; returns its 0-based index.
pub fn suggestion_index(key: &KeyEvent) -> Option<usize> {
    if !key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
