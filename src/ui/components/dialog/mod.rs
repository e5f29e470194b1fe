//! Dialog components for TUI

mod base;
mod choice_dialog;
mod consent_dialog;
mod error_dialog;

pub use choice_dialog::render_choice_dialog;
pub use consent_dialog::render_consent_dialog;
pub use error_dialog::render_error_dialog;
