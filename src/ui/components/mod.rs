//! Reusable UI components

mod banner;
mod button;
mod dialog;

pub use banner::render_alert;
pub use button::{render_button, BUTTON_HEIGHT};
pub use dialog::{render_choice_dialog, render_consent_dialog, render_error_dialog};
