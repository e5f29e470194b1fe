//! Form domain layer
//!
//! Text fields, the wizard's per-step input and the contact form.

mod field;
mod form_state;
mod step_input;

pub use field::FormField;
pub use form_state::{ContactForm, ContactPhase, Form, MSG_CONTACT_FAILED, MSG_CONTACT_SENT};
pub use step_input::StepInput;
