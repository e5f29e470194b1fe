//! Form state management and the contact form

use super::field::FormField;
use crate::gateway::EmailMessage;
use crate::state::alert::{AlertKind, FormAlert};
use crate::state::FormatClass;
use crate::validate::{
    is_not_empty, is_valid_email, is_valid_message, is_valid_phone, ValidationError,
};
use chrono::Utc;
use tracing::debug;

pub const MSG_CONTACT_SENT: &str = "Formulário enviado com sucesso!";
pub const MSG_CONTACT_FAILED: &str = "Falha ao enviar mensagem. Tente novamente mais tarde.";

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Editing,
    /// Fields validated; terms must be accepted before sending
    AwaitingConsent { accepted: bool },
    Sending,
}

/// Contact form: name, email, phone, message and a send button row
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: FormField,
    pub email: FormField,
    pub phone: FormField,
    pub message: FormField,
    pub active_field_index: usize,
    phase: ContactPhase,
    pending: Option<EmailMessage>,
    alert: Option<FormAlert>,
}

const BUTTON_ROW: usize = 4;

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "Nome", FormatClass::Name, false),
            email: FormField::text("email", "E-mail", FormatClass::Email, false),
            phone: FormField::text("phone", "Telefone", FormatClass::Phone, false),
            message: FormField::text("message", "Mensagem", FormatClass::Plain, true),
            active_field_index: 0,
            phase: ContactPhase::Editing,
            pending: None,
            alert: None,
        }
    }

    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    pub fn alert(&self) -> Option<&FormAlert> {
        self.alert.as_ref().filter(|a| a.is_visible())
    }

    /// Returns true if the send button row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == BUTTON_ROW
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.get_field(self.active_field_index)
            .is_some_and(|f| f.is_multiline)
    }

    fn fields_mut(&mut self) -> [&mut FormField; 4] {
        [
            &mut self.name,
            &mut self.email,
            &mut self.phone,
            &mut self.message,
        ]
    }

    /// Errors currently flagged, in field order
    pub fn errors(&self) -> Vec<ValidationError> {
        [&self.name, &self.email, &self.phone, &self.message]
            .into_iter()
            .filter_map(|f| f.error)
            .collect()
    }

    /// Sanitize every field in place, then validate all of them.
    ///
    /// Every failing field gets its own error. On success the form waits
    /// for consent.
    pub fn submit(&mut self) -> bool {
        if self.phase != ContactPhase::Editing {
            return false;
        }
        for field in self.fields_mut() {
            let clean = field.sanitized();
            field.set_text(clean);
            field.error = None;
        }
        if !is_not_empty(self.name.as_text()) {
            self.name.error = Some(ValidationError::NameRequired);
        }
        if !is_valid_email(self.email.as_text()) {
            self.email.error = Some(ValidationError::InvalidContactEmail);
        }
        if !is_valid_phone(self.phone.as_text()) {
            self.phone.error = Some(ValidationError::InvalidPhone);
        }
        if !is_valid_message(self.message.as_text()) {
            self.message.error = Some(ValidationError::MessageTooShort);
        }
        let errors = self.errors();
        if let Some(first) = errors.first() {
            debug!(count = errors.len(), "contact form rejected");
            self.alert = Some(FormAlert::new(AlertKind::Error, first.message()));
            return false;
        }
        self.alert = None;
        self.pending = Some(EmailMessage {
            name: self.name.value.clone(),
            email: self.email.value.clone(),
            phone: self.phone.value.clone(),
            message: self.message.value.clone(),
            timestamp: Utc::now().to_rfc3339(),
        });
        self.phase = ContactPhase::AwaitingConsent { accepted: false };
        true
    }

    pub fn toggle_consent(&mut self) {
        if let ContactPhase::AwaitingConsent { accepted } = self.phase {
            self.phase = ContactPhase::AwaitingConsent {
                accepted: !accepted,
            };
        }
    }

    /// Close the terms dialog and drop the validated data.
    pub fn cancel_consent(&mut self) {
        if matches!(self.phase, ContactPhase::AwaitingConsent { .. }) {
            self.phase = ContactPhase::Editing;
            self.pending = None;
        }
    }

    /// The message to dispatch, once the terms are accepted.
    pub fn confirm_consent(&mut self) -> Option<EmailMessage> {
        if self.phase != (ContactPhase::AwaitingConsent { accepted: true }) {
            return None;
        }
        let message = self.pending.take()?;
        self.phase = ContactPhase::Sending;
        Some(message)
    }

    pub fn on_delivery(&mut self, delivered: bool) {
        if self.phase != ContactPhase::Sending {
            return;
        }
        self.phase = ContactPhase::Editing;
        if delivered {
            for field in self.fields_mut() {
                field.clear();
            }
            self.active_field_index = 0;
            self.alert = Some(FormAlert::new(AlertKind::Success, MSG_CONTACT_SENT));
        } else {
            self.alert = Some(FormAlert::new(AlertKind::Error, MSG_CONTACT_FAILED));
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ContactForm {
    fn field_count(&self) -> usize {
        5 // name, email, phone, message, send button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(BUTTON_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            2 => Some(&mut self.phone),
            3 => Some(&mut self.message),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            2 => Some(&self.phone),
            3 => Some(&self.message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.name.set_text("  Maria   Silva ".into());
        form.email.set_text(" Maria@Mail.COM ".into());
        form.phone.set_text("+55 71 99999-8888".into());
        form.message.set_text("Quero um site <b>novo</b>;".into());
        form
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_next_field_wraps() {
            let mut form = ContactForm::new();
            for _ in 0..5 {
                form.next_field();
            }
            assert_eq!(form.active_field(), 0);
        }

        #[test]
        fn test_prev_field_wraps_to_button_row() {
            let mut form = ContactForm::new();
            form.prev_field();
            assert!(form.is_buttons_row_active());
            assert!(form.get_active_field_mut().is_none());
        }

        #[test]
        fn test_message_is_multiline() {
            let mut form = ContactForm::new();
            form.set_active_field(3);
            assert!(form.is_active_field_multiline());
            form.set_active_field(0);
            assert!(!form.is_active_field_multiline());
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = ContactForm::new();
            form.set_active_field(99);
            assert_eq!(form.active_field(), BUTTON_ROW);
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_form_reports_every_error() {
            let mut form = ContactForm::new();
            assert!(!form.submit());
            assert_eq!(
                form.errors(),
                vec![
                    ValidationError::NameRequired,
                    ValidationError::InvalidContactEmail,
                    ValidationError::InvalidPhone,
                    ValidationError::MessageTooShort,
                ]
            );
            assert_eq!(form.phase(), ContactPhase::Editing);
        }

        #[test]
        fn test_fields_are_sanitized_in_place() {
            let mut form = filled();
            assert!(form.submit());
            assert_eq!(form.name.as_text(), "Maria Silva");
            assert_eq!(form.email.as_text(), "maria@mail.com");
            assert_eq!(form.phone.as_text(), "+5571999998888");
            assert_eq!(form.message.as_text(), "Quero um site novo");
            assert_eq!(form.phase(), ContactPhase::AwaitingConsent { accepted: false });
        }

        #[test]
        fn test_single_bad_field_is_flagged() {
            let mut form = filled();
            form.email.set_text("maria@mail".into());
            assert!(!form.submit());
            assert_eq!(form.errors(), vec![ValidationError::InvalidContactEmail]);
            assert!(form.email.has_error());
            assert!(!form.name.has_error());
        }

        #[test]
        fn test_rejection_raises_banner_for_first_error() {
            let mut form = filled();
            form.name.set_text("<b></b>".into());
            form.phone.set_text("abc".into());
            assert!(!form.submit());
            let alert = form.alert().unwrap();
            assert_eq!(alert.kind, AlertKind::Error);
            assert_eq!(alert.message, ValidationError::NameRequired.message());

            form.name.set_text("Maria".into());
            form.phone.set_text("71999998888".into());
            assert!(form.submit());
            assert!(form.alert().is_none());
        }
    }

    mod consent {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_confirm_requires_acceptance() {
            let mut form = filled();
            form.submit();
            assert!(form.confirm_consent().is_none());
            form.toggle_consent();
            let message = form.confirm_consent().unwrap();
            assert_eq!(message.name, "Maria Silva");
            assert_eq!(message.phone, "+5571999998888");
            assert_eq!(form.phase(), ContactPhase::Sending);
        }

        #[test]
        fn test_cancel_discards_pending_data() {
            let mut form = filled();
            form.submit();
            form.cancel_consent();
            assert_eq!(form.phase(), ContactPhase::Editing);
            form.toggle_consent();
            assert!(form.confirm_consent().is_none());
        }

        #[test]
        fn test_success_clears_fields() {
            let mut form = filled();
            form.submit();
            form.toggle_consent();
            form.confirm_consent();
            form.on_delivery(true);
            assert_eq!(form.name.as_text(), "");
            assert_eq!(form.message.as_text(), "");
            assert_eq!(form.alert().map(|a| a.message.as_str()), Some(MSG_CONTACT_SENT));
        }

        #[test]
        fn test_failure_keeps_fields() {
            let mut form = filled();
            form.submit();
            form.toggle_consent();
            form.confirm_consent();
            form.on_delivery(false);
            assert_eq!(form.name.as_text(), "Maria Silva");
            assert_eq!(form.phase(), ContactPhase::Editing);
            assert_eq!(
                form.alert().map(|a| a.message.as_str()),
                Some(MSG_CONTACT_FAILED)
            );
        }
    }
}
