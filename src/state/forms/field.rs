//! Form field value objects

use crate::sanitize::sanitize_for;
use crate::state::FormatClass;
use crate::validate::ValidationError;

/// Represents a single text field with its configuration, value and error
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub is_multiline: bool,
    pub format: FormatClass,
    pub error: Option<ValidationError>,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, format: FormatClass, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            is_multiline,
            format,
            error: None,
        }
    }

    /// Create a new text field with initial value
    pub fn text_with_value(
        name: &str,
        label: &str,
        value: String,
        format: FormatClass,
        is_multiline: bool,
    ) -> Self {
        Self {
            value,
            ..Self::text(name, label, format, is_multiline)
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: String) {
        self.value = value;
    }

    /// Push a character to the field value; typing clears the error mark
    pub fn push_char(&mut self, c: char) {
        if c == '\n' && !self.is_multiline {
            return;
        }
        self.value.push(c);
        self.error = None;
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
        self.error = None;
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.error = None;
    }

    /// Sanitized form of the current value, per the field's format class
    pub fn sanitized(&self) -> String {
        sanitize_for(self.format, &self.value)
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self.format {
            FormatClass::Phone if !self.value.is_empty() && !self.value.starts_with('+') => {
                crate::sanitize::format_phone_mask(&self.value)
            }
            _ => self.value.clone(),
        }
    }
}
