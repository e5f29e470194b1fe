//! Working input of the wizard's current step

use super::field::FormField;
use crate::state::{Answer, FormatClass, InputKind, StepDefinition};
use crate::validate::{
    validate_multi_select, validate_single_select, validate_text, ValidationError,
};
use std::collections::BTreeSet;

/// Uncommitted input for one step: a text buffer or an option cursor with
/// selection state, depending on the step kind.
#[derive(Debug, Clone, PartialEq)]
pub struct StepInput {
    pub step: &'static StepDefinition,
    pub field: FormField,
    /// Highlighted option card
    pub cursor: usize,
    /// Selected option (single-select)
    pub selected: Option<usize>,
    /// Checked options (multi-select)
    pub checked: BTreeSet<usize>,
}

impl StepInput {
    /// Build the input for a step, pre-filled from a previously committed answer.
    pub fn for_step(step: &'static StepDefinition, answer: Option<&Answer>) -> Self {
        let mut input = Self {
            step,
            field: FormField::text(step.key, step.prompt, step.format, step.is_multiline()),
            cursor: 0,
            selected: None,
            checked: BTreeSet::new(),
        };
        let Some(answer) = answer else {
            return input;
        };
        match (step.kind, answer) {
            (InputKind::Text { .. }, Answer::Text(value)) => input.field.set_text(value.clone()),
            (InputKind::SingleSelect(options), Answer::Text(value)) => {
                input.selected = options.iter().position(|o| o == value);
                input.cursor = input.selected.unwrap_or(0);
            }
            (InputKind::MultiSelect(options), Answer::Choices(values)) => {
                input.checked = values
                    .iter()
                    .filter_map(|v| options.iter().position(|o| o == v))
                    .collect();
                input.cursor = input.checked.first().copied().unwrap_or(0);
            }
            _ => {}
        }
        input
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.field.error
    }

    pub fn set_error(&mut self, error: ValidationError) {
        self.field.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.field.error = None;
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let count = self.step.options().len();
        if count > 0 {
            self.cursor = (self.cursor + 1).min(count - 1);
        }
    }

    /// Mark exactly one option as selected. Returns false on non-select steps.
    pub fn select(&mut self, index: usize) -> bool {
        match self.step.kind {
            InputKind::SingleSelect(options) if index < options.len() => {
                self.selected = Some(index);
                self.cursor = index;
                self.clear_error();
                true
            }
            _ => false,
        }
    }

    /// Toggle a checkbox card. Returns false on non-checkbox steps.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.step.kind {
            InputKind::MultiSelect(options) if index < options.len() => {
                if !self.checked.remove(&index) {
                    self.checked.insert(index);
                }
                self.cursor = index;
                self.clear_error();
                true
            }
            _ => false,
        }
    }

    /// Append a suggestion pill to a multi-line answer.
    pub fn apply_suggestion(&mut self, index: usize) -> bool {
        let Some(pill) = self.step.suggestions.get(index) else {
            return false;
        };
        let current = self.field.as_text().trim_end();
        let value = if current.is_empty() {
            (*pill).to_string()
        } else {
            format!("{current}, {pill}")
        };
        self.field.set_text(value);
        self.clear_error();
        true
    }

    /// Sanitize and validate the input.
    ///
    /// `Ok(None)` means an optional text step was left empty.
    pub fn commit(&self) -> Result<Option<Answer>, ValidationError> {
        match self.step.kind {
            InputKind::Text { .. } => {
                let value = self.field.sanitized();
                validate_text(&value, self.step.format, self.step.required)?;
                Ok((!value.is_empty()).then_some(Answer::Text(value)))
            }
            InputKind::SingleSelect(options) => {
                validate_single_select(self.selected)?;
                Ok(self
                    .selected
                    .and_then(|i| options.get(i))
                    .map(|o| Answer::Text((*o).to_string())))
            }
            InputKind::MultiSelect(options) => {
                validate_multi_select(self.checked.len())?;
                Ok(Some(Answer::Choices(
                    self.checked
                        .iter()
                        .filter_map(|&i| options.get(i))
                        .map(|o| (*o).to_string())
                        .collect(),
                )))
            }
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.step.kind, InputKind::Text { .. })
    }

    pub fn format(&self) -> FormatClass {
        self.step.format
    }
}
