//! Field interaction controller: owns every field's state and decides whether a
//! submission may leave the page.

use crate::config::FieldSpec;
use crate::field::{transition, FieldEvent, FieldState};
use crate::locale::Language;
use crate::normalizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one required field is blank; the native submission must be cancelled.
    Blocked { missing: Vec<String> },
    /// All fields are filled; these `(name, value)` pairs go to the server.
    Proceed { values: Vec<(String, String)> },
}

#[derive(Debug, Clone)]
pub struct FormController {
    fields: Vec<FieldState>,
    language: Language,
    strip_decorations: bool,
    busy: bool,
}

impl FormController {
    pub fn new(specs: &[FieldSpec], language: Language) -> Self {
        Self {
            fields: specs
                .iter()
                .map(|spec| FieldState::new(&spec.name, spec.kind))
                .collect(),
            language,
            strip_decorations: false,
            busy: false,
        }
    }

    pub fn with_plain_submission(mut self, strip: bool) -> Self {
        self.strip_decorations = strip;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Drops a field the page does not render, so it cannot block submission.
    pub fn remove_field(&mut self, name: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| field.name != name);
        self.fields.len() != before
    }

    /// Applies one interaction event to the named field.
    pub fn handle(&mut self, name: &str, event: FieldEvent, raw: &str) -> Option<&FieldState> {
        let message = self.language.required_message();
        let Some(field) = self.fields.iter_mut().find(|field| field.name == name) else {
            tracing::debug!(field = name, ?event, "event for unknown field ignored");
            return None;
        };
        let change = transition(field.kind, event, raw);
        field.apply(change, message);
        tracing::trace!(field = name, ?event, display = %field.display, "field updated");
        Some(&*field)
    }

    /// Re-validates every field; display text is left as the user last saw it.
    pub fn submit(&mut self) -> SubmitOutcome {
        let message = self.language.required_message();
        let mut missing = Vec::new();
        for field in &mut self.fields {
            if field.is_missing() {
                field.set_error(message);
                missing.push(field.name.clone());
            } else {
                field.clear_error();
            }
        }

        if !missing.is_empty() {
            tracing::debug!(?missing, "submission blocked");
            return SubmitOutcome::Blocked { missing };
        }

        self.busy = true;
        tracing::info!("submission handed off to the server");
        SubmitOutcome::Proceed {
            values: self.submission_values(),
        }
    }

    fn submission_values(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|field| {
                let value = if self.strip_decorations {
                    normalizer::plain_value(field.kind, &field.display)
                } else {
                    field.display.clone()
                };
                (field.name.clone(), value)
            })
            .collect()
    }

    /// Empties every field and clears every error; returns the fields to flash.
    pub fn reset(&mut self) -> Vec<String> {
        self.busy = false;
        self.fields
            .iter_mut()
            .map(|field| {
                field.clear();
                field.name.clone()
            })
            .collect()
    }
}
