//! Per-field state records and the event transition that drives them.

use crate::normalizer::{self, FieldKind};

/// Interaction events a bound input can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Focus,
    Input,
    Blur,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorChange {
    Keep,
    Clear,
    Set,
}

/// Outcome of applying one event to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub display: String,
    pub error: ErrorChange,
    pub focused: Option<bool>,
}

/// Pure event semantics: `(kind, event, raw text) -> (display, error change)`.
pub fn transition(kind: FieldKind, event: FieldEvent, raw: &str) -> Transition {
    match event {
        FieldEvent::Focus => Transition {
            display: raw.to_string(),
            error: ErrorChange::Keep,
            focused: Some(true),
        },
        FieldEvent::Input => Transition {
            display: normalizer::on_input(kind, raw),
            error: ErrorChange::Clear,
            focused: None,
        },
        FieldEvent::Blur => {
            let display = if kind.reformats_on_commit() {
                normalizer::on_commit(kind, raw)
            } else {
                raw.to_string()
            };
            let error = if display.trim().is_empty() {
                ErrorChange::Set
            } else {
                ErrorChange::Clear
            };
            Transition {
                display,
                error,
                focused: Some(false),
            }
        }
    }
}

/// Everything the page needs to render one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub name: String,
    pub kind: FieldKind,
    pub display: String,
    pub has_error: bool,
    pub error_message: Option<String>,
    pub focused: bool,
}

impl FieldState {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            display: String::new(),
            has_error: false,
            error_message: None,
            focused: false,
        }
    }

    /// True when the value would be blank once committed.
    pub fn is_missing(&self) -> bool {
        normalizer::on_commit(self.kind, &self.display)
            .trim()
            .is_empty()
    }

    pub fn set_error(&mut self, message: &str) {
        self.has_error = true;
        self.error_message = Some(message.to_string());
    }

    pub fn clear_error(&mut self) {
        self.has_error = false;
        self.error_message = None;
    }

    pub fn clear(&mut self) {
        self.display.clear();
        self.focused = false;
        self.clear_error();
    }

    pub(crate) fn apply(&mut self, change: Transition, required_message: &str) {
        self.display = change.display;
        if let Some(focused) = change.focused {
            self.focused = focused;
        }
        match change.error {
            ErrorChange::Keep => {}
            ErrorChange::Clear => self.clear_error(),
            ErrorChange::Set => self.set_error(required_message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn focus_marks_focused_without_touching_text() {
        let t = transition(FieldKind::Currency, FieldEvent::Focus, "12");
        assert_eq!(t.display, "12");
        assert_eq!(t.error, ErrorChange::Keep);
        assert_eq!(t.focused, Some(true));
    }

    #[test]
    fn input_normalizes_and_clears_errors() {
        let t = transition(FieldKind::Currency, FieldEvent::Input, "1234.567");
        assert_eq!(t.display, "$1,234.56");
        assert_eq!(t.error, ErrorChange::Clear);

        let t = transition(FieldKind::PlainText, FieldEvent::Input, "");
        assert_eq!(t.error, ErrorChange::Clear);
    }

    #[test]
    fn blur_commits_numeric_kinds() {
        let t = transition(FieldKind::Percent, FieldEvent::Blur, "5.5%");
        assert_eq!(t.display, "5.50%");
        assert_eq!(t.error, ErrorChange::Clear);
        assert_eq!(t.focused, Some(false));
    }

    #[test]
    fn blur_leaves_integer_text_as_is() {
        let t = transition(FieldKind::Integer, FieldEvent::Blur, "007");
        assert_eq!(t.display, "007");
    }

    #[test]
    fn blur_on_blank_sets_error() {
        for kind in [
            FieldKind::Currency,
            FieldKind::Percent,
            FieldKind::Integer,
            FieldKind::PlainText,
        ] {
            let t = transition(kind, FieldEvent::Blur, "   ");
            assert_eq!(t.error, ErrorChange::Set, "{kind:?}");
        }
    }

    #[test]
    fn blur_on_bare_symbol_sets_error() {
        let t = transition(FieldKind::Currency, FieldEvent::Blur, "$.");
        assert_eq!(t.display, "");
        assert_eq!(t.error, ErrorChange::Set);
    }

    #[test]
    fn apply_records_message() {
        let mut field = FieldState::new("principal", FieldKind::Currency);
        field.apply(
            transition(FieldKind::Currency, FieldEvent::Blur, ""),
            "This field is required",
        );
        assert!(field.has_error);
        assert_eq!(
            field.error_message.as_deref(),
            Some("This field is required")
        );
    }
}
