//! Page chrome: theme flag, disclosure modal, results area, export and reset.

use crate::controller::FormController;
use crate::locale::Language;
use crate::theme::{PreferenceStore, Theme, ThemeSettings};

/// What the page knows about its server-rendered results container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultsState {
    pub present: bool,
    pub populated: bool,
    pub visible: bool,
}

impl ResultsState {
    pub fn has_content(&self) -> bool {
        self.present && self.populated
    }
}

/// How the results container is brought into view after a round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    None,
    /// Fade the container in, then scroll it into view once the fade starts.
    FadeIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPlan {
    Unavailable { message: &'static str },
    Print { force_light: bool },
}

#[derive(Debug)]
pub struct PageChrome<S> {
    theme: ThemeSettings<S>,
    applied: Theme,
    modal_open: bool,
    results: ResultsState,
    language: Language,
}

impl<S: PreferenceStore> PageChrome<S> {
    pub fn new(theme: ThemeSettings<S>, language: Language, results: ResultsState) -> Self {
        let applied = theme.get_theme();
        Self {
            theme,
            applied,
            modal_open: false,
            results,
            language,
        }
    }

    pub fn theme(&self) -> &ThemeSettings<S> {
        &self.theme
    }

    /// The theme currently painted on the page flag.
    pub fn applied_theme(&self) -> Theme {
        self.applied
    }

    /// Flips the preference. A storage failure is logged and the page keeps
    /// the new theme anyway.
    pub fn toggle_theme(&mut self) -> Theme {
        let next = match self.theme.toggle() {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!(error = %err, "theme preference not persisted");
                self.theme.get_theme()
            }
        };
        self.applied = next;
        next
    }

    pub fn modal_is_open(&self) -> bool {
        self.modal_open
    }

    pub fn open_modal(&mut self) -> bool {
        let changed = !self.modal_open;
        self.modal_open = true;
        changed
    }

    pub fn close_modal(&mut self) -> bool {
        let changed = self.modal_open;
        self.modal_open = false;
        changed
    }

    /// Escape anywhere on the page; closes the modal if it is open.
    pub fn escape(&mut self) -> bool {
        self.close_modal()
    }

    pub fn results(&self) -> ResultsState {
        self.results
    }

    /// Every round-trip that renders results fades them in, visible or not.
    pub fn reveal(&mut self) -> Reveal {
        if !self.results.has_content() {
            return Reveal::None;
        }
        self.results.visible = true;
        Reveal::FadeIn
    }

    /// Plans a print export; dark pages are painted light until `end_export`.
    pub fn begin_export(&mut self) -> ExportPlan {
        if !self.results.has_content() {
            return ExportPlan::Unavailable {
                message: self.language.no_results_message(),
            };
        }
        let force_light = self.applied.is_dark();
        if force_light {
            self.applied = Theme::Light;
        }
        ExportPlan::Print { force_light }
    }

    /// Restores the preferred theme after printing; nothing is persisted.
    pub fn end_export(&mut self) -> Theme {
        self.applied = self.theme.get_theme();
        self.applied
    }

    /// Clears the results and every field; returns the fields to flash.
    pub fn reset(&mut self, form: &mut FormController) -> Vec<String> {
        self.results.populated = false;
        self.results.visible = false;
        form.reset()
    }
}
