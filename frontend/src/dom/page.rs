use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, KeyboardEvent, Window};

use super::fields::{self, BoundField};
use super::storage::{self, LocalStorageStore};
use super::{after, describe, listen, set_class, set_style, Shared};
use crate::chrome::{ExportPlan, PageChrome, ResultsState, Reveal};
use crate::config::EnhancerConfig;
use crate::controller::FormController;
use crate::error::EnhancerError;
use crate::theme::{Theme, ThemeSettings};

type Chrome = Shared<PageChrome<LocalStorageStore>>;

pub(crate) fn bind(
    window: &Window,
    document: &Document,
    config: &EnhancerConfig,
    form: Shared<FormController>,
    bound: Rc<Vec<BoundField>>,
) -> Result<(), EnhancerError> {
    let language = form.borrow().language();
    let theme = ThemeSettings::init(
        LocalStorageStore::new(window),
        &config.storage_key,
        storage::ambient_theme(window),
    );
    let chrome: Chrome = Rc::new(RefCell::new(PageChrome::new(
        theme,
        language,
        read_results(document, config),
    )));

    apply_theme(document, &config.dark_class, chrome.borrow().applied_theme());
    reveal_results(window, document, config, &chrome);

    bind_theme_toggle(document, config, &chrome)?;
    bind_export(window, document, config, &chrome)?;
    bind_reset(window, document, config, &chrome, form, bound)?;
    bind_modal(document, config, &chrome)?;
    Ok(())
}

fn read_results(document: &Document, config: &EnhancerConfig) -> ResultsState {
    match document.get_element_by_id(&config.results_id) {
        Some(results) => ResultsState {
            present: true,
            populated: !results.inner_html().trim().is_empty(),
            visible: !results.class_list().contains(&config.hidden_class),
        },
        None => ResultsState::default(),
    }
}

fn apply_theme(document: &Document, dark_class: &str, theme: Theme) {
    if let Some(body) = document.body() {
        set_class(&body, dark_class, theme.is_dark());
    }
}

fn results_element(document: &Document, config: &EnhancerConfig) -> Option<HtmlElement> {
    document
        .get_element_by_id(&config.results_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn reveal_results(window: &Window, document: &Document, config: &EnhancerConfig, chrome: &Chrome) {
    let Some(results) = results_element(document, config) else {
        return;
    };
    match chrome.borrow_mut().reveal() {
        Reveal::None => {}
        Reveal::FadeIn => {
            set_class(&results, &config.hidden_class, false);
            set_style(&results, "opacity", Some("0"));
            set_style(&results, "transition", Some("opacity 0.3s ease"));
            let target = results.clone();
            after(window, config.fade_ms, move || {
                set_style(&target, "opacity", Some("1"));
                target.scroll_into_view();
            });
        }
    }
}

fn bind_theme_toggle(
    document: &Document,
    config: &EnhancerConfig,
    chrome: &Chrome,
) -> Result<(), EnhancerError> {
    let Some(toggle) = document.get_element_by_id(&config.theme_toggle_id) else {
        tracing::debug!(id = %config.theme_toggle_id, "no theme toggle on page");
        return Ok(());
    };
    let chrome = chrome.clone();
    let document = document.clone();
    let dark_class = config.dark_class.clone();
    listen(&toggle, "click", move |_| {
        let theme = chrome.borrow_mut().toggle_theme();
        apply_theme(&document, &dark_class, theme);
        tracing::debug!(theme = theme.as_str(), "theme toggled");
    })
}

fn bind_export(
    window: &Window,
    document: &Document,
    config: &EnhancerConfig,
    chrome: &Chrome,
) -> Result<(), EnhancerError> {
    let Some(button) = document.get_element_by_id(&config.export_button_id) else {
        tracing::debug!(id = %config.export_button_id, "no export control on page");
        return Ok(());
    };
    let chrome = chrome.clone();
    let window = window.clone();
    let document = document.clone();
    let dark_class = config.dark_class.clone();
    listen(&button, "click", move |_| {
        let plan = chrome.borrow_mut().begin_export();
        match plan {
            ExportPlan::Unavailable { message } => {
                let _ = window.alert_with_message(message);
            }
            ExportPlan::Print { force_light } => {
                if force_light {
                    apply_theme(&document, &dark_class, Theme::Light);
                }
                if let Err(err) = window.print() {
                    tracing::warn!(error = %describe(&err), "print dialog not opened");
                }
                let restored = chrome.borrow_mut().end_export();
                apply_theme(&document, &dark_class, restored);
            }
        }
    })
}

fn bind_reset(
    window: &Window,
    document: &Document,
    config: &EnhancerConfig,
    chrome: &Chrome,
    form: Shared<FormController>,
    bound: Rc<Vec<BoundField>>,
) -> Result<(), EnhancerError> {
    let Some(button) = document.get_element_by_id(&config.reset_button_id) else {
        tracing::debug!(id = %config.reset_button_id, "no reset control on page");
        return Ok(());
    };
    let chrome = chrome.clone();
    let window = window.clone();
    let document = document.clone();
    let config = config.clone();
    listen(&button, "click", move |event| {
        event.prevent_default();
        let flashed = chrome.borrow_mut().reset(&mut form.borrow_mut());

        if let Some(results) = results_element(&document, &config) {
            results.set_inner_html("");
            set_class(&results, &config.hidden_class, true);
        }

        fields::render_all(&bound, &form.borrow());
        for field in bound.iter().filter(|f| flashed.contains(&f.name)) {
            flash(&window, &field.input, &config.flash_color, config.flash_ms);
        }
        tracing::debug!(fields = flashed.len(), "form reset");
    })
}

/// Tints the input, then lets the tint fade back to the stylesheet colour.
fn flash(window: &Window, input: &HtmlElement, color: &str, ms: i32) {
    set_style(input, "transition", Some("background-color 0.3s ease"));
    set_style(input, "background-color", Some(color));
    let target = input.clone();
    after(window, ms, move || set_style(&target, "background-color", None));
}

fn bind_modal(
    document: &Document,
    config: &EnhancerConfig,
    chrome: &Chrome,
) -> Result<(), EnhancerError> {
    let Some(modal) = document
        .get_element_by_id(&config.modal_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        tracing::debug!(id = %config.modal_id, "no disclosure modal on page");
        return Ok(());
    };
    let close_control = document
        .get_element_by_id(&config.modal_close_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let hidden_class = config.hidden_class.clone();

    let open_control = document
        .get_element_by_id(&config.modal_open_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    if let Some(open) = &open_control {
        let chrome = chrome.clone();
        let document = document.clone();
        let modal = modal.clone();
        let close_control = close_control.clone();
        let hidden_class = hidden_class.clone();
        listen(open, "click", move |event| {
            event.prevent_default();
            if chrome.borrow_mut().open_modal() {
                show_modal(&document, &modal, close_control.as_ref(), &hidden_class);
            }
        })?;
    }

    if let Some(close) = &close_control {
        let chrome = chrome.clone();
        let document = document.clone();
        let modal = modal.clone();
        let open_control = open_control.clone();
        let hidden_class = hidden_class.clone();
        listen(close, "click", move |_| {
            if chrome.borrow_mut().close_modal() {
                hide_modal(&document, &modal, open_control.as_ref(), &hidden_class);
            }
        })?;
    }

    // `cancel` is what a native <dialog> fires for Escape.
    for event_name in ["keydown", "cancel"] {
        let chrome = chrome.clone();
        let listener_document = document.clone();
        let modal = modal.clone();
        let open_control = open_control.clone();
        let hidden_class = hidden_class.clone();
        let target = if event_name == "keydown" {
            document.clone().unchecked_into::<web_sys::EventTarget>()
        } else {
            modal.clone().unchecked_into::<web_sys::EventTarget>()
        };
        listen(&target, event_name, move |event| {
            let is_escape = match event.dyn_ref::<KeyboardEvent>() {
                Some(key) => key.key() == "Escape",
                None => event.type_() == "cancel",
            };
            if is_escape && chrome.borrow_mut().escape() {
                event.prevent_default();
                hide_modal(
                    &listener_document,
                    &modal,
                    open_control.as_ref(),
                    &hidden_class,
                );
            }
        })?;
    }
    Ok(())
}

fn show_modal(
    document: &Document,
    modal: &HtmlElement,
    close_control: Option<&HtmlElement>,
    hidden_class: &str,
) {
    set_class(modal, hidden_class, false);
    let _ = modal.set_attribute("aria-hidden", "false");
    if let Some(body) = document.body() {
        set_style(&body, "overflow", Some("hidden"));
    }
    if let Some(close) = close_control {
        let _ = close.focus();
    }
}

/// Hides the modal and hands focus back to the control that opened it, or
/// drops it from whatever inside the modal still holds it.
fn hide_modal(
    document: &Document,
    modal: &HtmlElement,
    open_control: Option<&HtmlElement>,
    hidden_class: &str,
) {
    set_class(modal, hidden_class, true);
    let _ = modal.set_attribute("aria-hidden", "true");
    if let Some(body) = document.body() {
        set_style(&body, "overflow", None);
    }
    match open_control {
        Some(open) => {
            let _ = open.focus();
        }
        None => {
            if let Some(active) = document
                .active_element()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = active.blur();
            }
        }
    }
}
