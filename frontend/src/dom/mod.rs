//! Browser bindings: attaches the controllers to the live document.
//!
//! Every lookup tolerates a missing element. Only a missing form skips the field
//! bindings, and the page chrome still binds in that case.

mod console;
mod fields;
mod overlay;
mod page;
mod storage;

pub(crate) use console::ConsoleWriter;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

use crate::config::{EnhancerConfig, CONFIG_ELEMENT_ID};
use crate::controller::FormController;
use crate::error::EnhancerError;
use crate::locale::Language;

pub(crate) type Shared<T> = Rc<RefCell<T>>;

pub(crate) fn boot() -> Result<(), EnhancerError> {
    let window = web_sys::window().ok_or_else(|| EnhancerError::Js("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| EnhancerError::Js("window has no document".into()))?;

    let config = read_config(&document);
    let language = Language::from_lang_tag(page_lang(&document).as_deref());
    tracing::info!(?language, form = %config.form_id, "binding loan form");

    let form = Rc::new(RefCell::new(
        FormController::new(&config.fields, language)
            .with_plain_submission(config.strip_decorations_on_submit),
    ));

    let bound = match fields::bind(&document, &config, form.clone()) {
        Ok(bound) => bound,
        Err(err) => {
            tracing::warn!(error = %err, "form fields left unbound");
            Rc::new(Vec::new())
        }
    };

    page::bind(&window, &document, &config, form, bound)
}

fn read_config(document: &Document) -> EnhancerConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return EnhancerConfig::default();
    };
    EnhancerConfig::from_json(&raw).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring page configuration");
        EnhancerConfig::default()
    })
}

fn page_lang(document: &Document) -> Option<String> {
    document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.lang())
}

pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub(crate) fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, EnhancerError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| EnhancerError::MissingElement(id.to_string()))
}

/// Registers `handler` for the page's lifetime.
pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), EnhancerError>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|err| EnhancerError::Js(describe(&err)))?;
    closure.forget();
    Ok(())
}

/// Fire-and-forget timer; nothing waits on it and it is never cancelled.
pub(crate) fn after<F>(window: &Window, ms: i32, callback: F)
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(callback);
    if let Err(err) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
    {
        tracing::warn!(error = %describe(&err), "timer not scheduled");
    }
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: Option<&str>) {
    let style = element.style();
    let _ = match value {
        Some(value) => style.set_property(property, value),
        None => style.remove_property(property).map(|_| ()),
    };
}

#[cfg(test)]
mod tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Document, Element, HtmlElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn add(document: &Document, parent: &Element, tag: &str, id: &str) -> HtmlElement {
        let el = document.create_element(tag).unwrap();
        el.set_id(id);
        parent.append_child(&el).unwrap();
        el.dyn_into::<HtmlElement>().unwrap()
    }

    #[wasm_bindgen_test]
    fn boots_on_a_page_without_any_known_element() {
        assert!(super::boot().is_ok());
    }

    #[wasm_bindgen_test]
    fn boots_with_a_form_but_no_inputs_or_controls() {
        let document = document();
        let body = document.body().unwrap();
        let form = add(&document, &body, "form", "loanForm");

        assert!(super::boot().is_ok());
        form.remove();
    }

    #[wasm_bindgen_test]
    fn closing_the_modal_returns_focus_to_its_opener() {
        let document = document();
        let body = document.body().unwrap();
        let open = add(&document, &body, "button", "legal-open");
        let modal = add(&document, &body, "div", "legal-modal");
        modal.class_list().add_1("hidden").unwrap();
        let close = add(&document, &modal, "button", "legal-close");

        assert!(super::boot().is_ok());

        open.click();
        assert!(!modal.class_list().contains("hidden"));
        close.click();
        assert!(modal.class_list().contains("hidden"));
        let focused = document.active_element().map(|el| el.id());
        assert_eq!(focused.as_deref(), Some("legal-open"));

        open.remove();
        modal.remove();
    }
}
