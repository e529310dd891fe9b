use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlFormElement, HtmlInputElement};

use super::{element, listen, overlay, set_class, set_style, Shared};
use crate::config::EnhancerConfig;
use crate::controller::{FormController, SubmitOutcome};
use crate::error::EnhancerError;
use crate::field::{FieldEvent, FieldState};

const ERROR_SLOT_CLASS: &str = "error-message";
const ERROR_SLOT_HEIGHT: &str = "1.25em";

/// One input on the page plus its reserved error slot.
#[derive(Clone)]
pub(crate) struct BoundField {
    pub(crate) name: String,
    pub(crate) input: HtmlInputElement,
    slot: Option<HtmlElement>,
}

pub(crate) fn bind(
    document: &Document,
    config: &EnhancerConfig,
    form: Shared<FormController>,
) -> Result<Rc<Vec<BoundField>>, EnhancerError> {
    let form_el: HtmlFormElement = element(document, &config.form_id)?;

    let mut bound = Vec::with_capacity(config.fields.len());
    for spec in &config.fields {
        let Some(input) = document
            .get_element_by_id(&spec.name)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            tracing::warn!(field = %spec.name, "input not on page; left unbound");
            form.borrow_mut().remove_field(&spec.name);
            continue;
        };
        let field = BoundField {
            name: spec.name.clone(),
            slot: error_slot(document, &input),
            input,
        };

        // Server-rendered values come back after a round-trip; adopt them.
        let seeded = form
            .borrow_mut()
            .handle(&field.name, FieldEvent::Input, &field.input.value())
            .cloned();
        if let Some(state) = seeded {
            render(&field, &state);
        }

        for (event_name, event) in [
            ("focus", FieldEvent::Focus),
            ("input", FieldEvent::Input),
            ("blur", FieldEvent::Blur),
        ] {
            let form = form.clone();
            let target = field.clone();
            listen(&field.input, event_name, move |_| {
                let raw = target.input.value();
                let state = form.borrow_mut().handle(&target.name, event, &raw).cloned();
                if let Some(state) = state {
                    render(&target, &state);
                }
            })?;
        }
        bound.push(field);
    }
    let bound = Rc::new(bound);

    let document = document.clone();
    let busy_root_id = config.busy_root_id.clone();
    let strip = config.strip_decorations_on_submit;
    let fields = bound.clone();
    listen(&form_el, "submit", move |event| {
        let outcome = form.borrow_mut().submit();
        render_all(&fields, &form.borrow());
        match outcome {
            SubmitOutcome::Blocked { missing } => {
                event.prevent_default();
                tracing::debug!(?missing, "required fields missing");
            }
            SubmitOutcome::Proceed { values } => {
                if strip {
                    for (name, value) in &values {
                        if let Some(field) = fields.iter().find(|f| &f.name == name) {
                            field.input.set_value(value);
                        }
                    }
                }
                overlay::show(&document, &busy_root_id, form.borrow().language());
            }
        }
    })?;

    tracing::debug!(count = bound.len(), "fields bound");
    Ok(bound)
}

/// Projects a field record onto its input, group and error slot.
pub(crate) fn render(field: &BoundField, state: &FieldState) {
    if field.input.value() != state.display {
        field.input.set_value(&state.display);
    }
    set_class(&field.input, "error", state.has_error);
    if let Some(group) = field.input.parent_element() {
        set_class(&group, "focused", state.focused);
    }
    if let Some(slot) = &field.slot {
        slot.set_text_content(Some(state.error_message.as_deref().unwrap_or("")));
        let visibility = if state.has_error { "visible" } else { "hidden" };
        set_style(slot, "visibility", Some(visibility));
    }
}

pub(crate) fn render_all(fields: &[BoundField], form: &FormController) {
    for field in fields {
        if let Some(state) = form.field(&field.name) {
            render(field, state);
        }
    }
}

/// Finds or creates the group's message slot. The slot keeps its height whether
/// or not it holds a message, so errors never shift the layout.
fn error_slot(document: &Document, input: &HtmlInputElement) -> Option<HtmlElement> {
    let group = input.parent_element()?;
    let slot = match group.query_selector(&format!(".{}", ERROR_SLOT_CLASS)) {
        Ok(Some(existing)) => existing,
        _ => {
            let created = document.create_element("span").ok()?;
            created.set_class_name(ERROR_SLOT_CLASS);
            let _ = created.set_attribute("aria-live", "polite");
            group.append_child(&created).ok()?;
            created
        }
    };
    let slot = slot.dyn_into::<HtmlElement>().ok()?;
    set_style(&slot, "display", Some("block"));
    set_style(&slot, "min-height", Some(ERROR_SLOT_HEIGHT));
    set_style(&slot, "visibility", Some("hidden"));
    Some(slot)
}
