use web_sys::Document;
use yew::prelude::*;

use crate::locale::Language;

#[derive(Properties, PartialEq)]
struct BusyOverlayProps {
    message: &'static str,
}

#[function_component(BusyOverlay)]
fn busy_overlay(props: &BusyOverlayProps) -> Html {
    html! {
        <div class="busy-overlay" role="status" aria-live="assertive">
            <div class="busy-spinner" aria-hidden="true"></div>
            <p class="busy-message">{ props.message }</p>
        </div>
    }
}

/// Mounts the busy overlay. It stays up until the submission's navigation
/// replaces the document.
pub(crate) fn show(document: &Document, root_id: &str, language: Language) {
    let root = match document.get_element_by_id(root_id) {
        Some(root) => root,
        None => {
            let Ok(root) = document.create_element("div") else {
                tracing::warn!("busy overlay root not created");
                return;
            };
            root.set_id(root_id);
            let Some(body) = document.body() else {
                tracing::warn!("document has no body for the busy overlay");
                return;
            };
            if body.append_child(&root).is_err() {
                tracing::warn!("busy overlay root not attached");
                return;
            }
            root
        }
    };

    yew::Renderer::<BusyOverlay>::with_root_and_props(
        root,
        BusyOverlayProps {
            message: language.busy_message(),
        },
    )
    .render();
}
