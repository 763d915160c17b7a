// ============================================================================
// TOAST VIEW - Capa de avisos transitorios
// ============================================================================

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::services::notify::NoticeLevel;
use crate::state::app_state::AppState;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Renderizar la pila de toasts activos
pub fn render_toasts(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?.class("toast-container").build();

    for notice in state.notices.get_notices() {
        let class = match notice.level {
            NoticeLevel::Success => "toast toast-success",
            NoticeLevel::Info => "toast toast-info",
            NoticeLevel::Error => "toast toast-error",
        };
        let toast = ElementBuilder::new("div")?
            .class(class)
            .text(&notice.message)
            .build();

        // Tocar un toast lo descarta sin esperar al timeout
        {
            let state = state.clone();
            let id = notice.id;
            on_click(&toast, move |_| {
                state.notices.dismiss(id);
                crate::rerender_app();
            })?;
        }

        append_child(&container, &toast)?;
    }

    Ok(container)
}
