// ============================================================================
// ADMIN DISTRIBUTORS VIEW - Repartidores y estado de turno
// ============================================================================

use crate::dom::{append_child, create_element, on_click, set_attribute, ElementBuilder};
use crate::services::api_client::ApiClient;
use crate::state::app_state::AppState;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

/// Pedir la página actual de repartidores
pub fn load_admin_distributors(state: &AppState) {
    state.admin.set_loading(true);
    state.admin.set_error(None);
    crate::rerender_app();

    let state = state.clone();
    spawn_local(async move {
        let api = ApiClient::new();
        let page = *state.admin.distributors_page.borrow();
        match api.fetch_admin_distributors(page).await {
            Ok(result) => {
                log::info!("📋 Repartidores: página {} ({} en total)", result.page, result.total);
                *state.admin.distributors.borrow_mut() = Some(result);
            }
            Err(e) => {
                log::error!("❌ Error cargando repartidores: {}", e);
                state.admin.set_error(Some(e.to_string()));
            }
        }
        state.admin.set_loading(false);
        crate::rerender_app();
    });
}

/// Renderizar listado de repartidores
pub fn render_admin_distributors(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("admin-screen").build();

    let title = ElementBuilder::new("h2")?.text("Repartidores").build();
    append_child(&screen, &title)?;

    if state.admin.get_loading() {
        let loading = ElementBuilder::new("div")?
            .class("admin-loading")
            .text("⏳ Cargando...")
            .build();
        append_child(&screen, &loading)?;
        return Ok(screen);
    }

    if let Some(error) = state.admin.get_error() {
        let panel = ElementBuilder::new("div")?
            .class("admin-error")
            .text(&format!("⚠️ {}", error))
            .build();
        append_child(&screen, &panel)?;
        return Ok(screen);
    }

    if let Some(page) = state.admin.distributors.borrow().as_ref() {
        if page.data.is_empty() {
            let empty = ElementBuilder::new("div")?
                .class("admin-empty")
                .text("No hay repartidores dados de alta")
                .build();
            append_child(&screen, &empty)?;
        } else {
            let table = ElementBuilder::new("table")?.class("admin-table").build();
            let head = ElementBuilder::new("tr")?
                .html("<th>Nombre</th><th>Usuario</th><th>Estado</th>")
                .build();
            append_child(&table, &head)?;

            for distributor in &page.data {
                let row = create_element("tr")?;

                let name_cell = ElementBuilder::new("td")?.text(&distributor.name).build();
                append_child(&row, &name_cell)?;

                let user_cell = ElementBuilder::new("td")?
                    .text(distributor.username.as_deref().unwrap_or("—"))
                    .build();
                append_child(&row, &user_cell)?;

                let (chip_class, chip_text) = if distributor.active {
                    ("chip chip-active", "Activo")
                } else {
                    ("chip chip-inactive", "Turno cerrado")
                };
                let status_cell = create_element("td")?;
                let chip = ElementBuilder::new("span")?
                    .class(chip_class)
                    .text(chip_text)
                    .build();
                append_child(&status_cell, &chip)?;
                append_child(&row, &status_cell)?;

                append_child(&table, &row)?;
            }
            append_child(&screen, &table)?;
        }

        // Paginación
        let pagination = ElementBuilder::new("div")?.class("admin-pagination").build();

        let prev = ElementBuilder::new("button")?
            .class("btn-page")
            .text("← Anterior")
            .build();
        if !page.has_prev() {
            set_attribute(&prev, "disabled", "true")?;
        } else {
            let state = state.clone();
            on_click(&prev, move |_| {
                let current = *state.admin.distributors_page.borrow();
                *state.admin.distributors_page.borrow_mut() = current.saturating_sub(1).max(1);
                load_admin_distributors(&state);
            })?;
        }
        append_child(&pagination, &prev)?;

        let label = ElementBuilder::new("span")?
            .class("page-label")
            .text(&format!("Página {} de {}", page.page, page.total_pages()))
            .build();
        append_child(&pagination, &label)?;

        let next = ElementBuilder::new("button")?
            .class("btn-page")
            .text("Siguiente →")
            .build();
        if !page.has_next() {
            set_attribute(&next, "disabled", "true")?;
        } else {
            let state = state.clone();
            on_click(&next, move |_| {
                let current = *state.admin.distributors_page.borrow();
                *state.admin.distributors_page.borrow_mut() = current + 1;
                load_admin_distributors(&state);
            })?;
        }
        append_child(&pagination, &next)?;

        append_child(&screen, &pagination)?;
    }

    Ok(screen)
}
