// ============================================================================
// ADMIN CUSTOMERS VIEW - Clientes registrados, búsqueda y baja
// ============================================================================

use crate::dom::{append_child, create_element, input_value, on_click, set_attribute, set_class_name, ElementBuilder};
use crate::services::api_client::ApiClient;
use crate::services::notify::{NoticeLevel, Notifier, ToastNotifier};
use crate::state::app_state::AppState;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

/// Pedir la página actual de clientes
pub fn load_admin_customers(state: &AppState) {
    state.admin.set_loading(true);
    state.admin.set_error(None);
    crate::rerender_app();

    let state = state.clone();
    spawn_local(async move {
        let api = ApiClient::new();
        let search = state.admin.customers_search.borrow().clone();
        let page = *state.admin.customers_page.borrow();
        match api.fetch_admin_customers(&search, page).await {
            Ok(result) => {
                log::info!("📋 Clientes: página {} ({} en total)", result.page, result.total);
                *state.admin.customers.borrow_mut() = Some(result);
            }
            Err(e) => {
                log::error!("❌ Error cargando clientes: {}", e);
                state.admin.set_error(Some(e.to_string()));
            }
        }
        state.admin.set_loading(false);
        crate::rerender_app();
    });
}

/// Renderizar listado de clientes
pub fn render_admin_customers(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("admin-screen").build();

    let title = ElementBuilder::new("h2")?.text("Clientes").build();
    append_child(&screen, &title)?;

    // Búsqueda
    let bar = ElementBuilder::new("div")?.class("admin-filter-bar").build();
    let search = create_element("input")?;
    set_attribute(&search, "type", "search")?;
    set_attribute(&search, "id", "customer-search")?;
    set_attribute(&search, "placeholder", "Buscar por nombre...")?;
    set_attribute(&search, "value", &state.admin.customers_search.borrow())?;
    set_class_name(&search, "admin-search");
    append_child(&bar, &search)?;

    let search_btn = ElementBuilder::new("button")?
        .class("btn-search")
        .text("Buscar")
        .build();
    {
        let state = state.clone();
        on_click(&search_btn, move |_| {
            *state.admin.customers_search.borrow_mut() =
                input_value("customer-search").unwrap_or_default().trim().to_string();
            *state.admin.customers_page.borrow_mut() = 1;
            load_admin_customers(&state);
        })?;
    }
    append_child(&bar, &search_btn)?;
    append_child(&screen, &bar)?;

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

    if let Some(page) = state.admin.customers.borrow().as_ref() {
        if page.data.is_empty() {
            let empty = ElementBuilder::new("div")?
                .class("admin-empty")
                .text("No se encontraron clientes")
                .build();
            append_child(&screen, &empty)?;
        } else {
            let table = ElementBuilder::new("table")?.class("admin-table").build();
            let head = ElementBuilder::new("tr")?
                .html("<th>Nombre</th><th>Teléfono</th><th>Pedidos</th><th></th>")
                .build();
            append_child(&table, &head)?;

            for customer in &page.data {
                let row = create_element("tr")?;

                let name_cell = ElementBuilder::new("td")?.text(&customer.name).build();
                append_child(&row, &name_cell)?;

                let phone_cell = ElementBuilder::new("td")?
                    .text(customer.phone.as_deref().unwrap_or("—"))
                    .build();
                append_child(&row, &phone_cell)?;

                let count = customer
                    .orders_count
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "—".to_string());
                let count_cell = ElementBuilder::new("td")?.text(&count).build();
                append_child(&row, &count_cell)?;

                let actions_cell = create_element("td")?;
                let delete_btn = ElementBuilder::new("button")?
                    .class("btn-delete")
                    .text("🗑️")
                    .build();
                {
                    let state = state.clone();
                    let id = customer.id.clone();
                    let name = customer.name.clone();
                    on_click(&delete_btn, move |_| {
                        delete_customer(&state, &id, &name);
                    })?;
                }
                append_child(&actions_cell, &delete_btn)?;
                append_child(&row, &actions_cell)?;

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
                let current = *state.admin.customers_page.borrow();
                *state.admin.customers_page.borrow_mut() = current.saturating_sub(1).max(1);
                load_admin_customers(&state);
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
                let current = *state.admin.customers_page.borrow();
                *state.admin.customers_page.borrow_mut() = current + 1;
                load_admin_customers(&state);
            })?;
        }
        append_child(&pagination, &next)?;

        append_child(&screen, &pagination)?;
    }

    Ok(screen)
}

/// Baja de un cliente con confirmación
fn delete_customer(state: &AppState, id: &str, name: &str) {
    let confirmed = web_sys::window()
        .and_then(|w| {
            w.confirm_with_message(&format!("¿Eliminar al cliente \"{}\"?", name))
                .ok()
        })
        .unwrap_or(false);
    if !confirmed {
        return;
    }

    let state = state.clone();
    let id = id.to_string();
    spawn_local(async move {
        let api = ApiClient::new();
        let notifier = ToastNotifier::new(state.notices.clone());

        match api.delete_customer(&id).await {
            Ok(()) => {
                log::info!("🗑️ Cliente {} eliminado", id);
                notifier.notify(NoticeLevel::Success, "Cliente eliminado");
                load_admin_customers(&state);
            }
            Err(e) => {
                log::error!("❌ Error eliminando cliente {}: {}", id, e);
                notifier.notify(NoticeLevel::Error, "No se pudo eliminar el cliente");
            }
        }
    });
}
