// ============================================================================
// ADMIN ORDERS VIEW - Listado global de pedidos con filtros
// ============================================================================

use crate::dom::{append_child, create_element, input_value, on_change, on_click, select_value, set_attribute, set_class_name, ElementBuilder};
use crate::models::{OrderStatus, Paged};
use crate::services::api_client::ApiClient;
use crate::state::app_state::AppState;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

/// Pedir al backend la página según el filtro actual
pub fn load_admin_orders(state: &AppState) {
    state.admin.set_loading(true);
    state.admin.set_error(None);
    crate::rerender_app();

    let state = state.clone();
    spawn_local(async move {
        let api = ApiClient::new();
        let filter = state.admin.get_orders_filter();
        match api.fetch_admin_orders(&filter).await {
            Ok(page) => {
                log::info!("📋 Pedidos admin: página {} ({} en total)", page.page, page.total);
                *state.admin.orders.borrow_mut() = Some(page);
            }
            Err(e) => {
                log::error!("❌ Error cargando pedidos admin: {}", e);
                state.admin.set_error(Some(e.to_string()));
            }
        }
        state.admin.set_loading(false);
        crate::rerender_app();
    });
}

/// Renderizar listado de pedidos del admin
pub fn render_admin_orders(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("admin-screen").build();

    let title = ElementBuilder::new("h2")?.text("Pedidos").build();
    append_child(&screen, &title)?;
    append_child(&screen, &render_filter_bar(state)?)?;

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

    if let Some(page) = state.admin.orders.borrow().as_ref() {
        if page.data.is_empty() {
            let empty = ElementBuilder::new("div")?
                .class("admin-empty")
                .text("Sin pedidos con estos filtros")
                .build();
            append_child(&screen, &empty)?;
        } else {
            let table = ElementBuilder::new("table")?.class("admin-table").build();
            let head = ElementBuilder::new("tr")?
                .html("<th>Estado</th><th>Cliente</th><th>Importe</th><th>Creado</th>")
                .build();
            append_child(&table, &head)?;

            for order in &page.data {
                let row = create_element("tr")?;

                let status_cell = create_element("td")?;
                let chip = ElementBuilder::new("span")?
                    .class(&format!("order-status {}", order.status.css_class()))
                    .text(order.status.label())
                    .build();
                append_child(&status_cell, &chip)?;
                append_child(&row, &status_cell)?;

                let customer_cell = ElementBuilder::new("td")?.text(&order.customer.name).build();
                append_child(&row, &customer_cell)?;

                let cost_cell = ElementBuilder::new("td")?
                    .text(&format!("${:.2}", order.cost))
                    .build();
                append_child(&row, &cost_cell)?;

                let created_cell = ElementBuilder::new("td")?
                    .text(order.created_at.as_deref().unwrap_or("—"))
                    .build();
                append_child(&row, &created_cell)?;

                append_child(&table, &row)?;
            }
            append_child(&screen, &table)?;
        }

        append_child(&screen, &render_pagination(state, page)?)?;
    }

    Ok(screen)
}

/// Barra de filtros: estado + búsqueda de texto
fn render_filter_bar(state: &AppState) -> Result<Element, JsValue> {
    let bar = ElementBuilder::new("div")?.class("admin-filter-bar").build();
    let filter = state.admin.get_orders_filter();

    // Select de estado
    let select = create_element("select")?;
    set_attribute(&select, "id", "admin-status-filter")?;
    set_class_name(&select, "admin-select");
    let options = [
        ("all", "Todos"),
        ("new", "Nuevo"),
        ("pending", "Pendiente"),
        ("confirmed", "Confirmado"),
    ];
    let current = filter.status.map(|s| s.as_str()).unwrap_or("all");
    for (value, label) in options {
        let option = ElementBuilder::new("option")?
            .attr("value", value)?
            .text(label)
            .build();
        if value == current {
            set_attribute(&option, "selected", "selected")?;
        }
        append_child(&select, &option)?;
    }
    {
        let state = state.clone();
        on_change(&select, move |_| {
            let status = match select_value("admin-status-filter").as_deref() {
                Some("new") => Some(OrderStatus::New),
                Some("pending") => Some(OrderStatus::Pending),
                Some("confirmed") => Some(OrderStatus::Confirmed),
                _ => None,
            };
            let mut filter = state.admin.get_orders_filter();
            filter.status = status;
            filter.page = 1;
            state.admin.set_orders_filter(filter);
            load_admin_orders(&state);
        })?;
    }
    append_child(&bar, &select)?;

    // Búsqueda por texto
    let search = create_element("input")?;
    set_attribute(&search, "type", "search")?;
    set_attribute(&search, "id", "admin-search")?;
    set_attribute(&search, "placeholder", "Buscar cliente...")?;
    set_attribute(&search, "value", &filter.search)?;
    set_class_name(&search, "admin-search");
    append_child(&bar, &search)?;

    let search_btn = ElementBuilder::new("button")?
        .class("btn-search")
        .text("Buscar")
        .build();
    {
        let state = state.clone();
        on_click(&search_btn, move |_| {
            let mut filter = state.admin.get_orders_filter();
            filter.search = input_value("admin-search").unwrap_or_default().trim().to_string();
            filter.page = 1;
            state.admin.set_orders_filter(filter);
            load_admin_orders(&state);
        })?;
    }
    append_child(&bar, &search_btn)?;

    Ok(bar)
}

/// Paginación anterior/siguiente
fn render_pagination(state: &AppState, page: &Paged<crate::models::Order>) -> Result<Element, JsValue> {
    let bar = ElementBuilder::new("div")?.class("admin-pagination").build();

    let prev = ElementBuilder::new("button")?
        .class("btn-page")
        .text("← Anterior")
        .build();
    if !page.has_prev() {
        set_attribute(&prev, "disabled", "true")?;
    } else {
        let state = state.clone();
        on_click(&prev, move |_| {
            change_page(&state, -1);
        })?;
    }
    append_child(&bar, &prev)?;

    let label = ElementBuilder::new("span")?
        .class("page-label")
        .text(&format!("Página {} de {}", page.page, page.total_pages()))
        .build();
    append_child(&bar, &label)?;

    let next = ElementBuilder::new("button")?
        .class("btn-page")
        .text("Siguiente →")
        .build();
    if !page.has_next() {
        set_attribute(&next, "disabled", "true")?;
    } else {
        let state = state.clone();
        on_click(&next, move |_| {
            change_page(&state, 1);
        })?;
    }
    append_child(&bar, &next)?;

    Ok(bar)
}

fn change_page(state: &AppState, delta: i64) {
    let mut filter = state.admin.get_orders_filter();
    let page = filter.page as i64 + delta;
    filter.page = page.max(1) as u32;
    state.admin.set_orders_filter(filter);
    load_admin_orders(state);
}
