// ============================================================================
// ORDER DETAIL VIEW - Detalle de un pedido y confirmación de entrega
// ============================================================================

use crate::dom::{append_child, on_click, set_attribute, set_text_content, ElementBuilder};
use crate::models::{Order, OrderStatus};
use crate::router::{self, Route};
use crate::services::api_client::{ApiClient, OrdersApi};
use crate::services::notify::{NoticeLevel, Notifier, ToastNotifier};
use crate::state::app_state::AppState;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use std::cell::RefCell;
use std::rc::Rc;

/// Pedir el detalle al backend y dejarlo en el estado (llamado al entrar
/// a la ruta)
pub fn load_order_detail(state: &AppState, id: &str) {
    state.orders.set_detail(None);
    state.orders.set_detail_error(None);
    state.orders.set_detail_loading(true);
    crate::rerender_app();

    let state = state.clone();
    let id = id.to_string();
    spawn_local(async move {
        let api = ApiClient::new();
        match api.fetch_order(&id).await {
            Ok(order) => {
                log::info!("📋 Detalle del pedido {} cargado", order.id);
                state.orders.set_detail(Some(order));
            }
            Err(e) => {
                log::error!("❌ Error cargando el pedido {}: {}", id, e);
                state.orders.set_detail_error(Some(e.to_string()));
            }
        }
        state.orders.set_detail_loading(false);
        crate::rerender_app();
    });
}

/// Renderizar detalle de pedido
pub fn render_order_detail(state: &AppState, id: &str) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("order-detail-screen").build();

    let back = ElementBuilder::new("button")?
        .class("btn-back")
        .text("← Volver")
        .build();
    on_click(&back, move |_| {
        router::navigate(&Route::Orders);
    })?;
    append_child(&screen, &back)?;

    if state.orders.get_detail_loading() {
        let loading = ElementBuilder::new("div")?
            .class("detail-loading")
            .text("⏳ Cargando pedido...")
            .build();
        append_child(&screen, &loading)?;
        return Ok(screen);
    }

    if let Some(error) = state.orders.get_detail_error() {
        let panel = ElementBuilder::new("div")?.class("detail-error").build();
        let message = ElementBuilder::new("p")?
            .text(&format!("⚠️ No se pudo cargar el pedido: {}", error))
            .build();
        let back_link = ElementBuilder::new("button")?
            .class("btn-retry")
            .text("Volver a mis pedidos")
            .build();
        on_click(&back_link, move |_| {
            router::navigate(&Route::Orders);
        })?;
        append_child(&panel, &message)?;
        append_child(&panel, &back_link)?;
        append_child(&screen, &panel)?;
        return Ok(screen);
    }

    let order = match state.orders.get_detail() {
        Some(order) if order.id == id => order,
        // Aún no llegó el fetch de esta ruta
        _ => {
            let loading = ElementBuilder::new("div")?
                .class("detail-loading")
                .text("⏳ Cargando pedido...")
                .build();
            append_child(&screen, &loading)?;
            return Ok(screen);
        }
    };

    append_child(&screen, &render_detail_card(state, &order)?)?;
    Ok(screen)
}

fn render_detail_card(state: &AppState, order: &Order) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?.class("detail-card").build();

    let header = ElementBuilder::new("div")?.class("detail-header").build();
    let status = ElementBuilder::new("span")?
        .class(&format!("order-status {}", order.status.css_class()))
        .text(order.status.label())
        .build();
    let cost = ElementBuilder::new("span")?
        .class("detail-cost")
        .text(&format!("${:.2}", order.cost))
        .build();
    append_child(&header, &status)?;
    append_child(&header, &cost)?;
    append_child(&card, &header)?;

    // Cliente
    let customer = ElementBuilder::new("div")?.class("detail-customer").build();
    let name = ElementBuilder::new("h3")?.text(&order.customer.name).build();
    append_child(&customer, &name)?;
    if let Some(phone) = &order.customer.phone {
        let phone_el = ElementBuilder::new("p")?.text(&format!("📞 {}", phone)).build();
        append_child(&customer, &phone_el)?;
    }
    if let Some(address) = &order.customer.address {
        let address_el = ElementBuilder::new("p")?.text(&format!("📍 {}", address)).build();
        append_child(&customer, &address_el)?;
    }
    append_child(&card, &customer)?;

    // Ubicación de entrega
    let location = ElementBuilder::new("div")?.class("detail-location").build();
    let coords_text = match &order.location.label {
        Some(label) => format!("🗺️ {} ({:.5}, {:.5})", label, order.location.latitude, order.location.longitude),
        None => format!("🗺️ ({:.5}, {:.5})", order.location.latitude, order.location.longitude),
    };
    let coords = ElementBuilder::new("p")?.text(&coords_text).build();
    append_child(&location, &coords)?;
    append_child(&card, &location)?;

    if let Some(created_at) = &order.created_at {
        let created = ElementBuilder::new("p")?
            .class("detail-created")
            .text(&format!("Creado: {}", created_at))
            .build();
        append_child(&card, &created)?;
    }

    // Confirmar entrega (solo si no está confirmado ya)
    if order.status != OrderStatus::Confirmed {
        let confirm_btn = ElementBuilder::new("button")?
            .class("btn-confirm-order")
            .text("✅ Confirmar pedido")
            .build();

        let busy = Rc::new(RefCell::new(false));
        let state = state.clone();
        let order_id = order.id.clone();
        let button = confirm_btn.clone();

        on_click(&confirm_btn, move |_| {
            if *busy.borrow() {
                return;
            }
            *busy.borrow_mut() = true;
            let _ = set_attribute(&button, "disabled", "true");
            set_text_content(&button, "Confirmando...");

            let busy = busy.clone();
            let button = button.clone();
            let state = state.clone();
            let order_id = order_id.clone();

            spawn_local(async move {
                let api = ApiClient::new();
                let notifier = ToastNotifier::new(state.notices.clone());

                match api.confirm_order(&order_id).await {
                    Ok(confirmed) => {
                        log::info!("✅ Pedido {} confirmado", confirmed.id);
                        state.orders.set_detail(Some(confirmed));
                        // La lista debe refrescarse sí o sí al volver
                        state.orders.arm_force_fetch();
                        notifier.notify(NoticeLevel::Success, "Pedido confirmado");
                        router::navigate(&Route::Orders);
                        crate::rerender_app();
                    }
                    Err(e) => {
                        log::error!("❌ Error confirmando pedido {}: {}", order_id, e);
                        notifier.notify(NoticeLevel::Error, "No se pudo confirmar el pedido");
                        *busy.borrow_mut() = false;
                        let _ = button.remove_attribute("disabled");
                        set_text_content(&button, "✅ Confirmar pedido");
                    }
                }
            });
        })?;

        append_child(&card, &confirm_btn)?;
    }

    Ok(card)
}
