// ============================================================================
// ORDERS VIEW - Pedidos del repartidor con pull-to-refresh
// ============================================================================

use crate::dom::{append_child, on_click, on_touch_end, on_touch_move, on_touch_start, scroll_top_of, set_style, ElementBuilder};
use crate::models::Order;
use crate::polling::OrdersPoller;
use crate::router::{self, Route};
use crate::services::api_client::{ApiClient, OrdersApi};
use crate::services::notify::{NoticeLevel, Notifier, ToastNotifier};
use crate::auth::session::SessionManager;
use crate::services::token_store::LocalTokenStore;
use crate::state::app_state::AppState;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use std::rc::Rc;

/// Poller con las dependencias de producción (la vista no guarda estado
/// propio: todo vive en AppState)
pub(crate) fn production_poller(state: &AppState) -> OrdersPoller {
    OrdersPoller::new(
        Rc::new(ApiClient::new()) as Rc<dyn OrdersApi>,
        state.orders.clone(),
        Rc::new(ToastNotifier::new(state.notices.clone())),
    )
}

/// Renderizar pantalla de pedidos del repartidor
pub fn render_orders(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("orders-screen").build();

    // Indicador del gesto pull-to-refresh
    let indicator = ElementBuilder::new("div")?
        .id("pull-indicator")?
        .class("pull-indicator")
        .build();
    let indicator_icon = ElementBuilder::new("span")?
        .id("pull-indicator-icon")?
        .class("pull-indicator-icon")
        .text("↓")
        .build();
    append_child(&indicator, &indicator_icon)?;
    append_child(&screen, &indicator)?;
    sync_pull_indicator(state);

    // Toolbar
    let toolbar = ElementBuilder::new("div")?.class("orders-toolbar").build();
    let title = ElementBuilder::new("h2")?.text("Mis pedidos").build();
    append_child(&toolbar, &title)?;

    if let Some(updated) = state.orders.get_last_update() {
        let stamp = ElementBuilder::new("span")?
            .class("orders-updated")
            .text(&format!("Actualizado {}", updated.format("%H:%M:%S")))
            .build();
        append_child(&toolbar, &stamp)?;
    }

    let refresh_btn = ElementBuilder::new("button")?
        .class("btn-refresh")
        .text(if state.orders.get_refreshing() { "⏳" } else { "🔄" })
        .build();
    {
        let state = state.clone();
        on_click(&refresh_btn, move |_| {
            let poller = production_poller(&state);
            spawn_local(async move {
                poller.manual_refresh().await;
            });
        })?;
    }
    append_child(&toolbar, &refresh_btn)?;

    let new_btn = ElementBuilder::new("button")?
        .class("btn-new-order")
        .text("➕ Nuevo pedido")
        .build();
    on_click(&new_btn, move |_| {
        router::navigate(&Route::OrderNew);
    })?;
    append_child(&toolbar, &new_btn)?;

    let close_shift_btn = ElementBuilder::new("button")?
        .class("btn-close-shift")
        .text(if state.ui.get_closing_shift() { "Cerrando..." } else { "Cerrar turno" })
        .build();
    if state.ui.get_closing_shift() {
        let _ = close_shift_btn.set_attribute("disabled", "true");
    }
    {
        let state = state.clone();
        on_click(&close_shift_btn, move |_| {
            close_shift(&state);
        })?;
    }
    append_child(&toolbar, &close_shift_btn)?;
    append_child(&screen, &toolbar)?;

    // Contenido
    let list = ElementBuilder::new("div")?.class("orders-list").build();

    if state.orders.get_loading() && !state.orders.has_snapshot() {
        let loading = ElementBuilder::new("div")?
            .class("orders-loading")
            .text("⏳ Cargando pedidos...")
            .build();
        append_child(&list, &loading)?;
    } else if let Some(error) = state.orders.get_error() {
        if !state.orders.has_snapshot() {
            append_child(&list, &render_error_panel(state, &error)?)?;
        }
    }

    if let Some(orders) = state.orders.get_orders() {
        if orders.is_empty() {
            let empty = ElementBuilder::new("div")?
                .class("orders-empty")
                .text("No tienes pedidos pendientes 🎉")
                .build();
            append_child(&list, &empty)?;
        } else {
            for order in &orders {
                append_child(&list, &render_order_card(order)?)?;
            }
        }
    }

    append_child(&screen, &list)?;

    // Gesto pull-to-refresh sobre toda la pantalla
    attach_pull_gesture(&screen, state)?;

    Ok(screen)
}

/// Card de un pedido; tap para abrir el detalle
fn render_order_card(order: &Order) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?.class("order-card").build();

    let header = ElementBuilder::new("div")?.class("order-card-header").build();
    let status = ElementBuilder::new("span")?
        .class(&format!("order-status {}", order.status.css_class()))
        .text(order.status.label())
        .build();
    let cost = ElementBuilder::new("span")?
        .class("order-cost")
        .text(&format!("${:.2}", order.cost))
        .build();
    append_child(&header, &status)?;
    append_child(&header, &cost)?;

    let customer = ElementBuilder::new("div")?
        .class("order-customer")
        .text(&order.customer.name)
        .build();

    append_child(&card, &header)?;
    append_child(&card, &customer)?;

    if let Some(address) = &order.customer.address {
        let address_el = ElementBuilder::new("div")?
            .class("order-address")
            .text(&format!("📍 {}", address))
            .build();
        append_child(&card, &address_el)?;
    } else if let Some(label) = &order.location.label {
        let label_el = ElementBuilder::new("div")?
            .class("order-address")
            .text(&format!("📍 {}", label))
            .build();
        append_child(&card, &label_el)?;
    }

    if let Some(phone) = &order.customer.phone {
        let phone_el = ElementBuilder::new("div")?
            .class("order-phone")
            .text(&format!("📞 {}", phone))
            .build();
        append_child(&card, &phone_el)?;
    }

    {
        let id = order.id.clone();
        on_click(&card, move |_| {
            router::navigate(&Route::OrderDetail(id.clone()));
        })?;
    }

    Ok(card)
}

/// Panel de error con reintento (solo cuando no hay nada que mostrar)
fn render_error_panel(state: &AppState, error: &str) -> Result<Element, JsValue> {
    let panel = ElementBuilder::new("div")?.class("orders-error").build();
    let message = ElementBuilder::new("p")?
        .text(&format!("⚠️ No se pudieron cargar los pedidos: {}", error))
        .build();
    let retry = ElementBuilder::new("button")?
        .class("btn-retry")
        .text("Reintentar")
        .build();
    {
        let state = state.clone();
        on_click(&retry, move |_| {
            state.orders.set_error(None);
            let poller = production_poller(&state);
            spawn_local(async move {
                poller.initial_load().await;
            });
        })?;
    }
    append_child(&panel, &message)?;
    append_child(&panel, &retry)?;
    Ok(panel)
}

/// Listeners touch del gesto. La máquina de estados vive en OrdersState,
/// así el gesto sobrevive a los re-render.
fn attach_pull_gesture(screen: &Element, state: &AppState) -> Result<(), JsValue> {
    {
        let state = state.clone();
        on_touch_start(screen, move |e: web_sys::TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                let at_top = scroll_top_of(".orders-list") <= 0.0;
                state
                    .orders
                    .pull
                    .touch_start(touch.client_y() as f64, at_top, state.orders.busy());
            }
        })?;
    }

    {
        let state = state.clone();
        on_touch_move(screen, move |e: web_sys::TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                if state
                    .orders
                    .pull
                    .touch_move(touch.client_y() as f64, state.orders.busy())
                    .is_some()
                {
                    sync_pull_indicator(&state);
                }
            }
        })?;
    }

    {
        let state = state.clone();
        on_touch_end(screen, move |_e: web_sys::TouchEvent| {
            if state.orders.pull.release(state.orders.busy()) {
                log::info!("📲 Pull-to-refresh disparado");
                let poller = production_poller(&state);
                spawn_local(async move {
                    poller.manual_refresh().await;
                });
            }
            sync_pull_indicator(&state);
        })?;
    }

    Ok(())
}

/// Pintar el indicador según la distancia actual del gesto, sin re-render.
/// El icono rota proporcionalmente al arrastre.
fn sync_pull_indicator(state: &AppState) {
    let distance = state.orders.pull.distance();
    if let Some(indicator) = crate::dom::get_element_by_id("pull-indicator") {
        set_style(&indicator, "height", &format!("{:.0}px", distance));
    }
    if let Some(icon) = crate::dom::get_element_by_id("pull-indicator-icon") {
        set_style(&icon, "transform", &format!("rotate({:.0}deg)", distance * 1.8));
    }
}

/// Cerrar turno: desactiva al repartidor en el backend y cierra la sesión
fn close_shift(state: &AppState) {
    if state.ui.get_closing_shift() {
        return;
    }

    let confirmed = web_sys::window()
        .and_then(|w| w.confirm_with_message("¿Cerrar tu turno de reparto?").ok())
        .unwrap_or(false);
    if !confirmed {
        return;
    }

    state.ui.set_closing_shift(true);
    crate::rerender_app();

    let state = state.clone();
    spawn_local(async move {
        let api = ApiClient::new();
        let notifier = ToastNotifier::new(state.notices.clone());

        match api.deactivate_distributor().await {
            Ok(()) => {
                log::info!("👋 Turno cerrado, cerrando sesión...");

                let manager = SessionManager::new(
                    Rc::new(ApiClient::new()),
                    Rc::new(LocalTokenStore::new()),
                    state.session.clone(),
                );
                manager.logout();
                state.clear_session_data();
                router::clear_saved_path();
                router::navigate(&Route::Login);
                notifier.notify(NoticeLevel::Success, "Turno cerrado. ¡Hasta mañana!");
                state.notify_subscribers();
            }
            Err(e) => {
                log::error!("❌ Error cerrando turno: {}", e);
                notifier.notify(NoticeLevel::Error, "No se pudo cerrar el turno. Inténtalo de nuevo.");
                state.ui.set_closing_shift(false);
                crate::rerender_app();
            }
        }
    });
}
