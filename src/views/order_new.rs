// ============================================================================
// ORDER NEW VIEW - Alta de un pedido por el repartidor
// ============================================================================

use crate::dom::{append_child, create_element, input_value, on_click, set_attribute, set_class_name, set_text_content, ElementBuilder};
use crate::models::{CustomerInfo, Location, NewOrder};
use crate::router::{self, Route};
use crate::services::api_client::{ApiClient, OrdersApi};
use crate::services::notify::{NoticeLevel, Notifier, ToastNotifier};
use crate::state::app_state::AppState;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use std::cell::RefCell;
use std::rc::Rc;

/// Renderizar formulario de nuevo pedido
pub fn render_order_new(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("order-new-screen").build();

    let back = ElementBuilder::new("button")?
        .class("btn-back")
        .text("← Volver")
        .build();
    on_click(&back, move |_| {
        router::navigate(&Route::Orders);
    })?;
    append_child(&screen, &back)?;

    let title = ElementBuilder::new("h2")?.text("Nuevo pedido").build();
    append_child(&screen, &title)?;

    let form = create_element("form")?;
    set_class_name(&form, "order-new-form");

    append_child(&form, &field("new-customer", "Cliente *", "text", "Nombre del cliente")?)?;
    append_child(&form, &field("new-phone", "Teléfono", "tel", "Opcional")?)?;
    append_child(&form, &field("new-address", "Dirección", "text", "Opcional")?)?;
    append_child(&form, &field("new-cost", "Importe *", "number", "0.00")?)?;
    append_child(&form, &field("new-lat", "Latitud *", "number", "19.4326")?)?;
    append_child(&form, &field("new-lng", "Longitud *", "number", "-99.1332")?)?;
    append_child(&form, &field("new-label", "Referencia del lugar", "text", "Opcional")?)?;

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-save-order")
        .text("Guardar pedido")
        .build();
    append_child(&form, &submit_btn)?;

    {
        let busy = Rc::new(RefCell::new(false));
        let state = state.clone();
        let button = submit_btn.clone();

        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();

            if *busy.borrow() {
                return;
            }

            let notifier = ToastNotifier::new(state.notices.clone());
            let draft = match read_draft() {
                Some(draft) => draft,
                None => {
                    notifier.notify(NoticeLevel::Error, "Revisa los campos obligatorios del pedido");
                    return;
                }
            };

            *busy.borrow_mut() = true;
            let _ = set_attribute(&button, "disabled", "true");
            set_text_content(&button, "Guardando...");

            let busy = busy.clone();
            let button = button.clone();
            let state = state.clone();

            spawn_local(async move {
                let api = ApiClient::new();
                let notifier = ToastNotifier::new(state.notices.clone());

                match api.create_order(&draft).await {
                    Ok(order) => {
                        log::info!("📦 Pedido {} creado", order.id);
                        // Al volver, la lista entra con refresco forzado
                        state.orders.arm_force_fetch();
                        notifier.notify(NoticeLevel::Success, "Pedido creado");
                        router::navigate(&Route::Orders);
                        crate::rerender_app();
                    }
                    Err(e) => {
                        log::error!("❌ Error creando pedido: {}", e);
                        notifier.notify(NoticeLevel::Error, "No se pudo crear el pedido");
                        *busy.borrow_mut() = false;
                        let _ = button.remove_attribute("disabled");
                        set_text_content(&button, "Guardar pedido");
                    }
                }
            });
        }) as Box<dyn FnMut(web_sys::Event)>);

        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    append_child(&screen, &form)?;
    Ok(screen)
}

/// Leer y validar el formulario. None si falta algún campo obligatorio.
fn read_draft() -> Option<NewOrder> {
    let customer = input_value("new-customer").unwrap_or_default();
    let customer = customer.trim();
    if customer.is_empty() {
        return None;
    }

    let cost: f64 = input_value("new-cost")?.trim().parse().ok()?;
    let latitude: f64 = input_value("new-lat")?.trim().parse().ok()?;
    let longitude: f64 = input_value("new-lng")?.trim().parse().ok()?;
    if cost < 0.0 {
        return None;
    }

    let optional = |id: &str| -> Option<String> {
        let value = input_value(id).unwrap_or_default();
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    };

    Some(NewOrder {
        cost,
        location: Location {
            latitude,
            longitude,
            label: optional("new-label"),
        },
        customer: CustomerInfo {
            name: customer.to_string(),
            phone: optional("new-phone"),
            address: optional("new-address"),
        },
    })
}

fn field(id: &str, label_text: &str, input_type: &str, placeholder: &str) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = create_element("input")?;
    set_attribute(&input, "type", input_type)?;
    set_attribute(&input, "id", id)?;
    set_attribute(&input, "placeholder", placeholder)?;
    if input_type == "number" {
        set_attribute(&input, "step", "any")?;
    }
    set_class_name(&input, "form-input");

    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok(group)
}
