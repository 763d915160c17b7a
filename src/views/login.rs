// ============================================================================
// LOGIN VIEW - Acceso de administradores y repartidores
// ============================================================================

use crate::dom::{append_child, create_element, input_value, set_attribute, set_class_name, set_text_content, ElementBuilder};
use crate::router::{self, Route};
use crate::services::api_client::ApiClient;
use crate::services::token_store::LocalTokenStore;
use crate::auth::session::{SessionError, SessionManager};
use crate::state::app_state::AppState;
use crate::utils::constants::KEY_FORCE_RELOAD_AFTER_AUTH;
use crate::utils::storage;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use std::cell::RefCell;
use std::rc::Rc;

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("login-screen").build();
    let container = ElementBuilder::new("div")?.class("login-container").build();

    // Header
    let header = ElementBuilder::new("div")?.class("login-header").build();
    let logo = ElementBuilder::new("div")?.class("login-logo").text("🛵").build();
    let title = ElementBuilder::new("h1")?.text("Pedidos").build();
    let subtitle = ElementBuilder::new("p")?
        .text("Gestión de pedidos y reparto")
        .build();
    append_child(&header, &logo)?;
    append_child(&header, &title)?;
    append_child(&header, &subtitle)?;

    // Formulario
    let form = create_element("form")?;
    set_class_name(&form, "login-form");

    let username_group = form_group("login-username", "Usuario", "text", "Tu usuario")?;
    let password_group = form_group("login-password", "Contraseña", "password", "Tu contraseña")?;

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-login")
        .text("Entrar")
        .build();

    // Submit: login contra el backend y recarga completa con el flag puesto
    {
        let busy = Rc::new(RefCell::new(false));
        let state = state.clone();
        let button = submit_btn.clone();

        let closure = Closure::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();

            if *busy.borrow() {
                return;
            }

            let username = input_value("login-username").unwrap_or_default();
            let password = input_value("login-password").unwrap_or_default();
            if username.trim().is_empty() || password.is_empty() {
                alert("Completa usuario y contraseña");
                return;
            }

            *busy.borrow_mut() = true;
            let _ = set_attribute(&button, "disabled", "true");
            set_text_content(&button, "Entrando...");

            let busy = busy.clone();
            let button = button.clone();
            let state = state.clone();

            spawn_local(async move {
                let manager = SessionManager::new(
                    Rc::new(ApiClient::new()),
                    Rc::new(LocalTokenStore::new()),
                    state.session.clone(),
                );

                log::info!("🔐 Iniciando sesión de {}...", username);

                match manager.login(username.trim(), &password).await {
                    Ok(role) => {
                        log::info!("✅ Sesión iniciada como {:?}", role);
                        // Recarga completa: partir de cero con los tokens ya
                        // guardados. El flag evita que la restauración de ruta
                        // pise la pantalla inicial del rol.
                        storage::save_flag(KEY_FORCE_RELOAD_AFTER_AUTH, true);
                        router::navigate(&Route::home_for(role));
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().reload();
                        }
                    }
                    Err(SessionError::InvalidCredentials) => {
                        log::warn!("❌ Credenciales rechazadas");
                        alert("Usuario o contraseña incorrectos");
                    }
                    Err(e) => {
                        log::error!("❌ Error en login: {}", e);
                        alert("No se pudo iniciar sesión. Revisa tu conexión.");
                    }
                }

                *busy.borrow_mut() = false;
                let _ = button.remove_attribute("disabled");
                set_text_content(&button, "Entrar");
            });
        }) as Box<dyn FnMut(web_sys::Event)>);

        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    append_child(&form, &username_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &submit_btn)?;

    append_child(&container, &header)?;
    append_child(&container, &form)?;
    append_child(&screen, &container)?;

    Ok(screen)
}

/// Helper para crear form group
fn form_group(id: &str, label_text: &str, input_type: &str, placeholder: &str) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = create_element("input")?;
    set_attribute(&input, "type", input_type)?;
    set_attribute(&input, "id", id)?;
    set_attribute(&input, "name", id)?;
    set_attribute(&input, "placeholder", placeholder)?;
    set_attribute(&input, "autocomplete", if input_type == "password" { "current-password" } else { "username" })?;
    set_class_name(&input, "form-input");

    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok(group)
}

/// Alert nativo del navegador (el fallo de login es bloqueante a propósito)
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
