// ============================================================================
// SHELL VIEW - Cabecera, navegación por rol y capas superpuestas
// ============================================================================

use std::rc::Rc;

use crate::auth::{SessionManager, SessionPhase};
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::Role;
use crate::router::{self, Route};
use crate::services::api_client::ApiClient;
use crate::services::install_prompt::InstallPromptService;
use crate::services::token_store::LocalTokenStore;
use crate::state::app_state::AppState;
use crate::views::render_toasts;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Pantalla de arranque mientras la sesión se restaura
pub fn render_loading_screen() -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("loading-screen").build();
    let spinner = ElementBuilder::new("div")?
        .class("loading-spinner")
        .text("⏳")
        .build();
    append_child(&screen, &spinner)?;
    let text = ElementBuilder::new("p")?
        .class("loading-text")
        .text("Cargando...")
        .build();
    append_child(&screen, &text)?;
    Ok(screen)
}

/// Envolver el contenido de una ruta con la cabecera y las capas comunes
pub fn render_shell(state: &AppState, content: Element) -> Result<Element, JsValue> {
    let shell = ElementBuilder::new("div")?.class("app-shell").build();

    append_child(&shell, &render_header(state)?)?;

    if state.ui.get_install_available() {
        append_child(&shell, &render_install_banner(state)?)?;
    }

    let main = ElementBuilder::new("main")?.class("app-main").build();
    append_child(&main, &content)?;
    append_child(&shell, &main)?;

    append_child(&shell, &render_toasts(state)?)?;

    Ok(shell)
}

fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("header")?.class("app-header").build();

    let brand = ElementBuilder::new("div")?
        .class("app-brand")
        .text("🛵 Pedidos")
        .build();
    append_child(&header, &brand)?;

    // Navegación según el rol de la sesión
    if let SessionPhase::Authenticated(role) = state.session.phase() {
        let nav = ElementBuilder::new("nav")?.class("app-nav").build();
        match role {
            Role::Admin => {
                append_child(&nav, &nav_link("Pedidos", Route::AdminOrders)?)?;
                append_child(&nav, &nav_link("Clientes", Route::AdminCustomers)?)?;
                append_child(&nav, &nav_link("Repartidores", Route::AdminDistributors)?)?;
            }
            Role::Distributor => {
                append_child(&nav, &nav_link("Mis pedidos", Route::Orders)?)?;
            }
        }
        append_child(&header, &nav)?;

        let logout_btn = ElementBuilder::new("button")?
            .class("btn-logout")
            .text("Salir")
            .build();
        {
            let state = state.clone();
            on_click(&logout_btn, move |_| {
                let manager = SessionManager::new(
                    Rc::new(ApiClient::new()),
                    Rc::new(LocalTokenStore::new()),
                    state.session.clone(),
                );
                manager.logout();
                state.clear_session_data();
                router::clear_saved_path();
                router::navigate(&Route::Login);
                state.notify_subscribers();
            })?;
        }
        append_child(&header, &logout_btn)?;
    }

    Ok(header)
}

fn nav_link(label: &str, route: Route) -> Result<Element, JsValue> {
    let link = ElementBuilder::new("a")?
        .class("nav-link")
        .attr("href", &format!("#{}", route.path()))?
        .text(label)
        .build();
    Ok(link)
}

fn render_install_banner(state: &AppState) -> Result<Element, JsValue> {
    let banner = ElementBuilder::new("div")?.class("install-banner").build();

    let text = ElementBuilder::new("span")?
        .class("install-text")
        .text("📲 Instala la app para acceder más rápido")
        .build();
    append_child(&banner, &text)?;

    let install_btn = ElementBuilder::new("button")?
        .class("btn-install")
        .text("Instalar")
        .build();
    {
        let state = state.clone();
        on_click(&install_btn, move |_| {
            InstallPromptService::prompt(&state.ui);
            crate::rerender_app();
        })?;
    }
    append_child(&banner, &install_btn)?;

    let dismiss_btn = ElementBuilder::new("button")?
        .class("btn-install-dismiss")
        .text("✕")
        .build();
    {
        let state = state.clone();
        on_click(&dismiss_btn, move |_| {
            InstallPromptService::dismiss(&state.ui);
            crate::rerender_app();
        })?;
    }
    append_child(&banner, &dismiss_btn)?;

    Ok(banner)
}
