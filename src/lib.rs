// ============================================================================
// PEDIDOS PWA - Cliente de gestión de pedidos (Rust puro + WASM)
// ============================================================================
// Arquitectura:
// - Views: funciones que construyen el DOM a partir del estado
// - Auth / Router / Polling: lógica de dominio testeable sin navegador
// - Services: comunicación con el backend y almacenamiento
// - State: estado compartido con Rc<RefCell>
// - Models: estructuras compartidas con el backend
// ============================================================================

mod app;
mod auth;
mod config;
mod dom;
mod models;
mod polling;
mod router;
mod services;
mod state;
mod utils;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_logger::Config;

use crate::app::App;

// Instancia global de la aplicación
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if crate::config::CONFIG.is_logging_enabled() {
        wasm_logger::init(Config::default());
    }
    log::info!("🚀 Pedidos PWA arrancando...");

    let app = App::new()?;
    app.render()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });

    // Navegación por hash: cada cambio de URL re-renderiza.
    // Listener global registrado una sola vez en el arranque.
    if let Some(window) = web_sys::window() {
        let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            rerender_app();
        }) as Box<dyn FnMut(web_sys::Event)>);
        window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Re-render completo de la aplicación. Sin instancia global (tests fuera
/// del navegador) la llamada es un no-op.
pub fn rerender_app() {
    APP.with(|cell| {
        // Borrow compartido: render toma &self y puede re-entrar desde los
        // efectos de montaje de pantalla
        if let Some(app) = &*cell.borrow() {
            if let Err(e) = app.render() {
                log::error!("❌ Error re-renderizando: {:?}", e);
            }
        }
    });
}
