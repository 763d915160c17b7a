// ============================================================================
// INSTALL PROMPT - Captura del evento beforeinstallprompt (PWA)
// ============================================================================
// El navegador emite beforeinstallprompt una vez por página; lo interceptamos,
// lo guardamos y mostramos nuestro propio banner de instalación.
// Protección contra registros duplicados igual que los listeners globales
// de window en el resto de la app.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Event};
use std::sync::{Arc, Mutex};

use crate::state::ui_state::UiState;
use crate::utils::constants::KEY_PWA_PROMPT_DISMISSED;
use crate::utils::storage;

pub struct InstallPromptService {
    // Flag para prevenir múltiples registros de listeners
    listening_started: Arc<Mutex<bool>>,
}

impl InstallPromptService {
    pub fn new() -> Self {
        Self {
            listening_started: Arc::new(Mutex::new(false)),
        }
    }

    /// Registrar los listeners de instalación. Solo se registra una vez.
    pub fn start_listening(&self, ui: UiState) {
        {
            let mut started = self.listening_started.lock().unwrap();
            if *started {
                log::warn!("⚠️ InstallPrompt: start_listening ya fue llamado, ignorando llamada duplicada");
                return;
            }
            *started = true;
        }

        let win = match window() {
            Some(w) => w,
            None => return,
        };

        // El usuario ya descartó el banner en una visita anterior
        if storage::load_flag(KEY_PWA_PROMPT_DISMISSED) {
            log::info!("ℹ️ InstallPrompt: banner descartado previamente, no se mostrará");
            return;
        }

        // beforeinstallprompt: guardar el evento y mostrar nuestro banner
        let before_closure = Closure::wrap(Box::new({
            let ui = ui.clone();
            move |event: Event| {
                event.prevent_default();
                log::info!("📲 InstallPrompt: beforeinstallprompt capturado");
                *ui.install_event.borrow_mut() = Some(event);
                ui.set_install_available(true);
                crate::rerender_app();
            }
        }) as Box<dyn FnMut(Event)>);

        // appinstalled: ocultar el banner definitivamente
        let installed_closure = Closure::wrap(Box::new({
            let ui = ui.clone();
            move |_event: Event| {
                log::info!("✅ InstallPrompt: app instalada");
                *ui.install_event.borrow_mut() = None;
                ui.set_install_available(false);
                crate::rerender_app();
            }
        }) as Box<dyn FnMut(Event)>);

        let _ = win.add_event_listener_with_callback(
            "beforeinstallprompt",
            before_closure.as_ref().unchecked_ref(),
        );
        let _ = win.add_event_listener_with_callback(
            "appinstalled",
            installed_closure.as_ref().unchecked_ref(),
        );

        // Listeners globales de window: viven toda la vida de la app
        before_closure.forget();
        installed_closure.forget();

        log::info!("✅ InstallPrompt: listeners registrados (solo una vez)");
    }

    /// Lanzar el diálogo nativo de instalación con el evento guardado
    pub fn prompt(ui: &UiState) {
        let event = ui.install_event.borrow_mut().take();
        match event {
            Some(event) => {
                // beforeinstallprompt no está tipado en web-sys; llamamos
                // event.prompt() vía Reflect
                let prompt_fn = js_sys::Reflect::get(&event, &JsValue::from_str("prompt")).ok();
                if let Some(f) = prompt_fn.and_then(|p| p.dyn_into::<js_sys::Function>().ok()) {
                    let _ = f.call0(&event);
                    log::info!("📲 InstallPrompt: diálogo de instalación lanzado");
                }
                ui.set_install_available(false);
            }
            None => {
                log::warn!("⚠️ InstallPrompt: no hay evento de instalación guardado");
            }
        }
    }

    /// El usuario descartó el banner: persistir la preferencia
    pub fn dismiss(ui: &UiState) {
        storage::save_flag(KEY_PWA_PROMPT_DISMISSED, true);
        *ui.install_event.borrow_mut() = None;
        ui.set_install_available(false);
        log::info!("ℹ️ InstallPrompt: banner descartado por el usuario");
    }
}

impl Default for InstallPromptService {
    fn default() -> Self {
        Self::new()
    }
}
