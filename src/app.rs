// ============================================================================
// APP - Ciclo de vida: bootstrap de sesión, guard de rutas y montaje
// ============================================================================
// Cada cambio de estado re-renderiza la pantalla completa desde AppState.
// Los efectos de entrada/salida de pantalla (cargas, sondeo) solo corren
// cuando la ruta montada cambia, no en cada re-render.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::auth::{decide, RouteDecision, SessionManager, SessionPhase};
use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id};
use crate::polling::PollScheduler;
use crate::router::{self, Route, RouteRestorer};
use crate::services::api_client::ApiClient;
use crate::services::install_prompt::InstallPromptService;
use crate::services::token_store::LocalTokenStore;
use crate::state::app_state::AppState;
use crate::utils::constants::KEY_FORCE_RELOAD_AFTER_AUTH;
use crate::utils::storage;
use crate::views;

/// Aplicación principal
pub struct App {
    state: AppState,
    scheduler: RefCell<Option<PollScheduler>>,
    mounted_route: RefCell<Option<Route>>,
    root: Element,
}

impl App {
    /// Crear la aplicación: bootstrap de sesión en segundo plano, listeners
    /// globales (un solo registro) y suscripción de re-render.
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No existe el elemento #app"))?;

        let state = AppState::new();
        let restorer = Rc::new(RouteRestorer::new());

        // Re-render ante cualquier cambio de estado, batcheado al próximo tick
        state.subscribe_to_changes(move || {
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        // Banner de instalación PWA
        InstallPromptService::new().start_listening(state.ui.clone());

        Self::spawn_bootstrap(&state, &restorer);
        Self::listen_visibility(&state, &restorer)?;

        Ok(Self {
            state,
            scheduler: RefCell::new(None),
            mounted_route: RefCell::new(None),
            root,
        })
    }

    /// Restaurar la sesión guardada y decidir la ruta de arranque
    fn spawn_bootstrap(state: &AppState, restorer: &Rc<RouteRestorer>) {
        let state = state.clone();
        let restorer = restorer.clone();
        spawn_local(async move {
            restorer.reset();

            let manager = SessionManager::new(
                Rc::new(ApiClient::new()),
                Rc::new(LocalTokenStore::new()),
                state.session.clone(),
            );
            let phase = manager.bootstrap().await;

            if let SessionPhase::Authenticated(role) = phase {
                let force = storage::take_flag(KEY_FORCE_RELOAD_AFTER_AUTH);
                let saved = router::saved_path();
                let current = router::current_path();

                if let Some(target) =
                    restorer.on_authenticated(saved.as_deref(), &current, force)
                {
                    log::info!("🗺️ Restaurando última ruta: {}", target);
                    router::navigate_to_path(&target);
                } else if Route::parse(&current).map_or(true, |r| r.is_public()) {
                    // La URL no lleva a ninguna pantalla: a la home del rol
                    router::navigate(&Route::home_for(role));
                }
            }

            // La fase de sesión ya se conoce: despertar a los suscriptores
            state.notify_subscribers();
        });
    }

    /// Al volver la pestaña a primer plano con sesión activa, repetir el
    /// chequeo de restauración (el sistema pudo descartar la SPA en
    /// segundo plano y recrearla en una ruta distinta).
    fn listen_visibility(state: &AppState, restorer: &Rc<RouteRestorer>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No existe document"))?;

        let state = state.clone();
        let restorer = restorer.clone();
        let closure = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            let visible = web_sys::window()
                .and_then(|w| w.document())
                .map(|d| d.visibility_state() == web_sys::VisibilityState::Visible)
                .unwrap_or(false);
            if !visible || !state.session.phase().is_authenticated() {
                return;
            }

            let saved = router::saved_path();
            let current = router::current_path();
            if let Some(target) = restorer.on_visibility_regain(saved.as_deref(), &current) {
                log::info!("🗺️ Pestaña visible de nuevo, volviendo a {}", target);
                router::navigate_to_path(&target);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
        // Listener global: se registra una sola vez en el arranque
        closure.forget();
        Ok(())
    }

    /// Re-render completo: resolver la ruta, aplicar el guard y pintar
    pub fn render(&self) -> Result<(), JsValue> {
        let phase = self.state.session.phase();
        let path = router::current_path();

        // Ruta desconocida: a la home del rol, o al login si no hay sesión
        let route = Route::parse(&path).unwrap_or_else(|| match phase.role() {
            Some(role) => Route::home_for(role),
            None => Route::Login,
        });

        if route.is_public() {
            // Usuario ya autenticado en el login: directo a su home
            if let Some(role) = phase.role() {
                router::navigate(&Route::home_for(role));
                return self.show(views::render_loading_screen()?, None);
            }
            // Mientras la sesión se restaura no mostramos el formulario
            if phase.is_loading() {
                return self.show(views::render_loading_screen()?, None);
            }
            let shell = views::render_shell(&self.state, views::render_login(&self.state)?)?;
            return self.show(shell, Some(route));
        }

        let view = match decide(&phase, route.required_roles()) {
            RouteDecision::Pending => {
                return self.show(views::render_loading_screen()?, None);
            }
            RouteDecision::Redirect => {
                match phase.role() {
                    // Rol equivocado para esta zona: a su propia home
                    Some(role) => router::navigate(&Route::home_for(role)),
                    // Sin sesión: al login
                    None => router::navigate(&Route::Login),
                }
                return self.show(views::render_loading_screen()?, None);
            }
            RouteDecision::Render => self.view_for(&route)?,
        };

        // Persistir la última ruta visitada para restaurarla al reabrir
        router::remember_path(&route.path());

        let shell = views::render_shell(&self.state, view)?;
        self.show(shell, Some(route))
    }

    fn view_for(&self, route: &Route) -> Result<Element, JsValue> {
        match route {
            Route::Login => views::render_login(&self.state),
            Route::Orders => views::render_orders(&self.state),
            Route::OrderNew => views::render_order_new(&self.state),
            Route::OrderDetail(id) => views::render_order_detail(&self.state, id),
            Route::AdminOrders => views::render_admin_orders(&self.state),
            Route::AdminCustomers => views::render_admin_customers(&self.state),
            Route::AdminDistributors => views::render_admin_distributors(&self.state),
        }
    }

    /// Reemplazar el contenido del root y sincronizar el montaje de pantalla
    fn show(&self, view: Element, route: Option<Route>) -> Result<(), JsValue> {
        self.root.set_inner_html("");
        append_child(&self.root, &view)?;
        self.sync_mount(route);
        Ok(())
    }

    /// Efectos de entrada/salida de pantalla. Corren solo cuando la ruta
    /// montada cambia; los re-render de la misma pantalla no los repiten.
    fn sync_mount(&self, route: Option<Route>) {
        if *self.mounted_route.borrow() == route {
            return;
        }
        let previous = self.mounted_route.replace(route.clone());

        // Salir de la pantalla de pedidos detiene el sondeo
        if matches!(previous, Some(Route::Orders)) {
            if let Some(mut scheduler) = self.scheduler.borrow_mut().take() {
                scheduler.stop();
            }
        }

        match route {
            Some(Route::Orders) => self.mount_orders(),
            Some(Route::OrderDetail(id)) => {
                views::order_detail::load_order_detail(&self.state, &id)
            }
            Some(Route::AdminOrders) => views::admin_orders::load_admin_orders(&self.state),
            Some(Route::AdminCustomers) => {
                views::admin_customers::load_admin_customers(&self.state)
            }
            Some(Route::AdminDistributors) => {
                views::admin_distributors::load_admin_distributors(&self.state)
            }
            _ => {}
        }
    }

    /// Entrar a la pantalla de pedidos: fetch inicial + sondeo periódico
    fn mount_orders(&self) {
        let poller = Rc::new(views::orders::production_poller(&self.state));

        {
            let poller = poller.clone();
            let interval = PollScheduler::start(CONFIG.poll_interval_ms, move || {
                let poller = poller.clone();
                spawn_local(async move {
                    poller.poll_tick().await;
                });
            });
            *self.scheduler.borrow_mut() = Some(interval);
        }

        spawn_local(async move {
            poller.mount().await;
        });
    }
}
