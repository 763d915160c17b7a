// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod admin_state;
pub mod app_state;
pub mod notify_state;
pub mod orders_state;
pub mod session_state;
pub mod ui_state;

pub use admin_state::AdminState;
pub use app_state::AppState;
pub use notify_state::NotifyState;
pub use orders_state::OrdersState;
pub use session_state::SessionState;
pub use ui_state::UiState;
