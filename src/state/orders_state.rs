// ============================================================================
// ORDERS STATE - Pedidos del repartidor y flags del sondeo
// ============================================================================

use crate::models::Order;
use crate::polling::gesture::PullGesture;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::rc::Rc;

/// Estado compartido de la pantalla de pedidos.
/// `orders == None` significa "nunca se ha cargado nada" y dispara la carga
/// inicial; a partir de ahí la lista actual es también el snapshot de
/// referencia para la comparación del sondeo.
#[derive(Clone)]
pub struct OrdersState {
    pub orders: Rc<RefCell<Option<Vec<Order>>>>,
    pub loading: Rc<RefCell<bool>>,
    pub fetching: Rc<RefCell<bool>>,
    pub refreshing: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
    pub last_update: Rc<RefCell<Option<DateTime<Utc>>>>,
    pub force_next_fetch: Rc<RefCell<bool>>,
    pub pull: Rc<PullGesture>,

    // Pantalla de detalle
    pub detail: Rc<RefCell<Option<Order>>>,
    pub detail_loading: Rc<RefCell<bool>>,
    pub detail_error: Rc<RefCell<Option<String>>>,
}

impl OrdersState {
    pub fn new() -> Self {
        Self {
            orders: Rc::new(RefCell::new(None)),
            loading: Rc::new(RefCell::new(false)),
            fetching: Rc::new(RefCell::new(false)),
            refreshing: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
            last_update: Rc::new(RefCell::new(None)),
            force_next_fetch: Rc::new(RefCell::new(false)),
            pull: Rc::new(PullGesture::new()),
            detail: Rc::new(RefCell::new(None)),
            detail_loading: Rc::new(RefCell::new(false)),
            detail_error: Rc::new(RefCell::new(None)),
        }
    }

    /// Obtener la lista actual (None si nunca se cargó)
    pub fn get_orders(&self) -> Option<Vec<Order>> {
        self.orders.borrow().clone()
    }

    /// Commit de un snapshot nuevo
    pub fn set_orders(&self, orders: Vec<Order>) {
        *self.orders.borrow_mut() = Some(orders);
        *self.last_update.borrow_mut() = Some(Utc::now());
    }

    /// ¿Hay algún snapshot cargado?
    pub fn has_snapshot(&self) -> bool {
        self.orders.borrow().is_some()
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn set_fetching(&self, fetching: bool) {
        *self.fetching.borrow_mut() = fetching;
    }

    pub fn get_fetching(&self) -> bool {
        *self.fetching.borrow()
    }

    pub fn set_refreshing(&self, refreshing: bool) {
        *self.refreshing.borrow_mut() = refreshing;
    }

    pub fn get_refreshing(&self) -> bool {
        *self.refreshing.borrow()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn get_last_update(&self) -> Option<DateTime<Utc>> {
        *self.last_update.borrow()
    }

    /// El gesto de arrastre está inerte durante la carga inicial o un
    /// refresco manual
    pub fn busy(&self) -> bool {
        self.get_loading() || self.get_refreshing()
    }

    /// Marcar que la próxima entrada a la pantalla debe refrescar sí o sí
    /// (tras crear/confirmar un pedido en otra pantalla)
    pub fn arm_force_fetch(&self) {
        *self.force_next_fetch.borrow_mut() = true;
    }

    /// Consumir el flag de refresco forzado (one-shot)
    pub fn take_force_fetch(&self) -> bool {
        std::mem::replace(&mut *self.force_next_fetch.borrow_mut(), false)
    }

    pub fn get_detail(&self) -> Option<Order> {
        self.detail.borrow().clone()
    }

    pub fn set_detail(&self, order: Option<Order>) {
        *self.detail.borrow_mut() = order;
    }

    pub fn set_detail_loading(&self, loading: bool) {
        *self.detail_loading.borrow_mut() = loading;
    }

    pub fn get_detail_loading(&self) -> bool {
        *self.detail_loading.borrow()
    }

    pub fn set_detail_error(&self, error: Option<String>) {
        *self.detail_error.borrow_mut() = error;
    }

    pub fn get_detail_error(&self) -> Option<String> {
        self.detail_error.borrow().clone()
    }

    /// Dejar el estado como recién arrancado (logout)
    pub fn reset(&self) {
        *self.orders.borrow_mut() = None;
        *self.loading.borrow_mut() = false;
        *self.fetching.borrow_mut() = false;
        *self.refreshing.borrow_mut() = false;
        *self.error.borrow_mut() = None;
        *self.last_update.borrow_mut() = None;
        *self.force_next_fetch.borrow_mut() = false;
        self.pull.reset();
        *self.detail.borrow_mut() = None;
        *self.detail_loading.borrow_mut() = false;
        *self.detail_error.borrow_mut() = None;
    }
}

impl Default for OrdersState {
    fn default() -> Self {
        Self::new()
    }
}
