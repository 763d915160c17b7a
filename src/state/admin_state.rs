// ============================================================================
// ADMIN STATE - Listados paginados del panel de administración
// ============================================================================

use crate::models::{Customer, Distributor, Order, OrderFilter, Paged};
use std::cell::RefCell;
use std::rc::Rc;

/// Estado de las tres pantallas de administración. Cada listado guarda la
/// última página recibida; los filtros viven aquí para sobrevivir a los
/// re-render.
#[derive(Clone)]
pub struct AdminState {
    pub orders: Rc<RefCell<Option<Paged<Order>>>>,
    pub orders_filter: Rc<RefCell<OrderFilter>>,

    pub customers: Rc<RefCell<Option<Paged<Customer>>>>,
    pub customers_search: Rc<RefCell<String>>,
    pub customers_page: Rc<RefCell<u32>>,

    pub distributors: Rc<RefCell<Option<Paged<Distributor>>>>,
    pub distributors_page: Rc<RefCell<u32>>,

    pub loading: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
}

impl AdminState {
    pub fn new() -> Self {
        Self {
            orders: Rc::new(RefCell::new(None)),
            orders_filter: Rc::new(RefCell::new(OrderFilter::default())),
            customers: Rc::new(RefCell::new(None)),
            customers_search: Rc::new(RefCell::new(String::new())),
            customers_page: Rc::new(RefCell::new(1)),
            distributors: Rc::new(RefCell::new(None)),
            distributors_page: Rc::new(RefCell::new(1)),
            loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn get_orders_filter(&self) -> OrderFilter {
        self.orders_filter.borrow().clone()
    }

    pub fn set_orders_filter(&self, filter: OrderFilter) {
        *self.orders_filter.borrow_mut() = filter;
    }

    /// Vaciar todos los listados (logout)
    pub fn reset(&self) {
        *self.orders.borrow_mut() = None;
        *self.orders_filter.borrow_mut() = OrderFilter::default();
        *self.customers.borrow_mut() = None;
        *self.customers_search.borrow_mut() = String::new();
        *self.customers_page.borrow_mut() = 1;
        *self.distributors.borrow_mut() = None;
        *self.distributors_page.borrow_mut() = 1;
        *self.loading.borrow_mut() = false;
        *self.error.borrow_mut() = None;
    }
}

impl Default for AdminState {
    fn default() -> Self {
        Self::new()
    }
}
