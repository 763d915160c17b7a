// ============================================================================
// ORDERS POLLER - Ciclo de sondeo de pedidos del repartidor
// ============================================================================
// Carga inicial una sola vez, tick periódico con guard de "ya hay un fetch
// en curso" y refresco manual con aviso al usuario. La lista solo se
// re-commitea cuando hay cambios relevantes (ver snapshot.rs).

use crate::polling::snapshot;
use crate::services::api_client::{ApiError, OrdersApi};
use crate::services::notify::{NoticeLevel, Notifier};
use crate::state::orders_state::OrdersState;
use std::rc::Rc;

pub struct OrdersPoller {
    api: Rc<dyn OrdersApi>,
    orders: OrdersState,
    notifier: Rc<dyn Notifier>,
}

impl OrdersPoller {
    pub fn new(api: Rc<dyn OrdersApi>, orders: OrdersState, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            api,
            orders,
            notifier,
        }
    }

    /// Entrada a la pantalla de pedidos. Consume el flag de refresco forzado
    /// (puesto tras crear/confirmar un pedido en otra pantalla) y lanza la
    /// carga inicial si aún no hay nada. El flag solo se consume cuando el
    /// fetch forzado puede ejecutarse de verdad.
    pub async fn mount(&self) {
        if !self.orders.has_snapshot() {
            self.initial_load().await;
            return;
        }

        if !self.orders.take_force_fetch() {
            return;
        }

        if self.orders.get_fetching() {
            // El fetch en vuelo traerá datos frescos; el flag se conserva
            self.orders.arm_force_fetch();
            return;
        }

        log::info!("📦 Entrando a pedidos con refresco forzado");
        if let Err(e) = self.fetch_if_changed(true).await {
            log::warn!("⚠️ Error en el refresco forzado: {}", e);
        }
    }

    /// Carga inicial: solo si ningún fetch ha poblado la lista todavía
    pub async fn initial_load(&self) {
        if self.orders.has_snapshot() || self.orders.get_loading() {
            return;
        }
        self.orders.set_loading(true);
        self.orders.set_error(None);
        crate::rerender_app();

        match self.fetch_if_changed(false).await {
            Ok(_) => {}
            Err(e) => {
                log::error!("❌ Error cargando pedidos: {}", e);
                self.orders.set_error(Some(e.to_string()));
            }
        }

        self.orders.set_loading(false);
        crate::rerender_app();
    }

    /// Tick del timer. Si el fetch anterior sigue en vuelo, el tick se salta
    /// (no se encola). Los errores de red del sondeo solo se loguean.
    pub async fn poll_tick(&self) {
        if self.orders.get_fetching() {
            log::info!("🔄 Fetch de pedidos ya en curso, saltando tick...");
            return;
        }
        if let Err(e) = self.fetch_if_changed(false).await {
            log::warn!("⚠️ Error sondeando pedidos: {}", e);
        }
    }

    /// Fetch de comparación: pide la lista y la commitea solo si `force` o
    /// si difiere del snapshot actual. Devuelve si los datos cambiaron.
    pub async fn fetch_if_changed(&self, force: bool) -> Result<bool, ApiError> {
        if self.orders.get_fetching() {
            return Ok(false);
        }

        self.orders.set_fetching(true);
        let result = self.api.fetch_orders().await;
        self.orders.set_fetching(false);

        let fetched = result?;

        let changed = match self.orders.get_orders() {
            None => true,
            Some(current) => snapshot::orders_differ(&current, &fetched),
        };

        if force || changed {
            if changed {
                log::info!("📦 Pedidos actualizados: {} (cambios detectados)", fetched.len());
            } else {
                log::info!("📦 Snapshot reescrito sin cambios ({} pedidos)", fetched.len());
            }
            self.orders.set_orders(fetched);
            crate::rerender_app();
        } else {
            log::info!("✅ Pedidos al día ({} sin cambios)", fetched.len());
        }

        Ok(changed)
    }

    /// Refresco manual (pull-to-refresh o botón). No-op si ya hay un
    /// refresco o fetch en curso. Siempre limpia el flag de refresco y el
    /// gesto al terminar, con o sin error.
    pub async fn manual_refresh(&self) {
        if self.orders.get_refreshing() || self.orders.get_fetching() {
            log::info!("🔄 Refresco manual ya en curso, saltando...");
            return;
        }

        self.orders.set_refreshing(true);
        crate::rerender_app();

        match self.fetch_if_changed(true).await {
            Ok(true) => self.notifier.notify(NoticeLevel::Success, "Pedidos actualizados"),
            Ok(false) => self.notifier.notify(NoticeLevel::Info, "Ya estabas al día"),
            Err(e) => {
                log::error!("❌ Error refrescando pedidos: {}", e);
                self.notifier
                    .notify(NoticeLevel::Error, "No se pudieron actualizar los pedidos");
            }
        }

        self.orders.set_refreshing(false);
        self.orders.pull.reset();
        crate::rerender_app();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerInfo, Location, NewOrder, Order, OrderStatus};
    use crate::services::notify::RecordingNotifier;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use futures::pin_mut;
    use futures::task::noop_waker;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::future::Future;
    use std::task::{Context, Poll};

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            status,
            cost: 150.0,
            location: Location {
                latitude: 19.4,
                longitude: -99.1,
                label: None,
            },
            customer: CustomerInfo {
                name: "Luis Mora".to_string(),
                phone: None,
                address: None,
            },
            created_at: None,
        }
    }

    #[derive(Default)]
    struct MockOrdersApi {
        queue: RefCell<VecDeque<Result<Vec<Order>, ApiError>>>,
        fetch_calls: Cell<u32>,
    }

    impl MockOrdersApi {
        fn with_lists(lists: Vec<Vec<Order>>) -> Rc<Self> {
            let api = Rc::new(Self::default());
            for list in lists {
                api.queue.borrow_mut().push_back(Ok(list));
            }
            api
        }

        fn failing() -> Rc<Self> {
            let api = Rc::new(Self::default());
            api.queue
                .borrow_mut()
                .push_back(Err(ApiError::Network("sin conexión".to_string())));
            api
        }
    }

    #[async_trait(?Send)]
    impl OrdersApi for MockOrdersApi {
        async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
            self.fetch_calls.set(self.fetch_calls.get() + 1);
            self.queue
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("cola vacía".to_string())))
        }

        async fn fetch_order(&self, _id: &str) -> Result<Order, ApiError> {
            Err(ApiError::Network("no usado".to_string()))
        }

        async fn create_order(&self, _draft: &NewOrder) -> Result<Order, ApiError> {
            Err(ApiError::Network("no usado".to_string()))
        }

        async fn confirm_order(&self, _id: &str) -> Result<Order, ApiError> {
            Err(ApiError::Network("no usado".to_string()))
        }

        async fn deactivate_distributor(&self) -> Result<(), ApiError> {
            Err(ApiError::Network("no usado".to_string()))
        }
    }

    // API cuyo fetch queda en vuelo hasta que se abre la compuerta. Permite
    // entrelazar llamadas concurrentes sondeando el futuro a mano.
    struct GatedOrdersApi {
        open: Cell<bool>,
        result: RefCell<Option<Vec<Order>>>,
        fetch_calls: Cell<u32>,
    }

    impl GatedOrdersApi {
        fn with_list(list: Vec<Order>) -> Rc<Self> {
            Rc::new(Self {
                open: Cell::new(false),
                result: RefCell::new(Some(list)),
                fetch_calls: Cell::new(0),
            })
        }
    }

    #[async_trait(?Send)]
    impl OrdersApi for GatedOrdersApi {
        async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
            self.fetch_calls.set(self.fetch_calls.get() + 1);
            futures::future::poll_fn(|cx| {
                if self.open.get() {
                    Poll::Ready(())
                } else {
                    cx.waker().wake_by_ref();
                    Poll::Pending
                }
            })
            .await;
            self.result
                .borrow_mut()
                .take()
                .ok_or_else(|| ApiError::Network("sin resultado".to_string()))
        }

        async fn fetch_order(&self, _id: &str) -> Result<Order, ApiError> {
            Err(ApiError::Network("no usado".to_string()))
        }

        async fn create_order(&self, _draft: &NewOrder) -> Result<Order, ApiError> {
            Err(ApiError::Network("no usado".to_string()))
        }

        async fn confirm_order(&self, _id: &str) -> Result<Order, ApiError> {
            Err(ApiError::Network("no usado".to_string()))
        }

        async fn deactivate_distributor(&self) -> Result<(), ApiError> {
            Err(ApiError::Network("no usado".to_string()))
        }
    }

    fn poller(
        api: Rc<MockOrdersApi>,
    ) -> (OrdersPoller, Rc<MockOrdersApi>, OrdersState, Rc<RecordingNotifier>) {
        let orders = OrdersState::new();
        let notifier = Rc::new(RecordingNotifier::new());
        let poller = OrdersPoller::new(api.clone(), orders.clone(), notifier.clone());
        (poller, api, orders, notifier)
    }

    #[test]
    fn test_mount_loads_first_snapshot() {
        let api = MockOrdersApi::with_lists(vec![vec![order("o1", OrderStatus::New)]]);
        let (poller, api, orders, _) = poller(api);

        block_on(poller.mount());

        assert_eq!(api.fetch_calls.get(), 1);
        assert!(!orders.get_loading());
        let snapshot = orders.get_orders().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "o1");
    }

    #[test]
    fn test_mount_with_snapshot_does_not_refetch() {
        let api = MockOrdersApi::with_lists(vec![]);
        let (poller, api, orders, _) = poller(api);
        orders.set_orders(vec![order("o1", OrderStatus::New)]);

        block_on(poller.mount());

        assert_eq!(api.fetch_calls.get(), 0);
    }

    #[test]
    fn test_force_fetch_flag_is_one_shot() {
        let api = MockOrdersApi::with_lists(vec![
            vec![order("o1", OrderStatus::New)],
            vec![order("o1", OrderStatus::New)],
        ]);
        let (poller, api, orders, _) = poller(api);
        orders.set_orders(vec![order("o1", OrderStatus::New)]);
        orders.arm_force_fetch();

        block_on(poller.mount());
        assert_eq!(api.fetch_calls.get(), 1);

        // Segunda entrada: el flag ya fue consumido
        block_on(poller.mount());
        assert_eq!(api.fetch_calls.get(), 1);
    }

    #[test]
    fn test_force_fetch_kept_while_fetch_in_flight() {
        let api = MockOrdersApi::with_lists(vec![vec![order("o1", OrderStatus::Confirmed)]]);
        let (poller, api, orders, _) = poller(api);
        orders.set_orders(vec![order("o1", OrderStatus::New)]);
        orders.arm_force_fetch();
        orders.set_fetching(true);

        // Con un fetch en vuelo la entrada no lanza nada, pero tampoco
        // pierde el refresco pendiente
        block_on(poller.mount());
        block_on(poller.mount());
        assert_eq!(api.fetch_calls.get(), 0);

        orders.set_fetching(false);
        block_on(poller.mount());

        assert_eq!(api.fetch_calls.get(), 1);
        assert_eq!(orders.get_orders().unwrap()[0].status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_tick_skipped_while_fetch_in_flight() {
        let api = MockOrdersApi::with_lists(vec![vec![order("o1", OrderStatus::New)]]);
        let (poller, api, orders, _) = poller(api);
        orders.set_fetching(true);

        block_on(poller.poll_tick());

        assert_eq!(api.fetch_calls.get(), 0);
    }

    #[test]
    fn test_unchanged_list_is_not_committed() {
        let initial = vec![order("o1", OrderStatus::New), order("o2", OrderStatus::Pending)];
        // El backend devuelve lo mismo pero en otro orden
        let reordered = vec![initial[1].clone(), initial[0].clone()];
        let api = MockOrdersApi::with_lists(vec![reordered]);
        let (poller, _, orders, _) = poller(api);
        orders.set_orders(initial);

        let changed = block_on(poller.fetch_if_changed(false)).unwrap();

        assert!(!changed);
        // Sin commit: se conserva el orden original
        assert_eq!(orders.get_orders().unwrap()[0].id, "o1");
    }

    #[test]
    fn test_status_change_is_committed() {
        let api = MockOrdersApi::with_lists(vec![vec![order("o1", OrderStatus::Confirmed)]]);
        let (poller, _, orders, _) = poller(api);
        orders.set_orders(vec![order("o1", OrderStatus::New)]);

        let changed = block_on(poller.fetch_if_changed(false)).unwrap();

        assert!(changed);
        assert_eq!(orders.get_orders().unwrap()[0].status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_manual_refresh_reports_changes() {
        let api = MockOrdersApi::with_lists(vec![vec![order("o2", OrderStatus::New)]]);
        let (poller, _, orders, notifier) = poller(api);
        orders.set_orders(vec![order("o1", OrderStatus::New)]);

        block_on(poller.manual_refresh());

        assert_eq!(
            notifier.messages(),
            vec![(NoticeLevel::Success, "Pedidos actualizados".to_string())]
        );
        assert!(!orders.get_refreshing());
    }

    #[test]
    fn test_manual_refresh_reports_already_fresh() {
        let current = vec![order("o1", OrderStatus::New)];
        let api = MockOrdersApi::with_lists(vec![current.clone()]);
        let (poller, _, orders, notifier) = poller(api);
        orders.set_orders(current);

        block_on(poller.manual_refresh());

        assert_eq!(
            notifier.messages(),
            vec![(NoticeLevel::Info, "Ya estabas al día".to_string())]
        );
    }

    #[test]
    fn test_manual_refresh_failure_clears_flags_and_gesture() {
        let api = MockOrdersApi::failing();
        let (poller, _, orders, notifier) = poller(api);
        orders.set_orders(vec![order("o1", OrderStatus::New)]);
        orders.pull.touch_start(0.0, true, false);
        let _ = orders.pull.touch_move(400.0, false);

        block_on(poller.manual_refresh());

        assert_eq!(notifier.messages().len(), 1);
        assert_eq!(notifier.messages()[0].0, NoticeLevel::Error);
        assert!(!orders.get_refreshing());
        assert_eq!(orders.pull.distance(), 0.0);
        // El snapshot anterior sigue intacto
        assert_eq!(orders.get_orders().unwrap()[0].id, "o1");
    }

    #[test]
    fn test_manual_refresh_noop_while_refreshing() {
        let api = MockOrdersApi::with_lists(vec![vec![order("o1", OrderStatus::New)]]);
        let (poller, api, orders, notifier) = poller(api);
        orders.set_refreshing(true);

        block_on(poller.manual_refresh());

        assert_eq!(api.fetch_calls.get(), 0);
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_manual_refresh_single_call_while_request_pending() {
        let api = GatedOrdersApi::with_list(vec![order("o1", OrderStatus::Confirmed)]);
        let orders = OrdersState::new();
        let notifier = Rc::new(RecordingNotifier::new());
        let poller = OrdersPoller::new(api.clone(), orders.clone(), notifier.clone());
        orders.set_orders(vec![order("o1", OrderStatus::New)]);

        let first = poller.manual_refresh();
        pin_mut!(first);
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        // El primer refresco queda en vuelo con la petición ya lanzada
        assert!(first.as_mut().poll(&mut cx).is_pending());
        assert_eq!(api.fetch_calls.get(), 1);

        // Un segundo refresco mientras tanto no lanza otra petición ni avisa
        block_on(poller.manual_refresh());
        assert_eq!(api.fetch_calls.get(), 1);
        assert!(notifier.messages().is_empty());

        api.open.set(true);
        assert!(first.as_mut().poll(&mut cx).is_ready());

        // Una sola petición, un solo commit, un solo aviso
        assert_eq!(api.fetch_calls.get(), 1);
        assert_eq!(orders.get_orders().unwrap()[0].status, OrderStatus::Confirmed);
        assert_eq!(
            notifier.messages(),
            vec![(NoticeLevel::Success, "Pedidos actualizados".to_string())]
        );
        assert!(!orders.get_refreshing());
    }

    #[test]
    fn test_poll_error_does_not_notify() {
        let api = MockOrdersApi::failing();
        let (poller, _, orders, notifier) = poller(api);
        orders.set_orders(vec![order("o1", OrderStatus::New)]);

        block_on(poller.poll_tick());

        assert!(notifier.messages().is_empty());
        assert_eq!(orders.get_orders().unwrap().len(), 1);
    }
}
