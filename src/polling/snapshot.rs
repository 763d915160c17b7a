// ============================================================================
// SNAPSHOT - Comparación de listas de pedidos
// ============================================================================

use crate::models::Order;
use std::collections::HashMap;

/// Compara dos listas de pedidos para detectar cambios relevantes.
/// El orden de la lista NO cuenta como cambio: el backend no garantiza
/// un orden estable y re-renderizar por eso haría parpadear la pantalla.
pub fn orders_differ(current: &[Order], fetched: &[Order]) -> bool {
    if current.len() != fetched.len() {
        return true;
    }

    let by_id: HashMap<&str, &Order> = current.iter().map(|o| (o.id.as_str(), o)).collect();

    for order in fetched {
        match by_id.get(order.id.as_str()) {
            None => return true, // Pedido nuevo (y alguno anterior desapareció)
            Some(prev) => {
                if prev.status != order.status
                    || prev.cost != order.cost
                    || prev.location != order.location
                    || prev.customer != order.customer
                {
                    return true;
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerInfo, Location, OrderStatus};

    fn order(id: &str, status: OrderStatus, cost: f64) -> Order {
        Order {
            id: id.to_string(),
            status,
            cost,
            location: Location {
                latitude: 19.43,
                longitude: -99.13,
                label: Some("Centro".to_string()),
            },
            customer: CustomerInfo {
                name: "Ana Torres".to_string(),
                phone: Some("5550001111".to_string()),
                address: Some("Av. Juárez 10".to_string()),
            },
            created_at: None,
        }
    }

    #[test]
    fn test_equal_lists_do_not_differ() {
        let a = vec![order("o1", OrderStatus::New, 120.0), order("o2", OrderStatus::Pending, 80.5)];
        let b = a.clone();
        assert!(!orders_differ(&a, &b));
    }

    #[test]
    fn test_reorder_alone_is_not_a_change() {
        let a = vec![order("o1", OrderStatus::New, 120.0), order("o2", OrderStatus::Pending, 80.5)];
        let b = vec![a[1].clone(), a[0].clone()];
        assert!(!orders_differ(&a, &b));
    }

    #[test]
    fn test_status_change_differs() {
        let a = vec![order("o1", OrderStatus::New, 120.0)];
        let b = vec![order("o1", OrderStatus::Confirmed, 120.0)];
        assert!(orders_differ(&a, &b));
    }

    #[test]
    fn test_cost_change_differs() {
        let a = vec![order("o1", OrderStatus::New, 120.0)];
        let b = vec![order("o1", OrderStatus::New, 125.0)];
        assert!(orders_differ(&a, &b));
    }

    #[test]
    fn test_added_or_removed_order_differs() {
        let a = vec![order("o1", OrderStatus::New, 120.0)];
        let b = vec![order("o1", OrderStatus::New, 120.0), order("o2", OrderStatus::New, 60.0)];
        assert!(orders_differ(&a, &b));
        assert!(orders_differ(&b, &a));
    }

    #[test]
    fn test_replaced_id_differs() {
        // Mismo tamaño pero un id distinto
        let a = vec![order("o1", OrderStatus::New, 120.0)];
        let b = vec![order("o9", OrderStatus::New, 120.0)];
        assert!(orders_differ(&a, &b));
    }

    #[test]
    fn test_customer_and_location_changes_differ() {
        let a = vec![order("o1", OrderStatus::New, 120.0)];

        let mut moved = a.clone();
        moved[0].location.latitude = 19.50;
        assert!(orders_differ(&a, &moved));

        let mut renamed = a.clone();
        renamed[0].customer.phone = None;
        assert!(orders_differ(&a, &renamed));
    }
}
