use serde::{Deserialize, Serialize};
use crate::models::order::OrderStatus;

/// Página de resultados de los listados de administración
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
}

impl<T> Paged<T> {
    /// Número total de páginas (al menos 1)
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 1;
        }
        ((self.total + self.per_page - 1) / self.per_page).max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Filtros del listado de pedidos del admin
#[derive(Clone, PartialEq, Debug)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub search: String,
    pub page: u32,
}

impl OrderFilter {
    /// Filtro inicial: sin estado, sin búsqueda, primera página
    pub fn first_page() -> Self {
        Self {
            status: None,
            search: String::new(),
            page: 1,
        }
    }
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self::first_page()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total: u32, per_page: u32, page: u32) -> Paged<u32> {
        Paged {
            data: Vec::new(),
            page,
            per_page,
            total,
        }
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(page_of(21, 10, 1).total_pages(), 3);
        assert_eq!(page_of(20, 10, 1).total_pages(), 2);
        assert_eq!(page_of(0, 10, 1).total_pages(), 1);
    }

    #[test]
    fn test_pagination_bounds() {
        let first = page_of(30, 10, 1);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = page_of(30, 10, 3);
        assert!(last.has_prev());
        assert!(!last.has_next());
    }
}
