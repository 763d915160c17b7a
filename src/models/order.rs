use serde::{Deserialize, Serialize};

/// Estado del ciclo de vida de un pedido
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Pending,
    Confirmed,
}

impl OrderStatus {
    /// Valor en minúsculas que espera el backend en query params
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
        }
    }

    /// Etiqueta legible para la UI
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "Nuevo",
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Confirmed => "Confirmado",
        }
    }

    /// Clase CSS del badge de estado
    pub fn css_class(&self) -> &'static str {
        match self {
            OrderStatus::New => "status-badge status-badge--new",
            OrderStatus::Pending => "status-badge status-badge--pending",
            OrderStatus::Confirmed => "status-badge status-badge--confirmed",
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Referencia legible del punto de entrega, si el pedido la trae
    #[serde(default)]
    pub label: Option<String>,
}

/// Datos del cliente embebidos en el pedido
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct CustomerInfo {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub cost: f64,
    pub location: Location,
    pub customer: CustomerInfo,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload para crear un pedido nuevo (formulario del distribuidor)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewOrder {
    pub cost: f64,
    pub location: Location,
    pub customer: CustomerInfo,
}
