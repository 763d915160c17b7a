use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Distributor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    /// `false` cuando el distribuidor cerró su turno
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
