use serde::{Deserialize, Serialize};

/// Rol del usuario autenticado
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Role {
    Admin,
    Distributor,
}

impl Role {
    /// Parsear el claim `role` del token (el backend lo envía en minúsculas)
    pub fn from_claim(value: &str) -> Option<Role> {
        match value.to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "distributor" => Some(Role::Distributor),
            _ => None,
        }
    }

    /// Valor persistido en storage / enviado en claims
    pub fn as_claim(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Distributor => "distributor",
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Par de tokens que devuelve el backend en login y refresh
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenPair {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Payload decodificado del access token (solo los claims que usamos)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenClaims {
    pub role: String,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}
