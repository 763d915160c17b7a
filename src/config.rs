use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Intervalo del polling de pedidos en milisegundos
    pub poll_interval_ms: u32,
    /// Tiempo que permanece visible una notificación toast
    pub toast_duration_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:3000".to_string(),
            backend_url_production: "https://api.pedidos.nexuslabs.one".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            poll_interval_ms: 5000,
            toast_duration_ms: 4000,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .unwrap_or("http://localhost:3000").to_string(),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .unwrap_or("https://api.pedidos.nexuslabs.one").to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            poll_interval_ms: option_env!("POLL_INTERVAL_MS")
                .unwrap_or("5000").parse().unwrap_or(5000),
            toast_duration_ms: option_env!("TOAST_DURATION_MS")
                .unwrap_or("4000").parse().unwrap_or(4000),
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_url_follows_environment() {
        let mut config = AppConfig::default();
        assert_eq!(config.backend_url(), config.backend_url_development);

        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), config.backend_url_production);
    }
}
