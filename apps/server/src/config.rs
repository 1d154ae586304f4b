//! Server configuration from environment variables.

/// Runtime configuration, read once at startup. A `.env` file is honored in
/// development.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file.
    pub db_path: String,
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Base URL of the signature platform.
    pub signature_platform_url: String,
    /// Base URL of the payment gateway.
    pub payment_gateway_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            db_path: std::env::var("IPDESK_DB_PATH").unwrap_or_else(|_| "ipdesk.db".to_string()),
            listen_addr: std::env::var("IPDESK_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            signature_platform_url: std::env::var("IPDESK_SIGNATURE_URL")
                .unwrap_or_else(|_| "http://localhost:9471".to_string()),
            payment_gateway_url: std::env::var("IPDESK_PAYMENT_URL")
                .unwrap_or_else(|_| "http://localhost:9472".to_string()),
        }
    }
}
