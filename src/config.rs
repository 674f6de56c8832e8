use serde::{Deserialize, Serialize};

fn default_database() -> String {
    "postgres".to_string()
}

/// Connection details for the PostgreSQL instance a publisher manages.
/// Supplied by the surrounding application's config loader; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationConfig {
    #[serde(default = "default_database")]
    pub database: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

/// Credentials for the MySQL-compatible metadata store the FDW bridges to.
/// The user mapping authenticates as `{user}_{integration_name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MysqlApiConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}
