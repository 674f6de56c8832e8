//! Publishes predictor models as queryable foreign tables inside a
//! PostgreSQL instance, bridged through `mysql_fdw` to the MySQL-compatible
//! metadata store that actually serves the rows.
//!
//! The flow is linear: [`Publisher::setup`] provisions the foreign server,
//! user mapping, and `mindsdb` schema once; [`Publisher::register_predictors`]
//! and [`Publisher::unregister_predictor`] maintain one foreign table per
//! model; [`Publisher::check_connection`] probes reachability. Every call
//! opens and closes its own connection.

pub mod config;
pub mod model;
pub mod postgres;
pub mod publisher;

pub use config::{IntegrationConfig, MysqlApiConfig};
pub use model::{ColumnAnalysis, ColumnTyping, DataSubtype, DataType, ModelMetadata, UnknownSubtype};
pub use publisher::{
    predictor_table, ExtensionStatus, Publisher, RegisterOutcome, SetupReport, SkippedColumn,
    SCHEMA_NAME, SERVER_NAME,
};
