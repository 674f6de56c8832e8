use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, warn};
use postgres::{Client, NoTls};
use sha2::{Digest, Sha256};

use crate::config::{IntegrationConfig, MysqlApiConfig};
use crate::model::{DataSubtype, DataType, ModelMetadata};
use crate::postgres::{
    Column, DropForeignServer, DropForeignTable, DropSchema, DropUserMapping, EnsureExtension,
    ForeignServer, ForeignTable, Schema, UserMapping,
};

/// Schema holding every published foreign table, and also the name of the
/// remote database the tables are mapped to.
pub const SCHEMA_NAME: &str = "mindsdb";
pub const SERVER_NAME: &str = "mindsdb_server";
const WRAPPER_NAME: &str = "mysql_fdw";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Publishes predictor models as foreign tables in a PostgreSQL instance.
///
/// Every operation opens its own connection, runs its statements, and closes
/// it; there is no pooling and no state shared between calls.
pub struct Publisher {
    name: String,
    integration: IntegrationConfig,
    api: MysqlApiConfig,
}

/// Whether `setup` managed to activate the bridging extension. Activation can
/// fail on servers where the role lacks permission while the extension is
/// already installed, so this degrades the report instead of failing setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionStatus {
    Ready,
    Skipped(String),
}

#[derive(Debug, Clone)]
pub struct SetupReport {
    pub extension: ExtensionStatus,
}

/// A column left out of a published table because its subtype label was not
/// recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedColumn {
    pub column: String,
    pub data_subtype: String,
}

#[derive(Debug, Clone)]
pub struct RegisterOutcome {
    pub name: String,
    pub skipped_columns: Vec<SkippedColumn>,
}

impl Publisher {
    pub fn new(
        name: impl Into<String>,
        integration: IntegrationConfig,
        api: MysqlApiConfig,
    ) -> Self {
        Self {
            name: name.into(),
            integration,
            api,
        }
    }

    fn connect(&self) -> Result<Client> {
        let mut cfg = postgres::Config::new();
        cfg.host(&self.integration.host)
            .port(self.integration.port)
            .user(&self.integration.user)
            .password(&self.integration.password)
            .dbname(&self.integration.database)
            .connect_timeout(CONNECT_TIMEOUT);
        cfg.connect(NoTls).with_context(|| {
            format!(
                "connecting to postgres at {}:{}",
                self.integration.host, self.integration.port
            )
        })
    }

    /// Concurrent publishers race on DDL otherwise, so every mutating
    /// operation serializes on an advisory lock scoped to this integration.
    /// The lock is session-level and released when the connection closes.
    fn connect_locked(&self) -> Result<Client> {
        let mut client = self.connect()?;
        client
            .query("SELECT pg_advisory_lock($1)", &[&self.ddl_lock_key()])
            .context("acquiring ddl advisory lock")?;
        Ok(client)
    }

    fn ddl_lock_key(&self) -> i64 {
        let digest = Sha256::digest(format!("{}/{}", SERVER_NAME, self.name).as_bytes());
        let mut key = [0u8; 8];
        key.copy_from_slice(&digest[..8]);
        i64::from_be_bytes(key)
    }

    /// (Re-)establishes the bridging infrastructure: extension, foreign
    /// server, user mapping, the `mindsdb` schema, and the two fixed foreign
    /// tables. Idempotent by construction; existing objects (including all
    /// previously registered predictor tables) are dropped first.
    pub fn setup(&self) -> Result<SetupReport> {
        let mut client = self.connect_locked()?;

        let ensure = EnsureExtension {
            name: WRAPPER_NAME.into(),
        };
        let extension = match client.batch_execute(&ensure.to_string()) {
            Ok(()) => ExtensionStatus::Ready,
            Err(e) => {
                warn!("cannot find or activate the {WRAPPER_NAME} extension: {e}");
                ExtensionStatus::Skipped(e.to_string())
            }
        };

        let drop_schema = DropSchema {
            name: SCHEMA_NAME.into(),
            cascade: true,
        };
        client
            .batch_execute(&drop_schema.to_string())
            .context("dropping schema")?;

        let drop_mapping = DropUserMapping {
            user: self.integration.user.clone(),
            server: SERVER_NAME.into(),
        };
        client
            .batch_execute(&drop_mapping.to_string())
            .context("dropping user mapping")?;

        let drop_server = DropForeignServer {
            name: SERVER_NAME.into(),
        };
        client
            .batch_execute(&drop_server.to_string())
            .context("dropping foreign server")?;

        let server = ForeignServer {
            name: SERVER_NAME.into(),
            wrapper: WRAPPER_NAME.into(),
            host: self.api.host.clone(),
            port: self.api.port,
        };
        client
            .batch_execute(&server.to_string())
            .context("creating foreign server")?;

        let mapping = UserMapping {
            user: self.integration.user.clone(),
            server: SERVER_NAME.into(),
            username: format!("{}_{}", self.api.user, self.name),
            password: self.api.password.clone(),
        };
        client
            .batch_execute(&mapping.to_string())
            .context("creating user mapping")?;

        let schema = Schema {
            name: SCHEMA_NAME.into(),
        };
        client
            .batch_execute(&schema.to_string())
            .context("creating schema")?;

        for table in [predictors_table(), commands_table()] {
            client
                .batch_execute(&table.to_string())
                .with_context(|| format!("creating foreign table {}", table.name))?;
        }

        Ok(SetupReport { extension })
    }

    /// Creates one foreign table per model. A column with an unrecognized
    /// subtype is logged and omitted while the table is still created; a
    /// failing model aborts the batch but leaves earlier tables in place.
    pub fn register_predictors(&self, models: &[ModelMetadata]) -> Result<Vec<RegisterOutcome>> {
        let mut client = self.connect_locked()?;
        let mut outcomes = Vec::with_capacity(models.len());
        for meta in models {
            let (table, skipped) = predictor_table(meta);
            for s in &skipped {
                warn!(
                    "cannot convert type '{}' of column '{}' to a postgres type; column omitted",
                    s.data_subtype, s.column
                );
            }
            client
                .batch_execute(&table.to_string())
                .with_context(|| format!("registering predictor '{}'", meta.name))?;
            outcomes.push(RegisterOutcome {
                name: meta.name.clone(),
                skipped_columns: skipped,
            });
        }
        Ok(outcomes)
    }

    /// Drops the foreign table for `name`; a no-op when it does not exist.
    pub fn unregister_predictor(&self, name: &str) -> Result<()> {
        let mut client = self.connect_locked()?;
        let drop = DropForeignTable {
            schema: SCHEMA_NAME.into(),
            name: name.into(),
        };
        client
            .batch_execute(&drop.to_string())
            .with_context(|| format!("unregistering predictor '{name}'"))?;
        Ok(())
    }

    /// Connects and runs a trivial query. Every failure mode (bad
    /// credentials, unreachable host, refused connection) reduces to `false`.
    pub fn check_connection(&self) -> bool {
        let probe = self
            .connect()
            .and_then(|mut client| client.simple_query("select 1;").map_err(Into::into));
        match probe {
            Ok(_) => true,
            Err(e) => {
                debug!("connection check failed: {e:#}");
                false
            }
        }
    }
}

/// Builds the foreign table for one model: each analyzed column mapped to its
/// postgres type, `{col}_original` duplicates for predicted columns, then the
/// fixed query columns and the per-prediction confidence/explain block
/// (min/max only for numeric outputs).
pub fn predictor_table(meta: &ModelMetadata) -> (ForeignTable, Vec<SkippedColumn>) {
    let mut columns = Vec::new();
    let mut skipped = Vec::new();

    for (name, analysis) in &meta.data_analysis {
        let subtype = match analysis.typing.data_subtype.parse::<DataSubtype>() {
            Ok(subtype) => subtype,
            Err(_) => {
                skipped.push(SkippedColumn {
                    column: name.clone(),
                    data_subtype: analysis.typing.data_subtype.clone(),
                });
                continue;
            }
        };
        let ty = subtype.column_type();
        columns.push(Column::new(name.clone(), ty));
        if meta.predict.iter().any(|p| p == name) {
            columns.push(Column::new(format!("{name}_original"), ty));
        }
    }

    columns.push(Column::new("select_data_query", "text"));
    columns.push(Column::new("external_datasource", "text"));
    for col in &meta.predict {
        columns.push(Column::new(format!("{col}_confidence"), "float8"));
        let numeric = meta
            .data_analysis
            .get(col)
            .is_some_and(|a| a.typing.data_type == DataType::Numeric);
        if numeric {
            columns.push(Column::new(format!("{col}_min"), "float8"));
            columns.push(Column::new(format!("{col}_max"), "float8"));
        }
        columns.push(Column::new(format!("{col}_explain"), "text"));
    }

    let table = ForeignTable {
        schema: SCHEMA_NAME.into(),
        name: meta.name.clone(),
        server: SERVER_NAME.into(),
        if_not_exists: false,
        columns,
        dbname: SCHEMA_NAME.into(),
        table_name: meta.name.clone(),
    };
    (table, skipped)
}

/// The registry of published models on the metadata-store side.
fn predictors_table() -> ForeignTable {
    let columns = [
        "name",
        "status",
        "accuracy",
        "predict",
        "select_data_query",
        "external_datasource",
        "training_options",
    ]
    .into_iter()
    .map(|name| Column::new(name, "text"))
    .collect();
    fixed_table("predictors", columns)
}

fn commands_table() -> ForeignTable {
    fixed_table("commands", vec![Column::new("command", "text")])
}

fn fixed_table(name: &str, columns: Vec<Column>) -> ForeignTable {
    ForeignTable {
        schema: SCHEMA_NAME.into(),
        name: name.into(),
        server: SERVER_NAME.into(),
        if_not_exists: true,
        columns,
        dbname: SCHEMA_NAME.into(),
        table_name: name.into(),
    }
}
