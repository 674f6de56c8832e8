use std::fmt;

use crate::postgres::{ident, literal};

/// `CREATE SERVER` pointing at the metadata store. The wrapper decides how
/// the options are interpreted; for `mysql_fdw` they are host and port.
#[derive(Debug, Clone)]
pub struct ForeignServer {
    pub name: String,
    pub wrapper: String,
    pub host: String,
    pub port: u16,
}

impl fmt::Display for ForeignServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE SERVER {} FOREIGN DATA WRAPPER {} OPTIONS (host {}, port {});",
            ident(&self.name),
            ident(&self.wrapper),
            literal(&self.host),
            literal(&self.port.to_string()),
        )
    }
}

#[derive(Debug, Clone)]
pub struct DropForeignServer {
    pub name: String,
}

impl fmt::Display for DropForeignServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP SERVER IF EXISTS {};", ident(&self.name))
    }
}

/// Maps a local role onto the credentials the foreign server authenticates
/// with. The remote username/password land in the server catalog, so they are
/// quoted as literals like any other FDW option value.
#[derive(Debug, Clone)]
pub struct UserMapping {
    /// Local PostgreSQL role the mapping is created for.
    pub user: String,
    pub server: String,
    /// Remote credentials presented to the metadata store.
    pub username: String,
    pub password: String,
}

impl fmt::Display for UserMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE USER MAPPING FOR {} SERVER {} OPTIONS (username {}, password {});",
            ident(&self.user),
            ident(&self.server),
            literal(&self.username),
            literal(&self.password),
        )
    }
}

#[derive(Debug, Clone)]
pub struct DropUserMapping {
    pub user: String,
    pub server: String,
}

impl fmt::Display for DropUserMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DROP USER MAPPING IF EXISTS FOR {} SERVER {};",
            ident(&self.user),
            ident(&self.server),
        )
    }
}
