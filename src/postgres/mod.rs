use std::fmt;

pub mod foreign_server;
pub mod foreign_table;

pub use foreign_server::{DropForeignServer, DropUserMapping, ForeignServer, UserMapping};
pub use foreign_table::{Column, DropForeignTable, ForeignTable};

/// Quote an identifier, doubling any embedded double quotes.
pub fn ident(s: &str) -> String {
    let escaped = s.replace('"', "\"\"");
    format!("\"{}\"", escaped)
}

/// Quote a string literal, doubling any embedded single quotes.
pub fn literal(s: &str) -> String {
    let escaped = s.replace('\'', "''");
    format!("'{}'", escaped)
}

/// Activates an extension if it is not already installed. Guarded by a
/// catalog lookup so the statement also succeeds on servers where the
/// extension is preinstalled.
#[derive(Debug, Clone)]
pub struct EnsureExtension {
    pub name: String,
}

impl fmt::Display for EnsureExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DO $$\nBEGIN\n  IF NOT EXISTS (SELECT 1 FROM pg_extension WHERE extname = {name_lit}) THEN\n    CREATE EXTENSION {name_ident};\n  END IF;\nEND$$;",
            name_lit = literal(&self.name),
            name_ident = ident(&self.name),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub name: String,
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE SCHEMA {};", ident(&self.name))
    }
}

#[derive(Debug, Clone)]
pub struct DropSchema {
    pub name: String,
    pub cascade: bool,
}

impl fmt::Display for DropSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP SCHEMA IF EXISTS {}", ident(&self.name))?;
        if self.cascade {
            write!(f, " CASCADE")?;
        }
        write!(f, ";")
    }
}
