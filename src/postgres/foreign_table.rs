use std::fmt;

use crate::postgres::{ident, literal};

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub r#type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", ident(&self.name), self.r#type)
    }
}

/// A foreign table definition whose rows live in the metadata store. The
/// `dbname`/`table_name` options address the remote table; `table_name` is the
/// raw (unquoted) remote name and is escaped as a literal.
#[derive(Debug, Clone)]
pub struct ForeignTable {
    pub schema: String,
    pub name: String,
    pub server: String,
    pub if_not_exists: bool,
    pub columns: Vec<Column>,
    pub dbname: String,
    pub table_name: String,
}

impl fmt::Display for ForeignTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self
            .columns
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let ine = if self.if_not_exists {
            " IF NOT EXISTS"
        } else {
            ""
        };
        write!(
            f,
            "CREATE FOREIGN TABLE{ine} {schema}.{name} ({cols}) SERVER {server} OPTIONS (dbname {dbname}, table_name {table_name});",
            ine = ine,
            schema = ident(&self.schema),
            name = ident(&self.name),
            cols = cols,
            server = ident(&self.server),
            dbname = literal(&self.dbname),
            table_name = literal(&self.table_name),
        )
    }
}

#[derive(Debug, Clone)]
pub struct DropForeignTable {
    pub schema: String,
    pub name: String,
}

impl fmt::Display for DropForeignTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DROP FOREIGN TABLE IF EXISTS {}.{};",
            ident(&self.schema),
            ident(&self.name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_table_basic() {
        let ft = ForeignTable {
            schema: "mindsdb".into(),
            name: "commands".into(),
            server: "mindsdb_server".into(),
            if_not_exists: true,
            columns: vec![Column::new("command", "text")],
            dbname: "mindsdb".into(),
            table_name: "commands".into(),
        };
        assert_eq!(
            ft.to_string(),
            "CREATE FOREIGN TABLE IF NOT EXISTS \"mindsdb\".\"commands\" (\"command\" text) SERVER \"mindsdb_server\" OPTIONS (dbname 'mindsdb', table_name 'commands');",
        );
    }

    #[test]
    fn foreign_table_quotes_name_with_embedded_quote() {
        let ft = ForeignTable {
            schema: "mindsdb".into(),
            name: "we\"ird".into(),
            server: "mindsdb_server".into(),
            if_not_exists: false,
            columns: vec![Column::new("x", "int8")],
            dbname: "mindsdb".into(),
            table_name: "we\"ird".into(),
        };
        let sql = ft.to_string();
        assert!(sql.contains("CREATE FOREIGN TABLE \"mindsdb\".\"we\"\"ird\""));
        assert!(sql.contains("table_name 'we\"ird'"));
    }

    #[test]
    fn drop_foreign_table() {
        let drop = DropForeignTable {
            schema: "mindsdb".into(),
            name: "home_rentals".into(),
        };
        assert_eq!(
            drop.to_string(),
            "DROP FOREIGN TABLE IF EXISTS \"mindsdb\".\"home_rentals\";",
        );
    }
}
