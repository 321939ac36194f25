//! Table catalog: the draggable source list of table definitions.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Declared data type of a column, stored exactly as the catalog spells it.
///
/// Compatibility ignores surrounding whitespace and ASCII case, so a
/// `Number` column connects to a `number` one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataType(String);

impl DataType {
    pub fn new(tag: &str) -> Self {
        Self(tag.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn canonical(&self) -> String {
        self.0.trim().to_ascii_lowercase()
    }

    pub fn is_compatible(&self, other: &DataType) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.0.trim())
    }
}

impl From<&str> for DataType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub column_id: String,
    pub name: String,
    pub column_data_type: DataType,
}

impl Column {
    pub fn new(column_id: &str, name: &str, typ: &str) -> Self {
        Self {
            column_id: column_id.to_string(),
            name: name.to_string(),
            column_data_type: DataType::new(typ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column_id: &str, name: &str, typ: &str) -> Self {
        self.columns.push(Column::new(column_id, name, typ));
        self
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.column_id == column_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    tables: Vec<Table>,
}

impl Catalog {
    pub fn new(tables: Vec<Table>) -> Result<Self, CatalogError> {
        let mut table_ids = HashSet::new();
        for table in &tables {
            if !table_ids.insert(table.id.as_str()) {
                return Err(CatalogError::DuplicateTable(table.id.clone()));
            }
            let mut column_ids = HashSet::new();
            for column in &table.columns {
                if !column_ids.insert(column.column_id.as_str()) {
                    return Err(CatalogError::DuplicateColumn {
                        table: table.id.clone(),
                        column: column.column_id.clone(),
                    });
                }
            }
        }
        Ok(Self { tables })
    }

    /// Seed the catalog from a JSON array of tables supplied by the host.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let tables: Vec<Table> =
            serde_json::from_str(json).map_err(|e| CatalogError::Json(e.to_string()))?;
        Self::new(tables)
    }

    /// Built-in mock catalog. Salary spells its numeric type `Number`
    /// while Employees uses `number`.
    pub fn sample() -> Self {
        let tables = vec![
            Table::new("empTable", "Employees")
                .with_column("col1", "id", "string")
                .with_column("col2", "First Name", "string")
                .with_column("col3", "Last Name", "string")
                .with_column("col4", "Age", "number")
                .with_column("col5", "Phone", "number")
                .with_column("col6", "Email", "string"),
            Table::new("salTable", "Salary")
                .with_column("col1", "id", "string")
                .with_column("col2", "Salary", "Number")
                .with_column("col3", "Tax", "Number")
                .with_column("col4", "Allowance", "Number")
                .with_column("col5", "Bonus", "Number"),
            Table::new("patTable", "Patients")
                .with_column("col1", "Pid", "string")
                .with_column("col2", "Patient Name", "string")
                .with_column("col3", "Condition", "string")
                .with_column("col4", "Tests", "string")
                .with_column("col5", "Bills", "string"),
        ];
        Self { tables }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Tables whose name contains `query`, ignoring case. An empty query
    /// returns every table.
    pub fn filter(&self, query: &str) -> Vec<&Table> {
        if query.is_empty() {
            return self.tables.iter().collect();
        }
        let needle = query.to_lowercase();
        self.tables
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .collect()
    }
}
