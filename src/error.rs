//! Error types. The `Display` text doubles as the toast message shown to the user.

use crate::catalog::DataType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate table id: {0}")]
    DuplicateTable(String),
    #[error("Duplicate column id {column} in table {table}")]
    DuplicateColumn { table: String, column: String },
    #[error("Invalid catalog JSON: {0}")]
    Json(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(String),
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DropError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectError {
    #[error("Cannot connect a table to itself ({0})")]
    SelfConnection(String),
    #[error("Node not on canvas: {0}")]
    UnknownNode(String),
    #[error("Unknown column {column} on {node}")]
    UnknownHandle { node: String, column: String },
    #[error("Type mismatch: {source_type} cannot connect to {target_type}")]
    TypeMismatch {
        source_type: DataType,
        target_type: DataType,
    },
    #[error("Relationship already exists: {0}")]
    DuplicateEdge(String),
    #[error("No connection in progress")]
    NoPendingConnection,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    #[error("Node not on canvas: {0}")]
    UnknownNode(String),
    #[error("Unknown relationship: {0}")]
    UnknownEdge(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DesignerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Drop(#[from] DropError),
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}
