//! Rules deciding whether a column-to-column drag becomes an edge.

use crate::canvas::{Canvas, Node};
use crate::catalog::Column;
use crate::error::ConnectError;
use serde::{Deserialize, Serialize};

/// Which end of a relationship a column handle anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    Source,
    Target,
}

impl HandleKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Source => "source-",
            Self::Target => "target-",
        }
    }
}

/// Handle id the host renders on a column row, e.g. `source-col1`.
pub fn handle_id(column_id: &str, kind: HandleKind) -> String {
    format!("{}{}", kind.prefix(), column_id)
}

/// Split a `source-`/`target-` handle id into its kind and column id.
pub fn split_handle(handle: &str) -> Option<(HandleKind, &str)> {
    [HandleKind::Source, HandleKind::Target]
        .into_iter()
        .find_map(|kind| handle.strip_prefix(kind.prefix()).map(|col| (kind, col)))
}

/// Column of `node` named by `handle`. An exact column id wins over the
/// prefixed handle form, so ids like `source-x` stay addressable.
pub fn resolve_handle<'a>(node: &'a Node, handle: &str) -> Option<&'a Column> {
    node.column(handle).or_else(|| {
        split_handle(handle).and_then(|(_, column_id)| node.column(column_id))
    })
}

/// A completed drag from one column handle to another. Handles may be bare
/// column ids or `source-`/`target-` handle ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub source: String,
    pub source_handle: String,
    pub target: String,
    pub target_handle: String,
}

impl Connection {
    pub fn new(source: &str, source_handle: &str, target: &str, target_handle: &str) -> Self {
        Self {
            source: source.to_string(),
            source_handle: source_handle.to_string(),
            target: target.to_string(),
            target_handle: target_handle.to_string(),
        }
    }
}

/// Columns resolved by a successful validation.
#[derive(Debug)]
pub struct Validated<'a> {
    pub source_column: &'a Column,
    pub target_column: &'a Column,
}

impl Validated<'_> {
    pub fn label(&self) -> String {
        format!("{} -> {}", self.source_column.name, self.target_column.name)
    }
}

/// Check a connection against the canvas. Rules apply in order: self
/// connections, missing endpoints, type mismatch, duplicates.
pub fn validate<'a>(canvas: &'a Canvas, conn: &Connection) -> Result<Validated<'a>, ConnectError> {
    if conn.source == conn.target {
        return Err(ConnectError::SelfConnection(conn.source.clone()));
    }

    let source_column = resolve(canvas, &conn.source, &conn.source_handle)?;
    let target_column = resolve(canvas, &conn.target, &conn.target_handle)?;

    if !source_column
        .column_data_type
        .is_compatible(&target_column.column_data_type)
    {
        return Err(ConnectError::TypeMismatch {
            source_type: source_column.column_data_type.clone(),
            target_type: target_column.column_data_type.clone(),
        });
    }

    if let Some(existing) = canvas.edges().iter().find(|e| {
        e.joins(
            &conn.source,
            &source_column.column_id,
            &conn.target,
            &target_column.column_id,
        )
    }) {
        return Err(ConnectError::DuplicateEdge(existing.id.clone()));
    }

    Ok(Validated {
        source_column,
        target_column,
    })
}

pub(crate) fn resolve<'a>(
    canvas: &'a Canvas,
    node: &str,
    handle: &str,
) -> Result<&'a Column, ConnectError> {
    let node: &Node = canvas
        .node(node)
        .ok_or_else(|| ConnectError::UnknownNode(node.to_string()))?;
    resolve_handle(node, handle).ok_or_else(|| ConnectError::UnknownHandle {
        node: node.id.clone(),
        column: handle.to_string(),
    })
}
