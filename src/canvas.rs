//! Canvas state: placed nodes, drawn edges and the notices shown over them.

use crate::catalog::{Catalog, Column};
use crate::config::DesignerConfig;
use crate::connection::{self, Connection};
use crate::error::{CanvasError, ConnectError, DropError};
use crate::notice::{Highlight, Notices, Toast, ToastLevel};
use crate::placement::{self, Position, Rect};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    pub label: String,
    pub columns: Vec<Column>,
}

/// A table placed on the canvas. Its id is the table id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub data: NodeData,
}

impl Node {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, (self.width, self.height))
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.data.columns.iter().find(|c| c.column_id == column_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub source_handle: String,
    pub target: String,
    pub target_handle: String,
    pub label: String,
}

impl Edge {
    pub fn touches(&self, node: &str) -> bool {
        self.source == node || self.target == node
    }

    /// Whether this edge links exactly these node/column endpoints.
    pub fn joins(&self, source: &str, source_column: &str, target: &str, target_column: &str) -> bool {
        self.source == source
            && self.source_handle == source_column
            && self.target == target
            && self.target_handle == target_column
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "node", rename_all = "snake_case")]
pub enum DropOutcome {
    Placed(String),
    /// The table was already on the canvas; its node is highlighted instead.
    AlreadyPlaced(String),
}

/// Column a connection drag started from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingConnection {
    pub node: String,
    pub column: String,
}

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub nodes: &'a [Node],
    pub edges: &'a [Edge],
    pub highlighted: Option<&'a Highlight>,
    pub toast: Option<&'a Toast>,
    pub pending: Option<&'a PendingConnection>,
}

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    config: DesignerConfig,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    notices: Notices,
    pending: Option<PendingConnection>,
    /// Edge ids are never reused, even after deletion.
    next_edge: u64,
}

impl Canvas {
    pub fn new(config: DesignerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn edges_of<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.touches(node))
    }

    pub fn pending_connection(&self) -> Option<&PendingConnection> {
        self.pending.as_ref()
    }

    /// Place `table_id` near `at`, or highlight it if it is already placed.
    pub fn drop_table(
        &mut self,
        catalog: &Catalog,
        table_id: &str,
        at: Position,
        now_ms: u64,
    ) -> Result<DropOutcome, DropError> {
        let table = catalog
            .table(table_id)
            .ok_or_else(|| DropError::UnknownTable(table_id.to_string()))?;

        if self.node(&table.id).is_some() {
            tracing::warn!(table = %table.id, "table already on canvas");
            self.notices
                .highlight(&table.id, now_ms, self.config.highlight_ms);
            self.notices.toast(
                format!("{} is already on the canvas", table.name),
                ToastLevel::Info,
                now_ms,
                self.config.toast_ms,
            );
            return Ok(DropOutcome::AlreadyPlaced(table.id.clone()));
        }

        let size = self.config.metrics.node_size(
            &table.name,
            table
                .columns
                .iter()
                .map(|c| (c.name.as_str(), c.column_data_type.as_str())),
        );
        let occupied: Vec<Rect> = self.nodes.iter().map(Node::rect).collect();
        let position = placement::find_free_position(
            self.config.placement,
            at,
            size,
            &occupied,
            self.config.gap,
            &self.config.grid,
        );

        tracing::debug!(
            table = %table.id,
            x = position.x,
            y = position.y,
            "placed node"
        );

        self.nodes.push(Node {
            id: table.id.clone(),
            position,
            width: size.0,
            height: size.1,
            data: NodeData {
                label: table.name.clone(),
                columns: table.columns.clone(),
            },
        });

        Ok(DropOutcome::Placed(table.id.clone()))
    }

    /// Record the column a connection drag starts from.
    pub fn begin_connection(&mut self, node: &str, column: &str) -> Result<(), ConnectError> {
        let column = connection::resolve(self, node, column)?.column_id.clone();
        self.pending = Some(PendingConnection {
            node: node.to_string(),
            column,
        });
        Ok(())
    }

    pub fn cancel_connection(&mut self) {
        self.pending = None;
    }

    /// Complete the pending drag on `column` of `target`. The pending drag
    /// is consumed whether or not an edge results.
    pub fn finish_connection(
        &mut self,
        target: &str,
        column: &str,
        now_ms: u64,
    ) -> Result<String, ConnectError> {
        let pending = self
            .pending
            .take()
            .ok_or(ConnectError::NoPendingConnection)?;
        let conn = Connection::new(&pending.node, &pending.column, target, column);
        self.connect(&conn, now_ms)
    }

    /// Validate `conn` and append an edge. A rejection raises an error toast.
    pub fn connect(&mut self, conn: &Connection, now_ms: u64) -> Result<String, ConnectError> {
        let resolved = connection::validate(self, conn).map(|valid| {
            (
                valid.label(),
                valid.source_column.column_id.clone(),
                valid.target_column.column_id.clone(),
            )
        });
        let (label, source_handle, target_handle) = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(
                    source = %conn.source,
                    target = %conn.target,
                    error = %e,
                    "connection rejected"
                );
                self.notices
                    .toast(e.to_string(), ToastLevel::Error, now_ms, self.config.toast_ms);
                return Err(e);
            }
        };

        self.next_edge += 1;
        let edge = Edge {
            id: format!("edge-{}", self.next_edge),
            source: conn.source.clone(),
            source_handle,
            target: conn.target.clone(),
            target_handle,
            label,
        };
        tracing::debug!(edge = %edge.id, "added edge");
        let id = edge.id.clone();
        self.edges.push(edge);
        Ok(id)
    }

    /// Remove a node along with every edge attached to it.
    pub fn delete_node(&mut self, id: &str) -> Result<Node, CanvasError> {
        let idx = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| CanvasError::UnknownNode(id.to_string()))?;
        let node = self.nodes.remove(idx);

        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        let removed_edges = before - self.edges.len();

        self.notices.clear_highlight_of(id);
        if self.pending.as_ref().is_some_and(|p| p.node == id) {
            self.pending = None;
        }

        tracing::info!(node = %id, removed_edges, "deleted node");
        Ok(node)
    }

    pub fn delete_edge(&mut self, id: &str) -> Result<Edge, CanvasError> {
        let idx = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CanvasError::UnknownEdge(id.to_string()))?;
        tracing::info!(edge = %id, "deleted edge");
        Ok(self.edges.remove(idx))
    }

    /// Record a drag performed by the host. No collision check is done.
    pub fn move_node(&mut self, id: &str, position: Position) -> Result<(), CanvasError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| CanvasError::UnknownNode(id.to_string()))?;
        node.position = position;
        Ok(())
    }

    pub fn highlighted(&self, now_ms: u64) -> Option<&Highlight> {
        self.notices.live_highlight(now_ms)
    }

    pub fn toast(&self, now_ms: u64) -> Option<&Toast> {
        self.notices.live_toast(now_ms)
    }

    pub fn expire(&mut self, now_ms: u64) {
        self.notices.expire(now_ms);
    }

    /// Everything the host needs to render the canvas at `now_ms`.
    pub fn snapshot(&self, now_ms: u64) -> Snapshot<'_> {
        Snapshot {
            nodes: &self.nodes,
            edges: &self.edges,
            highlighted: self.highlighted(now_ms),
            toast: self.toast(now_ms),
            pending: self.pending.as_ref(),
        }
    }

    /// Edges whose source or target node is missing. Always empty unless
    /// the canvas is corrupted.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| self.node(&e.source).is_none() || self.node(&e.target).is_none())
            .collect()
    }
}
