pub mod canvas;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod connection;
pub mod error;
pub mod measure;
pub mod notice;
pub mod placement;

use wasm_bindgen::prelude::*;

use canvas::{Canvas, DropOutcome};
use catalog::{Catalog, Table};
use config::DesignerConfig;
use connection::Connection;
use error::DesignerError;
use placement::Position;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Catalog plus canvas, driven by the host's drag and drop events.
#[wasm_bindgen]
pub struct Designer {
    catalog: Catalog,
    canvas: Canvas,
}

impl Designer {
    pub fn with_parts(catalog: Catalog, config: DesignerConfig) -> Self {
        Self {
            catalog,
            canvas: Canvas::new(config),
        }
    }

    pub fn from_json(
        catalog_json: Option<&str>,
        config_json: Option<&str>,
    ) -> Result<Self, DesignerError> {
        let catalog = match catalog_json {
            Some(json) => Catalog::from_json(json)?,
            None => Catalog::sample(),
        };
        let config = match config_json {
            Some(json) => DesignerConfig::from_json(json)?,
            None => DesignerConfig::default(),
        };
        Ok(Self::with_parts(catalog, config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn tick(&mut self) -> u64 {
        let now = clock::now_ms();
        self.canvas.expire(now);
        now
    }
}

#[wasm_bindgen]
impl Designer {
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: Option<String>, config_json: Option<String>) -> Result<Designer, String> {
        Self::from_json(catalog_json.as_deref(), config_json.as_deref()).map_err(|e| e.to_string())
    }

    /// Tables whose name matches `query`, as a JSON array.
    #[wasm_bindgen(js_name = "searchTables")]
    pub fn search_tables(&self, query: &str) -> Result<String, String> {
        let tables: Vec<&Table> = self.catalog.filter(query);
        serde_json::to_string(&tables).map_err(|e| e.to_string())
    }

    /// Returns `"placed"` or `"already_placed"`.
    #[wasm_bindgen(js_name = "dropTable")]
    pub fn drop_table(&mut self, table_id: &str, x: f64, y: f64) -> Result<String, String> {
        let now = self.tick();
        let outcome = self
            .canvas
            .drop_table(&self.catalog, table_id, Position::new(x, y), now)
            .map_err(|e| e.to_string())?;
        Ok(match outcome {
            DropOutcome::Placed(_) => "placed",
            DropOutcome::AlreadyPlaced(_) => "already_placed",
        }
        .to_string())
    }

    #[wasm_bindgen(js_name = "beginConnection")]
    pub fn begin_connection(&mut self, node: &str, handle: &str) -> Result<(), String> {
        self.tick();
        self.canvas
            .begin_connection(node, handle)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "cancelConnection")]
    pub fn cancel_connection(&mut self) {
        self.canvas.cancel_connection();
    }

    /// Returns the new edge id.
    #[wasm_bindgen(js_name = "finishConnection")]
    pub fn finish_connection(&mut self, node: &str, handle: &str) -> Result<String, String> {
        let now = self.tick();
        self.canvas
            .finish_connection(node, handle, now)
            .map_err(|e| e.to_string())
    }

    /// Returns the new edge id.
    pub fn connect(
        &mut self,
        source: &str,
        source_handle: &str,
        target: &str,
        target_handle: &str,
    ) -> Result<String, String> {
        let now = self.tick();
        let conn = Connection::new(source, source_handle, target, target_handle);
        self.canvas.connect(&conn, now).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "deleteNode")]
    pub fn delete_node(&mut self, id: &str) -> Result<(), String> {
        self.tick();
        self.canvas
            .delete_node(id)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "deleteEdge")]
    pub fn delete_edge(&mut self, id: &str) -> Result<(), String> {
        self.tick();
        self.canvas
            .delete_edge(id)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "moveNode")]
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> Result<(), String> {
        self.canvas
            .move_node(id, Position::new(x, y))
            .map_err(|e| e.to_string())
    }

    /// Current nodes, edges and live notices as JSON.
    pub fn snapshot(&mut self) -> Result<String, String> {
        let now = self.tick();
        serde_json::to_string(&self.canvas.snapshot(now)).map_err(|e| e.to_string())
    }
}
