//! Collision-free placement for newly dropped nodes.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(at: Position, (width, height): (f64, f64)) -> Self {
        Self {
            x: at.x,
            y: at.y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Start at the drop point and shift right past whatever is in the way.
    #[default]
    Shift,
    /// Take the first free slot of a fixed grid, scanning row by row.
    Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub origin: Position,
    pub cell_width: f64,
    pub cell_height: f64,
    pub columns: usize,
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("cell_width", self.cell_width), ("cell_height", self.cell_height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidGrid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.columns == 0 {
            return Err(ConfigError::InvalidGrid("columns must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin: Position::new(40.0, 40.0),
            cell_width: 260.0,
            cell_height: 220.0,
            columns: 4,
        }
    }
}

/// Find a position for a box of `size` that overlaps none of `occupied`.
pub fn find_free_position(
    strategy: PlacementStrategy,
    requested: Position,
    size: (f64, f64),
    occupied: &[Rect],
    gap: f64,
    grid: &GridConfig,
) -> Position {
    match strategy {
        PlacementStrategy::Shift => shift_place(requested, size, occupied, gap),
        PlacementStrategy::Grid => grid_place(size, occupied, gap, grid),
    }
}

fn shift_place(requested: Position, size: (f64, f64), occupied: &[Rect], gap: f64) -> Position {
    let mut at = Position::new(requested.x.max(0.0), requested.y.max(0.0));
    // x strictly increases past each blocker, at most one step per box
    while let Some(blocker) = occupied
        .iter()
        .filter(|r| Rect::new(at, size).overlaps(r))
        .max_by(|a, b| a.right().total_cmp(&b.right()))
    {
        at.x = blocker.right() + gap.max(0.0);
    }
    at
}

/// Scans `occupied.len() + 1` rows of slots. If none is free (oversized
/// nodes, or a grid with zero-sized cells) it shifts right from the origin.
fn grid_place(size: (f64, f64), occupied: &[Rect], gap: f64, grid: &GridConfig) -> Position {
    let columns = grid.columns.max(1);
    let slots = (occupied.len() + 1) * columns;
    (0..slots)
        .map(|slot| {
            Position::new(
                grid.origin.x + (slot % columns) as f64 * grid.cell_width,
                grid.origin.y + (slot / columns) as f64 * grid.cell_height,
            )
        })
        .find(|&at| {
            let candidate = Rect::new(at, size);
            !occupied.iter().any(|r| candidate.overlaps(r))
        })
        .unwrap_or_else(|| shift_place(grid.origin, size, occupied, gap))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: (f64, f64) = (100.0, 50.0);

    #[test]
    fn test_overlap_rules() {
        let a = Rect::new(Position::new(0.0, 0.0), SIZE);
        let b = Rect::new(Position::new(50.0, 25.0), SIZE);
        let touching = Rect::new(Position::new(100.0, 0.0), SIZE);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&touching));
    }

    #[test]
    fn test_shift_free_spot_unchanged() {
        let occupied = [Rect::new(Position::new(0.0, 0.0), SIZE)];
        let at = shift_place(Position::new(300.0, 300.0), SIZE, &occupied, 20.0);
        assert_eq!(at, Position::new(300.0, 300.0));
    }

    #[test]
    fn test_shift_past_blocker() {
        let occupied = [Rect::new(Position::new(0.0, 0.0), SIZE)];
        let at = shift_place(Position::new(10.0, 10.0), SIZE, &occupied, 20.0);
        assert_eq!(at, Position::new(120.0, 10.0));
    }

    #[test]
    fn test_shift_past_chain() {
        let occupied = [
            Rect::new(Position::new(0.0, 0.0), SIZE),
            Rect::new(Position::new(130.0, 0.0), SIZE),
            Rect::new(Position::new(260.0, 0.0), SIZE),
        ];
        let at = shift_place(Position::new(0.0, 0.0), SIZE, &occupied, 20.0);
        let placed = Rect::new(at, SIZE);
        assert!(occupied.iter().all(|r| !placed.overlaps(r)));
        assert_eq!(at.x, 380.0);
    }

    #[test]
    fn test_shift_clamps_negative() {
        let at = shift_place(Position::new(-50.0, -10.0), SIZE, &[], 20.0);
        assert_eq!(at, Position::new(0.0, 0.0));
    }

    #[test]
    fn test_grid_first_free_slot() {
        let grid = GridConfig::default();
        let occupied = [Rect::new(grid.origin, SIZE)];
        let at = grid_place(SIZE, &occupied, 20.0, &grid);
        assert_eq!(at, Position::new(grid.origin.x + grid.cell_width, grid.origin.y));
    }

    #[test]
    fn test_grid_wraps_rows() {
        let grid = GridConfig {
            columns: 2,
            ..GridConfig::default()
        };
        let occupied = [
            Rect::new(grid.origin, SIZE),
            Rect::new(Position::new(grid.origin.x + grid.cell_width, grid.origin.y), SIZE),
        ];
        let at = grid_place(SIZE, &occupied, 20.0, &grid);
        assert_eq!(at, Position::new(grid.origin.x, grid.origin.y + grid.cell_height));
    }

    #[test]
    fn test_grid_skips_node_moved_into_slot() {
        let grid = GridConfig::default();
        // a node dragged so that it straddles slots 0 and 1
        let occupied = [Rect::new(Position::new(120.0, 60.0), (200.0, 50.0))];
        let at = grid_place(SIZE, &occupied, 20.0, &grid);
        assert_eq!(at, Position::new(grid.origin.x + 2.0 * grid.cell_width, grid.origin.y));
    }

    #[test]
    fn test_grid_zero_height_falls_back_to_shift() {
        let grid = GridConfig {
            cell_height: 0.0,
            columns: 2,
            ..GridConfig::default()
        };
        let mut occupied = Vec::new();
        for _ in 0..5 {
            let at = grid_place(SIZE, &occupied, 20.0, &grid);
            let placed = Rect::new(at, SIZE);
            assert!(occupied.iter().all(|r: &Rect| !placed.overlaps(r)));
            occupied.push(placed);
        }
        // two distinct slots exist; the third node shifts right of the first
        assert_eq!(occupied[1].x, grid.origin.x + grid.cell_width);
        assert_eq!(occupied[2].x, grid.origin.x + SIZE.0 + 20.0);
        assert_eq!(occupied[2].y, grid.origin.y);
    }

    #[test]
    fn test_grid_validate() {
        assert!(GridConfig::default().validate().is_ok());
        let zero = GridConfig {
            cell_height: 0.0,
            ..GridConfig::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::InvalidGrid(_))));
        let negative = GridConfig {
            cell_width: -10.0,
            ..GridConfig::default()
        };
        assert!(negative.validate().is_err());
        let no_columns = GridConfig {
            columns: 0,
            ..GridConfig::default()
        };
        assert!(no_columns.validate().is_err());
    }
}
