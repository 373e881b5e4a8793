//! A single board cell: jelly overlay plus an optional tile

use serde::{Deserialize, Serialize};

use super::tile::Tile;

/// One cell of the grid.
///
/// The jelly flag is an overlay objective independent of the tile occupying
/// the cell; it is cleared when the cell's tile is crushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub jelly: bool,
    pub tile: Option<Tile>,
}

impl Cell {
    pub fn new(tile: Tile) -> Cell {
        Cell {
            jelly: false,
            tile: Some(tile),
        }
    }

    pub fn empty() -> Cell {
        Cell {
            jelly: false,
            tile: None,
        }
    }

    /// Mark this cell jellied.
    ///
    /// # Panics
    ///
    /// Double-jelly assignment is a programmer error, not a game condition.
    pub fn set_jelly(&mut self) {
        assert!(!self.jelly, "cell is already jellied");
        self.jelly = true;
    }

    /// Place a tile into this cell.
    ///
    /// # Panics
    ///
    /// Placing onto an occupied cell is a programmer error.
    pub fn place(&mut self, tile: Tile) {
        assert!(self.tile.is_none(), "placing a tile onto an occupied cell");
        self.tile = Some(tile);
    }

    /// Remove and return the tile, leaving the cell empty.
    pub fn take(&mut self) -> Option<Tile> {
        self.tile.take()
    }

    pub fn is_empty(&self) -> bool {
        self.tile.is_none()
    }

    /// Printable code: tile code (or `_` when empty), with a `J` suffix when
    /// jellied. This is the unit the board fingerprint concatenates.
    pub fn code(&self) -> String {
        let mut code = match self.tile {
            Some(tile) => tile.code(),
            None => "_".to_string(),
        };
        if self.jelly {
            code.push('J');
        }
        code
    }

    /// Parse a cell code as produced by [`Cell::code`].
    pub fn from_code(code: &str) -> Option<Cell> {
        let (body, jelly) = match code.strip_suffix('J') {
            Some(rest) => (rest, true),
            None => (code, false),
        };
        let tile = if body == "_" {
            None
        } else {
            Some(Tile::from_code(body)?)
        };
        Some(Cell { jelly, tile })
    }
}
