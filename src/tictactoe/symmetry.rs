//! D4 symmetry group operations for board canonicalization

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell};

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
    /// Whether to mirror left-right before rotating
    pub reflection: bool,
}

impl D4Transform {
    pub fn identity() -> Self {
        D4Transform {
            rotation: 0,
            reflection: false,
        }
    }

    /// All 8 D4 transforms, identity first
    pub fn all() -> [D4Transform; 8] {
        let mut transforms = [D4Transform::identity(); 8];
        for (i, rotation) in [0, 90, 180, 270].into_iter().enumerate() {
            transforms[2 * i] = D4Transform {
                rotation,
                reflection: false,
            };
            transforms[2 * i + 1] = D4Transform {
                rotation,
                reflection: true,
            };
        }
        transforms
    }

    /// Apply transform to a row-major position (0-8)
    pub fn transform_position(&self, pos: usize) -> usize {
        let (mut row, mut col) = (pos / 3, pos % 3);

        if self.reflection {
            col = 2 - col;
        }

        // Clockwise quarter turns
        for _ in 0..(self.rotation / 90) {
            let new_row = col;
            let new_col = 2 - row;
            row = new_row;
            col = new_col;
        }

        row * 3 + col
    }

    /// Apply transform to an array of cells
    pub fn apply_to_cells(&self, cells: &[Cell; 9]) -> [Cell; 9] {
        let mut transformed = [Cell::Empty; 9];
        for (idx, &cell) in cells.iter().enumerate() {
            transformed[self.transform_position(idx)] = cell;
        }
        transformed
    }
}

impl Board {
    /// Apply a D4 transform to the board
    pub fn transform(&self, t: &D4Transform) -> Self {
        // Symmetries preserve mark counts and lines, so the result stays valid.
        Board::from_cells_unchecked(t.apply_to_cells(self.cells()))
    }

    /// The lexicographically minimal encoding over all 8 symmetric images.
    ///
    /// Symmetric boards have equal minimax values, so this is a sound key for
    /// a value cache.
    pub fn canonical_key(&self) -> String {
        D4Transform::all()
            .iter()
            .map(|t| self.transform(t).encode())
            .min()
            .unwrap_or_else(|| self.encode())
    }

    /// The symmetric image with the minimal encoding
    pub fn canonical(&self) -> Self {
        D4Transform::all()
            .iter()
            .map(|t| self.transform(t))
            .min_by_key(|b| b.encode())
            .unwrap_or(*self)
    }
}
