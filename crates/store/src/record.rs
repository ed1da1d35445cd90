//! Record module - serde shapes of a saved session
//!
//! Field names are snake_case. The capitalized names written by earlier
//! save files (`Field`, `Block`, `Width`, `Matrix`, `LinesCleared`, ...) are
//! accepted as aliases when loading.

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Grid, Piece, Session, ShapeSource};
use crate::types::ColorCode;

/// Saved grid: dimensions plus the flat row-major cell array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRecord {
    #[serde(alias = "Width")]
    pub width: usize,
    #[serde(alias = "Height")]
    pub height: usize,
    #[serde(alias = "Matrix")]
    pub cells: Vec<ColorCode>,
}

/// Saved falling piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    #[serde(alias = "Width")]
    pub width: usize,
    #[serde(alias = "Height")]
    pub height: usize,
    #[serde(alias = "X")]
    pub x: i32,
    #[serde(alias = "Y")]
    pub y: i32,
    #[serde(alias = "Matrix")]
    pub matrix: Vec<ColorCode>,
}

/// Full session state as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(alias = "Field")]
    pub grid: GridRecord,
    #[serde(alias = "Block")]
    pub piece: PieceRecord,
    #[serde(alias = "LinesCleared")]
    pub lines_cleared: u32,
}

impl From<&Grid> for GridRecord {
    fn from(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().to_vec(),
        }
    }
}

impl From<&Piece> for PieceRecord {
    fn from(piece: &Piece) -> Self {
        Self {
            width: piece.width(),
            height: piece.height(),
            x: piece.x,
            y: piece.y,
            matrix: piece.matrix().to_vec(),
        }
    }
}

impl SavedState {
    /// Snapshot everything needed to resume `session`.
    pub fn capture<S: ShapeSource>(session: &Session<S>) -> Self {
        Self {
            grid: GridRecord::from(session.grid()),
            piece: PieceRecord::from(session.piece()),
            lines_cleared: session.lines_cleared(),
        }
    }

    /// Validate the record and rebuild the session parts.
    ///
    /// Rejects malformed grids and pieces, and a piece whose box lies further
    /// than its own size outside the grid.
    pub fn into_parts(self) -> Result<(Grid, Piece, u32)> {
        let GridRecord {
            width,
            height,
            cells,
        } = self.grid;
        let cell_count = cells.len();
        let grid = Grid::from_cells(width, height, cells).ok_or_else(|| {
            anyhow!(
                "invalid grid: {}x{} with {} cells",
                width,
                height,
                cell_count
            )
        })?;

        let p = self.piece;
        let piece = Piece::from_parts(p.width, p.height, p.x, p.y, &p.matrix).ok_or_else(|| {
            anyhow!(
                "invalid piece: {}x{} with {} cells",
                p.width,
                p.height,
                p.matrix.len()
            )
        })?;

        // The box may hang off the grid, but never by more than its own size.
        let x_range = -(piece.width() as i64)..=grid.width() as i64;
        let y_range = -(piece.height() as i64)..=grid.height() as i64;
        if !x_range.contains(&(piece.x as i64)) || !y_range.contains(&(piece.y as i64)) {
            bail!(
                "invalid piece: position ({}, {}) is outside the {}x{} grid",
                piece.x,
                piece.y,
                grid.width(),
                grid.height()
            );
        }

        Ok((grid, piece, self.lines_cleared))
    }

    /// Validate the record and resume it with `shapes` for future spawns.
    pub fn into_session<S: ShapeSource>(self, shapes: S) -> Result<Session<S>> {
        let (grid, piece, lines_cleared) = self.into_parts()?;
        Ok(Session::restore(grid, piece, lines_cleared, shapes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Nudge, ShapeCycle};
    use crate::types::Shape;

    #[test]
    fn capture_then_restore_preserves_session() {
        let mut session = Session::new(6, 8, ShapeCycle::new(&[Shape::L, Shape::I]));
        session.rotate_block();
        while session.nudge(1, true) != Nudge::Locked {}
        session.nudge(-1, false);

        let saved = SavedState::capture(&session);
        let json = serde_json::to_string(&saved).unwrap();
        let loaded: SavedState = serde_json::from_str(&json).unwrap();
        let restored = loaded
            .into_session(ShapeCycle::repeat(Shape::O))
            .unwrap();

        assert_eq!(restored.grid(), session.grid());
        assert_eq!(restored.piece(), session.piece());
        assert_eq!(restored.lines_cleared(), session.lines_cleared());
    }

    #[test]
    fn snake_case_field_names() {
        let session = Session::new(4, 4, ShapeCycle::repeat(Shape::O));
        let value = serde_json::to_value(SavedState::capture(&session)).unwrap();
        assert_eq!(value["grid"]["width"], 4);
        assert_eq!(value["grid"]["cells"].as_array().unwrap().len(), 16);
        assert_eq!(value["piece"]["x"], 1);
        assert_eq!(value["piece"]["matrix"], serde_json::json!([2, 2, 2, 2]));
        assert_eq!(value["lines_cleared"], 0);
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let json = r#"{
            "Field": {"Width": 2, "Height": 2, "Matrix": [0, 0, 3, 0]},
            "Block": {"Width": 2, "Height": 2, "X": 0, "Y": 0, "Matrix": [2, 2, 2, 2]},
            "LinesCleared": 7
        }"#;
        let saved: SavedState = serde_json::from_str(json).unwrap();
        let (grid, piece, lines) = saved.into_parts().unwrap();
        assert_eq!(grid.get(0, 1), Some(3));
        assert_eq!(piece.matrix(), &[2, 2, 2, 2]);
        assert_eq!(lines, 7);
    }

    #[test]
    fn mismatched_cell_count_is_rejected() {
        let saved = SavedState {
            grid: GridRecord {
                width: 3,
                height: 3,
                cells: vec![0; 8],
            },
            piece: PieceRecord {
                width: 2,
                height: 2,
                x: 0,
                y: 0,
                matrix: vec![2; 4],
            },
            lines_cleared: 0,
        };
        let err = saved.into_parts().unwrap_err();
        assert!(err.to_string().contains("invalid grid"));
    }

    #[test]
    fn invalid_piece_color_is_rejected() {
        let saved = SavedState {
            grid: GridRecord {
                width: 3,
                height: 3,
                cells: vec![0; 9],
            },
            piece: PieceRecord {
                width: 2,
                height: 2,
                x: 0,
                y: 0,
                matrix: vec![9; 4],
            },
            lines_cleared: 0,
        };
        assert!(saved.into_parts().is_err());
    }

    fn state_with_piece_at(x: i32, y: i32) -> SavedState {
        SavedState {
            grid: GridRecord {
                width: 4,
                height: 4,
                cells: vec![0; 16],
            },
            piece: PieceRecord {
                width: 2,
                height: 2,
                x,
                y,
                matrix: vec![2; 4],
            },
            lines_cleared: 0,
        }
    }

    #[test]
    fn far_away_piece_is_rejected() {
        for (x, y) in [(i32::MAX, 0), (i32::MIN, 0), (0, i32::MAX), (-3, 0), (5, 0), (0, -3)] {
            let err = state_with_piece_at(x, y).into_parts().unwrap_err();
            assert!(err.to_string().contains("outside"), "({}, {}): {}", x, y, err);
        }
    }

    #[test]
    fn piece_hanging_off_the_edge_is_kept() {
        for (x, y) in [(-2, 0), (4, 0), (0, -2), (0, 4), (-1, 3)] {
            let (_, piece, _) = state_with_piece_at(x, y).into_parts().unwrap();
            assert_eq!((piece.x, piece.y), (x, y));
        }
    }
}
