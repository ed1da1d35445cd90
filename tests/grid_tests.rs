//! Grid tests - placement checks and line clearing

use blockfall::core::{Grid, Piece};
use blockfall::types::{Shape, EMPTY};

fn fill_row(grid: &mut Grid, y: i32, color: u8) {
    for x in 0..grid.width() as i32 {
        grid.set(x, y, color);
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(10, 20);
    assert_eq!(grid.width(), 10);
    assert_eq!(grid.height(), 20);
    assert_eq!(grid.cells().len(), 200);
    assert!(grid.cells().iter().all(|&c| c == EMPTY));
}

#[test]
fn test_grid_out_of_bounds() {
    let mut grid = Grid::new(10, 20);
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(10, 0), None);
    assert_eq!(grid.get(0, 20), None);

    assert!(!grid.set(10, 0, 1));
    assert!(!grid.set(0, 0, 8));
    assert!(grid.set(9, 19, 7));
    assert_eq!(grid.get(9, 19), Some(7));
}

#[test]
fn test_can_place_bounds_and_overlap() {
    let mut grid = Grid::new(10, 20);
    let mut piece = Piece::new(Shape::I).rotated();

    // The vertical bar lives in box column 2, so the box may hang off the left edge.
    piece.x = -2;
    assert!(grid.can_place(&piece));
    piece.x = -3;
    assert!(!grid.can_place(&piece));

    piece.x = 0;
    piece.y = 16;
    assert!(grid.can_place(&piece));
    piece.y = 17;
    assert!(!grid.can_place(&piece));

    piece.y = 10;
    grid.set(2, 12, 3);
    assert!(!grid.can_place(&piece));
}

#[test]
fn test_placed_piece_blocks_itself() {
    let mut grid = Grid::new(10, 20);
    let mut piece = Piece::new(Shape::S);
    piece.x = 3;
    piece.y = 5;
    assert!(grid.can_place(&piece));

    grid.place_piece(&piece);
    assert!(!grid.can_place(&piece));
    assert_eq!(grid.get(4, 5), Some(7));
    assert_eq!(grid.get(3, 6), Some(7));
    assert_eq!(grid.get(3, 5), Some(EMPTY));
}

#[test]
fn test_clear_lines_without_full_rows() {
    let mut grid = Grid::new(6, 5);
    grid.set(0, 4, 1);
    grid.set(3, 2, 4);
    let before = grid.clone();

    assert_eq!(grid.clear_lines(), 0);
    assert_eq!(grid, before);
}

#[test]
fn test_row_missing_last_cell_is_not_full() {
    let mut grid = Grid::new(6, 5);
    for x in 0..5 {
        grid.set(x, 4, 2);
    }
    assert!(!grid.is_row_full(4));
    assert_eq!(grid.clear_lines(), 0);

    grid.set(5, 4, 2);
    assert!(grid.is_row_full(4));
    assert_eq!(grid.clear_lines(), 1);
}

#[test]
fn test_clear_bottom_k_rows_shifts_rest_down() {
    let mut grid = Grid::new(5, 6);
    grid.set(0, 0, 1);
    grid.set(1, 1, 2);
    grid.set(2, 2, 3);
    for y in 3..6 {
        fill_row(&mut grid, y, 5);
    }

    assert_eq!(grid.clear_lines(), 3);

    for y in 0..3 {
        assert!(grid.row(y).iter().all(|&c| c == EMPTY), "row {} not empty", y);
    }
    assert_eq!(grid.get(0, 3), Some(1));
    assert_eq!(grid.get(1, 4), Some(2));
    assert_eq!(grid.get(2, 5), Some(3));
    assert_eq!(grid.cells().iter().filter(|&&c| c != EMPTY).count(), 3);
}

#[test]
fn test_clear_separated_rows() {
    let mut grid = Grid::new(4, 5);
    grid.set(1, 1, 5);
    fill_row(&mut grid, 2, 1);
    grid.set(0, 3, 6);
    fill_row(&mut grid, 4, 2);

    assert_eq!(grid.clear_lines(), 2);
    assert_eq!(grid.get(1, 3), Some(5));
    assert_eq!(grid.get(0, 4), Some(6));
    assert_eq!(grid.cells().iter().filter(|&&c| c != EMPTY).count(), 2);
}

#[test]
fn test_clone_is_independent() {
    let mut grid = Grid::new(4, 4);
    let copy = grid.clone();
    grid.set(0, 0, 1);
    assert_eq!(copy.get(0, 0), Some(EMPTY));
}
