//! Grid geometry and headings
//!
//! Cells are integer pairs; pixels are `f32` with the origin at the top-left
//! of the window and y growing downward.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Integer grid coordinate `(cx, cy)`
pub type Cell = IVec2;

/// Square grid of `cells x cells`, each `size` pixels wide
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub cells: i32,
    pub size: f32,
}

impl Grid {
    pub fn new(cells: i32, size: f32) -> Self {
        Self { cells, size }
    }

    /// Side length of the whole grid in pixels
    #[inline]
    pub fn extent(&self) -> f32 {
        self.cells as f32 * self.size
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.cells && cell.y >= 0 && cell.y < self.cells
    }

    /// Pixel center of a cell
    #[inline]
    pub fn cell_to_pixel_center(&self, cell: Cell) -> Vec2 {
        self.grid_to_pixel_center(cell.as_vec2())
    }

    /// Pixel center of a fractional grid position (used for interpolation)
    #[inline]
    pub fn grid_to_pixel_center(&self, pos: Vec2) -> Vec2 {
        pos * self.size + Vec2::splat(self.size / 2.0)
    }

    /// Cell containing a pixel, if it lies on the grid
    pub fn pixel_to_cell(&self, pixel: Vec2) -> Option<Cell> {
        let cell = (pixel / self.size).floor().as_ivec2();
        self.in_bounds(cell).then_some(cell)
    }

    /// Every cell in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cells = self.cells;
        (0..cells).flat_map(move |y| (0..cells).map(move |x| Cell::new(x, y)))
    }
}

/// One of the four grid headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit step in cell space (screen y grows downward)
    #[inline]
    pub fn delta(self) -> Cell {
        match self {
            Direction::Up => Cell::new(0, -1),
            Direction::Down => Cell::new(0, 1),
            Direction::Left => Cell::new(-1, 0),
            Direction::Right => Cell::new(1, 0),
        }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        self.delta().as_vec2()
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// A turn is legal unless it reverses the heading outright
    #[inline]
    pub fn can_turn_to(self, new: Direction) -> bool {
        new != self.opposite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_pixel_center() {
        let grid = Grid::new(40, 20.0);
        assert_eq!(grid.cell_to_pixel_center(Cell::new(0, 0)), Vec2::new(10.0, 10.0));
        assert_eq!(grid.cell_to_pixel_center(Cell::new(3, 7)), Vec2::new(70.0, 150.0));
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::new(40, 20.0);
        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(39, 39)));
        assert!(!grid.in_bounds(Cell::new(40, 0)));
        assert!(!grid.in_bounds(Cell::new(0, -1)));
    }

    #[test]
    fn test_pixel_to_cell() {
        let grid = Grid::new(40, 20.0);
        assert_eq!(grid.pixel_to_cell(Vec2::new(25.0, 399.0)), Some(Cell::new(1, 19)));
        assert_eq!(grid.pixel_to_cell(Vec2::new(-0.5, 10.0)), None);
        assert_eq!(grid.pixel_to_cell(Vec2::new(800.0, 10.0)), None);
    }

    #[test]
    fn test_turn_legality() {
        for dir in Direction::ALL {
            assert!(!dir.can_turn_to(dir.opposite()));
            assert!(dir.can_turn_to(dir));
            assert_eq!(dir.delta() + dir.opposite().delta(), Cell::ZERO);
        }
        assert!(Direction::Right.can_turn_to(Direction::Up));
    }

    #[test]
    fn test_iter_cells_covers_grid() {
        let grid = Grid::new(3, 10.0);
        let cells: Vec<_> = grid.iter_cells().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[8], Cell::new(2, 2));
    }
}
