use crate::config::GameConfig;
use ggez::graphics;
use ggez::mint::Point2;
use rand::Rng;
use std::ops::RangeInclusive;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step (dx, dy) in screen coordinates, y grows downwards
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The playing field: a toroidal `width × height` board of square cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Grid {
            width,
            height,
            cell_size,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.grid_width(), config.grid_height(), config.cell_size)
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Brings any coordinate back onto the board, re-entering from the
    /// opposite edge.
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.rem_euclid(self.width), cell.y.rem_euclid(self.height))
    }

    /// The neighbour of `cell` in `direction`, wrapped.
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        self.wrap(Cell::new(cell.x + dx, cell.y + dy))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    pub fn random_cell_in<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        xs: RangeInclusive<i32>,
        ys: RangeInclusive<i32>,
    ) -> Cell {
        Cell::new(rng.gen_range(xs), rng.gen_range(ys))
    }

    pub fn cell_rect(&self, cell: Cell) -> graphics::Rect {
        graphics::Rect::new(
            (cell.x * self.cell_size) as f32,
            (cell.y * self.cell_size) as f32,
            self.cell_size as f32,
            self.cell_size as f32,
        )
    }

    /// Pixel position inside `cell`, with `fx`/`fy` as fractions of the cell side.
    pub fn cell_point(&self, cell: Cell, fx: f32, fy: f32) -> Point2<f32> {
        let size = self.cell_size as f32;
        Point2 {
            x: cell.x as f32 * size + fx * size,
            y: cell.y as f32 * size + fy * size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::from_config(&GameConfig::default())
    }

    #[test]
    fn test_opposites() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_step_wraps_on_every_edge() {
        let grid = grid();
        assert_eq!(grid.step(Cell::new(39, 7), Direction::Right), Cell::new(0, 7));
        assert_eq!(grid.step(Cell::new(0, 7), Direction::Left), Cell::new(39, 7));
        assert_eq!(grid.step(Cell::new(12, 0), Direction::Up), Cell::new(12, 29));
        assert_eq!(grid.step(Cell::new(12, 29), Direction::Down), Cell::new(12, 0));
    }

    #[test]
    fn test_wrap_never_negative() {
        let grid = grid();
        let wrapped = grid.wrap(Cell::new(-41, -61));
        assert_eq!(wrapped, Cell::new(39, 29));
        assert!(grid.contains(wrapped));
    }

    #[test]
    fn test_cell_rect() {
        let rect = grid().cell_rect(Cell::new(3, 2));
        assert_eq!((rect.x, rect.y, rect.w, rect.h), (60.0, 40.0, 20.0, 20.0));
    }

    #[test]
    fn test_cells_cover_board() {
        let grid = Grid::new(4, 3, 10);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 12);
        assert!(cells.iter().all(|c| grid.contains(*c)));
    }
}
