use crate::config::GameConfig;
use crate::food::MAX_PLACEMENT_ATTEMPTS;
use crate::grid::{Cell, Grid};
use rand::seq::SliceRandom;
use rand::Rng;

/// Static blocking cells, rebuilt from scratch on every level.
pub struct Obstacles {
    grid: Grid,
    cells: Vec<Cell>,
    per_level: u32,
    max_count: u32,
    clear_radius: i32,
    margin: i32,
}

impl Obstacles {
    pub fn new(config: &GameConfig) -> Self {
        Obstacles {
            grid: Grid::from_config(config),
            cells: Vec::new(),
            per_level: config.obstacles_per_level,
            max_count: config.max_obstacles,
            clear_radius: config.spawn_clear_radius,
            margin: config.obstacle_margin,
        }
    }

    /// Places `min(level * 2, 10)` obstacles away from the center spawn area.
    ///
    /// The snake and food are not consulted: a fresh obstacle may land on the
    /// snake's current body.
    pub fn generate<R: Rng + ?Sized>(&mut self, level: u32, rng: &mut R) {
        self.cells.clear();
        let count = (level * self.per_level).min(self.max_count);

        let xs = self.margin..=self.grid.width - 1 - self.margin;
        let ys = self.margin..=self.grid.height - 1 - self.margin;

        for _ in 0..count {
            let sampled = (0..MAX_PLACEMENT_ATTEMPTS)
                .map(|_| self.grid.random_cell_in(rng, xs.clone(), ys.clone()))
                .find(|cell| self.outside_spawn_area(*cell));

            let cell = match sampled {
                Some(cell) => Some(cell),
                None => {
                    let eligible: Vec<Cell> = self
                        .grid
                        .cells()
                        .filter(|c| xs.contains(&c.x) && ys.contains(&c.y))
                        .filter(|c| self.outside_spawn_area(*c))
                        .collect();
                    eligible.choose(rng).copied()
                }
            };

            // Only a board smaller than the spawn area has no eligible cell
            if let Some(cell) = cell {
                self.cells.push(cell);
            }
        }
    }

    fn outside_spawn_area(&self, cell: Cell) -> bool {
        let center = self.grid.center();
        (cell.x - center.x).abs() > self.clear_radius || (cell.y - center.y).abs() > self.clear_radius
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn set_cells(&mut self, cells: Vec<Cell>) {
        self.cells = cells;
    }
}
