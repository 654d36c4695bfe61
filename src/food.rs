use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Random draws tried before falling back to a scan of the whole board.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

pub struct Food {
    grid: Grid,
    position: Cell,
    sparkle_timer: u32,
}

impl Food {
    pub fn new(grid: Grid) -> Self {
        Food {
            grid,
            position: grid.center(),
            sparkle_timer: 0,
        }
    }

    /// Moves the food to a random cell outside `occupied` and `blocked`.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        occupied: &[Cell],
        blocked: &[Cell],
        rng: &mut R,
    ) -> Result {
        let is_free = |cell: &Cell| !occupied.contains(cell) && !blocked.contains(cell);

        let sampled = (0..MAX_PLACEMENT_ATTEMPTS)
            .map(|_| self.grid.random_cell(rng))
            .find(is_free);

        let position = match sampled {
            Some(cell) => cell,
            None => {
                let free: Vec<Cell> = self.grid.cells().filter(is_free).collect();
                *free.choose(rng).ok_or(Error::NoFreeCell)?
            }
        };

        debug_assert!(self.grid.contains(position));
        debug!("food spawned at ({}, {})", position.x, position.y);
        self.position = position;
        self.sparkle_timer = 0;
        Ok(())
    }

    pub fn update(&mut self, elapsed_ms: u32) {
        self.sparkle_timer = self.sparkle_timer.wrapping_add(elapsed_ms);
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, cell: Cell) {
        self.position = cell;
    }

    /// Sparkle brightness in `0.0..=1.0`.
    pub fn sparkle(&self) -> f32 {
        ((self.sparkle_timer as f32 * 0.01).sin() + 1.0) / 2.0
    }
}
