use crate::config::GameConfig;
use crate::grid::{Cell, Direction, Grid};

pub struct Snake {
    grid: Grid,
    body: Vec<Cell>,
    direction: Direction,
    next_direction: Direction,
    grow_pending: u32,
    move_timer: u32,
    move_delay: u32,
    score: u32,
    foods_eaten: u32,

    initial_length: usize,
    initial_move_delay: u32,
    min_move_delay: u32,
    move_delay_step: u32,
    speed_step_foods: u32,
}

impl Snake {
    pub fn new(config: &GameConfig) -> Self {
        let mut snake = Snake {
            grid: Grid::from_config(config),
            body: Vec::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            grow_pending: 0,
            move_timer: 0,
            move_delay: config.initial_move_delay,
            score: 0,
            foods_eaten: 0,
            initial_length: config.initial_length,
            initial_move_delay: config.initial_move_delay,
            min_move_delay: config.min_move_delay,
            move_delay_step: config.move_delay_step,
            speed_step_foods: config.speed_step_foods,
        };
        snake.reset();
        snake
    }

    pub fn reset(&mut self) {
        self.body.clear();
        // Start in the middle, head first, tail trailing to the left
        let center = self.grid.center();
        for i in 0..self.initial_length as i32 {
            self.body.push(Cell::new(center.x - i, center.y));
        }
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.grow_pending = 0;
        self.move_timer = 0;
        self.move_delay = self.initial_move_delay;
        self.score = 0;
        self.foods_eaten = 0;
    }

    /// Advances the move timer by `elapsed_ms` and takes one step once the
    /// move delay has passed. Returns whether the snake moved.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        self.move_timer = self.move_timer.saturating_add(elapsed_ms);
        if self.move_timer < self.move_delay {
            return false;
        }

        self.move_timer = 0;
        self.direction = self.next_direction;

        let new_head = self.grid.step(self.head(), self.direction);
        self.body.insert(0, new_head);

        if self.grow_pending > 0 {
            self.grow_pending -= 1;
        } else {
            self.body.pop();
        }
        true
    }

    /// Buffers a turn for the next step; a reversal onto the neck is ignored.
    pub fn change_direction(&mut self, requested: Direction) {
        if requested != self.direction.opposite() {
            self.next_direction = requested;
        }
    }

    pub fn grow(&mut self, amount: u32) {
        self.grow_pending += amount;
        self.foods_eaten += 1;

        // Speed up every few foods
        if self.foods_eaten % self.speed_step_foods == 0 && self.move_delay > self.min_move_delay {
            self.move_delay = self
                .move_delay
                .saturating_sub(self.move_delay_step)
                .max(self.min_move_delay);
        }
    }

    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn move_delay(&self) -> u32 {
        self.move_delay
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    /// Speed on a 1..=10 scale for the HUD.
    pub fn speed_rating(&self) -> u32 {
        let gained = self.move_delay.saturating_sub(self.min_move_delay) / self.move_delay_step.max(1);
        10u32.saturating_sub(gained).max(1)
    }

    #[cfg(test)]
    pub(crate) fn next_direction(&self) -> Direction {
        self.next_direction
    }

    #[cfg(test)]
    pub(crate) fn set_body(&mut self, body: Vec<Cell>, direction: Direction) {
        self.body = body;
        self.direction = direction;
        self.next_direction = direction;
    }
}
