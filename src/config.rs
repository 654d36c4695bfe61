use serde::{Deserialize, Serialize};

/// Fixed rules and dimensions of a game, handed to the controller at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Side of one grid cell in pixels
    pub cell_size: i32,
    pub frame_rate: u32,

    // Timing, in milliseconds per snake step
    pub initial_move_delay: u32,
    pub min_move_delay: u32,
    pub move_delay_step: u32,
    /// Foods between two speed-ups
    pub speed_step_foods: u32,

    // Progression
    pub level_up_foods: u32,
    pub max_level: u32,
    pub points_per_food: u32,

    // Obstacles
    pub obstacles_per_level: u32,
    pub max_obstacles: u32,
    /// Half-width of the square around the grid center kept free of obstacles
    pub spawn_clear_radius: i32,
    /// Cells between the grid edge and the nearest possible obstacle
    pub obstacle_margin: i32,

    pub initial_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            cell_size: 20,
            frame_rate: 60,
            initial_move_delay: 150,
            min_move_delay: 50,
            move_delay_step: 10,
            speed_step_foods: 5,
            level_up_foods: 5,
            max_level: 5,
            points_per_food: 10,
            obstacles_per_level: 2,
            max_obstacles: 10,
            spawn_clear_radius: 5,
            obstacle_margin: 2,
            initial_length: 3,
        }
    }
}

impl GameConfig {
    pub fn grid_width(&self) -> i32 {
        self.screen_width / self.cell_size
    }

    pub fn grid_height(&self) -> i32 {
        self.screen_height / self.cell_size
    }
}
