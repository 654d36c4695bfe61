use crate::config::GameConfig;
use crate::error::Result;
use crate::food::Food;
use crate::grid::{Direction, Grid};
use crate::obstacle::Obstacles;
use crate::snake::Snake;
use crate::ui::{self, Button, ButtonAction, Layout};
use chrono::{DateTime, Local};
use ggez::input::keyboard::KeyCode;
use ggez::mint::Point2;
use log::{info, warn};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::Serialize;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum GameState {
    Menu,
    Playing,
    GameOver,
    Instructions,
}

/// Best score of the session, kept in memory only.
#[derive(Clone, Copy, Debug, Default)]
pub struct HighScore {
    pub score: u32,
    pub set_at: Option<DateTime<Local>>,
}

#[derive(Serialize, Debug)]
struct RoundSummary {
    score: u32,
    level: u32,
    length: usize,
    foods_eaten: u32,
    won: bool,
    finished_at: DateTime<Local>,
}

/// What happened during one frame, for sound cues.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub ate_food: bool,
    pub crashed: bool,
    pub won: bool,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Game<R = ThreadRng> {
    config: GameConfig,
    grid: Grid,
    state: GameState,
    snake: Snake,
    food: Food,
    obstacles: Obstacles,
    level: u32,
    high_score: HighScore,
    layout: Layout,
    rng: R,
}

impl Game<ThreadRng> {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self> {
        let grid = Grid::from_config(&config);
        let snake = Snake::new(&config);
        let mut obstacles = Obstacles::new(&config);
        obstacles.generate(1, &mut rng);
        let mut food = Food::new(grid);
        food.spawn(snake.body(), obstacles.cells(), &mut rng)?;

        Ok(Game {
            layout: Layout::new(&config),
            config,
            grid,
            state: GameState::Menu,
            snake,
            food,
            obstacles,
            level: 1,
            high_score: HighScore::default(),
            rng,
        })
    }

    pub fn reset_game(&mut self) -> Result {
        self.snake.reset();
        self.food
            .spawn(self.snake.body(), self.obstacles.cells(), &mut self.rng)?;
        self.level = 1;
        self.obstacles.generate(self.level, &mut self.rng);
        Ok(())
    }

    /// Advances the simulation by `elapsed_ms`. Only the Playing state moves.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<TickOutcome> {
        match self.state {
            GameState::Playing => {}
            GameState::Menu | GameState::GameOver | GameState::Instructions => {
                return Ok(TickOutcome::default())
            }
        }

        self.snake.update(elapsed_ms);
        self.food.update(elapsed_ms);

        let mut outcome = self.check_collisions()?;
        if outcome.crashed {
            self.state = GameState::GameOver;
        }

        // Reaching the last level ends the round whatever else happened
        if self.has_won() {
            outcome.won = true;
            self.state = GameState::GameOver;
        }

        if self.state == GameState::GameOver {
            self.log_round();
        }
        Ok(outcome)
    }

    /// Resolves food first, then the fatal checks, so a step that eats and
    /// crashes still scores.
    pub fn check_collisions(&mut self) -> Result<TickOutcome> {
        let mut outcome = TickOutcome::default();
        let head = self.snake.head();

        if head == self.food.position() {
            outcome.ate_food = true;
            self.snake.add_score(self.config.points_per_food * self.level);
            self.snake.grow(1);

            self.food
                .spawn(self.snake.body(), self.obstacles.cells(), &mut self.rng)?;

            if self.snake.foods_eaten() % self.config.level_up_foods == 0 {
                self.level += 1;
                self.obstacles.generate(self.level, &mut self.rng);
                info!("level up: {} ({} obstacles)", self.level, self.obstacles.len());
            }

            if self.snake.score() > self.high_score.score {
                self.high_score = HighScore {
                    score: self.snake.score(),
                    set_at: Some(Local::now()),
                };
            }
        }

        outcome.crashed = self.obstacles.contains(head) || self.snake.check_self_collision();
        Ok(outcome)
    }

    pub fn key_down(&mut self, key: KeyCode) -> Result<Control> {
        match self.state {
            GameState::Playing => match key {
                KeyCode::Up => self.snake.change_direction(Direction::Up),
                KeyCode::Down => self.snake.change_direction(Direction::Down),
                KeyCode::Left => self.snake.change_direction(Direction::Left),
                KeyCode::Right => self.snake.change_direction(Direction::Right),
                KeyCode::Escape => self.state = GameState::Menu,
                _ => {}
            },
            GameState::GameOver => {
                if matches!(key, KeyCode::Space | KeyCode::Return) {
                    return self.perform(ButtonAction::Restart);
                }
            }
            GameState::Menu | GameState::Instructions => {}
        }
        Ok(Control::Continue)
    }

    pub fn click(&mut self, point: Point2<f32>) -> Result<Control> {
        match ui::hit_test(self.visible_buttons(), point) {
            Some(action) => self.perform(action),
            None => Ok(Control::Continue),
        }
    }

    fn perform(&mut self, action: ButtonAction) -> Result<Control> {
        match action {
            ButtonAction::Play | ButtonAction::Restart => {
                self.reset_game()?;
                self.state = GameState::Playing;
                info!("new game started");
            }
            ButtonAction::Instructions => self.state = GameState::Instructions,
            ButtonAction::Back => self.state = GameState::Menu,
            ButtonAction::Quit => {
                info!("quit requested");
                return Ok(Control::Quit);
            }
        }
        Ok(Control::Continue)
    }

    pub fn visible_buttons(&self) -> &[Button] {
        match self.state {
            GameState::Menu => &self.layout.menu,
            GameState::GameOver => std::slice::from_ref(&self.layout.restart),
            GameState::Instructions => std::slice::from_ref(&self.layout.back),
            GameState::Playing => &[],
        }
    }

    fn log_round(&self) {
        let summary = RoundSummary {
            score: self.snake.score(),
            level: self.level,
            length: self.snake.len(),
            foods_eaten: self.snake.foods_eaten(),
            won: self.has_won(),
            finished_at: Local::now(),
        };
        match serde_json::to_string(&summary) {
            Ok(json) => info!("round finished: {}", json),
            Err(e) => warn!("could not serialize round summary: {}", e),
        }
    }

    pub fn has_won(&self) -> bool {
        self.level >= self.config.max_level
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn obstacles(&self) -> &Obstacles {
        &self.obstacles
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn high_score(&self) -> HighScore {
        self.high_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const STEP: u32 = 150;

    fn playing_game() -> Game<StdRng> {
        let mut game = Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(42)).unwrap();
        game.perform(ButtonAction::Play).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        game
    }

    /// Puts food right in front of the head and takes one step onto it.
    fn eat_next(game: &mut Game<StdRng>) -> TickOutcome {
        let ahead = game.grid.step(game.snake.head(), game.snake.direction());
        game.food.set_position(ahead);
        let delay = game.snake.move_delay();
        game.tick(delay).unwrap()
    }

    #[test]
    fn test_starts_in_menu_and_idles() {
        let mut game = Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(game.state(), GameState::Menu);
        let head = game.snake().head();
        assert_eq!(game.tick(1000).unwrap(), TickOutcome::default());
        assert_eq!(game.snake().head(), head);
    }

    #[test]
    fn test_initial_food_is_free() {
        let game = Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(9)).unwrap();
        let food = game.food().position();
        assert!(!game.snake().body().contains(&food));
        assert!(!game.obstacles().contains(food));
        assert_eq!(game.obstacles().len(), 2);
    }

    #[test]
    fn test_eating_scores_by_level() {
        let mut game = playing_game();
        let outcome = eat_next(&mut game);
        assert!(outcome.ate_food);
        assert!(!outcome.crashed);
        assert_eq!(game.snake().score(), 10);
        assert_eq!(game.high_score().score, 10);
        assert!(game.high_score().set_at.is_some());

        let food = game.food().position();
        assert!(!game.snake().body().contains(&food));
        assert!(!game.obstacles().contains(food));
    }

    #[test]
    fn test_fifth_food_levels_up() {
        let mut game = playing_game();
        for _ in 0..4 {
            eat_next(&mut game);
        }
        assert_eq!(game.level(), 1);
        assert_eq!(game.obstacles().len(), 2);

        eat_next(&mut game);
        assert_eq!(game.level(), 2);
        assert_eq!(game.obstacles().len(), 4);
        assert_eq!(game.snake().score(), 50);
        assert_eq!(game.snake().move_delay(), 140);
        assert_eq!(game.state(), GameState::Playing);

        game.obstacles.set_cells(vec![]);
        eat_next(&mut game);
        assert_eq!(game.snake().score(), 70);
    }

    #[test]
    fn test_self_collision_ends_round_same_tick() {
        let mut game = playing_game();
        game.snake.set_body(
            vec![
                Cell::new(5, 6),
                Cell::new(6, 6),
                Cell::new(6, 5),
                Cell::new(5, 5),
                Cell::new(4, 5),
            ],
            Direction::Left,
        );
        game.obstacles.set_cells(vec![]);
        game.food.set_position(Cell::new(30, 20));
        game.key_down(KeyCode::Up).unwrap();

        let outcome = game.tick(STEP).unwrap();
        assert!(game.snake().check_self_collision());
        assert!(outcome.crashed);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_food_and_crash_in_same_step_both_count() {
        let mut game = playing_game();
        game.snake.set_body(
            vec![
                Cell::new(5, 6),
                Cell::new(6, 6),
                Cell::new(6, 5),
                Cell::new(5, 5),
                Cell::new(4, 5),
            ],
            Direction::Up,
        );
        game.obstacles.set_cells(vec![]);
        game.food.set_position(Cell::new(5, 5));

        let outcome = game.tick(STEP).unwrap();
        assert!(outcome.ate_food);
        assert!(outcome.crashed);
        assert_eq!(game.snake().score(), 10);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_obstacle_collision() {
        let mut game = playing_game();
        let ahead = game.grid.step(game.snake.head(), game.snake.direction());
        game.obstacles.set_cells(vec![ahead]);

        let outcome = game.tick(STEP).unwrap();
        assert!(outcome.crashed);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_obstacle_dropped_on_snake_is_fatal() {
        // Obstacles ignore the snake when they are placed; one landing on the
        // head ends the round on the next check.
        let mut game = playing_game();
        let head = game.snake().head();
        game.obstacles.set_cells(vec![head]);
        game.food.set_position(Cell::new(0, 0));

        let outcome = game.tick(1).unwrap();
        assert!(outcome.crashed);
    }

    #[test]
    fn test_reaching_last_level_wins() {
        let mut game = playing_game();
        game.level = 4;
        game.obstacles.generate(4, &mut game.rng);
        for _ in 0..19 {
            game.snake.grow(1);
        }

        let outcome = eat_next(&mut game);
        assert_eq!(game.level(), 5);
        assert!(outcome.won);
        assert!(game.has_won());
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_win_ignores_collision_state() {
        let mut game = playing_game();
        game.level = 5;
        game.food.set_position(Cell::new(0, 0));

        let outcome = game.tick(1).unwrap();
        assert!(outcome.won);
        assert!(!outcome.crashed);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut game = playing_game();
        game.key_down(KeyCode::Escape).unwrap();
        assert_eq!(game.state(), GameState::Menu);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut game = playing_game();
        eat_next(&mut game);
        eat_next(&mut game);
        game.level = 5;
        game.tick(1).unwrap();
        assert_eq!(game.state(), GameState::GameOver);

        game.key_down(KeyCode::Space).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.level(), 1);
        assert_eq!(game.snake().score(), 0);
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.obstacles().len(), 2);
        assert_eq!(game.high_score().score, 20);
    }

    #[test]
    fn test_arrow_keys_only_while_playing() {
        let mut game = Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(3)).unwrap();
        game.key_down(KeyCode::Up).unwrap();
        assert_eq!(game.snake().next_direction(), Direction::Right);

        let mut game = playing_game();
        game.key_down(KeyCode::Up).unwrap();
        assert_eq!(game.snake().next_direction(), Direction::Up);
    }

    #[test]
    fn test_buttons_drive_state_machine() {
        let mut game = Game::with_rng(GameConfig::default(), StdRng::seed_from_u64(4)).unwrap();
        let center = |b: &Button| b.center();

        let instructions = center(&game.layout.menu[1]);
        assert_eq!(game.click(instructions).unwrap(), Control::Continue);
        assert_eq!(game.state(), GameState::Instructions);

        // Menu buttons are not live on the instructions screen
        let quit = center(&game.layout.menu[2]);
        assert_eq!(game.click(quit).unwrap(), Control::Continue);
        assert_eq!(game.state(), GameState::Instructions);

        let back = center(&game.layout.back);
        game.click(back).unwrap();
        assert_eq!(game.state(), GameState::Menu);

        let play = center(&game.layout.menu[0]);
        game.click(play).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.visible_buttons().is_empty());

        game.key_down(KeyCode::Escape).unwrap();
        assert_eq!(game.click(quit).unwrap(), Control::Quit);
    }

    #[test]
    fn test_restart_button_on_game_over() {
        let mut game = playing_game();
        game.level = 5;
        game.tick(1).unwrap();

        let restart = game.layout.restart.center();
        game.click(restart).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.level(), 1);
    }
}
