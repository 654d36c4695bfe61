mod app;
mod config;
mod draw;
mod error;
mod food;
mod game;
mod grid;
mod obstacle;
mod snake;
mod sound;
mod ui;

use app::App;
use config::GameConfig;
use game::Game;
use ggez::{conf, event, ContextBuilder, GameResult};
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() -> GameResult {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap_or_else(|e| eprintln!("Failed to initialize logger: {}", e));

    let config = GameConfig::default();
    match serde_json::to_string(&config) {
        Ok(json) => info!("starting with {}", json),
        Err(e) => info!("starting (config not printable: {})", e),
    }

    let window_setup = conf::WindowSetup::default()
        .title("Magical Garden Snake")
        .vsync(true);
    let window_mode = conf::WindowMode::default()
        .dimensions(config.screen_width as f32, config.screen_height as f32)
        .resizable(false);

    let (mut ctx, event_loop) = ContextBuilder::new("garden_snake", "garden_snake")
        .window_setup(window_setup)
        .window_mode(window_mode)
        .build()?;

    let game = Game::new(config)?;
    let app = App::new(&mut ctx, game);
    event::run(ctx, event_loop, app)
}
