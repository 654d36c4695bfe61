use crate::draw;
use crate::game::{Control, Game};
use crate::sound::Sounds;
use ggez::event::{ErrorOrigin, EventHandler, MouseButton};
use ggez::input::keyboard::KeyInput;
use ggez::mint::Point2;
use ggez::{Context, GameError, GameResult};
use log::error;

/// Glue between the ggez event loop and the game controller.
pub struct App {
    game: Game,
    sounds: Sounds,
    last_tick_ms: u128,
}

impl App {
    pub fn new(ctx: &mut Context, game: Game) -> Self {
        App {
            game,
            sounds: Sounds::new(ctx),
            last_tick_ms: ctx.time.time_since_start().as_millis(),
        }
    }

    fn frame(&mut self, ctx: &mut Context) -> GameResult {
        let now = ctx.time.time_since_start().as_millis();
        let elapsed = now.saturating_sub(self.last_tick_ms).min(u32::MAX as u128) as u32;
        self.last_tick_ms = now;

        let outcome = self.game.tick(elapsed)?;
        if outcome.ate_food {
            self.sounds.play_eat(ctx);
        }
        if outcome.crashed {
            self.sounds.play_crash(ctx);
        }
        Ok(())
    }

    fn apply(ctx: &mut Context, control: Control) {
        match control {
            Control::Continue => {}
            Control::Quit => ctx.request_quit(),
        }
    }
}

impl EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let frame_rate = self.game.config().frame_rate;
        while ctx.time.check_update_time(frame_rate) {
            self.frame(ctx)?;
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        draw::draw_frame(ctx, &self.game)
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeat: bool) -> GameResult {
        if let Some(keycode) = input.keycode {
            let control = self.game.key_down(keycode)?;
            Self::apply(ctx, control);
        }
        Ok(())
    }

    fn mouse_button_down_event(
        &mut self,
        ctx: &mut Context,
        _button: MouseButton,
        x: f32,
        y: f32,
    ) -> GameResult {
        let control = self.game.click(Point2 { x, y })?;
        Self::apply(ctx, control);
        Ok(())
    }

    fn on_error(&mut self, _ctx: &mut Context, origin: ErrorOrigin, e: GameError) -> bool {
        error!("{:?} failed: {}", origin, e);
        true
    }
}
