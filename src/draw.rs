use crate::game::{Game, GameState};
use crate::grid::{Cell, Direction, Grid};
use crate::ui::Button;
use ggez::graphics::{
    self, Canvas, Color, DrawMode, DrawParam, Mesh, MeshBuilder, Rect, Text, TextAlign, TextLayout,
};
use ggez::mint::Point2;
use ggez::{Context, GameResult};
use rand::Rng;

// Colors
const BACKGROUND: Color = Color::new(0.06, 0.22, 0.06, 1.0);
const GRID_COLOR: Color = Color::new(0.12, 0.31, 0.12, 1.0);
const SNAKE_HEAD_COLOR: Color = Color::new(0.0, 1.0, 0.39, 1.0);
const SNAKE_HEAD_OUTLINE: Color = Color::new(0.0, 1.0, 0.59, 1.0);
const FOOD_COLOR: Color = Color::new(1.0, 0.2, 0.2, 1.0);
const FOOD_OUTLINE: Color = Color::new(1.0, 0.78, 0.78, 1.0);
const OBSTACLE_COLOR: Color = Color::new(0.39, 0.39, 0.59, 1.0);
const OBSTACLE_OUTLINE: Color = Color::new(0.59, 0.59, 0.78, 1.0);
const TEXT_COLOR: Color = Color::new(1.0, 1.0, 0.78, 1.0);
const HIGHLIGHT_COLOR: Color = Color::new(1.0, 1.0, 0.39, 1.0);
const GAME_OVER_COLOR: Color = Color::new(1.0, 0.2, 0.2, 1.0);
const MENU_BG: Color = Color::new(0.04, 0.16, 0.04, 0.78);
const GAME_OVER_BG: Color = Color::new(0.0, 0.0, 0.0, 0.78);
const BUTTON_COLOR: Color = Color::new(0.2, 0.59, 0.2, 1.0);
const BUTTON_HOVER: Color = Color::new(0.31, 0.78, 0.31, 1.0);

const FONT_SIZE: f32 = 32.0;
const SMALL_FONT_SIZE: f32 = 22.0;

const TITLE: &str = "Magical Garden Snake";

const INSTRUCTIONS: [&str; 11] = [
    "Control the snake using arrow keys",
    "Eat the red fruits to grow and earn points",
    "Avoid colliding with yourself or the blue obstacles",
    "",
    "Game Features:",
    "- Snake speeds up as you eat more fruits",
    "- New obstacles appear each level",
    "- Earn 10 points per fruit, multiplied by level",
    "- Reach level 5 to win the game!",
    "",
    "Good luck in the magical garden!",
];

pub fn draw_frame<R: Rng>(ctx: &mut Context, game: &Game<R>) -> GameResult {
    let mut canvas = Canvas::from_frame(ctx, BACKGROUND);
    draw_grid(ctx, &mut canvas, game.grid())?;

    match game.state() {
        GameState::Playing => draw_board(ctx, &mut canvas, game)?,
        GameState::Menu => draw_menu(ctx, &mut canvas, game)?,
        GameState::Instructions => draw_instructions(ctx, &mut canvas, game)?,
        GameState::GameOver => {
            draw_board(ctx, &mut canvas, game)?;
            draw_game_over(ctx, &mut canvas, game)?;
        }
    }

    canvas.finish(ctx)
}

fn draw_grid(ctx: &mut Context, canvas: &mut Canvas, grid: &Grid) -> GameResult {
    let width = (grid.width * grid.cell_size) as f32;
    let height = (grid.height * grid.cell_size) as f32;

    let mut builder = MeshBuilder::new();
    for x in (0..grid.width).map(|c| (c * grid.cell_size) as f32) {
        builder.line(&[[x, 0.0], [x, height]], 1.0, GRID_COLOR)?;
    }
    for y in (0..grid.height).map(|r| (r * grid.cell_size) as f32) {
        builder.line(&[[0.0, y], [width, y]], 1.0, GRID_COLOR)?;
    }
    canvas.draw(&Mesh::from_data(ctx, builder.build()), DrawParam::default());
    Ok(())
}

fn draw_board<R: Rng>(ctx: &mut Context, canvas: &mut Canvas, game: &Game<R>) -> GameResult {
    draw_obstacles(ctx, canvas, game)?;
    draw_snake(ctx, canvas, game)?;
    draw_food(ctx, canvas, game)?;
    draw_hud(canvas, game);
    Ok(())
}

fn draw_obstacles<R: Rng>(ctx: &mut Context, canvas: &mut Canvas, game: &Game<R>) -> GameResult {
    if game.obstacles().is_empty() {
        return Ok(());
    }
    let mut builder = MeshBuilder::new();
    for cell in game.obstacles().cells() {
        let rect = game.grid().cell_rect(*cell);
        builder.rectangle(DrawMode::fill(), rect, OBSTACLE_COLOR)?;
        builder.rectangle(DrawMode::stroke(2.0), rect, OBSTACLE_OUTLINE)?;
    }
    canvas.draw(&Mesh::from_data(ctx, builder.build()), DrawParam::default());
    Ok(())
}

fn draw_snake<R: Rng>(ctx: &mut Context, canvas: &mut Canvas, game: &Game<R>) -> GameResult {
    let grid = game.grid();
    let snake = game.snake();
    let mut builder = MeshBuilder::new();

    // Tail first so the head ends up on top
    for (i, cell) in snake.body().iter().enumerate().skip(1).rev() {
        let rect = grid.cell_rect(*cell);
        // Body fades the further it is from the head
        let shade = (255.0 - i as f32 * 5.0).max(100.0) / 255.0;
        builder.rectangle(DrawMode::fill(), rect, Color::new(0.0, shade, 0.2, 1.0))?;
        builder.rectangle(
            DrawMode::stroke(1.0),
            rect,
            Color::new(0.0, (shade + 0.2).min(1.0), 0.39, 1.0),
        )?;
    }

    let head = snake.head();
    let rect = grid.cell_rect(head);
    builder.rectangle(DrawMode::fill(), rect, SNAKE_HEAD_COLOR)?;
    builder.rectangle(DrawMode::stroke(2.0), rect, SNAKE_HEAD_OUTLINE)?;

    let eye_radius = grid.cell_size as f32 / 5.0;
    for eye in eye_positions(grid, head, snake.direction()) {
        builder.circle(DrawMode::fill(), eye, eye_radius, 0.1, Color::BLACK)?;
    }

    canvas.draw(&Mesh::from_data(ctx, builder.build()), DrawParam::default());
    Ok(())
}

/// Both eyes sit on the side of the head facing the travel direction.
fn eye_positions(grid: &Grid, head: Cell, direction: Direction) -> [Point2<f32>; 2] {
    let (near, far) = (0.25, 0.75);
    let ((lx, ly), (rx, ry)) = match direction {
        Direction::Right => ((far, near), (far, far)),
        Direction::Left => ((near, near), (near, far)),
        Direction::Down => ((near, far), (far, far)),
        Direction::Up => ((near, near), (far, near)),
    };
    [grid.cell_point(head, lx, ly), grid.cell_point(head, rx, ry)]
}

fn draw_food<R: Rng>(ctx: &mut Context, canvas: &mut Canvas, game: &Game<R>) -> GameResult {
    let grid = game.grid();
    let food = game.food();
    let cell = food.position();
    let rect = grid.cell_rect(cell);

    let mut builder = MeshBuilder::new();
    builder.rectangle(DrawMode::fill(), rect, FOOD_COLOR)?;
    builder.rectangle(DrawMode::stroke(1.0), rect, FOOD_OUTLINE)?;

    let glow = (150.0 + food.sparkle() * 254.0).min(255.0) / 255.0;
    let sparkle_color = Color::new(1.0, glow, glow, 1.0);
    for (fx, fy) in [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)] {
        builder.circle(DrawMode::fill(), grid.cell_point(cell, fx, fy), 2.0, 0.1, sparkle_color)?;
    }

    canvas.draw(&Mesh::from_data(ctx, builder.build()), DrawParam::default());
    Ok(())
}

fn draw_hud<R: Rng>(canvas: &mut Canvas, game: &Game<R>) {
    let width = game.config().screen_width as f32;
    let snake = game.snake();

    draw_text(
        canvas,
        format!("Score: {}", snake.score()),
        FONT_SIZE,
        [10.0, 10.0],
        TextLayout::top_left(),
        TEXT_COLOR,
    );
    draw_text(
        canvas,
        format!("High Score: {}", game.high_score().score),
        FONT_SIZE,
        [width - 10.0, 10.0],
        TextLayout {
            h_align: TextAlign::End,
            v_align: TextAlign::Begin,
        },
        TEXT_COLOR,
    );
    draw_text(
        canvas,
        format!("Level: {}", game.level()),
        FONT_SIZE,
        [width / 2.0, 10.0],
        TextLayout {
            h_align: TextAlign::Middle,
            v_align: TextAlign::Begin,
        },
        TEXT_COLOR,
    );
    draw_text(
        canvas,
        format!("Length: {}", snake.len()),
        SMALL_FONT_SIZE,
        [10.0, 50.0],
        TextLayout::top_left(),
        TEXT_COLOR,
    );
    draw_text(
        canvas,
        format!("Speed: {}/10", snake.speed_rating()),
        SMALL_FONT_SIZE,
        [10.0, 80.0],
        TextLayout::top_left(),
        TEXT_COLOR,
    );
}

fn draw_menu<R: Rng>(ctx: &mut Context, canvas: &mut Canvas, game: &Game<R>) -> GameResult {
    draw_overlay(ctx, canvas, game, MENU_BG)?;
    let center_x = game.config().screen_width as f32 / 2.0;

    // Drop shadow under the title
    draw_centered(canvas, TITLE, FONT_SIZE, [center_x + 3.0, 113.0], Color::BLACK);
    draw_centered(canvas, TITLE, FONT_SIZE, [center_x, 110.0], HIGHLIGHT_COLOR);
    draw_centered(
        canvas,
        "Collect enchanted fruits in the magical garden",
        SMALL_FONT_SIZE,
        [center_x, 160.0],
        TEXT_COLOR,
    );

    draw_buttons(ctx, canvas, game.visible_buttons())
}

fn draw_instructions<R: Rng>(ctx: &mut Context, canvas: &mut Canvas, game: &Game<R>) -> GameResult {
    draw_overlay(ctx, canvas, game, MENU_BG)?;
    let center_x = game.config().screen_width as f32 / 2.0;

    draw_centered(canvas, "Instructions", FONT_SIZE, [center_x, 60.0], HIGHLIGHT_COLOR);
    for (i, line) in INSTRUCTIONS.iter().enumerate() {
        let y = 130.0 + i as f32 * 30.0;
        draw_centered(canvas, *line, SMALL_FONT_SIZE, [center_x, y], TEXT_COLOR);
    }

    draw_buttons(ctx, canvas, game.visible_buttons())
}

fn draw_game_over<R: Rng>(ctx: &mut Context, canvas: &mut Canvas, game: &Game<R>) -> GameResult {
    draw_overlay(ctx, canvas, game, GAME_OVER_BG)?;
    let center_x = game.config().screen_width as f32 / 2.0;
    let high_score = game.high_score();

    draw_centered(canvas, "Game Over", FONT_SIZE, [center_x, 160.0], GAME_OVER_COLOR);
    draw_centered(
        canvas,
        format!("Final Score: {}", game.snake().score()),
        FONT_SIZE,
        [center_x, 210.0],
        TEXT_COLOR,
    );

    let best = match high_score.set_at {
        Some(at) => format!("High Score: {} (set at {})", high_score.score, at.format("%H:%M")),
        None => format!("High Score: {}", high_score.score),
    };
    draw_centered(canvas, best, FONT_SIZE, [center_x, 250.0], TEXT_COLOR);

    if game.has_won() {
        draw_centered(
            canvas,
            "You Mastered the Magical Garden!",
            FONT_SIZE,
            [center_x, 300.0],
            HIGHLIGHT_COLOR,
        );
    }

    draw_buttons(ctx, canvas, game.visible_buttons())
}

fn draw_overlay<R: Rng>(ctx: &mut Context, canvas: &mut Canvas, game: &Game<R>, color: Color) -> GameResult {
    let screen = Rect::new(
        0.0,
        0.0,
        game.config().screen_width as f32,
        game.config().screen_height as f32,
    );
    let overlay = Mesh::new_rectangle(ctx, DrawMode::fill(), screen, color)?;
    canvas.draw(&overlay, DrawParam::default());
    Ok(())
}

fn draw_buttons(ctx: &mut Context, canvas: &mut Canvas, buttons: &[Button]) -> GameResult {
    let mouse = ctx.mouse.position();
    for button in buttons {
        let fill = if button.contains(mouse) {
            BUTTON_HOVER
        } else {
            BUTTON_COLOR
        };
        let body = Mesh::new_rounded_rectangle(ctx, DrawMode::fill(), button.rect, 10.0, fill)?;
        let border =
            Mesh::new_rounded_rectangle(ctx, DrawMode::stroke(3.0), button.rect, 10.0, HIGHLIGHT_COLOR)?;
        canvas.draw(&body, DrawParam::default());
        canvas.draw(&border, DrawParam::default());

        let center = button.center();
        draw_centered(canvas, button.label, FONT_SIZE, [center.x, center.y], TEXT_COLOR);
    }
    Ok(())
}

fn draw_centered(canvas: &mut Canvas, text: impl Into<graphics::TextFragment>, size: f32, dest: [f32; 2], color: Color) {
    draw_text(canvas, text, size, dest, TextLayout::center(), color);
}

fn draw_text(
    canvas: &mut Canvas,
    text: impl Into<graphics::TextFragment>,
    size: f32,
    dest: [f32; 2],
    layout: TextLayout,
    color: Color,
) {
    let mut text = Text::new(text);
    text.set_scale(size).set_layout(layout);
    canvas.draw(&text, DrawParam::default().dest(dest).color(color));
}
