use crate::config::GameConfig;
use ggez::graphics::Rect;
use ggez::mint::Point2;

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;
const MENU_BUTTON_SPACING: f32 = 70.0;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ButtonAction {
    Play,
    Instructions,
    Quit,
    Back,
    Restart,
}

#[derive(Clone, Debug)]
pub struct Button {
    pub label: &'static str,
    pub rect: Rect,
    pub action: ButtonAction,
}

impl Button {
    fn centered(label: &'static str, center_x: f32, center_y: f32, action: ButtonAction) -> Self {
        Button {
            label,
            rect: Rect::new(
                center_x - BUTTON_WIDTH / 2.0,
                center_y - BUTTON_HEIGHT / 2.0,
                BUTTON_WIDTH,
                BUTTON_HEIGHT,
            ),
            action,
        }
    }

    pub fn contains(&self, point: Point2<f32>) -> bool {
        self.rect.contains(point)
    }

    pub fn center(&self) -> Point2<f32> {
        Point2 {
            x: self.rect.x + self.rect.w / 2.0,
            y: self.rect.y + self.rect.h / 2.0,
        }
    }
}

/// Where every clickable button sits on screen.
pub struct Layout {
    pub menu: Vec<Button>,
    pub restart: Button,
    pub back: Button,
}

impl Layout {
    pub fn new(config: &GameConfig) -> Self {
        let width = config.screen_width as f32;
        let height = config.screen_height as f32;
        let center_x = width / 2.0;

        let menu = [
            ("Play", ButtonAction::Play),
            ("Instructions", ButtonAction::Instructions),
            ("Quit", ButtonAction::Quit),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (label, action))| {
            let y = height / 2.0 - 100.0 + i as f32 * MENU_BUTTON_SPACING;
            Button::centered(label, center_x, y, action)
        })
        .collect();

        Layout {
            menu,
            restart: Button::centered("Play Again", center_x, height / 2.0 + 50.0, ButtonAction::Restart),
            back: Button::centered("Back to Menu", center_x, height - 100.0, ButtonAction::Back),
        }
    }
}

/// First button under `point`, if any.
pub fn hit_test(buttons: &[Button], point: Point2<f32>) -> Option<ButtonAction> {
    buttons.iter().find(|b| b.contains(point)).map(|b| b.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_layout() {
        let layout = Layout::new(&GameConfig::default());
        let centers: Vec<_> = layout.menu.iter().map(|b| (b.center().x, b.center().y)).collect();
        assert_eq!(centers, vec![(400.0, 200.0), (400.0, 270.0), (400.0, 340.0)]);
        assert_eq!(layout.restart.center().y, 350.0);
        assert_eq!(layout.back.center().y, 500.0);
    }

    #[test]
    fn test_hit_test() {
        let layout = Layout::new(&GameConfig::default());
        let click = |x, y| hit_test(&layout.menu, Point2 { x, y });

        assert_eq!(click(400.0, 200.0), Some(ButtonAction::Play));
        assert_eq!(click(310.0, 280.0), Some(ButtonAction::Instructions));
        assert_eq!(click(490.0, 360.0), Some(ButtonAction::Quit));
        // Gap between Play and Instructions
        assert_eq!(click(400.0, 235.0), None);
        assert_eq!(click(50.0, 50.0), None);
    }
}
