//! Status overlay composition
//!
//! Turns the game predicates into the indicator tint and the text lines for
//! one frame. Headline priority: game over, then stage cleared, then
//! damaged. The shot marker and the score line only show while the game is
//! running.

use crate::foundation::math::{Vec2, Vec3};
use crate::game::control::GameControl;

const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const CYAN: Vec3 = Vec3::new(0.0, 1.0, 1.0);
const STAGE_BLUE: Vec3 = Vec3::new(0.0, 0.0, 0.7);
const SCORE_BLUE: Vec3 = Vec3::new(0.1, 0.1, 0.7);

/// Which headline won this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Headline {
    /// Player energy exhausted
    GameOver,
    /// A stage was just reached
    StageCleared(i32),
    /// Recently hit
    Damaged,
    /// Nothing to announce
    None,
}

/// One line of overlay text
#[derive(Debug, Clone, PartialEq)]
pub struct StatusText {
    /// The string
    pub text: String,
    /// Screen position, origin at the centre
    pub position: Vec2,
    /// Glyph scale
    pub scale: f32,
    /// Colour
    pub color: Vec3,
}

impl StatusText {
    fn new(text: impl Into<String>, x: f32, y: f32, scale: f32, color: Vec3) -> Self {
        Self {
            text: text.into(),
            position: Vec2::new(x, y),
            scale,
            color,
        }
    }
}

/// Everything the overlay shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct StatusDisplay {
    /// Winning headline
    pub headline: Headline,
    /// Indicator rectangle tint
    pub indicator: Vec3,
    /// Text lines in draw order
    pub lines: Vec<StatusText>,
}

impl StatusDisplay {
    /// Build the display for time `now`
    ///
    /// Queries the stage-cleared predicate, which arms its timer on the
    /// first call of a session.
    pub fn compose(game: &mut GameControl, now: f64) -> Self {
        if game.is_game_ended() {
            return Self {
                headline: Headline::GameOver,
                indicator: RED,
                lines: vec![StatusText::new("Game Over !!!", -150.0, 0.0, 2.0, RED)],
            };
        }

        let mut lines = Vec::new();
        let (headline, indicator) = if game.is_stage_cleared(now) {
            let stage = game.stage();
            lines.push(StatusText::new(format!("Stage {stage}"), -100.0, 0.0, 2.0, CYAN));
            (Headline::StageCleared(stage), STAGE_BLUE)
        } else if game.is_damaged(now) {
            lines.push(StatusText::new("Damaged !!!", -100.0, 0.0, 2.0, RED));
            (Headline::Damaged, RED)
        } else {
            (Headline::None, Vec3::zeros())
        };

        if game.is_shot(now) {
            lines.push(StatusText::new("+", 0.0, 0.0, 2.0, RED));
        }

        lines.push(StatusText::new(
            format!(
                "Stage {}, Player {}, Enemy {}",
                game.stage(),
                game.player_energy(),
                game.enemy_energy()
            ),
            100.0,
            250.0,
            1.0,
            SCORE_BLUE,
        ));

        Self {
            headline,
            indicator,
            lines,
        }
    }

    /// Whether any line reads `text`
    pub fn shows(&self, text: &str) -> bool {
        self.lines.iter().any(|line| line.text == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::control::{BASE_ENEMY_ENERGY, PLAYER_ENERGY};

    fn settled_game() -> GameControl {
        let mut game = GameControl::new();
        // Let the opening stage banner expire
        game.is_stage_cleared(0.0);
        game
    }

    #[test]
    fn test_opening_banner() {
        let mut game = GameControl::new();
        let display = StatusDisplay::compose(&mut game, 0.0);
        assert_eq!(display.headline, Headline::StageCleared(1));
        assert!(display.shows("Stage 1"));
        assert_eq!(display.indicator, STAGE_BLUE);
    }

    #[test]
    fn test_quiet_frame() {
        let mut game = settled_game();
        let display = StatusDisplay::compose(&mut game, 10.0);
        assert_eq!(display.headline, Headline::None);
        assert_eq!(display.indicator, Vec3::zeros());
        assert_eq!(display.lines.len(), 1);
        assert!(display.shows("Stage 1, Player 5, Enemy 30"));
        assert_eq!(display.lines[0].position, Vec2::new(100.0, 250.0));
    }

    #[test]
    fn test_stage_cleared_beats_damaged() {
        let mut game = settled_game();
        game.damaged(10.0);
        for _ in 0..BASE_ENEMY_ENERGY {
            game.attack_enemy(10.0);
        }
        let display = StatusDisplay::compose(&mut game, 10.1);
        assert_eq!(display.headline, Headline::StageCleared(2));
        assert!(!display.shows("Damaged !!!"));

        let display = StatusDisplay::compose(&mut game, 10.8);
        assert_eq!(display.headline, Headline::Damaged);
        assert!(display.shows("Damaged !!!"));
        assert_eq!(display.indicator, RED);
    }

    #[test]
    fn test_shot_marker_alongside_headline() {
        let mut game = settled_game();
        game.damaged(10.0);
        game.shoot(10.0);
        let display = StatusDisplay::compose(&mut game, 10.05);
        assert_eq!(display.headline, Headline::Damaged);
        assert!(display.shows("+"));
        assert!(display.shows("Stage 1, Player 4, Enemy 30"));
    }

    #[test]
    fn test_game_over_hides_everything_else() {
        let mut game = settled_game();
        for _ in 0..PLAYER_ENERGY {
            game.damaged(10.0);
        }
        game.shoot(10.0);
        let display = StatusDisplay::compose(&mut game, 10.0);
        assert_eq!(display.headline, Headline::GameOver);
        assert_eq!(display.lines.len(), 1);
        assert_eq!(display.lines[0].text, "Game Over !!!");
        assert_eq!(display.lines[0].scale, 2.0);
    }
}
