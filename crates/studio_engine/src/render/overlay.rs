//! Text overlay interface
//!
//! Status text is handed to a [`TextOverlay`] in screen coordinates centred
//! on the viewport. Glyph rasterisation is the implementor's business.

use crate::foundation::math::{Vec2, Vec3};
use crate::scene::environment::StudioEnvironment;

/// Draws text over the scene
pub trait TextOverlay {
    /// Draw `text` at `position` with the given scale and colour
    fn print(&mut self, text: &str, position: Vec2, scale: f32, color: Vec3, env: &StudioEnvironment);
}

/// A line of text as it was printed
#[derive(Debug, Clone, PartialEq)]
pub struct PrintedText {
    /// The string
    pub text: String,
    /// Screen position
    pub position: Vec2,
    /// Glyph scale
    pub scale: f32,
    /// Text colour
    pub color: Vec3,
}

/// Overlay that keeps and logs printed text instead of drawing it
#[derive(Debug, Default)]
pub struct LogTextOverlay {
    lines: Vec<PrintedText>,
    last_logged: Option<String>,
}

impl LogTextOverlay {
    /// Create a new overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed since the last [`LogTextOverlay::clear`]
    pub fn lines(&self) -> &[PrintedText] {
        &self.lines
    }

    /// Whether any printed line equals `text`
    pub fn contains(&self, text: &str) -> bool {
        self.lines.iter().any(|line| line.text == text)
    }

    /// Forget printed lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl TextOverlay for LogTextOverlay {
    fn print(&mut self, text: &str, position: Vec2, scale: f32, color: Vec3, _env: &StudioEnvironment) {
        // Status lines repeat every frame; only log changes
        if self.last_logged.as_deref() != Some(text) {
            log::debug!("overlay: {text}");
            self.last_logged = Some(text.to_string());
        }
        self.lines.push(PrintedText {
            text: text.to_string(),
            position,
            scale,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_printed_lines() {
        let env = StudioEnvironment::default();
        let mut overlay = LogTextOverlay::new();
        overlay.print("Damaged !!!", Vec2::new(-100.0, 0.0), 2.0, Vec3::x(), &env);
        assert!(overlay.contains("Damaged !!!"));
        assert_eq!(overlay.lines()[0].scale, 2.0);
        overlay.clear();
        assert!(overlay.lines().is_empty());
    }
}
