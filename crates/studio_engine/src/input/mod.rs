//! Input handling
//!
//! An [`InputSource`] reports one [`InputFrame`] per loop iteration: the
//! keys held down, the cursor position and the framebuffer state. The
//! [`InputManager`] turns those snapshots into camera commands.
//!
//! Only one discrete action runs per frame. Shooting wins over moving and is
//! edge-triggered, so holding Space fires once. Mouse look needs a
//! calibration sample whenever input focus is (re)acquired.

use std::collections::VecDeque;

use bitflags::bitflags;

bitflags! {
    /// Keys the studio reacts to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Keys: u8 {
        /// Shoot
        const SPACE = 1 << 0;
        /// Move forward
        const W = 1 << 1;
        /// Move backward
        const S = 1 << 2;
        /// Strafe left; reported but not acted on
        const A = 1 << 3;
        /// Strafe right; reported but not acted on
        const D = 1 << 4;
        /// Close the studio
        const ESCAPE = 1 << 5;
    }
}

/// Discrete action picked for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Cast a shot along the camera gaze
    Shoot,
    /// Move along the gaze
    Forward,
    /// Move against the gaze
    Backward,
}

/// Window and input state sampled once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct InputFrame {
    /// Keys currently down
    pub keys: Keys,
    /// Cursor position in screen pixels, if the window reports one
    pub cursor: Option<(f64, f64)>,
    /// Framebuffer size in pixels
    pub framebuffer: (u32, u32),
    /// Framebuffer size changed since the last frame
    pub resized: bool,
    /// Input focus came back; the next cursor sample only calibrates
    pub focus_regained: bool,
    /// The window was asked to close
    pub close_requested: bool,
    /// Scroll wheel offset
    pub scroll: f32,
}

impl InputFrame {
    /// Frame with nothing pressed
    pub fn idle(width: u32, height: u32) -> Self {
        Self {
            keys: Keys::empty(),
            cursor: None,
            framebuffer: (width, height),
            resized: false,
            focus_regained: false,
            close_requested: false,
            scroll: 0.0,
        }
    }

    /// Hold `keys` down
    pub fn with_keys(mut self, keys: Keys) -> Self {
        self.keys = keys;
        self
    }

    /// Report the cursor at `(x, y)`
    pub fn with_cursor(mut self, x: f64, y: f64) -> Self {
        self.cursor = Some((x, y));
        self
    }

    /// Report a new framebuffer size
    pub fn resized_to(mut self, width: u32, height: u32) -> Self {
        self.framebuffer = (width, height);
        self.resized = true;
        self
    }

    /// Mark focus as regained
    pub fn with_focus_regained(mut self) -> Self {
        self.focus_regained = true;
        self
    }

    /// Ask the studio to stop
    pub fn closing(mut self) -> Self {
        self.close_requested = true;
        self
    }

    /// Whether the studio should stop after this frame
    pub fn should_stop(&self) -> bool {
        self.close_requested || self.keys.contains(Keys::ESCAPE)
    }
}

/// Something that produces input frames: a window system or a script
pub trait InputSource {
    /// Sample the current input state
    fn poll(&mut self) -> InputFrame;
}

/// Cursor tracking for mouse look
#[derive(Debug, Clone, Default)]
pub struct MouseLook {
    previous: Option<(f64, f64)>,
}

impl MouseLook {
    /// Tracker waiting for its first sample
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the next sample as a calibration sample
    pub fn recalibrate(&mut self) {
        self.previous = None;
    }

    /// Offset since the previous sample, with y growing upward
    ///
    /// The first sample after construction or [`MouseLook::recalibrate`]
    /// yields zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn offset(&mut self, x: f64, y: f64) -> (f32, f32) {
        let (prev_x, prev_y) = self.previous.unwrap_or((x, y));
        self.previous = Some((x, y));
        ((x - prev_x) as f32, (prev_y - y) as f32)
    }
}

/// Camera commands derived from one input frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameCommands {
    /// The discrete action, if any
    pub action: Option<KeyAction>,
    /// Mouse look offset
    pub look: (f32, f32),
    /// Scroll offset
    pub scroll: f32,
}

/// Input manager
#[derive(Debug, Clone, Default)]
pub struct InputManager {
    mouse: MouseLook,
    space_down: bool,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate `frame` into this frame's commands
    pub fn update(&mut self, frame: &InputFrame) -> FrameCommands {
        if frame.focus_regained {
            self.mouse.recalibrate();
        }
        let look = frame
            .cursor
            .map_or((0.0, 0.0), |(x, y)| self.mouse.offset(x, y));

        FrameCommands {
            action: self.action(frame.keys),
            look,
            scroll: frame.scroll,
        }
    }

    fn action(&mut self, keys: Keys) -> Option<KeyAction> {
        let space = keys.contains(Keys::SPACE);
        let fire = space && !self.space_down;
        self.space_down = space;

        if fire {
            Some(KeyAction::Shoot)
        } else if keys.contains(Keys::W) {
            Some(KeyAction::Forward)
        } else if keys.contains(Keys::S) {
            Some(KeyAction::Backward)
        } else {
            None
        }
    }
}

/// Input source replaying prepared frames
///
/// Once the script runs out it reports a close request.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
    last: Option<InputFrame>,
}

impl ScriptedInput {
    /// Source replaying `frames` in order
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            last: None,
        }
    }

    /// Append a frame to the script
    pub fn push(&mut self, frame: InputFrame) {
        self.frames.push_back(frame);
    }

    /// Frames left to replay
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputFrame {
        match self.frames.pop_front() {
            Some(frame) => {
                self.last = Some(frame.clone());
                frame
            }
            None => {
                let (width, height) = self
                    .last
                    .as_ref()
                    .map_or((0, 0), |frame| frame.framebuffer);
                InputFrame::idle(width, height).closing()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_cursor_sample_calibrates() {
        let mut look = MouseLook::new();
        assert_eq!(look.offset(100.0, 100.0), (0.0, 0.0));
        assert_eq!(look.offset(110.0, 90.0), (10.0, 10.0));

        look.recalibrate();
        assert_eq!(look.offset(500.0, 500.0), (0.0, 0.0));
        assert_eq!(look.offset(500.0, 520.0), (0.0, -20.0));
    }

    #[test]
    fn test_shoot_beats_movement_once_per_press() {
        let mut input = InputManager::new();
        let held = InputFrame::idle(960, 540).with_keys(Keys::SPACE | Keys::W);

        assert_eq!(input.update(&held).action, Some(KeyAction::Shoot));
        // Still held: the shot is spent and movement takes over
        assert_eq!(input.update(&held).action, Some(KeyAction::Forward));

        let released = InputFrame::idle(960, 540);
        assert_eq!(input.update(&released).action, None);
        assert_eq!(input.update(&held).action, Some(KeyAction::Shoot));
    }

    #[test]
    fn test_forward_beats_backward() {
        let mut input = InputManager::new();
        let both = InputFrame::idle(960, 540).with_keys(Keys::W | Keys::S);
        assert_eq!(input.update(&both).action, Some(KeyAction::Forward));
        let back = InputFrame::idle(960, 540).with_keys(Keys::S | Keys::A);
        assert_eq!(input.update(&back).action, Some(KeyAction::Backward));
    }

    #[test]
    fn test_focus_regained_recalibrates_mouse() {
        let mut input = InputManager::new();
        input.update(&InputFrame::idle(960, 540).with_cursor(10.0, 10.0));
        let moved = input.update(&InputFrame::idle(960, 540).with_cursor(20.0, 10.0));
        assert_eq!(moved.look, (10.0, 0.0));

        let regained = InputFrame::idle(960, 540)
            .with_cursor(300.0, 300.0)
            .with_focus_regained();
        assert_eq!(input.update(&regained).look, (0.0, 0.0));
    }

    #[test]
    fn test_script_closes_when_exhausted() {
        let mut script = ScriptedInput::new([InputFrame::idle(800, 600)]);
        assert!(!script.poll().should_stop());
        let last = script.poll();
        assert!(last.should_stop());
        assert_eq!(last.framebuffer, (800, 600));
        assert_eq!(script.remaining(), 0);
    }

    #[test]
    fn test_escape_stops() {
        let frame = InputFrame::idle(1, 1).with_keys(Keys::ESCAPE);
        assert!(frame.should_stop());
    }
}
