//! Shared types module - geometry contract, phases, cues and input
//!
//! This module defines the data shared between the match engine and its
//! collaborators (renderer, input tracker, audio worker). Everything here is
//! plain data with no external dependencies.
//!
//! # Field Geometry
//!
//! The play field is measured in abstract pixels, `y` grows downward:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FIELD_WIDTH` | 500 | Horizontal extent, valid x in `[0, 500)` |
//! | `FIELD_HEIGHT` | 700 | Vertical extent |
//! | `PADDLE_WIDTH` | 125 | A quarter of the field |
//! | `PADDLE_HEIGHT` | 5 | Racket thickness |
//! | `PADDLE_FLOOR_GAP` | 5 | Distance between racket and floor |
//! | `PADDLE_SPEED` | 8 | Pixels moved per held frame |
//! | `BALL_LINE_MARGIN` | 5 | Added to a ball's y when testing the paddle line |
//!
//! # Match Rules
//!
//! - `WIN_SCORE`: first side to 21 ends the match
//! - `ESCALATION_STEP`: a new ball joins whenever the player score equals
//!   3 × the current ball count
//!
//! # Examples
//!
//! ```
//! use tui_fronton_types::{Phase, SoundCue, PADDLE_Y, FIELD_HEIGHT};
//!
//! assert_eq!(Phase::default(), Phase::NotStarted);
//! assert_eq!(SoundCue::Hit.as_str(), "hit");
//! assert_eq!(PADDLE_Y, FIELD_HEIGHT - 11);
//! ```

/// Field width in pixels.
pub const FIELD_WIDTH: i32 = 500;

/// Field height in pixels.
pub const FIELD_HEIGHT: i32 = 700;

/// Racket width (a quarter of the field).
pub const PADDLE_WIDTH: i32 = FIELD_WIDTH / 4;

/// Racket height.
pub const PADDLE_HEIGHT: i32 = 5;

/// Gap between the racket and the floor.
pub const PADDLE_FLOOR_GAP: i32 = 5;

/// Fixed racket top edge; balls crossing this line are either hit or missed.
pub const PADDLE_Y: i32 = FIELD_HEIGHT - 1 - PADDLE_FLOOR_GAP - PADDLE_HEIGHT;

/// Racket left edge at the start of every match (centred).
pub const PADDLE_START_X: i32 = FIELD_WIDTH / 2 - PADDLE_WIDTH / 2;

/// Pixels the racket moves per frame while a direction is held.
pub const PADDLE_SPEED: i32 = 8;

/// Margin added to a ball's y when testing whether it reached the paddle line.
pub const BALL_LINE_MARGIN: i32 = 5;

/// Score that ends the match.
pub const WIN_SCORE: u32 = 21;

/// Player points required per ball before another ball is added.
pub const ESCALATION_STEP: u32 = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Radius of the ball spawned at start-up and on rematch.
pub const DEFAULT_BALL_RADIUS: i32 = 5;

/// Per-axis speed of the ball spawned at start-up and on rematch.
pub const DEFAULT_BALL_SPEED: i32 = 5;

/// Colour of the ball spawned at start-up and on rematch.
pub const DEFAULT_BALL_COLOR: Rgba = Rgba::new(0, 255, 0, 0);

/// Inclusive radius range for escalation balls.
pub const ESCALATION_RADIUS: (i32, i32) = (4, 10);

/// Inclusive per-axis speed range for escalation balls.
pub const ESCALATION_SPEED: (i32, i32) = (3, 6);


/// Coarse state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Waiting for the player to confirm the start.
    #[default]
    NotStarted,
    /// Balls are moving and scoring is live.
    Playing,
    /// A side reached [`WIN_SCORE`]; waiting for a rematch.
    Over,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "notStarted",
            Phase::Playing => "playing",
            Phase::Over => "over",
        }
    }
}

/// Which side reached the win threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Player,
    Cpu,
}

/// Discrete sound cue triggered by the match engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Match started.
    Start,
    /// Ball deflected by the racket.
    Hit,
    /// Ball went past the racket.
    Miss,
    /// Match finished.
    Over,
}

impl SoundCue {
    /// Every cue, in bank order.
    pub const ALL: [SoundCue; 4] = [SoundCue::Start, SoundCue::Hit, SoundCue::Miss, SoundCue::Over];

    /// Stable slot in [`SoundCue::ALL`].
    pub fn index(&self) -> usize {
        match self {
            SoundCue::Start => 0,
            SoundCue::Hit => 1,
            SoundCue::Miss => 2,
            SoundCue::Over => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Start => "start",
            SoundCue::Hit => "hit",
            SoundCue::Miss => "miss",
            SoundCue::Over => "over",
        }
    }

    /// Asset file name looked up in the sound directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_fronton_types::SoundCue;
    ///
    /// assert_eq!(SoundCue::Start.file_name(), "start.mp3");
    /// assert_eq!(SoundCue::Over.file_name(), "over.mp3");
    /// ```
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundCue::Start => "start.mp3",
            SoundCue::Hit => "hit.mp3",
            SoundCue::Miss => "miss.mp3",
            SoundCue::Over => "over.mp3",
        }
    }
}

/// Receiver of sound cues.
///
/// Implementations must return immediately; playback happens elsewhere and a
/// dropped or late cue never affects the match.
pub trait CueSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl CueSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

impl CueSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

impl<S: CueSink + ?Sized> CueSink for &mut S {
    fn play(&mut self, cue: SoundCue) {
        (**self).play(cue);
    }
}

/// 8-bit RGBA colour. Alpha is carried for fidelity but ignored by the
/// terminal renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Key states sampled once per tick.
///
/// Both directions may be held at once; they cancel out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// Start / rematch.
    pub confirm: bool,
    pub quit: bool,
}

impl FrameInput {
    pub const IDLE: FrameInput = FrameInput {
        left: false,
        right: false,
        confirm: false,
        quit: false,
    };

    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Self::IDLE
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::IDLE
        }
    }

    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::IDLE
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::IDLE
        }
    }

    /// Net horizontal direction: -1, 0 or 1.
    pub fn direction(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }
}
