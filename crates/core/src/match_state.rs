//! Match state module - owns all gameplay state and advances it per frame
//!
//! [`MatchState::step`] is the single per-frame transition. It dispatches on
//! the current [`Phase`]:
//!
//! | Phase | Input | Effect |
//! |-------|-------|--------|
//! | any | quit | [`StepOutcome::Quit`] |
//! | NotStarted | confirm | Start cue, Playing |
//! | Over | confirm | fresh match with one default ball, NotStarted |
//! | Playing | - | one full [`tick`](MatchState::tick) |

use tracing::{debug, info};

use crate::ball::Ball;
use crate::paddle::{Paddle, PaddleBounds};
use crate::rng::FieldRng;
use crate::scoring::{escalation_ball, escalation_due, winner};
use crate::snapshot::{BallSnapshot, MatchSnapshot, PaddleRect};
use crate::types::*;

/// Match-level options fixed for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub seed: u64,
    pub paddle_bounds: PaddleBounds,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            paddle_bounds: PaddleBounds::Clamped,
        }
    }
}

/// What the frame driver should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Quit,
}

#[derive(Debug, Clone)]
pub struct MatchState {
    phase: Phase,
    player_score: u32,
    cpu_score: u32,
    balls: Vec<Ball>,
    paddle: Paddle,
    rng: FieldRng,
    config: MatchConfig,
}

impl MatchState {
    /// Create an initialized match (no balls yet) with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self::with_config(MatchConfig {
            seed,
            ..MatchConfig::default()
        })
    }

    pub fn with_config(config: MatchConfig) -> Self {
        let mut state = Self {
            phase: Phase::NotStarted,
            player_score: 0,
            cpu_score: 0,
            balls: Vec::new(),
            paddle: Paddle::new(),
            rng: FieldRng::new(config.seed),
            config,
        };
        state.initialize();
        state
    }

    /// Reset to a fresh, not-started match.
    ///
    /// Clears every ball and re-centres the racket. The RNG keeps running, so
    /// a rematch does not replay the previous match.
    pub fn initialize(&mut self) {
        self.phase = Phase::NotStarted;
        self.player_score = 0;
        self.cpu_score = 0;
        self.balls.clear();
        self.paddle = Paddle::new();
        debug!(seed = self.rng.seed(), "match initialized");
    }

    /// Append a ball at a random column at the top of the field.
    ///
    /// `radius` must be positive.
    pub fn spawn_ball(&mut self, radius: i32, color: Rgba, speed_x: i32, speed_y: i32) {
        debug_assert!(radius > 0, "ball radius must be positive, got {radius}");
        let x = self.rng.spawn_x();
        self.balls.push(Ball::new(radius, color, x, speed_x, speed_y));
        debug!(
            balls = self.balls.len(),
            x, radius, speed_x, speed_y, "ball spawned"
        );
    }

    /// Spawn the green starter ball used at launch and on every rematch.
    pub fn spawn_default_ball(&mut self) {
        self.spawn_ball(
            DEFAULT_BALL_RADIUS,
            DEFAULT_BALL_COLOR,
            DEFAULT_BALL_SPEED,
            DEFAULT_BALL_SPEED,
        );
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn cpu_score(&self) -> u32 {
        self.cpu_score
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Direct ball access for drivers and tests that stage positions.
    pub fn balls_mut(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn winner(&self) -> Option<Winner> {
        winner(self.player_score, self.cpu_score)
    }

    pub fn snapshot_into(&self, out: &mut MatchSnapshot) {
        out.phase = self.phase;
        out.player_score = self.player_score;
        out.cpu_score = self.cpu_score;
        out.winner = self.winner();
        out.paddle = PaddleRect::from(&self.paddle);
        out.balls.clear();
        out.balls.extend(self.balls.iter().map(BallSnapshot::from));
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let mut s = MatchSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the session by one frame.
    pub fn step(&mut self, input: FrameInput, cues: &mut impl CueSink) -> StepOutcome {
        if input.quit {
            info!(phase = self.phase.as_str(), "quit requested");
            return StepOutcome::Quit;
        }

        match self.phase {
            Phase::NotStarted => {
                if input.confirm {
                    self.phase = Phase::Playing;
                    cues.play(SoundCue::Start);
                    info!(balls = self.balls.len(), "match started");
                }
            }
            Phase::Over => {
                if input.confirm {
                    self.initialize();
                    self.spawn_default_ball();
                    info!("rematch ready");
                }
            }
            Phase::Playing => self.tick(input, cues),
        }

        StepOutcome::Continue
    }

    /// One full gameplay tick: racket, every ball, then end conditions.
    ///
    /// Does nothing unless the match is [`Phase::Playing`].
    pub fn tick(&mut self, input: FrameInput, cues: &mut impl CueSink) {
        if self.phase != Phase::Playing {
            return;
        }

        self.paddle
            .shift(input.direction(), self.config.paddle_bounds);

        // Balls spawned by escalation join after the loop, so the range is fixed.
        let count = self.balls.len();
        for i in 0..count {
            self.advance_ball(i, cues);
        }

        self.settle(cues);
    }

    fn advance_ball(&mut self, i: usize, cues: &mut impl CueSink) {
        let ball = &mut self.balls[i];
        ball.advance();

        if ball.above_line(self.paddle.y) {
            ball.reflect_off_walls();
            return;
        }

        if self.paddle.covers(ball.x) {
            ball.vy = -ball.vy;
            self.player_score += 1;
            cues.play(SoundCue::Hit);
        } else {
            let x = self.rng.spawn_x();
            ball.reset(x);
            self.cpu_score += 1;
            cues.play(SoundCue::Miss);
            debug!(ball = i, x, cpu = self.cpu_score, "ball missed");
        }
    }

    fn settle(&mut self, cues: &mut impl CueSink) {
        if let Some(side) = winner(self.player_score, self.cpu_score) {
            cues.play(SoundCue::Over);
            self.phase = Phase::Over;
            info!(
                winner = ?side,
                player = self.player_score,
                cpu = self.cpu_score,
                "match over"
            );
        } else if escalation_due(self.player_score, self.balls.len()) {
            let params = escalation_ball(&mut self.rng);
            self.spawn_ball(params.radius, params.color, params.speed, params.speed);
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::with_config(MatchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(seed: u64) -> MatchState {
        let mut state = MatchState::new(seed);
        state.spawn_default_ball();
        let mut cues = Vec::new();
        state.step(FrameInput::confirm(), &mut cues);
        assert_eq!(state.phase, Phase::Playing);
        state
    }

    fn stage(state: &mut MatchState, x: i32, y: i32, vx: i32, vy: i32) {
        let b = &mut state.balls[0];
        b.x = x;
        b.y = y;
        b.vx = vx;
        b.vy = vy;
    }

    #[test]
    fn test_new_match_state() {
        let state = MatchState::new(12345);

        assert_eq!(state.phase, Phase::NotStarted);
        assert_eq!(state.player_score, 0);
        assert_eq!(state.cpu_score, 0);
        assert!(state.balls.is_empty());
        assert_eq!(state.paddle, Paddle::new());
        assert_eq!(state.config.seed, 12345);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut state = playing(5);
        state.player_score = 4;
        state.cpu_score = 9;
        state.paddle.x = 20;

        state.initialize();
        let once = state.snapshot();
        state.initialize();
        let twice = state.snapshot();

        assert_eq!(once, twice);
        assert_eq!(once.phase, Phase::NotStarted);
        assert_eq!((once.player_score, once.cpu_score), (0, 0));
        assert!(once.balls.is_empty());
        assert_eq!(state.paddle.x, PADDLE_START_X);
        assert_eq!(state.paddle.speed, PADDLE_SPEED);
    }

    #[test]
    fn test_spawn_ball_places_at_top() {
        let mut state = MatchState::new(3);
        state.spawn_ball(7, Rgba::new(1, 2, 3, 4), -2, 6);

        let b = state.balls[0];
        assert_eq!(b.y, 7);
        assert!((0..FIELD_WIDTH).contains(&b.x));
        assert_eq!((b.vx, b.vy), (-2, 6));
        assert_eq!(b.color, Rgba::new(1, 2, 3, 4));
    }

    #[test]
    fn test_not_started_ignores_idle_and_movement() {
        let mut state = MatchState::new(1);
        state.spawn_default_ball();
        let before = state.snapshot();
        let mut cues = Vec::new();

        state.step(FrameInput::IDLE, &mut cues);
        state.step(FrameInput::left(), &mut cues);

        assert_eq!(state.snapshot(), before);
        assert!(cues.is_empty());
    }

    #[test]
    fn test_confirm_starts_match_with_cue() {
        let mut state = MatchState::new(1);
        state.spawn_default_ball();
        let mut cues = Vec::new();

        let outcome = state.step(FrameInput::confirm(), &mut cues);

        assert_eq!(outcome, StepOutcome::Continue);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(cues, vec![SoundCue::Start]);
        // Starting does not move anything yet.
        assert_eq!(state.balls[0].y, DEFAULT_BALL_RADIUS);
    }

    #[test]
    fn test_quit_in_every_phase() {
        let mut cues = Vec::new();

        let mut state = MatchState::new(1);
        assert_eq!(state.step(FrameInput::quit(), &mut cues), StepOutcome::Quit);

        let mut state = playing(1);
        let before = state.snapshot();
        assert_eq!(state.step(FrameInput::quit(), &mut cues), StepOutcome::Quit);
        assert_eq!(state.snapshot(), before, "quit must not tick");

        state.phase = Phase::Over;
        let quit_and_confirm = FrameInput {
            quit: true,
            confirm: true,
            ..FrameInput::IDLE
        };
        assert_eq!(state.step(quit_and_confirm, &mut cues), StepOutcome::Quit);
        assert_eq!(state.phase, Phase::Over);
    }

    #[test]
    fn test_tick_moves_paddle() {
        let mut state = playing(1);
        let mut cues = Vec::new();

        state.step(FrameInput::left(), &mut cues);
        assert_eq!(state.paddle.x, PADDLE_START_X - PADDLE_SPEED);

        state.step(FrameInput::right(), &mut cues);
        state.step(FrameInput::right(), &mut cues);
        assert_eq!(state.paddle.x, PADDLE_START_X + PADDLE_SPEED);

        let both = FrameInput {
            left: true,
            right: true,
            ..FrameInput::IDLE
        };
        state.step(both, &mut cues);
        assert_eq!(state.paddle.x, PADDLE_START_X + PADDLE_SPEED);
    }

    #[test]
    fn test_free_paddle_is_unclamped() {
        let mut state = MatchState::with_config(MatchConfig {
            seed: 1,
            paddle_bounds: PaddleBounds::Free,
        });
        state.spawn_default_ball();
        let mut cues = Vec::new();
        state.step(FrameInput::confirm(), &mut cues);

        for _ in 0..30 {
            state.tick(FrameInput::left(), &mut cues);
        }
        assert!(state.paddle.x < 0);
    }

    #[test]
    fn test_wall_reflection_scenario() {
        let mut state = playing(1);
        stage(&mut state, 0, 10, -3, 2);
        let mut cues = Vec::new();

        state.tick(FrameInput::IDLE, &mut cues);

        let b = state.balls[0];
        assert_eq!((b.x, b.y), (-3, 12));
        assert_eq!((b.vx, b.vy), (3, 2));
        assert_eq!((state.player_score, state.cpu_score), (0, 0));
        assert!(cues.is_empty());
    }

    #[test]
    fn test_hit_scenario() {
        let mut state = playing(1);
        state.paddle.x = 200;
        stage(&mut state, 245, PADDLE_Y - 8, 5, 5);
        let mut cues = Vec::new();

        state.tick(FrameInput::IDLE, &mut cues);

        let b = state.balls[0];
        assert_eq!((b.x, b.y), (250, PADDLE_Y - 3));
        assert_eq!((b.vx, b.vy), (5, -5));
        assert_eq!(state.player_score, 1);
        assert_eq!(state.cpu_score, 0);
        assert_eq!(cues, vec![SoundCue::Hit]);
    }

    #[test]
    fn test_hit_on_paddle_edges() {
        for edge in [200, 325] {
            let mut state = playing(1);
            state.paddle.x = 200;
            stage(&mut state, edge, PADDLE_Y, 0, 4);
            state.tick(FrameInput::IDLE, &mut Silent);
            assert_eq!(state.player_score, 1, "edge {edge}");
            assert_eq!(state.balls[0].vy, -4);
        }
    }

    #[test]
    fn test_miss_resets_ball_and_scores_cpu() {
        let mut state = playing(1);
        state.paddle.x = 200;
        stage(&mut state, 100, PADDLE_Y - 3, -4, 5);
        let mut cues = Vec::new();

        state.tick(FrameInput::IDLE, &mut cues);

        let b = state.balls[0];
        assert_eq!(b.y, b.radius);
        assert!((0..FIELD_WIDTH).contains(&b.x));
        assert_eq!((b.vx, b.vy), (-4, 5));
        assert_eq!(state.cpu_score, 1);
        assert_eq!(state.player_score, 0);
        assert_eq!(cues, vec![SoundCue::Miss]);
    }

    #[test]
    fn test_miss_just_outside_paddle() {
        let mut state = playing(1);
        state.paddle.x = 200;
        stage(&mut state, 326, PADDLE_Y, 0, 3);
        state.tick(FrameInput::IDLE, &mut Silent);
        assert_eq!(state.cpu_score, 1);
    }

    #[test]
    fn test_escalation_spawns_at_three() {
        let mut state = playing(8);
        state.paddle.x = 200;
        state.player_score = 2;
        stage(&mut state, 250, PADDLE_Y, 0, 5);
        let mut cues = Vec::new();

        state.tick(FrameInput::IDLE, &mut cues);

        assert_eq!(state.player_score, 3);
        assert_eq!(state.balls.len(), 2);
        let spawned = state.balls[1];
        assert!((4..=10).contains(&spawned.radius));
        assert!((3..=6).contains(&spawned.vx));
        assert_eq!(spawned.vx, spawned.vy);
        assert_eq!(spawned.y, spawned.radius);
        assert_eq!(spawned.color.a, 0);
        assert_eq!(cues, vec![SoundCue::Hit]);
    }

    #[test]
    fn test_escalation_does_not_repeat_at_same_score() {
        let mut state = playing(8);
        state.player_score = 3;
        state.spawn_default_ball();
        // Both balls far from the line: no score change this tick.
        stage(&mut state, 250, 300, 1, 1);
        state.balls[1].y = 300;

        state.tick(FrameInput::IDLE, &mut Silent);
        state.tick(FrameInput::IDLE, &mut Silent);

        assert_eq!(state.balls.len(), 2);
    }

    #[test]
    fn test_win_checked_before_escalation() {
        let mut state = playing(1);
        state.paddle.x = 200;
        for _ in 0..6 {
            state.spawn_default_ball();
        }
        // 7 balls: escalation threshold would be 21 too.
        for b in state.balls.iter_mut() {
            b.y = 300;
            b.vy = 1;
            b.vx = 0;
            b.x = 250;
        }
        state.player_score = 20;
        stage(&mut state, 250, PADDLE_Y, 0, 5);
        let mut cues = Vec::new();

        state.tick(FrameInput::IDLE, &mut cues);

        assert_eq!(state.phase, Phase::Over);
        assert_eq!(state.balls.len(), 7);
        assert_eq!(state.winner(), Some(Winner::Player));
        assert_eq!(cues, vec![SoundCue::Hit, SoundCue::Over]);
    }

    #[test]
    fn test_cpu_wins() {
        let mut state = playing(1);
        state.paddle.x = 0;
        state.cpu_score = 20;
        stage(&mut state, 400, PADDLE_Y, 0, 5);
        let mut cues = Vec::new();

        state.tick(FrameInput::IDLE, &mut cues);

        assert_eq!(state.phase, Phase::Over);
        assert_eq!(state.winner(), Some(Winner::Cpu));
        assert_eq!(cues, vec![SoundCue::Miss, SoundCue::Over]);
    }

    #[test]
    fn test_over_ignores_ticks() {
        let mut state = playing(1);
        state.phase = Phase::Over;
        let before = state.snapshot();

        state.step(FrameInput::left(), &mut Silent);
        state.tick(FrameInput::IDLE, &mut Silent);

        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_rematch_after_over() {
        let mut state = playing(1);
        state.spawn_default_ball();
        state.player_score = 21;
        state.cpu_score = 11;
        state.phase = Phase::Over;
        let mut cues = Vec::new();

        state.step(FrameInput::confirm(), &mut cues);

        assert_eq!(state.phase, Phase::NotStarted);
        assert_eq!((state.player_score, state.cpu_score), (0, 0));
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].radius, DEFAULT_BALL_RADIUS);
        assert!(cues.is_empty());

        state.step(FrameInput::confirm(), &mut cues);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(cues, vec![SoundCue::Start]);
    }

    #[test]
    fn test_reset_ball_not_revisited_in_same_tick() {
        let mut state = playing(3);
        state.paddle.x = 0;
        // Missed ball is reset to the top; it must not also bounce off the ceiling this tick.
        stage(&mut state, 450, PADDLE_Y, 0, 6);

        state.tick(FrameInput::IDLE, &mut Silent);

        let b = state.balls[0];
        assert_eq!(b.y, b.radius);
        assert_eq!(b.vy, 6);
        assert_eq!(state.cpu_score, 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = playing(4);
        state.player_score = 2;
        state.cpu_score = 5;

        let mut snap = MatchSnapshot::default();
        state.snapshot_into(&mut snap);

        assert!(snap.playing());
        assert_eq!(snap.player_score, 2);
        assert_eq!(snap.cpu_score, 5);
        assert_eq!(snap.winner, None);
        assert_eq!(snap.paddle.x, state.paddle.x);
        assert_eq!(snap.paddle.width, PADDLE_WIDTH);
        assert_eq!(snap.balls.len(), 1);
        assert_eq!(snap.balls[0].radius, DEFAULT_BALL_RADIUS);

        snap.clear();
        assert!(snap.balls.is_empty());
        assert_eq!(snap.phase, Phase::NotStarted);
    }
}
