//! Frame orchestration: input intent → one logic tick → hand-off to paint.
//!
//! [`GameLoop`] is what the browser runtime drives. It knows nothing about the
//! DOM; the host supplies a [`Clock`], a random source and a key-value store.
//! Two independent tasks call into it:
//!
//! * the display-refresh task: [`GameLoop::frame`], once per animation frame
//!   while playing; its report says whether another frame should be requested.
//! * the effect task: [`GameLoop::decay_effects`], on a fixed wall-clock
//!   interval regardless of frame rate.

use rand::Rng;

use crate::config::{GameConfig, Viewport};
use crate::highscores::KeyValueStore;
use crate::session::{GameEvent, Phase, Session};
use crate::sim::{SimulationState, TickInput};

/// Time source. `now_ms` shares the timebase of `requestAnimationFrame`.
pub trait Clock {
    fn now_ms(&self) -> f64;
    /// Current date formatted for display next to a high score.
    fn today(&self) -> String;
}

/// Inputs recorded by event handlers, consumed by the next tick.
#[derive(Clone, Copy, Debug, Default)]
struct InputIntent {
    jumps: u8,
    fast_fall: bool,
}

impl InputIntent {
    fn take(&mut self) -> TickInput {
        let input = TickInput { jumps: self.jumps, fast_fall: self.fast_fall };
        *self = InputIntent::default();
        input
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    /// False once the session has left `Playing`; the scheduler stops there.
    pub keep_running: bool,
}

pub struct GameLoop<R: Rng, S: KeyValueStore, C: Clock> {
    session: Session<S>,
    rng: R,
    clock: C,
    intent: InputIntent,
}

impl<R: Rng, S: KeyValueStore, C: Clock> GameLoop<R, S, C> {
    pub fn new(cfg: GameConfig, viewport: Viewport, rng: R, store: S, clock: C) -> Self {
        Self { session: Session::new(cfg, viewport, store), rng, clock, intent: InputIntent::default() }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.session.phase() == Phase::Playing
    }

    /// Read-only state for the paint pass.
    pub fn snapshot(&self) -> &SimulationState {
        self.session.sim()
    }

    pub fn config(&self) -> &GameConfig {
        self.session.config()
    }

    pub fn press_jump(&mut self) {
        if self.is_playing() {
            self.intent.jumps = self.intent.jumps.saturating_add(1);
        }
    }

    pub fn press_fast_fall(&mut self) {
        if self.is_playing() {
            self.intent.fast_fall = true;
        }
    }

    pub fn start(&mut self) -> Vec<GameEvent> {
        self.intent = InputIntent::default();
        self.session.start()
    }

    pub fn play_again(&mut self) -> Vec<GameEvent> {
        self.intent = InputIntent::default();
        self.session.play_again()
    }

    pub fn back_to_menu(&mut self) -> Vec<GameEvent> {
        self.intent = InputIntent::default();
        self.session.back_to_menu()
    }

    pub fn resize(&mut self, viewport: Viewport) -> Vec<GameEvent> {
        self.session.resize(viewport)
    }

    /// One display refresh: exactly one logic tick while playing.
    pub fn frame(&mut self) -> FrameReport {
        if !self.is_playing() {
            return FrameReport { events: Vec::new(), keep_running: false };
        }
        let input = self.intent.take();
        let now = self.clock.now_ms();
        let clock = &self.clock;
        let events = self.session.tick(input, &mut self.rng, now, || clock.today());
        FrameReport { events, keep_running: self.is_playing() }
    }

    pub fn decay_effects(&mut self) {
        let now = self.clock.now_ms();
        self.session.decay_effects(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct ManualClock(Rc<Cell<f64>>);

    impl Clock for ManualClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
        fn today(&self) -> String {
            "17/10/2026".into()
        }
    }

    fn game() -> GameLoop<SmallRng, MemoryStore, ManualClock> {
        GameLoop::new(
            GameConfig::default().without_spawning(),
            Viewport::default(),
            SmallRng::seed_from_u64(3),
            MemoryStore::new(),
            ManualClock::default(),
        )
    }

    #[test]
    fn frames_outside_playing_stop_the_loop() {
        let mut g = game();
        let report = g.frame();
        assert!(!report.keep_running);
        assert!(report.events.is_empty());
    }

    #[test]
    fn input_is_ignored_in_menu() {
        let mut g = game();
        g.press_jump();
        g.start();
        g.frame();
        assert_eq!(g.snapshot().player.y, g.snapshot().ground_line(g.config()));
    }

    #[test]
    fn intent_is_consumed_once() {
        let mut g = game();
        g.start();
        g.press_jump();
        g.frame();
        let v_after_jump = g.snapshot().player.velocity_y;
        assert_eq!(v_after_jump, -15.0 + 0.8);
        g.frame();
        assert_eq!(g.snapshot().player.velocity_y, v_after_jump + 0.8);
    }

    #[test]
    fn two_presses_in_one_frame_double_jump() {
        let mut g = game();
        g.start();
        g.press_jump();
        g.press_jump();
        g.frame();
        assert!(!g.snapshot().player.can_double_jump);
    }

    #[test]
    fn decay_runs_on_the_wall_clock() {
        let mut cfg = GameConfig::default().without_spawning();
        cfg.collectible_spawn_rate = 1.0;
        let clock = ManualClock::default();
        let mut g = GameLoop::new(cfg, Viewport::default(), SmallRng::seed_from_u64(3), MemoryStore::new(), clock.clone());
        g.start();
        let mut frames = 0;
        while g.snapshot().effects.is_empty() {
            g.frame();
            frames += 1;
            assert!(frames < 400, "no pickup happened");
        }
        let ticks = g.snapshot().ticks;
        // ten decay ticks, zero frames
        for i in 1..=10 {
            clock.0.set(i as f64 * 16.0);
            g.decay_effects();
        }
        assert_eq!(g.snapshot().ticks, ticks);
        for e in g.snapshot().effects.iter() {
            assert!(e.opacity < 0.81 && e.opacity > 0.79);
            assert_eq!(e.offset_y, -20.0);
        }
    }
}
