//! Menu → Playing → GameOver state machine.
//!
//! The session owns the live [`SimulationState`] and the high score table.
//! Every way into `Playing` goes through [`Session::begin`], which rebuilds the
//! simulation from scratch.

use rand::Rng;
use serde::Serialize;

use crate::config::{GameConfig, Viewport};
use crate::highscores::{HighScoreBoard, KeyValueStore};
use crate::sim::{Item, SimulationState, TickInput, TickOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing => "playing",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Semantic notifications for the host page. Display text is the page's job.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameEvent {
    SessionStarted,
    /// Start refused on a portrait phone; it will fire once rotated.
    StartDeferred,
    ScoreChanged { score: u64 },
    CollectiblePicked { x: f64, y: f64, bonus: u64, item: Item },
    SessionEnded { score: u64, rank: Option<usize> },
    ReturnedToMenu,
}

impl GameEvent {
    /// Short name used for the DOM event type.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::SessionStarted => "sessionStarted",
            GameEvent::StartDeferred => "startDeferred",
            GameEvent::ScoreChanged { .. } => "scoreChanged",
            GameEvent::CollectiblePicked { .. } => "collectiblePicked",
            GameEvent::SessionEnded { .. } => "sessionEnded",
            GameEvent::ReturnedToMenu => "returnedToMenu",
        }
    }
}

pub struct Session<S: KeyValueStore> {
    cfg: GameConfig,
    phase: Phase,
    sim: SimulationState,
    high_scores: HighScoreBoard<S>,
    pending_start: bool,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(cfg: GameConfig, viewport: Viewport, store: S) -> Self {
        let high_scores = HighScoreBoard::load(store, cfg.high_score_capacity);
        Self { sim: SimulationState::new(&cfg, viewport), cfg, phase: Phase::Menu, high_scores, pending_start: false }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn sim(&self) -> &SimulationState {
        &self.sim
    }

    pub fn high_scores(&self) -> &HighScoreBoard<S> {
        &self.high_scores
    }

    pub fn pending_start(&self) -> bool {
        self.pending_start
    }

    /// Menu → Playing.
    pub fn start(&mut self) -> Vec<GameEvent> {
        if self.phase != Phase::Menu {
            return Vec::new();
        }
        self.begin_or_defer()
    }

    /// GameOver → Playing.
    pub fn play_again(&mut self) -> Vec<GameEvent> {
        if self.phase != Phase::GameOver {
            return Vec::new();
        }
        self.begin_or_defer()
    }

    /// Playing / GameOver → Menu. Drops any deferred start.
    pub fn back_to_menu(&mut self) -> Vec<GameEvent> {
        self.pending_start = false;
        if self.phase == Phase::Menu {
            return Vec::new();
        }
        self.sim.reset(&self.cfg);
        self.phase = Phase::Menu;
        log::info!("back to menu");
        vec![GameEvent::ReturnedToMenu]
    }

    /// New canvas size. May fire a start that was deferred for orientation.
    pub fn resize(&mut self, viewport: Viewport) -> Vec<GameEvent> {
        self.sim.resize(&self.cfg, viewport);
        if self.pending_start && self.phase != Phase::Playing && !viewport.is_portrait_mobile() {
            log::info!("viewport is landscape now, starting deferred session");
            return self.begin();
        }
        Vec::new()
    }

    fn begin_or_defer(&mut self) -> Vec<GameEvent> {
        if self.sim.viewport.is_portrait_mobile() {
            self.pending_start = true;
            log::info!("portrait viewport, start deferred until rotation");
            return vec![GameEvent::StartDeferred];
        }
        self.begin()
    }

    fn begin(&mut self) -> Vec<GameEvent> {
        self.pending_start = false;
        self.sim.reset(&self.cfg);
        self.phase = Phase::Playing;
        log::info!("session started ({}x{})", self.sim.viewport.width, self.sim.viewport.height);
        vec![GameEvent::SessionStarted, GameEvent::ScoreChanged { score: 0 }]
    }

    /// One logic tick. Does nothing outside `Playing`. `today` is only called
    /// when the run ends, to stamp the high score entry.
    pub fn tick<R, F>(&mut self, input: TickInput, rng: &mut R, now_ms: f64, today: F) -> Vec<GameEvent>
    where
        R: Rng + ?Sized,
        F: FnOnce() -> String,
    {
        if self.phase != Phase::Playing {
            return Vec::new();
        }
        match self.sim.step(&self.cfg, input, rng, now_ms) {
            TickOutcome::Running { pickups, .. } => {
                let mut events: Vec<GameEvent> = pickups
                    .into_iter()
                    .map(|p| GameEvent::CollectiblePicked { x: p.x, y: p.y, bonus: p.bonus, item: p.item })
                    .collect();
                events.push(GameEvent::ScoreChanged { score: self.sim.score });
                events
            }
            TickOutcome::Crashed { final_score } => {
                self.phase = Phase::GameOver;
                let rank = self.high_scores.record(final_score, today());
                log::info!("session ended with {final_score} after {} ticks (rank {rank:?})", self.sim.ticks);
                vec![GameEvent::SessionEnded { score: final_score, rank }]
            }
        }
    }

    /// Wall-clock decay of floating score labels. Runs in every phase; after a
    /// reset it simply finds nothing to do.
    pub fn decay_effects(&mut self, now_ms: f64) {
        if !self.sim.effects.is_empty() {
            self.sim.effects.decay(&self.cfg, now_ms);
        }
    }
}
