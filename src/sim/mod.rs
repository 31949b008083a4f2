//! Fixed-step simulation of one running session.
//!
//! [`SimulationState`] is the single aggregate the frame loop owns. Each display
//! refresh calls [`SimulationState::step`] exactly once; the renderer only ever
//! sees `&SimulationState`. Order inside a tick:
//!
//! 1. apply input intent (jumps, fast fall)
//! 2. player kinematics
//! 3. background scroll
//! 4. spawn, then move and prune entities
//! 5. resolve collisions against the player's new position
//! 6. commit the score delta (survival + pickups) in one go
//!
//! A tick that hits an obstacle is terminal: nothing from that tick is
//! committed (no pickups, no survival point) and the score returned is the one
//! the session had when the tick began.

use rand::Rng;

use crate::config::{GameConfig, Viewport};

pub mod effects;
pub mod entity;
pub mod player;
pub mod spawner;
pub mod world;

pub use effects::{FloatingScoreEffect, FloatingScores};
pub use entity::{Entity, EntityKind, Item};
pub use player::PlayerState;
pub use world::WorldScroll;

/// Input intent gathered between two frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Number of jump presses (key-down edges / taps) since the last tick.
    pub jumps: u8,
    pub fast_fall: bool,
}

/// A collectible picked up during a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pickup {
    pub x: f64,
    pub y: f64,
    pub item: Item,
    pub bonus: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// The run goes on; `score_delta` was added to the score this tick.
    Running { score_delta: u64, pickups: Vec<Pickup> },
    /// The player touched an obstacle. `final_score` is the score to persist.
    Crashed { final_score: u64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    pub viewport: Viewport,
    pub player: PlayerState,
    pub entities: Vec<Entity>,
    pub scroll: WorldScroll,
    pub effects: FloatingScores,
    pub score: u64,
    pub ticks: u64,
}

impl SimulationState {
    pub fn new(cfg: &GameConfig, viewport: Viewport) -> Self {
        Self {
            viewport,
            player: PlayerState::new(cfg, viewport.ground_line(cfg)),
            entities: Vec::new(),
            scroll: WorldScroll::default(),
            effects: FloatingScores::default(),
            score: 0,
            ticks: 0,
        }
    }

    /// Throw away the run and start over, keeping the current viewport.
    pub fn reset(&mut self, cfg: &GameConfig) {
        *self = Self::new(cfg, self.viewport);
    }

    /// Track a new canvas size and put the player back on the ground.
    pub fn resize(&mut self, cfg: &GameConfig, viewport: Viewport) {
        self.viewport = viewport;
        self.player.anchor_to(viewport.ground_line(cfg));
    }

    pub fn ground_line(&self, cfg: &GameConfig) -> f64 {
        self.viewport.ground_line(cfg)
    }

    /// Advance one fixed logic step.
    pub fn step<R: Rng + ?Sized>(&mut self, cfg: &GameConfig, input: TickInput, rng: &mut R, now_ms: f64) -> TickOutcome {
        for _ in 0..input.jumps {
            self.player.jump(cfg);
        }
        if input.fast_fall {
            self.player.fast_fall(cfg);
        }
        let ground_line = self.ground_line(cfg);
        self.player.integrate(cfg, ground_line);

        world::scroll_background(cfg, &self.viewport, &mut self.scroll);
        spawner::spawn_tick(cfg, &self.viewport, rng, &mut self.entities);
        world::scroll_entities(cfg, &mut self.entities);
        self.ticks += 1;

        let player_rect = self.player.rect(cfg);
        let mut survivors = Vec::with_capacity(self.entities.len());
        let mut pickups = Vec::new();
        for entity in &self.entities {
            if !player_rect.overlaps(&entity.rect()) {
                survivors.push(*entity);
                continue;
            }
            match entity.kind {
                EntityKind::Obstacle { .. } => {
                    log::trace!("obstacle hit at tick {} (score {})", self.ticks, self.score);
                    return TickOutcome::Crashed { final_score: self.score };
                }
                EntityKind::Collectible { item } => pickups.push(Pickup {
                    x: entity.x,
                    y: entity.y,
                    item,
                    bonus: cfg.collectible_bonus,
                }),
            }
        }
        self.entities = survivors;

        for p in &pickups {
            self.effects.spawn(p.x, p.y, p.bonus, now_ms);
        }
        let score_delta = cfg.survival_points + pickups.iter().map(|p| p.bonus).sum::<u64>();
        self.score += score_delta;
        TickOutcome::Running { score_delta, pickups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn quiet() -> (GameConfig, SimulationState, SmallRng) {
        let cfg = GameConfig::default().without_spawning();
        let state = SimulationState::new(&cfg, Viewport::new(1200.0, 600.0));
        (cfg, state, SmallRng::seed_from_u64(7))
    }

    #[test]
    fn idle_tick_scores_one() {
        let (cfg, mut s, mut rng) = quiet();
        let out = s.step(&cfg, TickInput::default(), &mut rng, 0.0);
        assert_eq!(out, TickOutcome::Running { score_delta: 1, pickups: vec![] });
        assert_eq!(s.score, 1);
        assert_eq!(s.player.y, 420.0);
    }

    #[test]
    fn collectible_and_survival_in_one_delta() {
        let (cfg, mut s, mut rng) = quiet();
        s.score = 41;
        // after scrolling by 5 it sits at x = 120, inside the player
        s.entities.push(Entity::collectible(125.0, 450.0, 30.0, Item::Mate));
        let out = s.step(&cfg, TickInput::default(), &mut rng, 5.0);
        match out {
            TickOutcome::Running { score_delta, pickups } => {
                assert_eq!(score_delta, 101);
                assert_eq!(pickups.len(), 1);
                assert_eq!((pickups[0].x, pickups[0].y), (120.0, 450.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.score, 41 + 1 + 100);
        assert!(s.entities.is_empty());
        assert_eq!(s.effects.len(), 1);
    }

    #[test]
    fn obstacle_tick_is_terminal_and_atomic() {
        let (cfg, mut s, mut rng) = quiet();
        s.score = 77;
        s.entities.push(Entity::collectible(125.0, 450.0, 30.0, Item::Empanada));
        s.entities.push(Entity::obstacle(150.0, 440.0, 40.0, 60.0, 2));
        s.entities.push(Entity::obstacle(900.0, 440.0, 40.0, 60.0, 1));
        let out = s.step(&cfg, TickInput::default(), &mut rng, 0.0);
        assert_eq!(out, TickOutcome::Crashed { final_score: 77 });
        assert_eq!(s.score, 77);
        assert!(s.effects.is_empty());
        // the entity list is left as it was after scrolling
        assert_eq!(s.entities.len(), 3);
    }

    #[test]
    fn jump_clears_a_low_obstacle() {
        let (cfg, mut s, mut rng) = quiet();
        // overlaps the player horizontally on ticks 8..=30, all airborne
        s.entities.push(Entity::obstacle(215.0, 440.0, 40.0, 60.0, 1));
        let mut input = TickInput { jumps: 1, fast_fall: false };
        for _ in 0..60 {
            let out = s.step(&cfg, input, &mut rng, 0.0);
            assert!(matches!(out, TickOutcome::Running { .. }), "crashed at tick {}", s.ticks);
            input = TickInput::default();
        }
    }

    #[test]
    fn resize_reanchors_player() {
        let (cfg, mut s, _) = quiet();
        s.resize(&cfg, Viewport::new(800.0, 400.0));
        assert_eq!(s.player.y, 220.0);
        assert_eq!(s.ground_line(&cfg), 220.0);
    }
}
