//! Procedural spawning of obstacles and collectibles.
//!
//! Two independent Bernoulli trials per tick; both may succeed on the same
//! tick. The random source is injected so tests can run from a fixed seed.

use rand::Rng;

use super::entity::{Entity, Item};
use crate::config::{GameConfig, OBSTACLE_VARIANTS, Viewport};

/// Roll this tick's spawns and append them (obstacle first) to `entities`.
pub fn spawn_tick<R: Rng + ?Sized>(cfg: &GameConfig, viewport: &Viewport, rng: &mut R, entities: &mut Vec<Entity>) {
    if roll(rng, cfg.obstacle_spawn_rate) {
        entities.push(spawn_obstacle(cfg, viewport, rng));
    }
    if roll(rng, cfg.collectible_spawn_rate) {
        entities.push(spawn_collectible(cfg, viewport, rng));
    }
}

fn roll<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen_bool(probability.clamp(0.0, 1.0))
}

/// Ground-anchored obstacle at the right edge with a uniformly chosen variant.
pub fn spawn_obstacle<R: Rng + ?Sized>(cfg: &GameConfig, viewport: &Viewport, rng: &mut R) -> Entity {
    let variant = rng.gen_range(1..=OBSTACLE_VARIANTS);
    let y = viewport.ground_top(cfg) - cfg.obstacle_height;
    Entity::obstacle(viewport.width, y, cfg.obstacle_width, cfg.obstacle_height, variant)
}

/// Collectible at the right edge, floating somewhere in the pickup band.
pub fn spawn_collectible<R: Rng + ?Sized>(cfg: &GameConfig, viewport: &Viewport, rng: &mut R) -> Entity {
    let ground_top = viewport.ground_top(cfg);
    let highest = ground_top - cfg.collectible_max_lift;
    let lowest = ground_top - cfg.collectible_min_lift;
    let y = if highest < lowest { rng.gen_range(highest..lowest) } else { lowest };
    let item = if rng.gen_bool(0.5) { Item::Mate } else { Item::Empanada };
    Entity::collectible(viewport.width, y, cfg.collectible_size, item)
}
