//! Horizontal scrolling of the backdrop and entities.

use super::entity::Entity;
use crate::config::{GameConfig, Viewport};

/// Background offset; two copies are drawn at `offset` and `offset + width`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldScroll {
    pub offset: f64,
}

impl WorldScroll {
    /// Move left by `speed`, wrapping to 0 after a full canvas width.
    pub fn advance(&mut self, speed: f64, canvas_width: f64) {
        let next = self.offset - speed;
        self.offset = if next <= -canvas_width { 0.0 } else { next };
    }
}

/// Shift everything left, then drop whatever has fully left the screen.
pub fn scroll_entities(cfg: &GameConfig, entities: &mut Vec<Entity>) {
    for e in entities.iter_mut() {
        e.x -= cfg.game_speed;
    }
    entities.retain(|e| e.x > cfg.offscreen_threshold);
}

/// Advance the backdrop for one tick.
pub fn scroll_background(cfg: &GameConfig, viewport: &Viewport, scroll: &mut WorldScroll) {
    scroll.advance(cfg.background_speed, viewport.width);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Item;

    #[test]
    fn background_wraps_after_full_width() {
        let mut s = WorldScroll::default();
        for _ in 0..599 {
            s.advance(2.0, 1200.0);
        }
        assert_eq!(s.offset, -1198.0);
        s.advance(2.0, 1200.0);
        assert_eq!(s.offset, 0.0);
    }

    #[test]
    fn pruning_threshold() {
        let cfg = GameConfig::default();
        let mut entities = vec![
            Entity::collectible(-94.0, 300.0, 30.0, Item::Mate), // -> -99, kept
            Entity::obstacle(-96.0, 440.0, 40.0, 60.0, 1),       // -> -101, removed
            Entity::obstacle(-95.0, 440.0, 40.0, 60.0, 2),       // -> -100, removed
            Entity::obstacle(500.0, 440.0, 40.0, 60.0, 3),
        ];
        scroll_entities(&cfg, &mut entities);
        let xs: Vec<f64> = entities.iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![-99.0, 495.0]);
    }

    #[test]
    fn x_decreases_monotonically() {
        let cfg = GameConfig::default();
        let mut entities = vec![Entity::obstacle(1200.0, 440.0, 40.0, 60.0, 1)];
        let mut last = f64::INFINITY;
        while let Some(e) = entities.first() {
            assert!(e.x < last);
            last = e.x;
            scroll_entities(&cfg, &mut entities);
        }
        assert!(last > cfg.offscreen_threshold);
    }
}
