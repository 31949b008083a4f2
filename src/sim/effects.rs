//! Floating "+100" labels shown on pickup.
//!
//! They decay on their own wall-clock timer, not on the logic tick, so the
//! fade takes the same real time no matter how fast frames arrive.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingScoreEffect {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub points: u64,
    pub opacity: f64,
    /// Upward drift (negative = up).
    pub offset_y: f64,
    pub spawned_at_ms: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloatingScores {
    active: Vec<FloatingScoreEffect>,
    next_id: u64,
}

impl FloatingScores {
    pub fn spawn(&mut self, x: f64, y: f64, points: u64, now_ms: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.active.push(FloatingScoreEffect { id, x, y, points, opacity: 1.0, offset_y: 0.0, spawned_at_ms: now_ms });
        id
    }

    /// One decay step: fade, drift up, prune faded or expired labels.
    pub fn decay(&mut self, cfg: &GameConfig, now_ms: f64) {
        for e in self.active.iter_mut() {
            e.opacity -= cfg.effect_fade_step;
            e.offset_y -= cfg.effect_rise_step;
        }
        self.active
            .retain(|e| e.opacity > 0.0 && now_ms - e.spawned_at_ms < cfg.effect_lifetime_ms);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloatingScoreEffect> {
        self.active.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fades_out_after_fifty_steps() {
        let cfg = GameConfig::default();
        let mut fx = FloatingScores::default();
        fx.spawn(10.0, 20.0, 100, 0.0);
        for i in 1..50 {
            fx.decay(&cfg, i as f64 * 16.0);
        }
        assert_eq!(fx.len(), 1);
        let e = fx.iter().next().copied().unwrap();
        assert!(e.opacity > 0.0 && e.opacity < 0.05);
        assert_eq!(e.offset_y, -98.0);
        // 50th step takes opacity to ~0 (float rounding may leave a hair above)
        fx.decay(&cfg, 800.0);
        fx.decay(&cfg, 816.0);
        assert!(fx.is_empty());
    }

    #[test]
    fn lifetime_caps_slow_timers() {
        let cfg = GameConfig::default();
        let mut fx = FloatingScores::default();
        fx.spawn(0.0, 0.0, 100, 1000.0);
        fx.decay(&cfg, 2999.0);
        assert_eq!(fx.len(), 1);
        fx.decay(&cfg, 3000.0);
        assert!(fx.is_empty());
    }

    #[test]
    fn ids_are_unique_across_clears() {
        let mut fx = FloatingScores::default();
        let a = fx.spawn(0.0, 0.0, 100, 0.0);
        fx.clear();
        let b = fx.spawn(0.0, 0.0, 100, 0.0);
        assert_ne!(a, b);
    }
}
