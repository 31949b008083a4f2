//! Obstacles and collectibles scrolling toward the player.

use serde::Serialize;

use crate::collision::Rect;

/// What a collectible looks like on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Item {
    Mate,
    Empanada,
}

impl Item {
    pub fn symbol(self) -> &'static str {
        match self {
            Item::Mate => "🧉",
            Item::Empanada => "🥟",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// Ends the run on contact. `variant` selects the artwork (1..=3).
    Obstacle { variant: u8 },
    /// Worth a bonus and vanishes on contact.
    Collectible { item: Item },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entity {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: EntityKind,
}

impl Entity {
    pub fn obstacle(x: f64, y: f64, width: f64, height: f64, variant: u8) -> Self {
        Self { x, y, width, height, kind: EntityKind::Obstacle { variant } }
    }

    pub fn collectible(x: f64, y: f64, size: f64, item: Item) -> Self {
        Self { x, y, width: size, height: size, kind: EntityKind::Collectible { item } }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self.kind, EntityKind::Obstacle { .. })
    }
}
