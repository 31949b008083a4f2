//! Frame composition.
//!
//! [`compose_frame`] turns a read-only simulation snapshot into a flat list of
//! draw commands; the browser painter replays it on the canvas. Images that
//! have not finished loading are left out of the list, so a slow asset just
//! means a missing sprite for a few frames.

use crate::config::GameConfig;
use crate::session::Phase;
use crate::sim::{EntityKind, SimulationState};

const COLLECTIBLE_FONT: &str = "32px Arial";
const FLOATING_SCORE_FONT: &str = "bold 24px Arial";
const GOLD: &str = "#FFD700";
const SADDLE_BROWN: &str = "#8B4513";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageId {
    Background,
    /// Run-cycle frame, 0-based.
    Player(usize),
    /// Obstacle artwork, 1-based variant.
    Obstacle(u8),
}

/// Whether an image can be drawn right now.
pub trait AssetStatus {
    fn is_ready(&self, id: ImageId) -> bool;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear { width: f64, height: f64 },
    Image { id: ImageId, x: f64, y: f64, width: f64, height: f64 },
    /// Outlined, centre-aligned text.
    Text { text: String, x: f64, y: f64, font: &'static str, fill: String, stroke: String, line_width: f64 },
}

pub fn compose_frame<A: AssetStatus + ?Sized>(
    state: &SimulationState,
    cfg: &GameConfig,
    phase: Phase,
    assets: &A,
) -> Vec<DrawCmd> {
    let (w, h) = (state.viewport.width, state.viewport.height);
    let mut cmds = vec![DrawCmd::Clear { width: w, height: h }];

    if assets.is_ready(ImageId::Background) {
        let x = state.scroll.offset;
        cmds.push(DrawCmd::Image { id: ImageId::Background, x, y: 0.0, width: w, height: h });
        cmds.push(DrawCmd::Image { id: ImageId::Background, x: x + w, y: 0.0, width: w, height: h });
    }

    if phase != Phase::Playing {
        return cmds;
    }

    let player = &state.player;
    let sprite = ImageId::Player(player.sprite_index);
    if assets.is_ready(sprite) {
        cmds.push(DrawCmd::Image {
            id: sprite,
            x: player.x,
            y: player.y,
            width: cfg.player_width,
            height: cfg.player_height,
        });
    }

    for e in &state.entities {
        match e.kind {
            EntityKind::Obstacle { variant } => {
                let id = ImageId::Obstacle(variant);
                if assets.is_ready(id) {
                    cmds.push(DrawCmd::Image { id, x: e.x, y: e.y, width: e.width, height: e.height });
                }
            }
            EntityKind::Collectible { item } => cmds.push(DrawCmd::Text {
                text: item.symbol().to_string(),
                x: e.x + e.width / 2.0,
                y: e.y + e.height,
                font: COLLECTIBLE_FONT,
                fill: GOLD.to_string(),
                stroke: SADDLE_BROWN.to_string(),
                line_width: 2.0,
            }),
        }
    }

    for fx in state.effects.iter() {
        let alpha = fx.opacity.clamp(0.0, 1.0);
        cmds.push(DrawCmd::Text {
            text: format!("+{}", fx.points),
            x: fx.x,
            y: fx.y + fx.offset_y,
            font: FLOATING_SCORE_FONT,
            fill: format!("rgba(255, 215, 0, {alpha})"),
            stroke: format!("rgba(139, 69, 19, {alpha})"),
            line_width: 2.0,
        });
    }

    cmds
}
