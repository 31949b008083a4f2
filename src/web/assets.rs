//! Background, run-cycle and obstacle images, loaded in the background.

use std::collections::HashMap;

use web_sys::HtmlImageElement;

use crate::config::{OBSTACLE_VARIANTS, PLAYER_SPRITE_COUNT};
use crate::error::GameError;
use crate::render::{AssetStatus, ImageId};

const BACKGROUND_SRC: &str = "/images/background.jpeg";

pub struct Assets {
    images: HashMap<ImageId, HtmlImageElement>,
}

impl Assets {
    /// Kick off every image request. Nothing here waits for a download.
    pub fn load() -> Result<Self, GameError> {
        let mut images = HashMap::new();
        images.insert(ImageId::Background, image(BACKGROUND_SRC)?);
        for i in 0..PLAYER_SPRITE_COUNT {
            images.insert(ImageId::Player(i), image(&format!("/images/guemes{}.png", i + 1))?);
        }
        for v in 1..=OBSTACLE_VARIANTS {
            images.insert(ImageId::Obstacle(v), image(&format!("/images/cactus{v}.png"))?);
        }
        log::debug!("requested {} images", images.len());
        Ok(Self { images })
    }

    pub fn get(&self, id: ImageId) -> Option<&HtmlImageElement> {
        self.images.get(&id).filter(|img| decoded(img))
    }
}

impl AssetStatus for Assets {
    fn is_ready(&self, id: ImageId) -> bool {
        self.get(id).is_some()
    }
}

fn image(src: &str) -> Result<HtmlImageElement, GameError> {
    let img = HtmlImageElement::new()?;
    img.set_src(src);
    Ok(img)
}

// A broken image reports `complete` too, but with no pixels.
fn decoded(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}
