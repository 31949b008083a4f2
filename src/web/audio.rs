//! Looping background music. Playback is best effort: browsers that block
//! autoplay reject the play promise, which is caught and logged.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlAudioElement, window};

use crate::error::GameError;

const MUSIC_SRC: &str = "/audio/background.mp3";
const MUSIC_VOLUME: f64 = 0.3;
const AUTOPLAY_DELAY_MS: i32 = 1000;

pub struct Music {
    el: HtmlAudioElement,
    playing: Rc<Cell<bool>>,
}

impl Music {
    pub fn new() -> Result<Self, GameError> {
        let el = HtmlAudioElement::new_with_src(MUSIC_SRC)?;
        el.set_loop(true);
        el.set_volume(MUSIC_VOLUME);
        Ok(Self { el, playing: Rc::new(Cell::new(false)) })
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    /// Flip between playing and paused. Returns the intended new state.
    pub fn toggle(&self) -> bool {
        if self.playing.get() {
            self.el.pause().ok();
            self.playing.set(false);
        } else {
            self.play();
        }
        self.playing.get()
    }

    pub fn play(&self) {
        let promise = match self.el.play() {
            Ok(p) => p,
            Err(err) => {
                log::warn!("audio play failed: {err:?}");
                return;
            }
        };
        self.playing.set(true);
        let playing = self.playing.clone();
        let on_reject = Closure::wrap(Box::new(move |err: JsValue| {
            playing.set(false);
            log::info!("autoplay blocked: {err:?}");
        }) as Box<dyn FnMut(JsValue)>);
        let _ = promise.catch(&on_reject);
        on_reject.forget();
    }

    /// Try to start playback shortly after the page settles.
    pub fn schedule_autoplay(&self) -> Result<(), GameError> {
        let w = window().ok_or(GameError::NoWindow)?;
        let el = self.el.clone();
        let playing = self.playing.clone();
        let cb = Closure::once_into_js(move || {
            if playing.get() {
                return;
            }
            Music { el, playing }.play();
        });
        w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), AUTOPLAY_DELAY_MS)?;
        Ok(())
    }
}
