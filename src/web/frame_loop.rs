//! `requestAnimationFrame` driver with explicit start / stop.
//!
//! The per-frame callback returns whether it wants another frame. Returning
//! `false` (or calling [`FrameLoop::stop`]) means no further frame is
//! requested, so no further tick runs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::error::GameError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct FrameLoop {
    callback: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn new<F>(mut on_frame: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let f = callback.clone();
        let h = handle.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            h.set(None);
            if !on_frame(ts) {
                return;
            }
            match request(&f) {
                Ok(id) => h.set(Some(id)),
                Err(err) => log::error!("could not schedule next frame: {err}"),
            }
        }) as Box<dyn FnMut(f64)>));
        Self { callback, handle }
    }

    /// Begin issuing frames. No-op while already running.
    pub fn start(&self) -> Result<(), GameError> {
        if self.handle.get().is_some() {
            return Ok(());
        }
        let id = request(&self.callback)?;
        self.handle.set(Some(id));
        Ok(())
    }

    /// Cancel the pending frame, if any.
    pub fn stop(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }
}

fn request(callback: &FrameCallback) -> Result<i32, GameError> {
    let w = window().ok_or(GameError::NoWindow)?;
    let borrowed = callback.borrow();
    let closure = borrowed.as_ref().ok_or(GameError::NotMounted)?;
    Ok(w.request_animation_frame(closure.as_ref().unchecked_ref())?)
}
