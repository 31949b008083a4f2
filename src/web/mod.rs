//! Browser runtime: canvas, listeners, timers and the thread-local game.
//!
//! All mutation happens on the main thread inside one of three callbacks:
//! the animation frame (tick + paint), the decay interval, or a DOM event.
//! Each borrows [`RUNTIME`] for the duration of the callback only, and page
//! events are dispatched after that borrow ends.

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, CustomEvent, CustomEventInit, HtmlCanvasElement, Window, window};

use crate::config::{GameConfig, Viewport};
use crate::error::GameError;
use crate::game_loop::GameLoop;
use crate::render::compose_frame;
use crate::session::GameEvent;

mod assets;
mod audio;
mod canvas;
mod frame_loop;
mod storage;

use assets::Assets;
use audio::Music;
use frame_loop::FrameLoop;
pub use storage::{BrowserClock, LocalStore};

/// Prefix of the DOM events dispatched on `window`.
const EVENT_PREFIX: &str = "galope:";

type BrowserGame = GameLoop<SmallRng, LocalStore, BrowserClock>;

struct Runtime {
    game: BrowserGame,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    assets: Assets,
    frames: FrameLoop,
    music: Option<Music>,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
    static PENDING_CONFIG: RefCell<Option<GameConfig>> = const { RefCell::new(None) };
}

impl Runtime {
    fn paint(&self) {
        let frame = compose_frame(self.game.snapshot(), self.game.config(), self.game.phase(), &self.assets);
        canvas::paint(&self.ctx, &self.assets, &frame);
    }

    /// Keep the frame loop in step with the phase.
    fn sync_frames(&self) -> Result<(), GameError> {
        if self.game.is_playing() {
            self.frames.start()
        } else {
            self.frames.stop();
            Ok(())
        }
    }

    fn on_frame(&mut self) -> (bool, Vec<GameEvent>) {
        let report = self.game.frame();
        self.paint();
        (report.keep_running, report.events)
    }
}

/// Run `f` against the mounted runtime.
fn with_runtime<T>(f: impl FnOnce(&mut Runtime) -> Result<T, GameError>) -> Result<T, GameError> {
    RUNTIME.with(|cell| match cell.borrow_mut().as_mut() {
        Some(rt) => f(rt),
        None => Err(GameError::NotMounted),
    })
}

/// Apply a session transition and repaint. Events reach the page only once
/// the runtime borrow is released, so listeners may call back in.
fn transition(f: impl FnOnce(&mut Runtime) -> Result<Vec<GameEvent>, GameError>) -> Result<bool, GameError> {
    let (playing, events) = with_runtime(|rt| {
        let events = f(rt)?;
        rt.sync_frames()?;
        rt.paint();
        Ok((rt.game.is_playing(), events))
    })?;
    dispatch(&events);
    Ok(playing)
}

pub fn configure(json: &str) -> Result<(), GameError> {
    if RUNTIME.with(|cell| cell.borrow().is_some()) {
        return Err(GameError::AlreadyMounted);
    }
    let cfg = GameConfig::from_json(json)?;
    PENDING_CONFIG.with(|c| c.replace(Some(cfg)));
    log::info!("config override accepted");
    Ok(())
}

pub fn mount(canvas_id: &str) -> Result<(), GameError> {
    if RUNTIME.with(|cell| cell.borrow().is_some()) {
        return Ok(());
    }
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    // Create / reuse the canvas
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(canvas_id) {
        el.dyn_into().map_err(|_| GameError::Element(canvas_id.to_string()))?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into().map_err(|_| GameError::Element(canvas_id.to_string()))?;
        c.set_id(canvas_id);
        c.set_attribute("style", "position:fixed; inset:0; display:block; touch-action:none;").ok();
        doc.body().ok_or(GameError::NoDocument)?.append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::NoContext)?
        .dyn_into()
        .map_err(|_| GameError::NoContext)?;
    let viewport = fit_canvas(&canvas)?;

    let cfg = PENDING_CONFIG.with(|c| c.borrow_mut().take()).unwrap_or_default();
    let game = GameLoop::new(cfg, viewport, SmallRng::from_entropy(), LocalStore, BrowserClock);
    log::info!(
        "mounted on #{canvas_id} ({}x{}), {} stored high scores",
        viewport.width,
        viewport.height,
        game.session().high_scores().entries().len()
    );

    let frames = FrameLoop::new(|_ts| {
        let (keep_running, events) = RUNTIME.with(|cell| match cell.borrow_mut().as_mut() {
            Some(rt) => rt.on_frame(),
            None => (false, Vec::new()),
        });
        dispatch(&events);
        keep_running
    });

    let music = match Music::new() {
        Ok(m) => {
            if let Err(err) = m.schedule_autoplay() {
                log::warn!("could not schedule music: {err}");
            }
            Some(m)
        }
        Err(err) => {
            log::warn!("music unavailable: {err}");
            None
        }
    };

    let rt = Runtime { game, canvas: canvas.clone(), ctx, assets: Assets::load()?, frames, music };
    rt.paint();
    RUNTIME.with(|cell| cell.replace(Some(rt)));

    install_listeners(&win, &canvas)?;
    start_decay_timer(&win, cfg.effect_tick_ms)?;
    Ok(())
}

pub fn start_game() -> Result<bool, GameError> {
    transition(|rt| Ok(rt.game.start()))
}

pub fn play_again() -> Result<bool, GameError> {
    transition(|rt| Ok(rt.game.play_again()))
}

pub fn back_to_menu() -> Result<(), GameError> {
    transition(|rt| Ok(rt.game.back_to_menu())).map(|_| ())
}

pub fn toggle_music() -> Result<bool, GameError> {
    with_runtime(|rt| Ok(rt.music.as_ref().map(|m| m.toggle()).unwrap_or(false)))
}

pub fn music_playing() -> bool {
    with_runtime(|rt| Ok(rt.music.as_ref().is_some_and(|m| m.is_playing()))).unwrap_or(false)
}

pub fn high_scores_json() -> Result<String, GameError> {
    with_runtime(|rt| rt.game.session().high_scores().to_json())
}

pub fn session_phase() -> Result<&'static str, GameError> {
    with_runtime(|rt| Ok(rt.game.phase().as_str()))
}

pub fn current_score() -> Result<u64, GameError> {
    with_runtime(|rt| Ok(rt.game.snapshot().score))
}

/// Size the canvas backing store to the window and report the new viewport.
fn fit_canvas(canvas: &HtmlCanvasElement) -> Result<Viewport, GameError> {
    let win = window().ok_or(GameError::NoWindow)?;
    let width = win.inner_width()?.as_f64().unwrap_or(crate::config::DEFAULT_CANVAS_WIDTH);
    let height = win.inner_height()?.as_f64().unwrap_or(crate::config::DEFAULT_CANVAS_HEIGHT);
    let viewport = Viewport::new(width, height);
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);
    Ok(viewport)
}

fn install_listeners(win: &Window, canvas: &HtmlCanvasElement) -> Result<(), GameError> {
    // Keyboard: Space jumps, ArrowDown forces a fast fall
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            RUNTIME.with(|cell| {
                if let Some(rt) = cell.borrow_mut().as_mut() {
                    if !rt.game.is_playing() {
                        return;
                    }
                    match evt.code().as_str() {
                        "Space" => {
                            evt.prevent_default();
                            if !evt.repeat() {
                                rt.game.press_jump();
                            }
                        }
                        "ArrowDown" => {
                            evt.prevent_default();
                            rt.game.press_fast_fall();
                        }
                        _ => {}
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch: any tap on the canvas jumps
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            RUNTIME.with(|cell| {
                if let Some(rt) = cell.borrow_mut().as_mut() {
                    if rt.game.is_playing() {
                        evt.prevent_default();
                        rt.game.press_jump();
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Resize / rotation: refit the canvas, re-anchor the player, maybe start
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let result = transition(|rt| {
                let viewport = fit_canvas(&rt.canvas)?;
                Ok(rt.game.resize(viewport))
            });
            if let Err(err) = result {
                log::warn!("resize failed: {err}");
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        win.add_event_listener_with_callback("orientationchange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

/// Wall-clock decay of floating scores, independent of the frame loop.
fn start_decay_timer(win: &Window, period_ms: i32) -> Result<(), GameError> {
    let closure = Closure::wrap(Box::new(move || {
        RUNTIME.with(|cell| {
            if let Some(rt) = cell.borrow_mut().as_mut() {
                rt.game.decay_effects();
            }
        });
    }) as Box<dyn FnMut()>);
    win.set_interval_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), period_ms)?;
    closure.forget();
    Ok(())
}

/// Re-dispatch game events as `galope:<name>` CustomEvents with a JSON detail.
fn dispatch(events: &[GameEvent]) {
    if events.is_empty() {
        return;
    }
    let Some(win) = window() else { return };
    for event in events {
        let detail = match serde_json::to_string(event) {
            Ok(json) => JsValue::from_str(&json),
            Err(err) => {
                log::warn!("could not encode {}: {err}", event.name());
                continue;
            }
        };
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let name = format!("{EVENT_PREFIX}{}", event.name());
        match CustomEvent::new_with_event_init_dict(&name, &init) {
            Ok(dom_event) => {
                let _ = win.dispatch_event(&dom_event);
            }
            Err(err) => log::warn!("could not create {name}: {err:?}"),
        }
    }
}
