//! JavaScript-facing player

use super::dom::{DomPage, DomView};
use super::output::WebAudioOutput;
use super::session::BrowserMediaSession;
use super::types::PlayerOptions;
use super::{RemoteFn, RemoteSlot, SettleFn};
use crate::error::PlayRejection;
use crate::events::PlaybackEvent;
use crate::output::MediaEvent;
use crate::types::{Direction, PlayToken, RemoteCommand};
use crate::PlaybackController;
use js_sys::Function;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use sutra_core::{TextLibrary, TextPanelEntry};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, EventTarget};

type Controller = PlaybackController<WebAudioOutput, DomView>;

#[derive(Default, Clone)]
struct Callbacks {
    on_track_change: Option<Function>,
    on_state_change: Option<Function>,
    on_play_rejected: Option<Function>,
    on_rate_change: Option<Function>,
}

impl Callbacks {
    fn emit(&self, events: &[PlaybackEvent]) {
        for event in events {
            let callback = match event {
                PlaybackEvent::TrackChanged { .. } => &self.on_track_change,
                PlaybackEvent::StateChanged { .. } => &self.on_state_change,
                PlaybackEvent::PlayRejected { .. } => &self.on_play_rejected,
                PlaybackEvent::RateChanged { .. } => &self.on_rate_change,
            };

            let Some(callback) = callback else { continue };
            let payload = match serde_wasm_bindgen::to_value(event) {
                Ok(payload) => payload,
                Err(err) => {
                    console::error_1(&JsValue::from(err));
                    continue;
                }
            };

            if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
                console::error_2(&"sutra: event callback threw".into(), &err);
            }
        }
    }
}

/// Runs controller operations from DOM events and async settlements
///
/// Borrows the controller only for the operation itself; JavaScript callbacks
/// run after the borrow is released so they may call back into the player.
#[derive(Clone)]
struct Dispatcher {
    controller: Weak<RefCell<Controller>>,
    callbacks: Rc<RefCell<Callbacks>>,
}

impl Dispatcher {
    fn run(&self, operation: impl FnOnce(&mut Controller)) {
        let Some(controller) = self.controller.upgrade() else {
            return;
        };

        let events = match controller.try_borrow_mut() {
            Ok(mut controller) => {
                operation(&mut *controller);
                controller.drain_events()
            }
            Err(_) => {
                console::warn_1(&"sutra: player busy, event dropped".into());
                return;
            }
        };

        let callbacks = self.callbacks.borrow().clone();
        callbacks.emit(&events);
    }
}

/// Browser playlist player
///
/// Binds the page on construction; the page's buttons, cards and `<audio>`
/// element drive it from then on. The methods below are for scripts that
/// want to drive it as well.
#[wasm_bindgen]
pub struct WasmPlayer {
    controller: Rc<RefCell<Controller>>,
    dispatcher: Dispatcher,
    _listeners: Vec<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Bind the player to the current document
    ///
    /// `texts` is an array of `{ key, title, body }`; `options` may override
    /// element bindings (`dom`) and controller settings (`playback`).
    #[wasm_bindgen(constructor)]
    pub fn new(texts: JsValue, options: JsValue) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let options: PlayerOptions = from_js_or_default(options)?;
        let entries: Vec<TextPanelEntry> = from_js_or_default(texts)?;
        let texts = TextLibrary::from_entries(entries).map_err(to_js_error)?;

        let window = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let page = DomPage::bind(&document, &options.dom)?;
        let catalog = page.catalog(&options.dom, texts);
        let output = WebAudioOutput::new(page.audio.clone());
        let settle_slot = output.settle_slot();
        let view = DomView::new(page.clone(), &options.dom);

        let mut controller = PlaybackController::new(catalog, options.playback, output, view)
            .map_err(to_js_error)?;

        let remote_slot = RemoteSlot::default();
        if let Some(session) =
            BrowserMediaSession::from_navigator(&window.navigator(), Rc::clone(&remote_slot))
        {
            controller.set_media_session(Some(Box::new(session)));
        }

        let controller = Rc::new(RefCell::new(controller));
        let dispatcher = Dispatcher {
            controller: Rc::downgrade(&controller),
            callbacks: Rc::new(RefCell::new(Callbacks::default())),
        };

        let settle: SettleFn = {
            let dispatcher = dispatcher.clone();
            Rc::new(move |token: PlayToken, outcome: Result<(), PlayRejection>| {
                dispatcher.run(|c| c.on_play_settled(token, outcome));
            })
        };
        *settle_slot.borrow_mut() = Some(settle);

        let remote: RemoteFn = {
            let dispatcher = dispatcher.clone();
            Rc::new(move |command: RemoteCommand| {
                dispatcher.run(|c| c.handle_remote(command));
            })
        };
        *remote_slot.borrow_mut() = Some(remote);

        let listeners = wire_listeners(&page, &dispatcher)?;

        Ok(Self {
            controller,
            dispatcher,
            _listeners: listeners,
        })
    }

    // ===== Playback Control =====

    /// Select a track by catalog index and start it
    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&self, index: usize) {
        self.dispatcher.run(|c| {
            c.select_track(index);
        });
    }

    /// Toggle play/pause
    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) {
        self.dispatcher.run(|c| {
            c.toggle_play_pause();
        });
    }

    /// Skip to the next track (wraps)
    pub fn next(&self) {
        self.dispatcher.run(|c| {
            c.advance(Direction::Next);
        });
    }

    /// Go to the previous track (wraps)
    pub fn previous(&self) {
        self.dispatcher.run(|c| {
            c.advance(Direction::Previous);
        });
    }

    /// Seek to a fraction (0.0 - 1.0) of the current track
    pub fn seek(&self, fraction: f64) {
        self.dispatcher.run(|c| {
            c.seek(fraction);
        });
    }

    /// Advance to the next playback rate
    #[wasm_bindgen(js_name = cyclePlaybackRate)]
    pub fn cycle_playback_rate(&self) {
        self.dispatcher.run(|c| {
            c.cycle_playback_rate();
        });
    }

    // ===== State Queries =====

    /// Current track index, if any
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> Option<usize> {
        self.controller.try_borrow().ok()?.current_index()
    }

    /// Whether the audio is confirmed playing
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.controller
            .try_borrow()
            .is_ok_and(|controller| controller.is_playing())
    }

    /// Current playback rate
    #[wasm_bindgen(js_name = playbackRate)]
    pub fn playback_rate(&self) -> f64 {
        self.controller
            .try_borrow()
            .map_or(1.0, |controller| controller.current_rate())
    }

    /// Number of tracks found on the page
    #[wasm_bindgen(js_name = trackCount)]
    pub fn track_count(&self) -> usize {
        self.controller
            .try_borrow()
            .map_or(0, |controller| controller.catalog().len())
    }

    // ===== Event Callbacks =====

    /// Called with `{ type, index, previous }` when the track changes
    #[wasm_bindgen(js_name = onTrackChange)]
    pub fn on_track_change(&self, callback: Function) {
        self.dispatcher.callbacks.borrow_mut().on_track_change = Some(callback);
    }

    /// Called with `{ type, playing }` when play/pause is confirmed
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&self, callback: Function) {
        self.dispatcher.callbacks.borrow_mut().on_state_change = Some(callback);
    }

    /// Called with `{ type, index, reason }` when the browser refuses to play
    #[wasm_bindgen(js_name = onPlayRejected)]
    pub fn on_play_rejected(&self, callback: Function) {
        self.dispatcher.callbacks.borrow_mut().on_play_rejected = Some(callback);
    }

    /// Called with `{ type, rate }` when the rate changes
    #[wasm_bindgen(js_name = onRateChange)]
    pub fn on_rate_change(&self, callback: Function) {
        self.dispatcher.callbacks.borrow_mut().on_rate_change = Some(callback);
    }
}

fn wire_listeners(
    page: &DomPage,
    dispatcher: &Dispatcher,
) -> Result<Vec<Closure<dyn FnMut()>>, JsValue> {
    let mut listeners = Vec::new();

    let media_events = [
        ("play", MediaEvent::Play),
        ("pause", MediaEvent::Pause),
        ("timeupdate", MediaEvent::TimeUpdate),
        ("ended", MediaEvent::Ended),
    ];
    for (name, event) in media_events {
        let d = dispatcher.clone();
        listeners.push(listen(&page.audio, name, move || {
            let event = event.clone();
            d.run(|c| c.handle_media_event(event));
        })?);
    }

    for (index, card) in page.cards.iter().enumerate() {
        let d = dispatcher.clone();
        listeners.push(listen(card, "click", move || {
            d.run(|c| {
                c.activate_track(index);
            });
        })?);
    }

    if let Some(button) = &page.play_pause {
        let d = dispatcher.clone();
        listeners.push(listen(button, "click", move || {
            d.run(|c| {
                c.toggle_play_pause();
            });
        })?);
    }

    let skips = [(&page.previous, Direction::Previous), (&page.next, Direction::Next)];
    for (button, direction) in skips {
        if let Some(button) = button {
            let d = dispatcher.clone();
            listeners.push(listen(button, "click", move || {
                d.run(|c| {
                    c.advance(direction);
                });
            })?);
        }
    }

    if let Some(button) = &page.rate {
        let d = dispatcher.clone();
        listeners.push(listen(button, "click", move || {
            d.run(|c| {
                c.cycle_playback_rate();
            });
        })?);
    }

    if let Some(bar) = &page.progress {
        let d = dispatcher.clone();
        let input = bar.clone();
        listeners.push(listen(bar, "input", move || {
            // The bar runs 0..100
            if let Ok(percent) = input.value().parse::<f64>() {
                d.run(|c| {
                    c.seek(percent / 100.0);
                });
            }
        })?);
    }

    Ok(listeners)
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut() + 'static,
) -> Result<Closure<dyn FnMut()>, JsValue> {
    let closure = Closure::<dyn FnMut()>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn from_js_or_default<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
