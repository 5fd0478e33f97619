//! `<audio>` element as a [`MediaOutput`]

use super::{SettleFn, SettleSlot};
use crate::clock::known_duration;
use crate::error::PlayRejection;
use crate::output::MediaOutput;
use crate::types::PlayToken;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, DomException, HtmlAudioElement};

/// Media output driving an `HtmlAudioElement`
///
/// `play()` resolves on a later microtask. The outcome is handed to whatever
/// callback sits in the settle slot at that point, so the slot can be filled
/// after the controller owning this output is built.
pub struct WebAudioOutput {
    audio: HtmlAudioElement,
    settle: SettleSlot,
}

impl WebAudioOutput {
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self {
            audio,
            settle: SettleSlot::default(),
        }
    }

    /// Shared handle to the settlement callback slot
    pub fn settle_slot(&self) -> SettleSlot {
        Rc::clone(&self.settle)
    }

    /// Underlying element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }
}

impl MediaOutput for WebAudioOutput {
    fn set_source(&mut self, uri: &str) {
        self.audio.set_src(uri);
    }

    fn load(&mut self) {
        self.audio.load();
    }

    fn play(&mut self, token: PlayToken) {
        let request = self.audio.play();
        let slot = Rc::clone(&self.settle);

        spawn_local(async move {
            let outcome = match request {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|err| rejection_from_js(&err)),
                Err(err) => Err(rejection_from_js(&err)),
            };

            let settle: Option<SettleFn> = slot.borrow().clone();
            match settle {
                Some(settle) => settle(token, outcome),
                None => console::warn_1(&"sutra: play settled before the player was ready".into()),
            }
        });
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            console::warn_2(&"sutra: pause failed".into(), &err);
        }
    }

    fn position(&self) -> Duration {
        known_duration(self.audio.current_time()).unwrap_or_default()
    }

    fn seek(&mut self, position: Duration) {
        self.audio.set_current_time(position.as_secs_f64());
    }

    fn duration(&self) -> Option<Duration> {
        known_duration(self.audio.duration())
    }

    fn playback_rate(&self) -> f64 {
        self.audio.playback_rate()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.audio.set_playback_rate(rate);
    }
}

fn rejection_from_js(err: &JsValue) -> PlayRejection {
    match err.dyn_ref::<DomException>() {
        Some(exception) => PlayRejection::from_dom_name(&exception.name(), &exception.message()),
        None => PlayRejection::Other(err.as_string().unwrap_or_else(|| format!("{err:?}"))),
    }
}
