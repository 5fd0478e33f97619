//! `navigator.mediaSession` binding

use super::RemoteSlot;
use crate::session::{MediaSession, NowPlaying};
use crate::types::RemoteCommand;
use js_sys::{Function, Reflect};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Navigator};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = MediaSession)]
    type JsMediaSession;

    #[wasm_bindgen(method, setter = metadata)]
    fn set_metadata(this: &JsMediaSession, metadata: &JsMediaMetadata);

    #[wasm_bindgen(method, catch, js_name = setActionHandler)]
    fn set_action_handler(
        this: &JsMediaSession,
        action: &str,
        handler: &Function,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = MediaMetadata)]
    type JsMediaMetadata;

    #[wasm_bindgen(constructor, catch, js_class = "MediaMetadata")]
    fn new(init: &JsValue) -> Result<JsMediaMetadata, JsValue>;
}

/// Browser media session
///
/// Remote actions are forwarded through a shared slot filled in once the
/// controller exists.
pub struct BrowserMediaSession {
    session: JsMediaSession,
    dispatch: RemoteSlot,
    handlers: Vec<(RemoteCommand, Closure<dyn FnMut()>)>,
}

impl BrowserMediaSession {
    /// Bind to `navigator.mediaSession`, or `None` when the browser lacks it
    pub fn from_navigator(navigator: &Navigator, dispatch: RemoteSlot) -> Option<Self> {
        let key = JsValue::from_str("mediaSession");
        let session = Reflect::get(navigator, &key).ok()?;
        if session.is_undefined() || session.is_null() {
            return None;
        }

        Some(Self {
            session: session.unchecked_into(),
            dispatch,
            handlers: Vec::new(),
        })
    }
}

impl MediaSession for BrowserMediaSession {
    fn publish(&mut self, now_playing: &NowPlaying) {
        let metadata = serde_wasm_bindgen::to_value(now_playing)
            .map_err(JsValue::from)
            .and_then(|init| JsMediaMetadata::new(&init));

        match metadata {
            Ok(metadata) => self.session.set_metadata(&metadata),
            Err(err) => console::warn_2(&"sutra: media metadata rejected".into(), &err),
        }
    }

    fn register_remote_commands(&mut self, commands: &[RemoteCommand]) {
        for &command in commands {
            if self.handlers.iter().any(|(known, _)| *known == command) {
                continue;
            }

            let dispatch = Rc::clone(&self.dispatch);
            let handler = Closure::<dyn FnMut()>::new(move || {
                let forward = dispatch.borrow().clone();
                if let Some(forward) = forward {
                    forward(command);
                }
            });

            match self
                .session
                .set_action_handler(command.action_name(), handler.as_ref().unchecked_ref())
            {
                Ok(()) => self.handlers.push((command, handler)),
                // Unsupported actions throw; the rest still register
                Err(err) => console::warn_2(&command.action_name().into(), &err),
            }
        }
    }
}
