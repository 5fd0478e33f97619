//! WASM bindings for sutra-playback
//!
//! Binds the [`PlaybackController`](crate::PlaybackController) to a page: the
//! `<audio>` element, the track cards, the transport bar and
//! `navigator.mediaSession`.

pub mod dom;
pub mod output;
pub mod player;
pub mod session;
pub mod types;

pub use dom::{DomPage, DomView};
pub use output::WebAudioOutput;
pub use player::WasmPlayer;
pub use session::BrowserMediaSession;
pub use types::{DomBindings, PlayerOptions};

use crate::{error::PlayRejection, types::{PlayToken, RemoteCommand}};
use std::cell::RefCell;
use std::rc::Rc;

/// Callback that feeds a play settlement back into the controller
pub type SettleFn = Rc<dyn Fn(PlayToken, Result<(), PlayRejection>)>;

/// Slot filled once the controller exists
pub type SettleSlot = Rc<RefCell<Option<SettleFn>>>;

/// Callback that forwards a remote command to the controller
pub type RemoteFn = Rc<dyn Fn(RemoteCommand)>;

/// Slot filled once the controller exists
pub type RemoteSlot = Rc<RefCell<Option<RemoteFn>>>;
