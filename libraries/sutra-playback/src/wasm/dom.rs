//! Page elements and the DOM-backed view

use super::types::DomBindings;
use crate::clock::ProgressDisplay;
use crate::types::{TextPanelContent, TransportGlyph};
use crate::view::PlayerView;
use sutra_core::{Catalog, TextLibrary, TrackDescriptor};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAudioElement, HtmlInputElement};

/// Elements the player binds to, looked up once at startup
///
/// Only the audio element is required; any other missing element is skipped
/// when rendering.
#[derive(Debug, Clone)]
pub struct DomPage {
    pub audio: HtmlAudioElement,
    pub cards: Vec<Element>,
    pub player_title: Option<Element>,
    pub player_subtitle: Option<Element>,
    pub play_pause: Option<Element>,
    pub previous: Option<Element>,
    pub next: Option<Element>,
    pub progress: Option<HtmlInputElement>,
    pub current_time: Option<Element>,
    pub duration: Option<Element>,
    pub rate: Option<Element>,
    pub text_title: Option<Element>,
    pub text_body: Option<Element>,
}

impl DomPage {
    /// Look up every bound element
    pub fn bind(document: &Document, bindings: &DomBindings) -> Result<Self, JsValue> {
        let audio = document
            .get_element_by_id(&bindings.audio_id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{} element", bindings.audio_id)))?
            .dyn_into::<HtmlAudioElement>()
            .map_err(|_| JsValue::from_str(&format!("#{} is not <audio>", bindings.audio_id)))?;

        let nodes = document.query_selector_all(&bindings.track_selector)?;
        let cards = (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();

        let by_id = |id: &str| document.get_element_by_id(id);

        Ok(Self {
            audio,
            cards,
            player_title: by_id(&bindings.player_title_id),
            player_subtitle: by_id(&bindings.player_subtitle_id),
            play_pause: by_id(&bindings.play_pause_id),
            previous: by_id(&bindings.previous_id),
            next: by_id(&bindings.next_id),
            progress: by_id(&bindings.progress_id)
                .and_then(|el| el.dyn_into().ok()),
            current_time: by_id(&bindings.current_time_id),
            duration: by_id(&bindings.duration_id),
            rate: by_id(&bindings.rate_id),
            text_title: by_id(&bindings.text_title_id),
            text_body: by_id(&bindings.text_body_id),
        })
    }

    /// Build the catalog from the track cards, in document order
    pub fn catalog(&self, bindings: &DomBindings, texts: TextLibrary) -> Catalog {
        let tracks = self
            .cards
            .iter()
            .map(|card| {
                let source = card
                    .get_attribute(&bindings.source_attribute)
                    .unwrap_or_default();
                let title = inner_text(card, &bindings.title_selector);
                let subtitle = inner_text(card, &bindings.subtitle_selector);
                let descriptor = TrackDescriptor::new(source, title).with_subtitle(subtitle);

                match card.get_attribute(&bindings.text_key_attribute) {
                    Some(key) => descriptor.with_text_key(key),
                    None => descriptor,
                }
            })
            .collect();

        Catalog::new(tracks, texts)
    }
}

fn inner_text(card: &Element, selector: &str) -> String {
    card.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

fn set_text(element: Option<&Element>, text: &str) {
    if let Some(element) = element {
        element.set_text_content(Some(text));
    }
}

/// [`PlayerView`] writing into the bound page elements
#[derive(Debug, Clone)]
pub struct DomView {
    page: DomPage,
    active_class: String,
}

impl DomView {
    pub fn new(page: DomPage, bindings: &DomBindings) -> Self {
        Self {
            page,
            active_class: bindings.active_class.clone(),
        }
    }
}

impl PlayerView for DomView {
    fn render_active_track(&mut self, index: Option<usize>) {
        for (i, card) in self.page.cards.iter().enumerate() {
            // toggle only fails on an empty or whitespace token
            let _ = card
                .class_list()
                .toggle_with_force(&self.active_class, index == Some(i));
        }
    }

    fn render_now_playing(&mut self, title: &str, subtitle: &str) {
        set_text(self.page.player_title.as_ref(), title);
        set_text(self.page.player_subtitle.as_ref(), subtitle);
    }

    fn render_glyph(&mut self, glyph: TransportGlyph) {
        set_text(self.page.play_pause.as_ref(), glyph.symbol());
    }

    fn render_progress(&mut self, progress: &ProgressDisplay) {
        set_text(self.page.current_time.as_ref(), &progress.elapsed);
        set_text(self.page.duration.as_ref(), &progress.total);

        if let (Some(bar), Some(fraction)) = (self.page.progress.as_ref(), progress.fraction) {
            bar.set_value(&(fraction * 100.0).to_string());
        }
    }

    fn render_text_panel(&mut self, panel: &TextPanelContent) {
        set_text(self.page.text_title.as_ref(), &panel.title);
        set_text(self.page.text_body.as_ref(), &panel.body);
    }

    fn render_rate(&mut self, label: &str) {
        set_text(self.page.rate.as_ref(), label);
    }
}
