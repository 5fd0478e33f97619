/// Line-oriented player view
///
/// Each visible element becomes one labelled line. Lines are buffered and only
/// produced when the element actually changes, so repeated renders of the same
/// state stay quiet.
use sutra_playback::{PlayerView, ProgressDisplay, TextPanelContent, TransportGlyph};

#[derive(Debug, Default)]
pub struct TerminalView {
    active: Option<String>,
    now_playing: Option<String>,
    glyph: Option<String>,
    progress: Option<String>,
    text_panel: Option<String>,
    rate: Option<String>,
    pending: Vec<String>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lines rendered since the last call
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    fn show(slot: &mut Option<String>, pending: &mut Vec<String>, line: String) {
        if slot.as_deref() != Some(line.as_str()) {
            pending.push(line.clone());
            *slot = Some(line);
        }
    }
}

impl PlayerView for TerminalView {
    fn render_active_track(&mut self, index: Option<usize>) {
        let line = match index {
            Some(index) => format!("active: #{index}"),
            None => "active: none".to_string(),
        };
        Self::show(&mut self.active, &mut self.pending, line);
    }

    fn render_now_playing(&mut self, title: &str, subtitle: &str) {
        let line = if subtitle.is_empty() {
            format!("now playing: {title}")
        } else {
            format!("now playing: {title} ({subtitle})")
        };
        Self::show(&mut self.now_playing, &mut self.pending, line);
    }

    fn render_glyph(&mut self, glyph: TransportGlyph) {
        let line = format!("transport: {}", glyph.symbol());
        Self::show(&mut self.glyph, &mut self.pending, line);
    }

    fn render_progress(&mut self, progress: &ProgressDisplay) {
        let line = match progress.fraction {
            Some(fraction) => format!(
                "time: {} / {} ({:.0}%)",
                progress.elapsed,
                progress.total,
                fraction * 100.0
            ),
            None => format!("time: {} / {}", progress.elapsed, progress.total),
        };
        Self::show(&mut self.progress, &mut self.pending, line);
    }

    fn render_text_panel(&mut self, panel: &TextPanelContent) {
        let line = format!("text: {}\n      {}", panel.title, panel.body);
        Self::show(&mut self.text_panel, &mut self.pending, line);
    }

    fn render_rate(&mut self, label: &str) {
        let line = format!("speed: {label}");
        Self::show(&mut self.rate, &mut self.pending, line);
    }
}
