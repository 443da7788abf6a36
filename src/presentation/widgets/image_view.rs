//! Image display pane rendered through a terminal graphics protocol.

use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget, Wrap},
};
use ratatui_image::picker::{Capability, Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::{Resize, StatefulImage};

use crate::domain::entities::{ALT_LOAD_FAILED, ImageDisplay};

/// Queries the terminal for its graphics protocol.
///
/// Must run after the terminal entered raw mode and before the event stream
/// starts reading stdin.
#[must_use]
pub fn detect_picker() -> Picker {
    let mut picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());

    let caps = picker.capabilities();
    let has_sixel = caps.iter().any(|c| matches!(c, Capability::Sixel));
    let has_kitty = caps.iter().any(|c| matches!(c, Capability::Kitty));

    if has_sixel && !has_kitty && picker.protocol_type() == ProtocolType::Halfblocks {
        picker.set_protocol_type(ProtocolType::Sixel);
    }

    picker
}

/// Decoded pixels for the current display, keyed by the state revision that
/// produced them.
pub struct ImageViewState {
    picker: Option<Picker>,
    protocol: Option<StatefulProtocol>,
    revision: u64,
    decode_error: Option<String>,
}

impl ImageViewState {
    /// Creates the pane state. Without a picker only alt text is shown.
    #[must_use]
    pub const fn new(picker: Option<Picker>) -> Self {
        Self {
            picker,
            protocol: None,
            revision: 0,
            decode_error: None,
        }
    }

    #[must_use]
    pub const fn preview_enabled(&self) -> bool {
        self.picker.is_some()
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn decode_error(&self) -> Option<&str> {
        self.decode_error.as_deref()
    }

    /// Drops pixels belonging to an older revision.
    pub fn reset(&mut self, revision: u64) {
        self.revision = revision;
        self.protocol = None;
        self.decode_error = None;
    }

    /// Installs decoded pixels if they still match the current revision.
    /// Returns false for stale results.
    pub fn set_image(&mut self, revision: u64, image: &Arc<image::DynamicImage>) -> bool {
        if revision != self.revision {
            return false;
        }
        if let Some(picker) = &self.picker {
            self.protocol = Some(picker.new_resize_protocol((**image).clone()));
        }
        true
    }

    pub fn set_decode_error(&mut self, revision: u64, message: String) -> bool {
        if revision != self.revision {
            return false;
        }
        self.protocol = None;
        self.decode_error = Some(message);
        true
    }
}

impl std::fmt::Debug for ImageViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageViewState")
            .field("preview", &self.picker.is_some())
            .field("has_protocol", &self.protocol.is_some())
            .field("revision", &self.revision)
            .field("decode_error", &self.decode_error)
            .finish()
    }
}

pub struct ImageView<'a> {
    display: &'a ImageDisplay,
}

impl<'a> ImageView<'a> {
    #[must_use]
    pub const fn new(display: &'a ImageDisplay) -> Self {
        Self { display }
    }

    fn caption(&self, state: &ImageViewState) -> Vec<Line<'static>> {
        let decode_failed = state.decode_error().is_some();
        let alt = if decode_failed {
            ALT_LOAD_FAILED
        } else {
            self.display.alt()
        };
        let alt_style = match self.display {
            _ if decode_failed => Style::default().fg(Color::Red),
            ImageDisplay::Error(_) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ImageDisplay::Generating | ImageDisplay::Loading => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
            _ => Style::default().fg(Color::Gray),
        };

        let mut lines = vec![Line::styled(alt.to_string(), alt_style)];
        if let Some(error) = state.decode_error() {
            lines.push(Line::styled(
                error.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        } else if self.display.payload().is_some() && !state.preview_enabled() {
            lines.push(Line::styled(
                "Preview disabled. Press Ctrl+S to save the image.",
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines
    }
}

impl StatefulWidget for ImageView<'_> {
    type State = ImageViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(" Image ");
        let inner = block.inner(area);
        block.render(area, buf);

        let caption = self.caption(state);
        let caption_height = u16::try_from(caption.len()).unwrap_or(1);

        let showing_pixels = self.display.payload().is_some() && state.protocol.is_some();
        if showing_pixels {
            let [image_area, caption_area] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(caption_height)])
                    .areas(inner);
            if let Some(protocol) = state.protocol.as_mut() {
                StatefulImage::default()
                    .resize(Resize::Fit(None))
                    .render(image_area, buf, protocol);
            }
            Paragraph::new(caption)
                .alignment(Alignment::Center)
                .render(caption_area, buf);
        } else {
            let [_, caption_area, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(caption_height),
                Constraint::Fill(1),
            ])
            .areas(inner);
            Paragraph::new(caption)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(caption_area, buf);
        }
    }
}
