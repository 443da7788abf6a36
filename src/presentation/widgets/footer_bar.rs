use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Pane receiving key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    #[default]
    Prompt,
    History,
}

impl FocusContext {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Prompt => "PROMPT",
            Self::History => "HISTORY",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Prompt => Self::History,
            Self::History => Self::Prompt,
        }
    }

    /// Key hints shown while this pane has focus.
    #[must_use]
    pub const fn hints(self) -> &'static [KeyHint] {
        match self {
            Self::Prompt => PROMPT_HINTS,
            Self::History => HISTORY_HINTS,
        }
    }
}

const PROMPT_HINTS: &[KeyHint] = &[
    KeyHint::new("Generate", "Enter"),
    KeyHint::new("Newline", "A-Enter"),
    KeyHint::new("History", "Tab"),
    KeyHint::new("Save", "C-s"),
    KeyHint::new("Quit", "C-c"),
];

const HISTORY_HINTS: &[KeyHint] = &[
    KeyHint::new("Open", "Enter"),
    KeyHint::new("Move", "↑↓"),
    KeyHint::new("Prompt", "Tab"),
    KeyHint::new("Save", "C-s"),
    KeyHint::new("Quit", "C-c"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub label: &'static str,
    pub key: &'static str,
}

impl KeyHint {
    #[must_use]
    pub const fn new(label: &'static str, key: &'static str) -> Self {
        Self { label, key }
    }
}

pub struct FooterBarStyle {
    pub background: Style,
    pub label_style: Style,
    pub key_style: Style,
    pub info: Style,
    pub focus_indicator: Style,
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            label_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().fg(Color::White).bg(Color::DarkGray),
            info: Style::default().fg(Color::DarkGray),
            focus_indicator: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

pub struct FooterBar<'a> {
    focus_context: FocusContext,
    right_info: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(focus_context: FocusContext) -> Self {
        Self {
            focus_context,
            right_info: None,
            style: FooterBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn right_info(mut self, info: Option<&'a str>) -> Self {
        self.right_info = info;
        self
    }

    fn build_left_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.focus_context.display_name()),
                self.style.focus_indicator,
            ),
            Span::raw(" "),
        ];

        for (i, hint) in self.focus_context.hints().iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(format!(" {} ", hint.label), self.style.label_style));
            spans.push(Span::styled(format!(" {} ", hint.key), self.style.key_style));
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let right_width = self
            .right_info
            .map_or(0, |s| u16::try_from(s.width()).unwrap_or(u16::MAX));
        let left_width = area.width.saturating_sub(right_width.saturating_add(1));

        let left_area = Rect::new(area.x, area.y, left_width, 1);
        Paragraph::new(Line::from(self.build_left_spans())).render(left_area, buf);

        if let Some(info) = self.right_info
            && right_width < area.width
        {
            let right_x = area.right().saturating_sub(right_width);
            let right_area = Rect::new(right_x, area.y, right_width, 1);
            Paragraph::new(Line::from(Span::styled(info, self.style.info)))
                .render(right_area, buf);
        }
    }
}
