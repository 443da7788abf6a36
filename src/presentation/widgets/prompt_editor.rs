//! Multi-line prompt field backed by `tui-textarea`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthChar;

const PLACEHOLDER_TEXT: &str = "Describe the image to generate...";

pub struct PromptEditorState<'a> {
    textarea: TextArea<'a>,
    focused: bool,
    scroll_offset: usize,
}

impl Default for PromptEditorState<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptEditorState<'_> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            textarea: TextArea::default(),
            focused: true,
            scroll_offset: 0,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns the text with lines joined by `\n`.
    #[must_use]
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textarea.is_empty()
    }

    /// Replaces the whole buffer, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.textarea = TextArea::from(text.split('\n'));
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
        self.scroll_offset = 0;
    }

    pub fn insert_newline(&mut self) {
        self.textarea.insert_newline();
    }

    /// Applies an editing key. Returns true when the text changed.
    ///
    /// Keys are mapped by hand because `tui-textarea` is built against an
    /// older crossterm than the rest of the crate.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let word = key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
                self.textarea.insert_char(c);
                true
            }
            KeyCode::Char('w' | 'h') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.textarea.delete_word()
            }
            KeyCode::Backspace if word => self.textarea.delete_word(),
            KeyCode::Backspace => self.textarea.delete_char(),
            KeyCode::Delete if word => self.textarea.delete_next_word(),
            KeyCode::Delete => self.textarea.delete_next_char(),
            KeyCode::Left => {
                self.textarea.move_cursor(if word {
                    CursorMove::WordBack
                } else {
                    CursorMove::Back
                });
                false
            }
            KeyCode::Right => {
                self.textarea.move_cursor(if word {
                    CursorMove::WordForward
                } else {
                    CursorMove::Forward
                });
                false
            }
            KeyCode::Up => {
                self.textarea.move_cursor(CursorMove::Up);
                false
            }
            KeyCode::Down => {
                self.textarea.move_cursor(CursorMove::Down);
                false
            }
            KeyCode::Home => {
                self.textarea.move_cursor(CursorMove::Head);
                false
            }
            KeyCode::End => {
                self.textarea.move_cursor(CursorMove::End);
                false
            }
            _ => false,
        }
    }

    fn render_with_style(&mut self, area: Rect, buf: &mut Buffer, style: &PromptEditorStyle) {
        let border_style = if self.focused {
            style.border_style_focused
        } else {
            style.border_style
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Prompt ");
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let height = inner.height as usize;
        if width == 0 || height == 0 {
            return;
        }

        let (cursor_row, cursor_col) = self.textarea.cursor();
        if cursor_row >= self.scroll_offset + height {
            self.scroll_offset = cursor_row + 1 - height;
        } else if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        }

        if self.is_empty() {
            buf.set_stringn(inner.x, inner.y, PLACEHOLDER_TEXT, width, style.placeholder_style);
        } else {
            for (i, line) in self
                .textarea
                .lines()
                .iter()
                .enumerate()
                .skip(self.scroll_offset)
                .take(height)
            {
                let y = inner.y + u16::try_from(i - self.scroll_offset).unwrap_or(0);
                buf.set_stringn(inner.x, y, line, width, style.text_style);
            }
        }

        if self.focused {
            let line = self
                .textarea
                .lines()
                .get(cursor_row)
                .map_or("", String::as_str);
            let cursor_x: usize = line
                .chars()
                .take(cursor_col)
                .map(|c| c.width().unwrap_or(0))
                .sum();
            if cursor_x < width {
                let x = inner.x + u16::try_from(cursor_x).unwrap_or(0);
                let y = inner.y + u16::try_from(cursor_row - self.scroll_offset).unwrap_or(0);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(style.cursor_style);
                    if cell.symbol().is_empty() {
                        cell.set_symbol(" ");
                    }
                }
            }
        }
    }
}

pub struct PromptEditorStyle {
    pub border_style: Style,
    pub border_style_focused: Style,
    pub text_style: Style,
    pub placeholder_style: Style,
    pub cursor_style: Style,
}

impl Default for PromptEditorStyle {
    fn default() -> Self {
        Self {
            border_style: Style::default().fg(Color::Gray),
            border_style_focused: Style::default().fg(Color::Cyan),
            text_style: Style::default().fg(Color::White),
            placeholder_style: Style::default().fg(Color::DarkGray),
            cursor_style: Style::default().bg(Color::White).fg(Color::Black),
        }
    }
}

#[derive(Default)]
pub struct PromptEditor {
    style: PromptEditorStyle,
}

impl PromptEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, state: &mut PromptEditorState<'_>, area: Rect, buf: &mut Buffer) {
        state.render_with_style(area, buf, &self.style);
    }
}
