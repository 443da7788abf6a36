//! Newest-first list of submitted prompts.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget},
};

use crate::domain::entities::{History, HistoryEntry};

const PENDING_MARKER: &str = "… ";
const READY_MARKER: &str = "• ";

#[derive(Debug, Default)]
pub struct HistoryListState {
    list_state: ListState,
    focused: bool,
}

impl HistoryListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.list_state.select(index);
    }

    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let next = self.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.list_state.select(Some(next));
    }

    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let previous = self.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(previous));
    }

    /// Moves the highlight to `index`, the new row of the previously selected
    /// entry. Falls back to clamping when that entry is gone.
    pub fn follow(&mut self, index: Option<usize>, len: usize) {
        match index {
            Some(i) if i < len => self.list_state.select(Some(i)),
            _ => self.clamp(len),
        }
    }

    /// Keeps the selection inside the list after entries come and go.
    pub fn clamp(&mut self, len: usize) {
        match self.selected() {
            Some(_) if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

pub struct HistoryList<'a> {
    history: &'a History,
    show_timestamps: bool,
}

impl<'a> HistoryList<'a> {
    #[must_use]
    pub const fn new(history: &'a History) -> Self {
        Self {
            history,
            show_timestamps: true,
        }
    }

    #[must_use]
    pub const fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    fn item(&self, entry: &HistoryEntry) -> ListItem<'static> {
        let (marker, marker_style) = if entry.is_pending() {
            (PENDING_MARKER, Style::default().fg(Color::Yellow))
        } else {
            (READY_MARKER, Style::default().fg(Color::Green))
        };

        let mut spans = vec![Span::styled(marker, marker_style)];
        if self.show_timestamps {
            spans.push(Span::styled(
                entry.created_at().format("%H:%M ").to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::raw(entry.display_label().to_string()));

        ListItem::new(Line::from(spans))
    }
}

impl StatefulWidget for HistoryList<'_> {
    type State = HistoryListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.clamp(self.history.len());

        let border_style = if state.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let items: Vec<ListItem> = self.history.iter().map(|e| self.item(e)).collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" History "),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        StatefulWidget::render(list, area, buf, &mut state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EntryKey, Prompt};

    fn history(labels: &[&str]) -> History {
        let mut history = History::new();
        for (i, label) in labels.iter().enumerate() {
            history.prepend(HistoryEntry::pending(
                EntryKey::new(i as u64),
                &Prompt::new(*label).unwrap(),
            ));
        }
        history
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let mut state = HistoryListState::new();
        state.select_previous(3);
        assert_eq!(state.selected(), Some(0));

        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected(), Some(2));

        state.clamp(1);
        assert_eq!(state.selected(), Some(0));

        state.select_next(0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_follow_tracks_moved_entry() {
        let mut state = HistoryListState::new();
        state.select(Some(0));

        state.follow(Some(1), 2);
        assert_eq!(state.selected(), Some(1));

        state.follow(None, 1);
        assert_eq!(state.selected(), Some(0));

        state.follow(None, 0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_render_newest_first_with_labels() {
        let history = history(&["first\nmore", "second"]);
        let mut state = HistoryListState::new();
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);

        HistoryList::new(&history)
            .show_timestamps(false)
            .render(area, &mut buf, &mut state);

        let row = |y: u16| -> String { (0..30).map(|x| buf[(x, y)].symbol().to_string()).collect() };
        assert!(row(1).contains("second"));
        assert!(row(2).contains("first"));
        assert!(!row(2).contains("more"));
    }
}
