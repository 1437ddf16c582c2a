use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

#[derive(Default)]
pub struct FileListState {
    pub selected: Option<usize>,
    pub offset: usize,
}

pub struct FileList<'a> {
    items: Vec<FileListItem>,
    follow_tail: bool,
    color: Color,
    block: Option<Block<'a>>,
}

pub struct FileListItem {
    pub name: String,
    /// `Some` renders a checkbox in front of the name.
    pub marked: Option<bool>,
}

impl FileListItem {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marked: None,
        }
    }
}

impl<'a> FileList<'a> {
    pub fn new(items: Vec<FileListItem>) -> Self {
        Self {
            items,
            follow_tail: false,
            color: Color::White,
            block: None,
        }
    }

    /// Keep the newest (last) entries in view, for lists that grow during a run.
    pub fn follow_tail(mut self, follow: bool) -> Self {
        self.follow_tail = follow;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }
}

impl StatefulWidget for FileList<'_> {
    type State = FileListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height < 1 || inner.width < 8 {
            return;
        }

        if self.items.is_empty() {
            let line = Line::from(Span::styled("  (empty)", Style::default().fg(Color::DarkGray)));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        }

        let list_height = inner.height as usize;

        if self.follow_tail {
            state.offset = self.items.len().saturating_sub(list_height);
        } else if let Some(selected) = state.selected {
            // Adjust offset to ensure selected item is visible
            if selected < state.offset {
                state.offset = selected;
            }
            if selected >= state.offset + list_height {
                state.offset = selected + 1 - list_height;
            }
        }
        state.offset = state.offset.min(self.items.len().saturating_sub(1));

        let end = (state.offset + list_height).min(self.items.len());
        for (i, item) in self.items[state.offset..end].iter().enumerate() {
            let row_y = inner.y + i as u16;
            let is_selected = state.selected == Some(state.offset + i);

            let checkbox = match item.marked {
                Some(true) => "[x] ",
                Some(false) => "[ ] ",
                None => "",
            };
            let name_max = (inner.width as usize).saturating_sub(checkbox.len() + 2);
            let line_text = format!(" {}{}", checkbox, truncate_front(&item.name, name_max));

            let style = if is_selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if item.marked == Some(true) {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(self.color)
            };

            let padding = (inner.width as usize).saturating_sub(line_text.width());
            let line = Line::from(Span::styled(
                format!("{}{:pad$}", line_text, "", pad = padding),
                style,
            ));
            buf.set_line(inner.x, row_y, &line, inner.width);
        }
    }
}

/// Shorten from the left so the file name at the end of a path stays readable.
pub fn truncate_front(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return "...".to_string();
    }
    let target = max_width - 3;
    let mut w = 0;
    let start = text
        .char_indices()
        .rev()
        .find(|&(_, c)| {
            w += unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            w > target
        })
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    format!("...{}", &text[start..])
}
