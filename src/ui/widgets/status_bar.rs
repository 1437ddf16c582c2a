use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBar {
    pub failure_count: usize,
    pub pending: usize,
    pub done: usize,
    pub message: Option<String>,
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 10 {
            return;
        }

        let mut spans = Vec::new();

        // Left: failure count
        if self.failure_count > 0 {
            spans.push(Span::styled(
                format!(" ! {} failed (press 'e' to view) ", self.failure_count),
                Style::default().fg(Color::Red),
            ));
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }

        spans.push(Span::styled(
            format!(" Pending: {}  Done: {}", self.pending, self.done),
            Style::default().fg(Color::White),
        ));

        // Right: last message
        if let Some(msg) = &self.message {
            let left_len: usize = spans.iter().map(|s| s.content.len()).sum();
            let msg_str = format!("{} ", msg);
            let padding = (area.width as usize).saturating_sub(left_len + msg_str.len());
            spans.push(Span::styled(
                format!("{:pad$}", "", pad = padding),
                Style::default(),
            ));
            spans.push(Span::styled(msg_str, Style::default().fg(Color::Green)));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
