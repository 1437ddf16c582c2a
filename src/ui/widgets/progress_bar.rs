use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Gauge, Widget},
};

pub struct RenameProgressBar {
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
    pub running: bool,
}

impl Widget for RenameProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width < 20 {
            return;
        }

        // Line 1: counts
        let (label, color) = if self.running {
            ("Renaming... ", Color::Yellow)
        } else {
            ("Ready ", Color::Green)
        };
        let stats_line = Line::from(vec![
            Span::styled(label, Style::default().fg(color)),
            Span::styled(
                format!("{} / {} files", self.completed, self.total),
                Style::default().fg(Color::White),
            ),
        ]);
        buf.set_line(area.x, area.y, &stats_line, area.width);

        // Line 2: gauge
        let ratio = (self.percentage / 100.0).clamp(0.0, 1.0);
        let gauge_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        };
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(ratio)
            .label(format!("{:.0}%", self.percentage))
            .render(gauge_area, buf);
    }
}
