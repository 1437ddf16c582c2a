use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub struct HelpPanel;

impl Widget for HelpPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let help_text = vec![
            Line::from(Span::styled(
                " seqrename - Keyboard Shortcuts ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            section("  Main"),
            help_line("    o           ", "Load files from the source directory"),
            help_line("    d           ", "Edit source directory"),
            help_line("    p           ", "Edit filename prefix"),
            help_line("    f           ", "Cycle the picker's starting filter"),
            help_line("    r / Enter   ", "Rename pending files"),
            help_line("    e           ", "Show failed renames"),
            help_line("    x           ", "Export last run as JSON"),
            Line::from(""),
            section("  File picker"),
            help_line("    j / k       ", "Move down / up"),
            help_line("    Space       ", "Mark file"),
            help_line("    a           ", "Mark / unmark all"),
            help_line("    f / Tab     ", "Cycle file type filter"),
            help_line("    Enter       ", "Load marked files"),
            help_line("    Esc         ", "Cancel"),
            Line::from(""),
            help_line("    ?           ", "Toggle this help"),
            help_line("    q / Ctrl+C  ", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "  Press ? or Esc to close",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .style(Style::default().bg(Color::Black));
        help.render(area, buf);
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(key, Style::default().fg(Color::Green)),
        Span::raw(desc),
    ])
}
