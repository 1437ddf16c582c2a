use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::app_state::{AppState, Phase, PickerState, ViewMode};
use crate::ui::widgets::file_list::{truncate_front, FileList, FileListItem, FileListState};
use crate::ui::widgets::help_panel::HelpPanel;
use crate::ui::widgets::progress_bar::RenameProgressBar;
use crate::ui::widgets::status_bar::StatusBar;

pub fn render(frame: &mut Frame, state: &AppState) {
    render_main(frame, state);
    match state.view_mode {
        ViewMode::Help => {
            let area = centered_rect(60, 80, frame.area());
            frame.render_widget(HelpPanel, area);
        }
        ViewMode::ErrorList => render_error_overlay(frame, state),
        ViewMode::Picker => {
            if let Some(picker) = &state.picker {
                render_picker_overlay(frame, picker);
            }
        }
        _ => {}
    }
}

fn render_main(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // directory / extension / prefix
            Constraint::Min(6),    // pending | renamed
            Constraint::Length(4), // progress
            Constraint::Length(1), // status bar
            Constraint::Length(1), // key hints
        ])
        .split(area);

    let phase = match state.phase {
        Phase::Idle => "Idle",
        Phase::FilesLoaded => "Files loaded",
        Phase::Renaming => "Renaming",
    };
    let title = Paragraph::new(Line::from(vec![
        Span::styled(" seqrename ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" - {} ", phase), Style::default().fg(Color::White)),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(title, chunks[0]);

    render_inputs(frame, chunks[1], state);

    // Pending (left) | Renamed (right)
    let list_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let pending_items = state
        .pending
        .iter()
        .map(|p| FileListItem::plain(p.display().to_string()))
        .collect();
    let pending = FileList::new(pending_items).block(
        Block::default()
            .title(format!(" Files to Rename ({}) ", state.pending.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_stateful_widget(pending, list_chunks[0], &mut FileListState::default());

    let done_items = state
        .done
        .iter()
        .map(|p| FileListItem::plain(p.display().to_string()))
        .collect();
    let done = FileList::new(done_items)
        .follow_tail(true)
        .color(Color::Green)
        .block(
            Block::default()
                .title(format!(" Renamed Files ({}) ", state.done.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_stateful_widget(done, list_chunks[1], &mut FileListState::default());

    let progress_block = Block::default()
        .title(" Progress ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let progress_inner = progress_block.inner(chunks[3]);
    frame.render_widget(progress_block, chunks[3]);
    let progress = RenameProgressBar {
        completed: state.completed,
        total: state.total,
        percentage: state.percentage(),
        running: state.is_renaming(),
    };
    frame.render_widget(progress, progress_inner);

    let status = StatusBar {
        failure_count: state.failures.len(),
        pending: state.pending.len(),
        done: state.done.len(),
        message: state.status_message.clone(),
    };
    frame.render_widget(status, chunks[4]);

    let hints = Paragraph::new(Line::from(vec![
        Span::styled(" o", Style::default().fg(Color::Yellow)),
        Span::styled(": Load files  ", Style::default().fg(Color::DarkGray)),
        Span::styled("d", Style::default().fg(Color::Yellow)),
        Span::styled(": Directory  ", Style::default().fg(Color::DarkGray)),
        Span::styled("p", Style::default().fg(Color::Yellow)),
        Span::styled(": Prefix  ", Style::default().fg(Color::DarkGray)),
        Span::styled("f", Style::default().fg(Color::Yellow)),
        Span::styled(": Filter  ", Style::default().fg(Color::DarkGray)),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::styled(": Rename  ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(": Help  ", Style::default().fg(Color::DarkGray)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(": Quit", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(hints, chunks[5]);
}

fn render_inputs(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Percentage(15),
            Constraint::Percentage(30),
        ])
        .split(area);

    let editing_dir = state.view_mode == ViewMode::EditDirectory;
    let dir_text = if state.dir_input.is_empty() && !editing_dir {
        Span::styled("(home directory)", Style::default().fg(Color::DarkGray))
    } else {
        let width = chunks[0].width.saturating_sub(3) as usize;
        Span::raw(with_cursor(&truncate_front(&state.dir_input, width), editing_dir))
    };
    frame.render_widget(
        Paragraph::new(Line::from(dir_text)).block(input_block(" Last Source Directory ", editing_dir)),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            state.extension_label.clone(),
            Style::default().fg(Color::Cyan),
        )))
        .block(input_block(" Extension ", false)),
        chunks[1],
    );

    let editing_prefix = state.view_mode == ViewMode::EditPrefix;
    frame.render_widget(
        Paragraph::new(Line::from(Span::raw(with_cursor(&state.prefix_input, editing_prefix))))
            .block(input_block(" Filename Prefix ", editing_prefix)),
        chunks[2],
    );
}

fn input_block(title: &str, active: bool) -> Block<'_> {
    let color = if active { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn with_cursor(text: &str, active: bool) -> String {
    if active {
        format!("{}_", text)
    } else {
        text.to_string()
    }
}

fn render_picker_overlay(frame: &mut Frame, picker: &PickerState) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let visible = picker.visible();
    let items: Vec<FileListItem> = visible
        .iter()
        .map(|&i| FileListItem {
            name: picker.entries[i]
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            marked: Some(picker.marked[i]),
        })
        .collect();

    let title = format!(
        " Choose Files to Rename - {} - {} | {} marked ",
        picker.dir.display(),
        picker.filter,
        picker.marked_count()
    );
    let list = FileList::new(items).block(
        Block::default()
            .title(title)
            .title_bottom(" Space: mark  a: all  f: filter  Enter: load  Esc: cancel ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );
    let mut list_state = FileListState {
        selected: Some(picker.selected_index),
        offset: 0,
    };
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_error_overlay(frame: &mut Frame, state: &AppState) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} failed renames ", state.failures.len()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for failure in &state.failures {
        let type_str = format!("{:?}", failure.kind);
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", failure.ordinal), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("[{}] ", type_str), Style::default().fg(Color::Yellow)),
            Span::styled(
                failure.path.display().to_string(),
                Style::default().fg(Color::White),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("     ", Style::default()),
            Span::styled(&failure.message, Style::default().fg(Color::DarkGray)),
        ]));
    }

    if state.failures.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No failures.",
            Style::default().fg(Color::Green),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press e or Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let error_panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Failures ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().bg(Color::Black))
        .wrap(Wrap { trim: false });
    frame.render_widget(error_panel, area);
}

/// Helper to create a centered rectangle within a given area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
