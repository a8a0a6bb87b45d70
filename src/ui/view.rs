use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::task::Task;

use super::controller::UiController;

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);

pub(crate) const EMPTY_STATE: &str = "No tasks yet. Type a description and press Enter.";
const FOOTER_HINT: &str =
    "Enter add  Space toggle (empty input)  Del/Ctrl-D delete  Up/Down select  Esc quit";

pub fn render(frame: &mut Frame, ui: &UiController) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_input(frame, ui, chunks[0]);
    render_error(frame, ui, chunks[1]);
    render_list(frame, ui, chunks[2]);
    render_footer(frame, ui, chunks[3]);
}

fn render_input(frame: &mut Frame, ui: &UiController, area: Rect) {
    let line = Line::from(vec![
        Span::styled(ui.input().to_string(), Style::default().fg(COLOR_TEXT)),
        Span::styled("_", Style::default().fg(COLOR_MUTED)),
    ]);
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("New task")
            .border_style(Style::default().fg(COLOR_ACCENT)),
    );
    frame.render_widget(widget, area);
}

fn render_error(frame: &mut Frame, ui: &UiController, area: Rect) {
    let Some(message) = ui.error() else {
        return;
    };
    let widget = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default()
            .fg(COLOR_ERROR)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(widget, area);
}

fn render_list(frame: &mut Frame, ui: &UiController, area: Rect) {
    let mut lines = Vec::new();
    if ui.tasks().is_empty() {
        lines.push(Line::from(Span::styled(
            EMPTY_STATE,
            Style::default().fg(COLOR_MUTED),
        )));
    } else {
        let height = area.height.saturating_sub(2) as usize;
        let (start, end) = list_window(ui.tasks().len(), ui.selected(), height);
        for (index, task) in ui.tasks().iter().enumerate().take(end).skip(start) {
            lines.push(render_row(task, ui.selected() == Some(index)));
        }
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Tasks")
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_row(task: &Task, selected: bool) -> Line<'static> {
    let (mark, mark_style) = if task.completed {
        ("[x]", Style::default().fg(COLOR_SUCCESS))
    } else {
        ("[ ]", Style::default().fg(COLOR_MUTED))
    };
    let mut text_style = Style::default().fg(COLOR_TEXT);
    if task.completed {
        text_style = text_style.fg(COLOR_MUTED).add_modifier(Modifier::CROSSED_OUT);
    }
    let mut line = Line::from(vec![
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(task.description.clone(), text_style),
    ]);
    if selected {
        line = line.style(Style::default().bg(COLOR_BG_MUTED));
    }
    line
}

fn render_footer(frame: &mut Frame, ui: &UiController, area: Rect) {
    let counts = format!(
        "{} tasks, {} completed",
        ui.tasks().len(),
        ui.completed_count()
    );
    let widget = Paragraph::new(vec![
        Line::from(Span::styled(FOOTER_HINT, Style::default().fg(COLOR_INFO))),
        Line::from(Span::styled(counts, Style::default().fg(COLOR_ACCENT))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(COLOR_BORDER_LIST)),
    );
    frame.render_widget(widget, area);
}

fn list_window(total: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if total == 0 || height == 0 {
        return (0, 0);
    }
    if total <= height {
        return (0, total);
    }
    let selected = selected.unwrap_or(0);
    let mut start = selected.saturating_sub(height / 2);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}
