use super::board_widget::{piece_color, BoardView};
use crate::game::{GameOutcome, GameState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, board: &BoardView, message: &Option<String>, controls: &[String]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(board.state.height() as u16 + 4), // Board
            Constraint::Length(3), // Message
            Constraint::Length(controls.len().div_ceil(3) as u16 + 2), // Controls
        ])
        .split(frame.area());

    render_header(frame, board.state, chunks[0]);
    board.render(frame, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, controls, chunks[3]);
}

/// Status line: whose turn it is, or how the game ended.
pub fn status_text(state: &GameState) -> String {
    match state.outcome() {
        GameOutcome::InProgress => format!("Current Player: {}", state.current_turn()),
        GameOutcome::Won { piece, .. } => format!("{piece} Won!"),
        GameOutcome::Tie => "Tie Game!".to_string(),
    }
}

fn render_header(frame: &mut Frame, state: &GameState, area: Rect) {
    let color = match state.outcome() {
        GameOutcome::InProgress => piece_color(state.current_turn()),
        GameOutcome::Won { piece, .. } => piece_color(*piece),
        GameOutcome::Tie => Color::White,
    };

    let title = format!("Connect {}", state.win_run_length());
    let header = Paragraph::new(status_text(state))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, controls: &[String], area: Rect) {
    let lines: Vec<Line> = controls
        .chunks(3)
        .map(|chunk| Line::from(chunk.join("  |  ")))
        .collect();

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(widget, area);
}
