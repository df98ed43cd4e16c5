use crate::animation::DropAnimator;
use crate::game::{GameOutcome, GameState, Piece};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What occupies one drawn cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Piece(Piece),
    /// Where the selected column's piece would land.
    Preview(Piece),
    /// Part of the winning run.
    Winning(Piece),
}

impl Glyph {
    fn span(self) -> Span<'static> {
        match self {
            Glyph::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
            Glyph::Piece(p) => Span::styled(" \u{25cf} ", Style::default().fg(piece_color(p))),
            Glyph::Preview(p) => Span::styled(
                " \u{25cb} ",
                Style::default().fg(piece_color(p)).add_modifier(Modifier::DIM),
            ),
            Glyph::Winning(p) => Span::styled(
                " \u{25c9} ",
                Style::default()
                    .fg(piece_color(p))
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}

pub fn piece_color(piece: Piece) -> Color {
    match piece {
        Piece::Empty => Color::DarkGray,
        Piece::Player1 => Color::Red,
        Piece::Player2 => Color::Yellow,
    }
}

/// Everything the board drawing depends on.
pub struct BoardView<'a> {
    pub state: &'a GameState,
    pub animator: &'a DropAnimator,
    pub selected_column: usize,
    /// Draw the current player's piece above the selected column.
    pub show_selector: bool,
}

impl BoardView<'_> {
    /// Cells to draw, top line first. Line 0 is the selector line above the
    /// board; the rest are board rows from the top down.
    pub fn glyphs(&self) -> Vec<Vec<Glyph>> {
        let width = self.state.width();
        let height = self.state.height();
        let board = self.state.board();
        let mut lines = vec![vec![Glyph::Empty; width]; height + 1];
        let line_of = |row: usize| height - row;

        // Pieces at rest, unless one is still falling into that cell
        for column in 0..width {
            for row in 0..height {
                let piece = board.get(column, row).unwrap_or(Piece::Empty);
                if piece.is_player() && !self.animator.has_animation_landing_at(column, row) {
                    lines[line_of(row)][column] = Glyph::Piece(piece);
                }
            }
        }

        // Falling pieces; anything below the board is out of sight
        for (piece, column, row) in self.animator.active_animations() {
            let row = row.round();
            if row < 0.0 || column >= width {
                continue;
            }
            let line = line_of((row as usize).min(height));
            lines[line][column] = Glyph::Piece(piece);
        }

        match self.state.outcome() {
            GameOutcome::InProgress => {
                let turn = self.state.current_turn();
                if self.show_selector && self.selected_column < width {
                    lines[0][self.selected_column] = Glyph::Piece(turn);
                }
                if !self.animator.is_animating() {
                    if let Ok(Some(row)) = self.state.drop_row(self.selected_column) {
                        lines[line_of(row)][self.selected_column] = Glyph::Preview(turn);
                    }
                }
            }
            GameOutcome::Won { piece, line } => {
                if !self.animator.is_animating() {
                    for &(column, row) in line {
                        lines[line_of(row)][column] = Glyph::Winning(*piece);
                    }
                }
            }
            GameOutcome::Tie => {}
        }

        lines
    }

    /// Styled text lines with the board frame around the cells.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let glyphs = self.glyphs();
        let width = self.state.width();
        let bar = "\u{2550}".repeat(3 * width + 1);
        let mut lines = Vec::with_capacity(glyphs.len() + 3);

        // Column numbers with selection indicator
        let mut numbers = vec![Span::raw("   ")];
        for column in 0..width {
            let label = format!("{:^3}", (column + 1) % 100);
            if column == self.selected_column {
                numbers.push(Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ));
            } else {
                numbers.push(Span::raw(label));
            }
        }
        numbers.push(Span::raw("  "));
        lines.push(Line::from(numbers));

        let mut selector = vec![Span::raw("   ")];
        selector.extend(glyphs[0].iter().map(|&g| match g {
            Glyph::Empty => Span::raw("   "),
            other => other.span(),
        }));
        selector.push(Span::raw("  "));
        lines.push(Line::from(selector));

        lines.push(Line::from(format!("  \u{2554}{bar}\u{2557}")));
        for row in &glyphs[1..] {
            let mut spans = vec![Span::raw("  \u{2551}")];
            spans.extend(row.iter().map(|g| g.span()));
            spans.push(Span::raw(" \u{2551}"));
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(format!("  \u{255a}{bar}\u{255d}")));

        lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let widget = Paragraph::new(self.lines()).alignment(Alignment::Center);
        frame.render_widget(widget, area);
    }
}
