// Auction panel: current price, current bidder and the countdown.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let board = &state.page.board;
    let mut lines = vec![
        Line::from(Span::styled(
            board.prezzo_attuale.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(board.acquirente_attuale.clone()),
    ];
    if let Some(countdown) = &state.page.countdown {
        lines.push(Line::from(Span::styled(
            countdown.text.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Asta"));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
