// Wishlist panel: one heart button per auction.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use aste_core::wishlist::{ButtonStyle, WishlistButton};

use super::bid_form::border_style;
use crate::tui::{Focus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.focus == Focus::Wishlist;
    let lines: Vec<Line> = state
        .page
        .wishlist
        .iter()
        .enumerate()
        .map(|(i, button)| button_line(button, focused && i == state.wishlist_selected))
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title("Desideri"),
    );
    frame.render_widget(paragraph, area);
}

fn button_line(button: &WishlistButton, selected: bool) -> Line<'static> {
    let heart_style = match button.style {
        ButtonStyle::Danger => Style::default().fg(Color::White).bg(Color::Red),
        ButtonStyle::OutlineDanger => Style::default().fg(Color::Red),
    };
    let marker = if selected { "> " } else { "  " };
    let mut label_style = Style::default();
    if selected {
        label_style = label_style.add_modifier(Modifier::REVERSED);
    }
    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!(" {} ", button.label()), heart_style),
        Span::styled(format!(" Asta {}", button.asta_id), label_style),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
