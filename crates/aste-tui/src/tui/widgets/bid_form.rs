// Bid form: amount input and the error banner.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{Focus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.focus == Focus::BidForm;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title("Offerta");

    let Some(form) = &state.page.bid_form else {
        let paragraph = Paragraph::new(Span::styled(
            "Nessun modulo di offerta",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let cursor = if focused { "▏" } else { "" };
    let mut lines = vec![Line::from(vec![
        Span::raw("Importo: € "),
        Span::styled(
            format!("{}{cursor}", form.importo),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])];
    if form.error.visible {
        lines.push(Line::from(Span::styled(
            form.error.text.clone(),
            Style::default().fg(Color::White).bg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub(crate) fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use aste_core::bid::BidForm;

    fn rendered(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(40, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn shows_amount_and_hidden_banner() {
        let mut state = ViewState::default();
        let mut form = BidForm::new("/asta/1/offerta/");
        form.importo = "15.5".into();
        form.error.text = "Offerta troppo bassa".into();
        state.page.bid_form = Some(form);

        let text = rendered(&state);
        assert!(text.contains("15.5"));
        assert!(!text.contains("Offerta troppo bassa"));
    }

    #[test]
    fn shows_visible_banner() {
        let mut state = ViewState::default();
        let mut form = BidForm::new("/asta/1/offerta/");
        form.error.text = "Offerta troppo bassa".into();
        form.error.visible = true;
        state.page.bid_form = Some(form);

        assert!(rendered(&state).contains("Offerta troppo bassa"));
    }

    #[test]
    fn placeholder_without_form() {
        assert!(rendered(&ViewState::default()).contains("Nessun modulo"));
    }
}
