// Status bar widget: live connection state of the auction detail.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use aste_core::live_feed::ConnectionStatus;

use crate::tui::ViewState;

/// Render the status bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let status = state.page.live.as_ref().map(|l| l.status);
    let (dot, dot_color) = connection_indicator(status);

    let mut spans = vec![
        Span::styled(format!(" {dot} "), Style::default().fg(dot_color)),
        Span::styled(connection_label(status), Style::default().fg(Color::White)),
    ];
    if let Some(live) = &state.page.live {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("Asta {}", live.asta_id),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the connection dot character and its color.
pub fn connection_indicator(status: Option<ConnectionStatus>) -> (&'static str, Color) {
    match status {
        Some(ConnectionStatus::Open) => ("●", Color::Green),
        Some(ConnectionStatus::Connecting) => ("●", Color::Yellow),
        Some(ConnectionStatus::Closed { .. }) | Some(ConnectionStatus::Failed) => ("●", Color::Red),
        None => ("○", Color::DarkGray),
    }
}

pub fn connection_label(status: Option<ConnectionStatus>) -> String {
    match status {
        Some(ConnectionStatus::Connecting) => "Live: connecting".to_string(),
        Some(ConnectionStatus::Open) => "Live: open".to_string(),
        Some(ConnectionStatus::Closed { code }) => format!("Live: closed ({code})"),
        Some(ConnectionStatus::Failed) => "Live: error".to_string(),
        None => "No live feed".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
