// Price range slider: two-handle track, tooltips, displays and the two
// search inputs it keeps in sync.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use aste_core::slider::{Handle, PriceSlider};

use super::bid_form::border_style;
use crate::tui::{Focus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.focus == Focus::Slider;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title("Prezzo");

    let Some(slider) = &state.page.slider else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let width = area.width.saturating_sub(2) as usize;
    let active = focused.then_some(state.active_handle);
    let lines = vec![
        tooltip_line(slider, active),
        Line::from(Span::styled(
            build_track(
                width,
                slider.range_max(),
                slider.value(Handle::Low),
                slider.value(Handle::High),
            ),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(format!(
            "€ {} - € {}",
            slider.min_display, slider.max_display
        )),
        Line::from(Span::styled(
            format!("min {} | max {}", slider.min_input, slider.max_input),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn tooltip_line(slider: &PriceSlider, active: Option<Handle>) -> Line<'static> {
    let style = |h: Handle| {
        if active == Some(h) {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        }
    };
    Line::from(vec![
        Span::styled(format!("[{}]", slider.tooltip(Handle::Low)), style(Handle::Low)),
        Span::raw("  "),
        Span::styled(format!("[{}]", slider.tooltip(Handle::High)), style(Handle::High)),
    ])
}

/// Draw a track `width` cells wide over `[0, range_max]` with the span
/// between the handles filled. Handles are drawn as `●`.
pub fn build_track(width: usize, range_max: i64, low: i64, high: i64) -> String {
    if width == 0 {
        return String::new();
    }
    let last = width - 1;
    let cell = |v: i64| -> usize {
        if range_max <= 0 {
            return 0;
        }
        let (v, max) = (v.clamp(0, range_max) as u128, range_max as u128);
        ((v * last as u128 + max / 2) / max) as usize
    };
    let (lo, hi) = (cell(low), cell(high));

    (0..width)
        .map(|i| {
            if i == lo || i == hi {
                '●'
            } else if i > lo && i < hi {
                '━'
            } else {
                '─'
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
