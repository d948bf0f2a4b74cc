pub mod charting;

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState};
use crate::corpus::Tier;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Countdown turns red below this many seconds.
const TIMER_WARN_SECS: f64 = 5.0;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Typing => render_typing(self, area, buf),
            AppState::Results => render_results(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let now = Instant::now();
    let session = &app.session;

    let green_bold_style = bold().fg(Color::Green);
    let red_bold_style = bold().fg(Color::Red);
    let underlined_dim_bold_style = dim_bold().add_modifier(Modifier::UNDERLINED);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let mut prompt_occupied_lines =
        ((session.text().width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;
    if session.text().width() <= max_chars_per_line as usize {
        prompt_occupied_lines = 1;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1), // tier tabs
                Constraint::Length(1),
                Constraint::Length(2), // countdown
                Constraint::Length(prompt_occupied_lines),
                Constraint::Length(1),
                Constraint::Length(1), // stats or hint
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    // Tier tabs with the active tier highlighted, plus the wrap flag
    let mut header_spans: Vec<Span> = Vec::new();
    for tier in Tier::ALL {
        let style = if tier == app.settings.tier {
            red_bold_style
        } else {
            dim_bold()
        };
        header_spans.push(Span::styled(tier.to_string(), style));
        header_spans.push(Span::raw("   "));
    }
    header_spans.push(Span::styled(
        format!("wrap {}", if app.settings.word_wrap { "on" } else { "off" }),
        italic_style,
    ));
    Paragraph::new(Line::from(header_spans))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let remaining = session.remaining_secs(now);
    let timer_style = if remaining < TIMER_WARN_SECS {
        red_bold_style
    } else {
        dim_bold()
    };
    Paragraph::new(Span::styled(format!("{remaining:.1}"), timer_style))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    // Typed prefix in green, cursor underlined, rest dimmed
    let spans: Vec<Span> = session
        .text()
        .chars()
        .enumerate()
        .map(|(idx, c)| {
            if idx < session.cursor() {
                Span::styled(c.to_string(), green_bold_style)
            } else if idx == session.cursor() {
                Span::styled(c.to_string(), underlined_dim_bold_style)
            } else {
                Span::styled(c.to_string(), dim_bold())
            }
        })
        .collect();

    let mut prompt = Paragraph::new(Line::from(spans)).alignment(if prompt_occupied_lines == 1 {
        Alignment::Center
    } else {
        Alignment::Left
    });
    if app.settings.word_wrap {
        prompt = prompt.wrap(Wrap { trim: true });
    }
    prompt.render(chunks[3], buf);

    if session.is_running() {
        let stats = format!(
            "{:.1} wpm   {:.1} cpm   {:.1}% acc   {} mistakes",
            session.wpm(now),
            session.cpm(now),
            session.accuracy(),
            session.mistakes()
        );
        Paragraph::new(Span::styled(stats, bold()))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    } else {
        Paragraph::new(Span::styled(
            "enter to begin   (1/2/3) difficulty   (n)ew   (w)rap   (esc)ape",
            italic_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);
    }
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let red_bold_style = bold().fg(Color::Red);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let magenta_style = Style::default().fg(Color::Magenta);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),    // wpm chart
                Constraint::Length(1), // frozen stats
                Constraint::Length(1), // outcome message
                Constraint::Length(1),
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    let (overall_duration, highest_wpm) =
        charting::compute_chart_params(session.wpm_series(), session.time_limit_secs());

    let tuples: Vec<(f64, f64)> = session.wpm_series().iter().map(|p| (p.t, p.wpm)).collect();
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(&tuples)];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, overall_duration])
                .labels(vec![
                    Span::styled("1", bold()),
                    Span::styled(charting::format_label(overall_duration), bold()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold()),
                    Span::styled(charting::format_label(highest_wpm), bold()),
                ]),
        );
    chart.render(chunks[0], buf);

    let (wpm, cpm, accuracy) = match session.frozen_stats() {
        Some(f) => (f.wpm, f.cpm, f.accuracy),
        None => (0.0, 0.0, 100.0),
    };
    let stats = format!(
        "{:.1} wpm   {:.1} cpm   {:.1}% acc   {} mistakes",
        wpm,
        cpm,
        accuracy,
        session.mistakes()
    );
    Paragraph::new(Span::styled(stats, bold()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let message = if session.is_timed_out() {
        "Time's up!"
    } else {
        "Completed!"
    };
    Paragraph::new(Span::styled(message, red_bold_style))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(r)etry   (n)ew paragraph   (1/2/3) difficulty   (esc)ape",
        italic_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}
