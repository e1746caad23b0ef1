//! Flat single-screen layout: search line, sprite, stat grid

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{Component, DataResource, EventKind, HandlerResponse};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use crate::action::Action;
use crate::sprite;
use crate::sprite_backend;
use crate::state::{AppState, PokemonInfo};

const BG_BASE: Color = Color::Rgb(14, 18, 30);
const BG_PANEL: Color = Color::Rgb(22, 30, 46);
const TEXT_MAIN: Color = Color::Rgb(230, 238, 244);
const TEXT_DIM: Color = Color::Rgb(160, 178, 194);
const ACCENT: Color = Color::Rgb(98, 190, 228);

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub fn handle_display_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => vec![Action::SearchSubmit],
            crossterm::event::KeyCode::Backspace => vec![Action::SearchBackspace],
            crossterm::event::KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let base = Block::default().style(Style::default().bg(BG_BASE));
    frame.render_widget(base, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    render_search_line(frame, layout[0], state);
    render_body(frame, layout[1], state);
    render_status(frame, layout[2], state, status_bar);
}

fn render_search_line(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("MINIDEX")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT));
    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(ACCENT)),
        Span::raw(state.query.clone()),
        Span::styled("_", Style::default().fg(TEXT_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_sprite_panel(frame, layout[0], state);
    render_result_panel(frame, layout[1], state);
}

fn render_sprite_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(sprite) = state.sprite.as_ref() {
        let (cols, rows) = sprite::sprite_fit(sprite, inner.width, inner.height);
        if let Ok(sequence) = sprite::kitty_sequence(sprite, cols, rows) {
            let x = inner.x.saturating_add(inner.width.saturating_sub(cols) / 2);
            let y = inner.y.saturating_add(inner.height.saturating_sub(rows) / 2);
            sprite_backend::show_sprite(x, y, sequence);
            return;
        }
    }

    sprite_backend::hide_sprite();
    let placeholder = match &state.result {
        DataResource::Loaded(_) => "[no sprite]",
        DataResource::Loading => "",
        _ => " ",
    };
    frame.render_widget(
        Paragraph::new(placeholder)
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_DIM)),
        inner,
    );
}

fn render_result_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("STATS")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = match &state.result {
        DataResource::Empty => Text::from(Span::styled(
            "Type a name or number, press Enter.",
            Style::default().fg(TEXT_DIM),
        )),
        DataResource::Loading => Text::from(format!(
            "Searching {}",
            SPINNER_FRAMES[state.tick as usize % SPINNER_FRAMES.len()]
        )),
        DataResource::Failed(error) => Text::from(vec![
            Line::from(Span::styled(
                "Lookup failed.",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(error.clone()),
        ]),
        DataResource::Loaded(info) => info_text(info),
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn info_text(info: &PokemonInfo) -> Text<'static> {
    let types = info
        .types
        .iter()
        .map(|name| capitalize(name))
        .collect::<Vec<_>>()
        .join(" / ");
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}  #{:03}", capitalize(&info.name), info.id),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Type: {types}")),
        Line::from(" "),
    ];
    for (label, value) in info.stat_rows() {
        let bar_len = ((value as usize) / 10).clamp(1, 24);
        lines.push(Line::from(format!(
            "{label:>8} {value:>4} {}",
            "#".repeat(bar_len)
        )));
    }
    lines.push(Line::from(" "));
    lines.push(Line::from(format!(
        "Height: {}  Weight: {}  Base Exp: {}",
        info.height,
        info.weight,
        info.base_experience
            .map(|value| value.to_string())
            .unwrap_or_else(|| "--".to_string())
    )));
    Text::from(lines)
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.status.clone().unwrap_or_default();
    let status_span = Span::styled(status, Style::default().fg(ACCENT));
    let status_items = [StatusBarItem::span(status_span)];
    Component::<Action>::render(
        status_bar,
        frame,
        area,
        StatusBarProps {
            left: StatusBarSection::hints(&[
                StatusBarHint::new("Enter", "search"),
                StatusBarHint::new("Esc", "quit"),
            ])
            .with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style: StatusBarStyle::default(),
            is_focused: false,
        },
    );
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
