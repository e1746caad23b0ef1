//! Tabbed detail panel: Description / Sprites / Evolutions / Locations

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use tui_dispatch::{EventKind, HandlerResponse};

use super::{
    focus_border, format_name, handler_response, sprite_fit, ACCENT_RED, ACCENT_YELLOW,
    BG_PANEL, BG_PANEL_ALT, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::sprite;
use crate::sprite_backend;
use crate::state::{AppState, DetailTab, PokemonDetail};

const SPRITE_SLOT: &str = "detail";

#[derive(Default)]
pub struct DetailPanel;

pub struct DetailPanelProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => vec![Action::DetailTabPrev],
                KeyCode::Right | KeyCode::Char('l') => vec![Action::DetailTabNext],
                KeyCode::Char('b') => vec![Action::ToggleBackView],
                KeyCode::Char('s') => vec![Action::ToggleShinyView],
                KeyCode::Up | KeyCode::Char('k') if state.detail_tab == DetailTab::Sprites => {
                    vec![Action::StripMove(-1)]
                }
                KeyCode::Down | KeyCode::Char('j') if state.detail_tab == DetailTab::Sprites => {
                    vec![Action::StripMove(1)]
                }
                _ => vec![],
            },
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, props: DetailPanelProps<'_>) {
        let state = props.state;
        let block = Block::default()
            .borders(Borders::ALL)
            .title("DATA")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(4)])
            .split(inner);

        let titles: Vec<&str> = DetailTab::ALL.iter().map(|tab| tab.title()).collect();
        let tab_index = DetailTab::ALL
            .iter()
            .position(|tab| tab == &state.detail_tab)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(tab_index)
            .style(Style::default().fg(TEXT_DIM))
            .highlight_style(Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, layout[0]);

        let Some(detail) = state.detail.as_ref() else {
            sprite_backend::clear_sprite(SPRITE_SLOT);
            let message = if state.detail_loading {
                "Loading pokemon..."
            } else {
                "[select a pokemon]"
            };
            frame.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(TEXT_DIM)),
                layout[1],
            );
            return;
        };

        match state.detail_tab {
            DetailTab::Description => self.render_description(frame, layout[1], state, detail),
            DetailTab::Sprites => self.render_sprites(frame, layout[1], state),
            DetailTab::Evolutions => {
                sprite_backend::clear_sprite(SPRITE_SLOT);
                frame.render_widget(
                    Paragraph::new(evolutions_text(detail))
                        .style(Style::default().fg(TEXT_MAIN))
                        .wrap(Wrap { trim: true }),
                    layout[1],
                );
            }
            DetailTab::Locations => {
                sprite_backend::clear_sprite(SPRITE_SLOT);
                frame.render_widget(
                    Paragraph::new(locations_text(detail))
                        .style(Style::default().fg(TEXT_MAIN))
                        .wrap(Wrap { trim: true }),
                    layout[1],
                );
            }
        }
    }

    fn render_description(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        detail: &PokemonDetail,
    ) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let caption = orientation_caption(state);
        let sprite_block = Block::default()
            .borders(Borders::ALL)
            .title(caption)
            .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
        let sprite_inner = sprite_block.inner(layout[0]);
        frame.render_widget(sprite_block, layout[0]);
        place_sprite(frame, sprite_inner, state, state.main_sprite_url().cloned());

        frame.render_widget(
            Paragraph::new(description_text(detail))
                .style(Style::default().fg(TEXT_MAIN))
                .wrap(Wrap { trim: true }),
            layout[1],
        );
    }

    fn render_sprites(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let entries = state.strip_entries();
        if entries.is_empty() {
            sprite_backend::clear_sprite(SPRITE_SLOT);
            frame.render_widget(
                Paragraph::new("No generation sprites.")
                    .style(Style::default().fg(TEXT_DIM))
                    .wrap(Wrap { trim: true }),
                area,
            );
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        frame.render_widget(
            Paragraph::new(strip_lines(state))
                .style(Style::default().fg(TEXT_MAIN))
                .wrap(Wrap { trim: false }),
            layout[0],
        );

        let selected = entries.get(state.sprite_strip_index);
        let title = selected
            .map(|(generation, version, _)| {
                format!("{} / {}", format_name(generation), format_name(version))
            })
            .unwrap_or_default();
        let sprite_block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN));
        let sprite_inner = sprite_block.inner(layout[1]);
        frame.render_widget(sprite_block, layout[1]);
        place_sprite(
            frame,
            sprite_inner,
            state,
            selected.map(|(_, _, url)| url.clone()),
        );
    }
}

/// Draw the sprite behind `url` into `area` through the kitty overlay, or a
/// text placeholder when it has not arrived
fn place_sprite(frame: &mut Frame, area: Rect, state: &AppState, url: Option<String>) {
    if let Some(url) = url {
        if let Some(sprite) = state.sprite_cache.get(&url) {
            let (cols, rows) = sprite_fit(sprite, area.width, area.height);
            if let Ok(sequence) = sprite::kitty_sequence(sprite, cols, rows) {
                let x = area.x.saturating_add(area.width.saturating_sub(cols) / 2);
                let y = area.y.saturating_add(area.height.saturating_sub(rows) / 2);
                sprite_backend::place_sprite(SPRITE_SLOT, x, y, sequence);
                return;
            }
        }
        sprite_backend::clear_sprite(SPRITE_SLOT);
        frame.render_widget(
            Paragraph::new("[loading sprite]")
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM)),
            area,
        );
        return;
    }

    sprite_backend::clear_sprite(SPRITE_SLOT);
    frame.render_widget(
        Paragraph::new("[no sprite]")
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_DIM)),
        area,
    );
}

fn orientation_caption(state: &AppState) -> String {
    let side = if state.back_view { "Back" } else { "Front" };
    if state.shiny_view {
        format!("{side} Shiny")
    } else {
        side.to_string()
    }
}

fn description_text(detail: &PokemonDetail) -> Text<'static> {
    let mut lines = vec![Line::from(Span::styled(
        format!("{}  #{:03}", format_name(&detail.name), detail.id),
        Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
    ))];

    for (label, value) in detail.stat_rows() {
        let bar_len = ((value as usize) / 10).clamp(1, 24);
        lines.push(Line::from(format!(
            "{label:>8} {value:>4} {}",
            "#".repeat(bar_len)
        )));
    }

    lines.push(Line::from(" "));
    for (label, value) in detail.profile_rows() {
        lines.push(Line::from(format!("{label}: {value}")));
    }

    if !detail.abilities.is_empty() {
        lines.push(Line::from(" "));
        lines.push(Line::from(Span::styled(
            "Abilities:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for ability in &detail.abilities {
            let hidden = if ability.is_hidden { " (hidden)" } else { "" };
            lines.push(Line::from(format!(
                "- {}{hidden}",
                format_name(&ability.name)
            )));
        }
    }

    Text::from(lines)
}

/// One header line per generation, then its versions as a horizontal strip
/// with the cursor entry highlighted
fn strip_lines(state: &AppState) -> Vec<Line<'static>> {
    let entries = state.strip_entries();
    let mut lines = Vec::new();
    let mut flat_index = 0;
    let mut current_generation: Option<&str> = None;
    let mut row: Vec<Span<'static>> = Vec::new();

    for (generation, version, _) in &entries {
        if current_generation != Some(generation.as_str()) {
            if !row.is_empty() {
                lines.push(Line::from(std::mem::take(&mut row)));
            }
            lines.push(Line::from(Span::styled(
                format_name(generation),
                Style::default()
                    .fg(ACCENT_YELLOW)
                    .add_modifier(Modifier::BOLD),
            )));
            current_generation = Some(generation.as_str());
        }
        let style = if flat_index == state.sprite_strip_index {
            Style::default()
                .fg(TEXT_MAIN)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        row.push(Span::styled(format!(" {} ", format_name(version)), style));
        flat_index += 1;
    }
    if !row.is_empty() {
        lines.push(Line::from(row));
    }
    lines
}

fn evolutions_text(detail: &PokemonDetail) -> Text<'static> {
    if detail.evolutions.is_empty() {
        return Text::from(Span::styled(
            "No evolutions.",
            Style::default().fg(TEXT_DIM),
        ));
    }
    let mut spans: Vec<Span<'static>> = Vec::new();
    for (index, stage) in detail.evolutions.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" -> ", Style::default().fg(TEXT_DIM)));
        }
        spans.push(Span::styled(
            format_name(&stage.name),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" ({})", stage.condition_label()),
            Style::default().fg(TEXT_DIM),
        ));
    }
    Text::from(Line::from(spans))
}

fn locations_text(detail: &PokemonDetail) -> Text<'static> {
    if detail.locations.is_empty() {
        return Text::from(Span::styled(
            "No known locations.",
            Style::default().fg(TEXT_DIM),
        ));
    }
    Text::from(
        detail
            .locations
            .iter()
            .map(|location| Line::from(format!("- {}", format_name(location))))
            .collect::<Vec<_>>(),
    )
}
