//! Paginated roster panel

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::{EventKind, HandlerResponse};
use tui_dispatch_components::{
    BaseStyle, Padding, ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle,
};

use super::{
    focus_border, format_name, handler_response, Component, ACCENT_YELLOW, BG_HIGHLIGHT, BG_PANEL,
    SPINNER_FRAMES, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::AppState;

pub struct ListPanel {
    list: SelectList,
}

pub struct ListPanelProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl Default for ListPanel {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl ListPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                    vec![Action::PageNext]
                }
                KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => vec![Action::PagePrev],
                _ => {
                    let items = roster_items(state);
                    let props = SelectListProps {
                        items: &items,
                        count: items.len(),
                        selected: state.selected_index.min(items.len().saturating_sub(1)),
                        is_focused: true,
                        style: roster_list_style(),
                        behavior: SelectListBehavior {
                            show_scrollbar: true,
                            wrap_navigation: false,
                        },
                        on_select: Action::RosterSelect,
                        render_item: &|item| item.clone(),
                    };
                    let actions: Vec<_> = self.list.handle_event(event, props).into_iter().collect();
                    return handler_response(actions);
                }
            },
            EventKind::Scroll { delta, .. } => vec![Action::SelectionMove((*delta * 3) as i16)],
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, props: ListPanelProps<'_>) {
        let state = props.state;
        let block = Block::default()
            .borders(Borders::ALL)
            .title("POKEDEX")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let items = roster_items(state);
        if items.is_empty() {
            let message = if state.list_loading {
                "Loading..."
            } else {
                "No pokemon."
            };
            frame.render_widget(
                Paragraph::new(message).style(Style::default().fg(TEXT_DIM)),
                layout[0],
            );
        } else {
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: state.selected_index.min(items.len().saturating_sub(1)),
                is_focused: props.is_focused,
                style: roster_list_style(),
                behavior: SelectListBehavior {
                    show_scrollbar: true,
                    wrap_navigation: false,
                },
                on_select: Action::RosterSelect,
                render_item: &|item| item.clone(),
            };
            self.list.render(frame, layout[0], list_props);
        }

        let spinner = if state.list_loading {
            SPINNER_FRAMES[state.tick as usize % SPINNER_FRAMES.len()]
        } else {
            " "
        };
        let footer = Line::from(vec![
            Span::styled(
                format!("page {}/{}", state.current_page, state.total_pages),
                Style::default()
                    .fg(ACCENT_YELLOW)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  n/p next/prev  ", Style::default().fg(TEXT_DIM)),
            Span::styled(spinner, Style::default().fg(ACCENT_YELLOW)),
        ]);
        frame.render_widget(Paragraph::new(footer), layout[1]);
    }
}

fn roster_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .roster
        .iter()
        .map(|entry| Line::from(format!("#{:03} {}", entry.id, format_name(&entry.name))))
        .collect()
}

fn roster_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        scrollbar: ScrollbarStyle::default(),
    }
}
