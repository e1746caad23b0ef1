//! Search box with live suggestion cards

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::{EventKind, HandlerResponse};
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
    ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, TextInput, TextInputProps, TextInputStyle,
};

use super::{
    format_name, handler_response, Component, ACCENT_YELLOW, BG_HIGHLIGHT, BG_PANEL_ALT,
    SPINNER_FRAMES, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{AppState, SuggestionCard};

pub struct SearchOverlay {
    input: TextInput,
    list: SelectList,
    modal: Modal,
    was_open: bool,
}

pub struct SearchOverlayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            list: SelectList::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.list = SelectList::new();
        }
        self.was_open = is_open;
    }

    pub fn handle(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let EventKind::Key(key) = event else {
            return HandlerResponse::ignored();
        };

        match key.code {
            KeyCode::Esc => return handler_response(vec![Action::SearchClose]),
            KeyCode::Enter => {
                // Enter confirms a highlighted suggestion; without one it
                // submits the raw query (filter + direct lookup)
                if state.search.selected.is_some() {
                    return handler_response(vec![Action::SuggestionConfirm]);
                }
                return handler_response(vec![Action::SearchQuerySubmit(
                    state.search.query.clone(),
                )]);
            }
            KeyCode::Down => return handler_response(vec![Action::SuggestionMove(1)]),
            KeyCode::Up => return handler_response(vec![Action::SuggestionMove(-1)]),
            _ => {}
        }

        let input_props = TextInputProps {
            value: &state.search.query,
            placeholder: "Search by name or number...",
            is_focused: true,
            style: input_style(),
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchQuerySubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        let actions: Vec<_> = self
            .input
            .handle_event(event, input_props)
            .into_iter()
            .collect();
        handler_response(actions)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, props: SearchOverlayProps<'_>) {
        if area.width < 24 || area.height < 8 {
            return;
        }
        let state = props.state;

        let SearchOverlay {
            input, list, modal, ..
        } = self;
        let modal_area = centered_rect(64, 16, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(1)])
                .split(content_area);

            let input_props = TextInputProps {
                value: &state.search.query,
                placeholder: "Search by name or number...",
                is_focused: props.is_focused,
                style: input_style(),
                on_change: Action::SearchQueryChange,
                on_submit: Action::SearchQuerySubmit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[0], input_props);

            if state.search.suggestions_visible && !state.search.suggestions.is_empty() {
                let items = suggestion_items(&state.search.suggestions);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.search.selected.unwrap_or(0),
                    is_focused: state.search.selected.is_some(),
                    style: suggestion_list_style(),
                    behavior: SelectListBehavior::default(),
                    on_select: Action::SuggestionSelect,
                    render_item: &|item| item.clone(),
                };
                list.render(frame, chunks[1], list_props);
            } else {
                let hint = if state.suggestions_loading {
                    format!(
                        "Searching {}",
                        SPINNER_FRAMES[state.tick as usize % SPINNER_FRAMES.len()]
                    )
                } else {
                    "Type at least 2 characters for suggestions.".to_string()
                };
                frame.render_widget(
                    Paragraph::new(hint).style(Style::default().fg(TEXT_DIM)),
                    chunks[1],
                );
            }
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(BG_PANEL_ALT),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::SearchClose,
                render_content: &mut render_content,
            },
        );
    }
}

fn suggestion_items(cards: &[SuggestionCard]) -> Vec<Line<'static>> {
    cards
        .iter()
        .map(|card| {
            let types = card
                .types
                .iter()
                .map(|name| format_name(name))
                .collect::<Vec<_>>()
                .join(" / ");
            Line::from(vec![
                Span::styled(
                    format!("#{:03} ", card.id),
                    Style::default().fg(ACCENT_YELLOW),
                ),
                Span::styled(
                    format_name(&card.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {types}"), Style::default().fg(TEXT_DIM)),
            ])
        })
        .collect()
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::all(1),
            bg: Some(BG_HIGHLIGHT),
            fg: Some(TEXT_MAIN),
        },
        placeholder_style: None,
        cursor_style: None,
    }
}

fn suggestion_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::all(1),
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
