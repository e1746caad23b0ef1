//! Pokedex browser TUI - list + detail viewer for a local Pokemon API

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::Block,
    Frame, Terminal,
};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::{
    centered_rect, BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api;
use pokedex::components::{
    Component, DetailPanel, DetailPanelProps, ListPanel, ListPanelProps, SearchOverlay,
    SearchOverlayProps,
};
use pokedex::effect::Effect;
use pokedex::reducer::reducer;
use pokedex::sprite;
use pokedex::sprite_backend::{self, SpriteBackend};
use pokedex::state::{
    AppState, DetailTab, FocusArea, FILTER_PAGE_SIZE, ITEMS_PER_PAGE, SPINNER_TICK_MS,
    SUGGESTION_DEBOUNCE_MS, SUGGESTION_LIMIT,
};

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse a Pokemon API: paginated roster, suggestions, tabbed details")]
struct Args {
    /// Base URL of the Pokemon API backend
    #[arg(long, default_value = api::DEFAULT_BASE_URL)]
    base_url: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    List,
    Detail,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    List,
    Detail,
    Search,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.search.active {
            return Some(DexComponentId::Search);
        }
        match self.focus {
            FocusArea::List => Some(DexComponentId::List),
            FocusArea::Detail => Some(DexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.search.active {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::List => DexContext::List,
            DexComponentId::Detail => DexContext::Detail,
            DexComponentId::Search => DexContext::Search,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        base_url,
        debug: debug_args,
    } = Args::parse();
    api::set_base_url(&base_url);

    let debug = DebugSession::new(debug_args);
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = SpriteBackend::new(stdout, sprite_backend::sprite_registry());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

struct PokedexUi {
    list: ListPanel,
    detail: DetailPanel,
    search: SearchOverlay,
    status_bar: StatusBar,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            list: ListPanel::new(),
            detail: DetailPanel::new(),
            search: SearchOverlay::new(),
            status_bar: StatusBar::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        let base = Block::default().style(Style::default().bg(pokedex::components::BG_BASE));
        frame.render_widget(base, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(3)])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
            .split(layout[0]);

        event_ctx.set_component_area(DexComponentId::List, body[0]);
        event_ctx.set_component_area(DexComponentId::Detail, body[1]);

        self.list.render(
            frame,
            body[0],
            ListPanelProps {
                state,
                is_focused: !state.search.active && state.focus == FocusArea::List,
            },
        );
        self.detail.render(
            frame,
            body[1],
            DetailPanelProps {
                state,
                is_focused: !state.search.active && state.focus == FocusArea::Detail,
            },
        );
        render_footer(frame, layout[1], state, &mut self.status_bar);

        self.search.set_open(state.search.active);
        if state.search.active {
            let modal_area = centered_rect(64, 16, area);
            event_ctx.set_component_area(DexComponentId::Search, modal_area);
            self.search.render(
                frame,
                area,
                SearchOverlayProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                },
            );
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Search);
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(DexComponentId::List, move |event, state| {
        ui_list.borrow_mut().list.handle(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(DexComponentId::Detail, move |event, state| {
        ui_detail.borrow_mut().detail.handle(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        let mut ui = ui_search.borrow_mut();
        ui.search.set_open(state.search.active);
        ui.search.handle(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Char('q') if !state.search.active => {
                HandlerResponse::action(Action::Quit)
            }
            crossterm::event::KeyCode::Tab => HandlerResponse::action(Action::FocusNext),
            crossterm::event::KeyCode::Char('/') if !state.search.active => {
                HandlerResponse::action(Action::SearchOpen)
            }
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadPage { page } => {
            ctx.tasks().spawn(TaskKey::new("roster"), async move {
                match api::fetch_page(page, ITEMS_PER_PAGE).await {
                    Ok((entries, total_pages)) => Action::RosterDidLoad {
                        entries,
                        total_pages,
                    },
                    Err(error) => Action::RosterDidError(error),
                }
            });
        }
        Effect::LoadFiltered { name } => {
            // Empty text reissues the default unfiltered first page; the
            // response's page metadata is dropped either way
            ctx.tasks().spawn(TaskKey::new("roster"), async move {
                let result = if name.is_empty() {
                    api::fetch_page(1, ITEMS_PER_PAGE)
                        .await
                        .map(|(entries, _)| entries)
                } else {
                    api::fetch_filtered(&name, FILTER_PAGE_SIZE).await
                };
                match result {
                    Ok(entries) => Action::FilterDidLoad(entries),
                    Err(error) => Action::FilterDidError(error),
                }
            });
        }
        Effect::FetchSuggestions { query } => {
            ctx.tasks().debounce(
                "suggestions",
                Duration::from_millis(SUGGESTION_DEBOUNCE_MS),
                async move {
                    match api::fetch_suggestions(&query, SUGGESTION_LIMIT).await {
                        Ok(cards) => Action::SuggestionsDidLoad(cards),
                        Err(error) => Action::SuggestionsDidError(error),
                    }
                },
            );
        }
        Effect::CancelSuggestions => {
            ctx.tasks().cancel(&TaskKey::new("suggestions"));
        }
        Effect::LoadDetailById { id } => {
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                match api::fetch_detail_by_id(id).await {
                    Ok(detail) => Action::DetailDidLoad {
                        detail,
                        by_name: false,
                    },
                    Err(error) => Action::DetailDidError {
                        target: format!("#{id}"),
                        error,
                    },
                }
            });
        }
        Effect::LoadDetailByName { name } => {
            ctx.tasks().spawn(TaskKey::new("detail"), async move {
                match api::fetch_detail_by_name(&name).await {
                    Ok(detail) => Action::DetailDidLoad {
                        detail,
                        by_name: true,
                    },
                    Err(error) => Action::DetailDidError {
                        target: name,
                        error,
                    },
                }
            });
        }
        Effect::LoadSprite { url } => {
            let key = format!("sprite_{url}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_bytes(&url).await {
                    Ok(bytes) => match sprite::decode_sprite(&bytes, &url) {
                        Ok(sprite) => Action::SpriteDidLoad { url, sprite },
                        Err(error) => Action::SpriteDidError { url, error },
                    },
                    Err(error) => Action::SpriteDidError { url, error },
                }
            });
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.list_loading {
            "Loading list...".to_string()
        } else if state.detail_loading {
            "Loading pokemon...".to_string()
        } else if state.suggestions_loading {
            "Searching...".to_string()
        } else {
            String::new()
        }
    });
    let (left_hints, center_hints) = status_hints(state);
    let status_span = Span::styled(
        status,
        Style::default().fg(pokedex::components::ACCENT_YELLOW),
    );
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 1),
            bg: Some(pokedex::components::BG_PANEL),
            fg: Some(pokedex::components::TEXT_MAIN),
        },
        ..StatusBarStyle::default()
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> (Vec<StatusBarHint<'static>>, Vec<StatusBarHint<'static>>) {
    if state.search.active {
        let left = vec![
            StatusBarHint::new("Enter", "Select/Search"),
            StatusBarHint::new("Up/Down", "Choose"),
            StatusBarHint::new("Esc", "Close"),
        ];
        return (left, Vec::new());
    }

    let left = match state.focus {
        FocusArea::List => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("n/p", "Page"),
        ],
        FocusArea::Detail => {
            let mut hints = vec![
                StatusBarHint::new("h/l", "Tabs"),
                StatusBarHint::new("b", "Back view"),
                StatusBarHint::new("s", "Shiny"),
            ];
            if state.detail_tab == DetailTab::Sprites {
                hints.push(StatusBarHint::new("j/k", "Version"));
            }
            hints
        }
    };
    let center = vec![
        StatusBarHint::new("Tab", "Focus"),
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("q", "Quit"),
    ];
    (left, center)
}
