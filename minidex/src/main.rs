//! Minidex - one-shot Pokemon lookup against the public PokeAPI

mod action;
mod api;
mod effect;
mod reducer;
mod sprite;
mod sprite_backend;
mod state;
mod ui;

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
use ratatui::Terminal;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_components::StatusBar;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use crate::action::Action;
use crate::effect::Effect;
use crate::reducer::reducer;
use crate::sprite_backend::SpriteBackend;
use crate::state::{AppState, SPINNER_TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "minidex")]
#[command(about = "Look up one Pokemon by id or name")]
struct Args {
    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum MiniComponentId {
    Display,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum MiniContext {
    Main,
}

impl EventRoutingState<MiniComponentId, MiniContext> for AppState {
    fn focused(&self) -> Option<MiniComponentId> {
        Some(MiniComponentId::Display)
    }

    fn modal(&self) -> Option<MiniComponentId> {
        None
    }

    fn binding_context(&self, _id: MiniComponentId) -> MiniContext {
        MiniContext::Main
    }

    fn default_context(&self) -> MiniContext {
        MiniContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let debug = DebugSession::new(args.debug);

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = SpriteBackend::new(stdout, sprite_backend::sprite_slot());
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
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let status_bar = Rc::new(RefCell::new(StatusBar::new()));
    let mut bus: EventBus<AppState, Action, MiniComponentId, MiniContext> = EventBus::new();
    let keybindings: Keybindings<MiniContext> = Keybindings::new();

    bus.register(MiniComponentId::Display, |event, state| {
        ui::handle_display_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc => HandlerResponse::action(Action::Quit),
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
            None,
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
            |frame, area, state, _render_ctx, _event_ctx| {
                ui::render(frame, area, state, &mut status_bar.borrow_mut());
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchPokemon { query } => {
            ctx.tasks().spawn(TaskKey::new("pokemon"), async move {
                match api::fetch_pokemon(&query).await {
                    Ok(info) => Action::PokemonDidLoad(info),
                    Err(error) => Action::PokemonDidError(error),
                }
            });
        }
        Effect::LoadSprite { url } => {
            ctx.tasks().spawn(TaskKey::new("sprite"), async move {
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
