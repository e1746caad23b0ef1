//! Actions - everything that can happen to the app

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::{FocusArea, PokemonDetail, PokemonSummary, SuggestionCard};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    Init,

    // ===== Roster / pagination =====
    PageNext,
    PagePrev,
    PageSet(u32),
    RosterDidLoad {
        entries: Vec<PokemonSummary>,
        total_pages: u32,
    },
    RosterDidError(String),
    /// Result of a name filter; page metadata is intentionally absent
    FilterDidLoad(Vec<PokemonSummary>),
    FilterDidError(String),
    SelectionMove(i16),
    RosterSelect(usize),

    // ===== Search / suggestions =====
    SearchOpen,
    SearchClose,
    /// Search text edited by the user; schedules a suggestion lookup
    SearchQueryChange(String),
    /// Enter in the search box: filter the roster and look the text up
    SearchQuerySubmit(String),
    /// Fill the search box programmatically, without scheduling anything
    SearchSetText(String),
    SuggestionsDidLoad(Vec<SuggestionCard>),
    SuggestionsDidError(String),
    SuggestionMove(i16),
    SuggestionSelect(usize),
    SuggestionConfirm,

    // ===== Detail =====
    DetailDidLoad {
        detail: PokemonDetail,
        by_name: bool,
    },
    DetailDidError {
        target: String,
        error: String,
    },
    SpriteDidLoad {
        url: String,
        sprite: SpriteData,
    },
    SpriteDidError {
        url: String,
        error: String,
    },
    DetailTabNext,
    DetailTabPrev,
    StripMove(i16),
    StripSelect(usize),
    ToggleBackView,
    ToggleShinyView,

    // ===== UI / global =====
    FocusSet(FocusArea),
    FocusNext,
    Render,
    Tick,
    Quit,
}
