//! Application state - single source of truth

use std::collections::{BTreeMap, HashMap};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;

pub const ITEMS_PER_PAGE: u32 = 20;
pub const FILTER_PAGE_SIZE: u32 = 50;
pub const SUGGESTION_LIMIT: u32 = 10;
pub const SUGGESTION_MIN_QUERY: usize = 2;
pub const SUGGESTION_DEBOUNCE_MS: u64 = 500;
pub const SPINNER_TICK_MS: u64 = 120;

/// One roster row from the list endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
}

/// Compact search-result preview, distinct from a full detail record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SuggestionCard {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub sprite: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonAbility {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VersionSprites {
    pub front_default: Option<String>,
}

/// Sprite URLs for one Pokemon, grouped the way the backend delivers them
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteSet {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
    pub official_artwork: Option<String>,
    pub generations: BTreeMap<String, BTreeMap<String, VersionSprites>>,
}

impl SpriteSet {
    /// URL for the current orientation toggles, if the payload carries one
    pub fn oriented(&self, back: bool, shiny: bool) -> Option<&String> {
        match (back, shiny) {
            (false, false) => self.front_default.as_ref(),
            (false, true) => self.front_shiny.as_ref(),
            (true, false) => self.back_default.as_ref(),
            (true, true) => self.back_shiny.as_ref(),
        }
    }

    /// Every distinct URL to fetch once when a detail lands, so later
    /// orientation toggles never go back to the network
    pub fn fetchable_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        let candidates = [
            self.front_default.as_ref(),
            self.back_default.as_ref(),
            self.front_shiny.as_ref(),
            self.back_shiny.as_ref(),
            self.official_artwork.as_ref(),
        ];
        for url in candidates.into_iter().flatten() {
            if !urls.contains(url) {
                urls.push(url.clone());
            }
        }
        urls
    }

    /// Flattened generation strip: (generation, version, url) for every game
    /// version that has a front-default image. Versions without one are
    /// skipped entirely.
    pub fn generation_entries(&self) -> Vec<(String, String, String)> {
        let mut entries = Vec::new();
        for (generation, versions) in &self.generations {
            for (version, sprites) in versions {
                if let Some(url) = &sprites.front_default {
                    entries.push((generation.clone(), version.clone(), url.clone()));
                }
            }
        }
        entries
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvolutionStage {
    pub id: u32,
    pub name: String,
    pub min_level: Option<u32>,
    pub trigger: Option<String>,
}

impl EvolutionStage {
    /// "Lv. {n}" when a minimum level applies, else the trigger description
    pub fn condition_label(&self) -> String {
        match (self.min_level, self.trigger.as_deref()) {
            (Some(level), _) => format!("Lv. {level}"),
            (None, Some(trigger)) if !trigger.is_empty() => trigger.to_string(),
            _ => "?".to_string(),
        }
    }
}

/// Full record from the detail endpoint, fetched fresh on every selection
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
    pub total_stats: u32,
    pub height: f64,
    pub weight: f64,
    pub base_experience: Option<u32>,
    pub capture_rate: Option<u32>,
    pub base_happiness: Option<u32>,
    pub growth_rate: Option<String>,
    pub species: Option<String>,
    pub abilities: Vec<PokemonAbility>,
    pub sprites: SpriteSet,
    pub evolutions: Vec<EvolutionStage>,
    pub locations: Vec<String>,
}

impl PokemonDetail {
    /// Fixed stat order for the description tab
    pub fn stat_rows(&self) -> Vec<(&'static str, u32)> {
        vec![
            ("HP", self.hp),
            ("Attack", self.attack),
            ("Defense", self.defense),
            ("Sp. Atk", self.special_attack),
            ("Sp. Def", self.special_defense),
            ("Speed", self.speed),
            ("Total", self.total_stats),
        ]
    }

    /// Secondary attributes, absent values rendered as "--"
    pub fn profile_rows(&self) -> Vec<(&'static str, String)> {
        let opt_num = |value: Option<u32>| {
            value
                .map(|v| v.to_string())
                .unwrap_or_else(|| "--".to_string())
        };
        let opt_text = |value: &Option<String>| value.clone().unwrap_or_else(|| "--".to_string());
        vec![
            ("Height", format!("{} m", self.height)),
            ("Weight", format!("{} kg", self.weight)),
            ("Base Exp.", opt_num(self.base_experience)),
            ("Capture Rate", opt_num(self.capture_rate)),
            ("Base Happiness", opt_num(self.base_happiness)),
            ("Growth Rate", opt_text(&self.growth_rate)),
            ("Species", opt_text(&self.species)),
        ]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum DetailTab {
    #[default]
    Description,
    Sprites,
    Evolutions,
    Locations,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Description,
        DetailTab::Sprites,
        DetailTab::Evolutions,
        DetailTab::Locations,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            DetailTab::Description => "Description",
            DetailTab::Sprites => "Sprites",
            DetailTab::Evolutions => "Evolutions",
            DetailTab::Locations => "Locations",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum FocusArea {
    #[default]
    List,
    Detail,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
    pub suggestions: Vec<SuggestionCard>,
    pub suggestions_visible: bool,
    pub selected: Option<usize>,
}

#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "List", label = "Page")]
    pub current_page: u32,

    #[debug(section = "List", label = "Total pages")]
    pub total_pages: u32,

    #[debug(skip)]
    pub roster: Vec<PokemonSummary>,

    #[debug(section = "List", label = "Selected")]
    pub selected_index: usize,

    #[debug(section = "List", label = "Focus", debug_fmt)]
    pub focus: FocusArea,

    #[debug(skip)]
    pub search: SearchState,

    /// Single current-detail slot, superseded in place on every selection
    #[debug(skip)]
    pub detail: Option<PokemonDetail>,

    /// Decoded sprites for the current detail only, keyed by URL; cleared
    /// whenever the detail slot is superseded
    #[debug(skip)]
    pub sprite_cache: HashMap<String, SpriteData>,

    #[debug(section = "Detail", label = "Back view")]
    pub back_view: bool,

    #[debug(section = "Detail", label = "Shiny view")]
    pub shiny_view: bool,

    #[debug(section = "Detail", label = "Tab", debug_fmt)]
    pub detail_tab: DetailTab,

    #[debug(skip)]
    pub sprite_strip_index: usize,

    #[debug(section = "Status", label = "List loading")]
    pub list_loading: bool,

    #[debug(section = "Status", label = "Detail loading")]
    pub detail_loading: bool,

    #[debug(section = "Status", label = "Suggestions loading")]
    pub suggestions_loading: bool,

    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,

    #[debug(skip)]
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            roster: Vec::new(),
            selected_index: 0,
            focus: FocusArea::List,
            search: SearchState::default(),
            detail: None,
            sprite_cache: HashMap::new(),
            back_view: false,
            shiny_view: false,
            detail_tab: DetailTab::default(),
            sprite_strip_index: 0,
            list_loading: false,
            detail_loading: false,
            suggestions_loading: false,
            message: None,
            tick: 0,
        }
    }
}

impl AppState {
    pub fn selected_summary(&self) -> Option<&PokemonSummary> {
        self.roster.get(self.selected_index)
    }

    /// Bounded move; returns whether the selection actually changed
    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.roster.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.roster.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    /// Generation strip entries of the current detail
    pub fn strip_entries(&self) -> Vec<(String, String, String)> {
        self.detail
            .as_ref()
            .map(|detail| detail.sprites.generation_entries())
            .unwrap_or_default()
    }

    /// URL the main sprite area should display for the current toggles,
    /// falling back to the official artwork
    pub fn main_sprite_url(&self) -> Option<&String> {
        let detail = self.detail.as_ref()?;
        detail
            .sprites
            .oriented(self.back_view, self.shiny_view)
            .or(detail.sprites.official_artwork.as_ref())
    }

    pub fn any_loading(&self) -> bool {
        self.list_loading || self.detail_loading || self.suggestions_loading
    }
}

/// Uppercase the first character, the way every user-visible name is shown
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
