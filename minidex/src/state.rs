//! Application state for the single-search tool

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::sprite::SpriteData;

pub const SPINNER_TICK_MS: u64 = 120;

/// One Pokemon parsed from the native PokeAPI schema
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PokemonInfo {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub sp_attack: u32,
    pub sp_defense: u32,
    pub speed: u32,
    /// Sum of the six base stats, computed client-side
    pub total: u32,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub sprite_front_default: Option<String>,
}

impl PokemonInfo {
    pub fn stat_rows(&self) -> Vec<(&'static str, u32)> {
        vec![
            ("HP", self.hp),
            ("Attack", self.attack),
            ("Defense", self.defense),
            ("Sp. Atk", self.sp_attack),
            ("Sp. Def", self.sp_defense),
            ("Speed", self.speed),
            ("Total", self.total),
        ]
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub query: String,
    /// Lookup lifecycle: Empty -> Loading -> Loaded/Failed
    pub result: DataResource<PokemonInfo>,
    pub sprite: Option<SpriteData>,
    pub status: Option<String>,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            query: String::new(),
            result: DataResource::Empty,
            sprite: None,
            status: None,
            tick: 0,
        }
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Search")
                .entry("query", ron_string(&self.query))
                .entry("status", ron_string(&self.status)),
            DebugSection::new("Result")
                .entry("loading", ron_string(&self.result.is_loading()))
                .entry("loaded", ron_string(&self.result.is_loaded()))
                .entry("failed", ron_string(&self.result.is_failed()))
                .entry("sprite", ron_string(&self.sprite.is_some())),
        ]
    }
}
