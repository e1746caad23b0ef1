use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::PokemonInfo;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,

    PokemonDidLoad(PokemonInfo),
    PokemonDidError(String),

    SpriteDidLoad { url: String, sprite: SpriteData },
    SpriteDidError { url: String, error: String },

    Tick,
    Quit,
}
