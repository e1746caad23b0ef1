#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    FetchPokemon { query: String },
    LoadSprite { url: String },
}
