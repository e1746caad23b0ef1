//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::SearchInput(ch) => {
            state.query.push(ch);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            let query = state.query.trim().to_lowercase();
            if query.is_empty() {
                state.status = Some("Enter a name or number.".to_string());
                return DispatchResult::changed();
            }
            state.result = DataResource::Loading;
            state.sprite = None;
            state.status = None;
            state.tick = 0;
            DispatchResult::changed_with(Effect::FetchPokemon { query })
        }

        Action::PokemonDidLoad(info) => {
            let sprite_url = info.sprite_front_default.clone();
            state.result = DataResource::Loaded(info);
            state.sprite = None;
            match sprite_url {
                Some(url) => {
                    state.status = None;
                    DispatchResult::changed_with(Effect::LoadSprite { url })
                }
                None => {
                    state.status = Some("No front sprite available.".to_string());
                    DispatchResult::changed()
                }
            }
        }

        Action::PokemonDidError(error) => {
            state.result = DataResource::Failed(error);
            state.sprite = None;
            DispatchResult::changed()
        }

        Action::SpriteDidLoad { url, sprite } => {
            // Drop responses that no longer match the displayed Pokemon
            let current = state
                .result
                .data()
                .and_then(|info| info.sprite_front_default.as_deref());
            if current != Some(url.as_str()) {
                return DispatchResult::unchanged();
            }
            state.sprite = Some(sprite);
            DispatchResult::changed()
        }

        Action::SpriteDidError { url: _, error } => {
            state.status = Some(format!("Sprite error: {error}"));
            DispatchResult::changed()
        }

        Action::Tick => {
            if state.result.is_loading() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::SpriteData;
    use crate::state::PokemonInfo;

    fn pikachu() -> PokemonInfo {
        PokemonInfo {
            id: 25,
            name: "pikachu".into(),
            types: vec!["electric".into()],
            hp: 35,
            attack: 55,
            defense: 40,
            sp_attack: 50,
            sp_defense: 50,
            speed: 90,
            total: 320,
            height: 4,
            weight: 60,
            base_experience: Some(112),
            sprite_front_default: Some("http://img/25.png".into()),
        }
    }

    #[test]
    fn submit_lowercases_and_fetches() {
        let mut state = AppState {
            query: "  Pikachu ".into(),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::SearchSubmit);
        assert!(result.changed);
        assert!(state.result.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::FetchPokemon {
                query: "pikachu".into()
            }]
        );
    }

    #[test]
    fn digits_pass_through_unchanged() {
        let mut state = AppState {
            query: "25".into(),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::SearchSubmit);
        assert_eq!(
            result.effects,
            vec![Effect::FetchPokemon { query: "25".into() }]
        );
    }

    #[test]
    fn empty_submit_only_sets_status() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SearchSubmit);
        assert!(result.effects.is_empty());
        assert!(state.status.is_some());
        assert!(state.result.is_empty());
    }

    #[test]
    fn load_requests_the_front_sprite() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::PokemonDidLoad(pikachu()));
        assert!(state.result.is_loaded());
        assert_eq!(
            result.effects,
            vec![Effect::LoadSprite {
                url: "http://img/25.png".into()
            }]
        );
    }

    #[test]
    fn load_without_sprite_degrades_to_status() {
        let mut state = AppState::default();
        let mut info = pikachu();
        info.sprite_front_default = None;

        let result = reducer(&mut state, Action::PokemonDidLoad(info));
        assert!(result.effects.is_empty());
        assert!(state.status.is_some());
        assert!(state.result.is_loaded());
    }

    #[test]
    fn error_clears_the_display() {
        let mut state = AppState::default();
        reducer(&mut state, Action::PokemonDidLoad(pikachu()));
        reducer(
            &mut state,
            Action::SpriteDidLoad {
                url: "http://img/25.png".into(),
                sprite: SpriteData {
                    width: 1,
                    height: 1,
                    rgba: vec![0, 0, 0, 255],
                },
            },
        );
        assert!(state.sprite.is_some());

        reducer(&mut state, Action::PokemonDidError("timeout".into()));
        assert!(state.result.is_failed());
        assert!(state.sprite.is_none());
    }

    #[test]
    fn stale_sprite_responses_are_dropped() {
        let mut state = AppState::default();
        reducer(&mut state, Action::PokemonDidLoad(pikachu()));

        let result = reducer(
            &mut state,
            Action::SpriteDidLoad {
                url: "http://img/1.png".into(),
                sprite: SpriteData {
                    width: 1,
                    height: 1,
                    rgba: vec![0, 0, 0, 255],
                },
            },
        );
        assert!(!result.changed);
        assert!(state.sprite.is_none());
    }

    #[test]
    fn tick_only_animates_while_loading() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.query = "25".into();
        reducer(&mut state, Action::SearchSubmit);
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick, 1);
    }
}
