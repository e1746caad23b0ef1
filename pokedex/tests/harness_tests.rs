//! Store flow tests using EffectStore and EffectStoreTestHarness

use tui_dispatch::testing::*;
use tui_dispatch::EffectStore;

use pokedex::{
    action::Action,
    effect::Effect,
    reducer::reducer,
    state::{
        AppState, PokemonAbility, PokemonDetail, PokemonSummary, SpriteSet, SuggestionCard,
    },
};

fn page_entries(page: u32) -> Vec<PokemonSummary> {
    let start = (page - 1) * 20 + 1;
    (start..start + 20)
        .map(|id| PokemonSummary {
            id,
            name: format!("mon-{id}"),
        })
        .collect()
}

fn pikachu_card() -> SuggestionCard {
    SuggestionCard {
        id: 25,
        name: "pikachu".into(),
        types: vec!["electric".into()],
        sprite: Some("http://img/25.png".into()),
    }
}

fn pikachu() -> PokemonDetail {
    PokemonDetail {
        id: 25,
        name: "pikachu".into(),
        hp: 35,
        attack: 55,
        defense: 40,
        special_attack: 50,
        special_defense: 50,
        speed: 90,
        total_stats: 320,
        height: 0.4,
        weight: 6.0,
        base_experience: Some(112),
        capture_rate: Some(190),
        base_happiness: Some(50),
        growth_rate: Some("medium".into()),
        species: Some("Mouse Pokemon".into()),
        abilities: vec![
            PokemonAbility {
                name: "static".into(),
                is_hidden: false,
            },
            PokemonAbility {
                name: "lightning-rod".into(),
                is_hidden: true,
            },
        ],
        sprites: SpriteSet {
            front_default: Some("http://img/25.png".into()),
            back_default: Some("http://img/25b.png".into()),
            front_shiny: Some("http://img/25s.png".into()),
            back_shiny: Some("http://img/25bs.png".into()),
            official_artwork: Some("http://img/25art.png".into()),
            generations: Default::default(),
        },
        evolutions: Vec::new(),
        locations: vec!["viridian-forest".into()],
    }
}

// ============================================================================
// EffectStoreTestHarness Tests
// ============================================================================

#[test]
fn test_init_then_first_page_lands() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.list_loading);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadPage { page: 1 }));

    harness.complete_action(Action::RosterDidLoad {
        entries: page_entries(1),
        total_pages: 5,
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.roster.len() == 20);
    harness.assert_state(|s| s.total_pages == 5);
    harness.assert_state(|s| !s.list_loading);
}

#[test]
fn test_page_three_then_six_stays_on_three() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::RosterDidLoad {
        entries: page_entries(1),
        total_pages: 5,
    });

    harness.dispatch_collect(Action::PageSet(3));
    harness.complete_action(Action::RosterDidLoad {
        entries: page_entries(3),
        total_pages: 5,
    });
    harness.process_emitted();
    harness.drain_effects();

    harness.dispatch_collect(Action::PageSet(6));
    let effects = harness.drain_effects();
    effects.effects_empty();

    harness.assert_state(|s| s.current_page == 3);
    harness.assert_state(|s| s.roster.first().map(|entry| entry.id) == Some(41));
}

#[test]
fn test_filter_replaces_roster_but_not_page_bounds() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::RosterDidLoad {
        entries: page_entries(1),
        total_pages: 5,
    });

    harness.dispatch_collect(Action::SearchQuerySubmit("pika".into()));
    let effects = harness.drain_effects();
    effects.effects_not_empty();

    harness.complete_action(Action::FilterDidLoad(vec![PokemonSummary {
        id: 25,
        name: "pikachu".into(),
    }]));
    harness.process_emitted();

    harness.assert_state(|s| s.roster.len() == 1);
    // Stale pagination bounds are the documented backend contract
    harness.assert_state(|s| s.total_pages == 5);
    harness.assert_state(|s| s.current_page == 1);
}

#[test]
fn test_detail_load_prefetches_all_orientations() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.complete_action(Action::DetailDidLoad {
        detail: pikachu(),
        by_name: false,
    });
    harness.process_emitted();

    let effects = harness.drain_effects();
    effects.effects_count(5);
    effects.effects_all_match(|e| matches!(e, Effect::LoadSprite { .. }));
}

#[test]
fn test_sprite_toggles_issue_no_network_calls() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.complete_action(Action::DetailDidLoad {
        detail: pikachu(),
        by_name: false,
    });
    harness.process_emitted();
    harness.drain_effects();

    harness.dispatch_collect(Action::ToggleBackView);
    harness.dispatch_collect(Action::ToggleShinyView);
    harness.dispatch_collect(Action::ToggleBackView);

    let effects = harness.drain_effects();
    effects.effects_empty();
    harness.assert_state(|s| !s.back_view);
    harness.assert_state(|s| s.shiny_view);
}

#[test]
fn test_by_name_load_fills_search_field() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.complete_action(Action::DetailDidLoad {
        detail: pikachu(),
        by_name: true,
    });
    harness.process_emitted();

    harness.assert_state(|s| s.search.query == "Pikachu");
    harness.assert_state(|s| !s.search.suggestions_visible);
}

#[test]
fn test_detail_error_keeps_previous_detail() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.complete_action(Action::DetailDidLoad {
        detail: pikachu(),
        by_name: false,
    });
    harness.process_emitted();

    harness.complete_action(Action::DetailDidError {
        target: "#9999".into(),
        error: "404 Not Found".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.detail.as_ref().map(|d| d.id) == Some(25));
    harness.assert_state(|s| s.message.is_some());
}

// ============================================================================
// Effect inspection via EffectStore
// ============================================================================

#[test]
fn test_submit_issues_filter_and_name_lookup() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::SearchQuerySubmit("Pikachu".into()));
    assert!(result.effects.contains(&Effect::LoadFiltered {
        name: "Pikachu".into()
    }));
    assert!(result.effects.contains(&Effect::LoadDetailByName {
        name: "pikachu".into()
    }));
    assert!(!result
        .effects
        .iter()
        .any(|e| matches!(e, Effect::LoadDetailById { .. })));
}

#[test]
fn test_empty_submit_reissues_default_page_only() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::SearchQuerySubmit("  ".into()));
    assert!(result
        .effects
        .contains(&Effect::LoadFiltered { name: String::new() }));
    assert!(!result
        .effects
        .iter()
        .any(|e| matches!(e, Effect::LoadDetailById { .. } | Effect::LoadDetailByName { .. })));
}

#[test]
fn test_short_query_never_requests_and_hides_panel() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchOpen);
    let result = store.dispatch(Action::SearchQueryChange("pi".into()));
    assert_eq!(
        result.effects,
        vec![Effect::FetchSuggestions {
            query: "pi".into()
        }]
    );
    store.dispatch(Action::SuggestionsDidLoad(vec![pikachu_card()]));
    assert!(store.state().search.suggestions_visible);

    let result = store.dispatch(Action::SearchQueryChange("p".into()));
    assert_eq!(result.effects, vec![Effect::CancelSuggestions]);
    assert!(!store.state().search.suggestions_visible);
}

#[test]
fn test_suggestion_confirm_for_id_25() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchOpen);
    store.dispatch(Action::SearchQueryChange("pika".into()));
    store.dispatch(Action::SuggestionsDidLoad(vec![pikachu_card()]));
    store.dispatch(Action::SuggestionMove(1));

    let result = store.dispatch(Action::SuggestionConfirm);
    assert!(result.effects.contains(&Effect::LoadDetailById { id: 25 }));
    // Filling the field programmatically must not re-trigger suggestions
    assert!(!result
        .effects
        .iter()
        .any(|e| matches!(e, Effect::FetchSuggestions { .. })));

    assert_eq!(store.state().search.query, "Pikachu");
    assert!(!store.state().search.suggestions_visible);
    assert!(!store.state().search.active);
}

#[test]
fn test_suggestion_error_leaves_panel_state() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchOpen);
    store.dispatch(Action::SearchQueryChange("pika".into()));
    store.dispatch(Action::SuggestionsDidLoad(vec![pikachu_card()]));

    store.dispatch(Action::SuggestionsDidError("timeout".into()));
    assert!(store.state().search.suggestions_visible);
    assert_eq!(store.state().search.suggestions.len(), 1);
    assert!(store.state().message.is_some());
}
