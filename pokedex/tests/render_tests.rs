//! Render snapshot tests using RenderHarness

use tui_dispatch::testing::*;

use pokedex::{
    components::{DetailPanel, DetailPanelProps, ListPanel, ListPanelProps},
    state::{
        AppState, DetailTab, EvolutionStage, PokemonAbility, PokemonDetail, PokemonSummary,
        SpriteSet,
    },
};

fn bulbasaur_line() -> PokemonDetail {
    PokemonDetail {
        id: 1,
        name: "bulbasaur".into(),
        hp: 45,
        attack: 49,
        defense: 49,
        special_attack: 65,
        special_defense: 65,
        speed: 45,
        total_stats: 318,
        height: 0.7,
        weight: 6.9,
        base_experience: Some(64),
        capture_rate: Some(45),
        base_happiness: Some(50),
        growth_rate: Some("medium-slow".into()),
        species: Some("Seed Pokemon".into()),
        abilities: vec![
            PokemonAbility {
                name: "overgrow".into(),
                is_hidden: false,
            },
            PokemonAbility {
                name: "chlorophyll".into(),
                is_hidden: true,
            },
        ],
        sprites: SpriteSet::default(),
        evolutions: vec![
            EvolutionStage {
                id: 1,
                name: "bulbasaur".into(),
                min_level: None,
                trigger: None,
            },
            EvolutionStage {
                id: 2,
                name: "ivysaur".into(),
                min_level: Some(16),
                trigger: None,
            },
            EvolutionStage {
                id: 3,
                name: "venusaur".into(),
                min_level: Some(32),
                trigger: None,
            },
        ],
        locations: Vec::new(),
    }
}

fn state_with_detail(tab: DetailTab) -> AppState {
    AppState {
        detail: Some(bulbasaur_line()),
        detail_tab: tab,
        ..Default::default()
    }
}

#[test]
fn test_description_tab_shows_stats_and_total() {
    let mut render = RenderHarness::new(90, 30);
    let mut panel = DetailPanel::new();
    let state = state_with_detail(DetailTab::Description);

    let output = render.render_to_string_plain(|frame| {
        let props = DetailPanelProps {
            state: &state,
            is_focused: true,
        };
        panel.render(frame, frame.area(), props);
    });

    assert!(output.contains("Bulbasaur"), "name:\n{output}");
    assert!(output.contains("HP"), "stat label:\n{output}");
    assert!(output.contains("318"), "total:\n{output}");
    assert!(output.contains("Capture Rate"), "profile row:\n{output}");
}

#[test]
fn test_description_tab_marks_hidden_abilities() {
    let mut render = RenderHarness::new(90, 34);
    let mut panel = DetailPanel::new();
    let state = state_with_detail(DetailTab::Description);

    let output = render.render_to_string_plain(|frame| {
        let props = DetailPanelProps {
            state: &state,
            is_focused: true,
        };
        panel.render(frame, frame.area(), props);
    });

    assert!(output.contains("Chlorophyll (hidden)"), "output:\n{output}");
    assert!(output.contains("Overgrow"), "output:\n{output}");
    assert!(!output.contains("Overgrow (hidden)"), "output:\n{output}");
}

#[test]
fn test_evolutions_tab_shows_chain_with_markers() {
    let mut render = RenderHarness::new(90, 20);
    let mut panel = DetailPanel::new();
    let state = state_with_detail(DetailTab::Evolutions);

    let output = render.render_to_string_plain(|frame| {
        let props = DetailPanelProps {
            state: &state,
            is_focused: true,
        };
        panel.render(frame, frame.area(), props);
    });

    assert!(output.contains("Ivysaur"), "stage:\n{output}");
    assert!(output.contains("->"), "marker:\n{output}");
    assert!(output.contains("Lv. 16"), "level label:\n{output}");
}

#[test]
fn test_locations_tab_placeholder_when_empty() {
    let mut render = RenderHarness::new(80, 20);
    let mut panel = DetailPanel::new();
    let state = state_with_detail(DetailTab::Locations);

    let output = render.render_to_string_plain(|frame| {
        let props = DetailPanelProps {
            state: &state,
            is_focused: true,
        };
        panel.render(frame, frame.area(), props);
    });

    assert!(output.contains("No known locations."), "output:\n{output}");
}

#[test]
fn test_locations_tab_lists_entries() {
    let mut render = RenderHarness::new(80, 20);
    let mut panel = DetailPanel::new();
    let mut state = state_with_detail(DetailTab::Locations);
    if let Some(detail) = state.detail.as_mut() {
        detail.locations = vec!["viridian-forest".into(), "power-plant".into()];
    }

    let output = render.render_to_string_plain(|frame| {
        let props = DetailPanelProps {
            state: &state,
            is_focused: true,
        };
        panel.render(frame, frame.area(), props);
    });

    assert!(output.contains("Viridian Forest"), "output:\n{output}");
    assert!(output.contains("Power Plant"), "output:\n{output}");
}

#[test]
fn test_detail_placeholder_without_selection() {
    let mut render = RenderHarness::new(80, 20);
    let mut panel = DetailPanel::new();
    let state = AppState::default();

    let output = render.render_to_string_plain(|frame| {
        let props = DetailPanelProps {
            state: &state,
            is_focused: true,
        };
        panel.render(frame, frame.area(), props);
    });

    assert!(output.contains("[select a pokemon]"), "output:\n{output}");
}

#[test]
fn test_list_panel_shows_page_indicator() {
    let mut render = RenderHarness::new(50, 24);
    let mut panel = ListPanel::new();
    let state = AppState {
        roster: vec![
            PokemonSummary {
                id: 1,
                name: "bulbasaur".into(),
            },
            PokemonSummary {
                id: 4,
                name: "charmander".into(),
            },
        ],
        current_page: 2,
        total_pages: 7,
        ..Default::default()
    };

    let output = render.render_to_string_plain(|frame| {
        let props = ListPanelProps {
            state: &state,
            is_focused: true,
        };
        panel.render(frame, frame.area(), props);
    });

    assert!(output.contains("page 2/7"), "indicator:\n{output}");
    assert!(output.contains("#001 Bulbasaur"), "roster row:\n{output}");
    assert!(output.contains("#004 Charmander"), "roster row:\n{output}");
}

#[test]
fn test_sprites_tab_lists_versions_with_front_sprites_only() {
    let mut render = RenderHarness::new(90, 24);
    let mut panel = DetailPanel::new();
    let mut state = state_with_detail(DetailTab::Sprites);
    if let Some(detail) = state.detail.as_mut() {
        let mut versions = std::collections::BTreeMap::new();
        versions.insert(
            "red-blue".to_string(),
            pokedex::state::VersionSprites {
                front_default: Some("http://img/rb.png".into()),
            },
        );
        versions.insert(
            "yellow".to_string(),
            pokedex::state::VersionSprites {
                front_default: None,
            },
        );
        detail
            .sprites
            .generations
            .insert("generation-i".to_string(), versions);
    }

    let output = render.render_to_string_plain(|frame| {
        let props = DetailPanelProps {
            state: &state,
            is_focused: true,
        };
        panel.render(frame, frame.area(), props);
    });

    assert!(output.contains("Generation I"), "header:\n{output}");
    assert!(output.contains("Red Blue"), "version:\n{output}");
    assert!(
        !output.contains("Yellow"),
        "version without front sprite must be skipped:\n{output}"
    );
}
