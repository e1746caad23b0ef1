//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{capitalize, AppState, DetailTab, FocusArea, SUGGESTION_MIN_QUERY};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.list_loading = true;
            DispatchResult::changed_with(Effect::LoadPage { page: 1 })
        }

        // ===== Roster / pagination =====
        Action::PageNext => load_page(state, state.current_page.saturating_add(1)),
        Action::PagePrev => load_page(state, state.current_page.saturating_sub(1)),
        Action::PageSet(page) => load_page(state, page),

        Action::RosterDidLoad {
            entries,
            total_pages,
        } => {
            state.roster = entries;
            state.total_pages = total_pages.max(1);
            state.selected_index = 0;
            state.list_loading = false;
            state.message = None;
            DispatchResult::changed()
        }

        Action::RosterDidError(error) => {
            state.list_loading = false;
            state.message = Some(format!("List error: {error}"));
            DispatchResult::changed()
        }

        // A filter response replaces the roster but leaves current_page and
        // total_pages untouched, mirroring the backend contract (its page
        // metadata is not meaningful for filter calls).
        Action::FilterDidLoad(entries) => {
            state.roster = entries;
            state.selected_index = 0;
            state.list_loading = false;
            state.message = None;
            DispatchResult::changed()
        }

        Action::FilterDidError(error) => {
            state.list_loading = false;
            state.message = Some(format!("Filter error: {error}"));
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => {
            if state.roster.is_empty() {
                return DispatchResult::unchanged();
            }
            let mut index = state.selected_index as i32 + delta as i32;
            if index < 0 {
                index = 0;
            }
            if !state.set_selected_index(index as usize) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with_many(select_current(state))
        }

        Action::RosterSelect(index) => {
            if !state.set_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with_many(select_current(state))
        }

        // ===== Search / suggestions =====
        Action::SearchOpen => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            state.search.selected = None;
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search.active = false;
            state.search.suggestions_visible = false;
            state.search.selected = None;
            state.suggestions_loading = false;
            DispatchResult::changed_with(Effect::CancelSuggestions)
        }

        Action::SearchQueryChange(query) => {
            state.search.query = query;
            state.search.selected = None;
            let trimmed = state.search.query.trim().to_string();
            if trimmed.chars().count() < SUGGESTION_MIN_QUERY {
                state.search.suggestions_visible = false;
                state.suggestions_loading = false;
                return DispatchResult::changed_with(Effect::CancelSuggestions);
            }
            state.suggestions_loading = true;
            DispatchResult::changed_with(Effect::FetchSuggestions { query: trimmed })
        }

        Action::SearchQuerySubmit(query) => {
            state.search.query = query;
            state.search.active = false;
            state.search.suggestions_visible = false;
            state.search.selected = None;
            state.suggestions_loading = false;

            let trimmed = state.search.query.trim().to_string();
            let mut effects = vec![
                Effect::CancelSuggestions,
                Effect::LoadFiltered {
                    name: trimmed.clone(),
                },
            ];
            state.list_loading = true;
            if !trimmed.is_empty() {
                state.detail_loading = true;
                effects.push(lookup_effect(&trimmed));
            }
            DispatchResult::changed_with_many(effects)
        }

        Action::SearchSetText(text) => {
            state.search.query = text;
            state.search.suggestions_visible = false;
            state.search.selected = None;
            DispatchResult::changed()
        }

        Action::SuggestionsDidLoad(cards) => {
            state.suggestions_loading = false;
            state.search.suggestions_visible = state.search.active && !cards.is_empty();
            state.search.suggestions = cards;
            state.search.selected = None;
            DispatchResult::changed()
        }

        Action::SuggestionsDidError(error) => {
            state.suggestions_loading = false;
            state.message = Some(format!("Suggestion error: {error}"));
            DispatchResult::changed()
        }

        Action::SuggestionMove(delta) => {
            if !state.search.suggestions_visible || state.search.suggestions.is_empty() {
                return DispatchResult::unchanged();
            }
            let len = state.search.suggestions.len();
            let next = match state.search.selected {
                None if delta >= 0 => 0,
                None => len - 1,
                Some(current) => clamp_index(current, len, delta),
            };
            if state.search.selected == Some(next) {
                return DispatchResult::unchanged();
            }
            state.search.selected = Some(next);
            DispatchResult::changed()
        }

        Action::SuggestionSelect(index) => {
            if !state.search.suggestions_visible || index >= state.search.suggestions.len() {
                return DispatchResult::unchanged();
            }
            if state.search.selected == Some(index) {
                return DispatchResult::unchanged();
            }
            state.search.selected = Some(index);
            DispatchResult::changed()
        }

        Action::SuggestionConfirm => {
            let Some(card) = state
                .search
                .selected
                .and_then(|index| state.search.suggestions.get(index))
            else {
                return DispatchResult::unchanged();
            };
            let id = card.id;
            let name = capitalize(&card.name);
            state.search.query = name;
            state.search.active = false;
            state.search.suggestions_visible = false;
            state.search.selected = None;
            state.suggestions_loading = false;
            state.detail_loading = true;
            DispatchResult::changed_with_many(vec![
                Effect::CancelSuggestions,
                Effect::LoadDetailById { id },
            ])
        }

        // ===== Detail =====
        Action::DetailDidLoad { detail, by_name } => {
            if by_name {
                state.search.query = capitalize(&detail.name);
                state.search.suggestions_visible = false;
                state.search.selected = None;
            }
            let mut effects: Vec<Effect> = detail
                .sprites
                .fetchable_urls()
                .into_iter()
                .map(|url| Effect::LoadSprite { url })
                .collect();
            state.detail = Some(detail);
            state.sprite_cache.clear();
            state.sprite_strip_index = 0;
            state.detail_loading = false;
            state.message = None;
            effects.extend(strip_sprite_effects(state));
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::DetailDidError { target, error } => {
            state.detail_loading = false;
            state.message = Some(format!("{target} load error: {error}"));
            DispatchResult::changed()
        }

        Action::SpriteDidLoad { url, sprite } => {
            // Drop responses for a superseded detail slot
            if !current_detail_references(state, &url) {
                return DispatchResult::unchanged();
            }
            state.sprite_cache.insert(url, sprite);
            DispatchResult::changed()
        }

        Action::SpriteDidError { url, error } => {
            state.message = Some(format!("Sprite error for {url}: {error}"));
            DispatchResult::changed()
        }

        Action::DetailTabNext => cycle_detail_tab(state, 1),
        Action::DetailTabPrev => cycle_detail_tab(state, -1),

        Action::StripMove(delta) => {
            if state.detail_tab != DetailTab::Sprites {
                return DispatchResult::unchanged();
            }
            let entries = state.strip_entries();
            if entries.is_empty() {
                return DispatchResult::unchanged();
            }
            let next = clamp_index(state.sprite_strip_index, entries.len(), delta);
            if next == state.sprite_strip_index {
                return DispatchResult::unchanged();
            }
            state.sprite_strip_index = next;
            DispatchResult::changed_with_many(strip_sprite_effects(state))
        }

        Action::StripSelect(index) => {
            let entries = state.strip_entries();
            if state.detail_tab != DetailTab::Sprites || index >= entries.len() {
                return DispatchResult::unchanged();
            }
            if index == state.sprite_strip_index {
                return DispatchResult::unchanged();
            }
            state.sprite_strip_index = index;
            DispatchResult::changed_with_many(strip_sprite_effects(state))
        }

        // View-only toggles: swap which already-fetched sprite is shown,
        // never a network call
        Action::ToggleBackView => {
            state.back_view = !state.back_view;
            DispatchResult::changed()
        }

        Action::ToggleShinyView => {
            state.shiny_view = !state.shiny_view;
            DispatchResult::changed()
        }

        // ===== UI / global =====
        Action::FocusSet(area) => {
            if state.search.active || state.focus == area {
                return DispatchResult::unchanged();
            }
            state.focus = area;
            DispatchResult::changed()
        }

        Action::FocusNext => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.focus = match state.focus {
                FocusArea::List => FocusArea::Detail,
                FocusArea::Detail => FocusArea::List,
            };
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.any_loading() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Valid only for 1 <= page <= total_pages; silently ignored otherwise
fn load_page(state: &mut AppState, page: u32) -> DispatchResult<Effect> {
    if page == 0 || page > state.total_pages {
        return DispatchResult::unchanged();
    }
    state.current_page = page;
    state.list_loading = true;
    DispatchResult::changed_with(Effect::LoadPage { page })
}

fn select_current(state: &mut AppState) -> Vec<Effect> {
    let Some(summary) = state.selected_summary() else {
        return Vec::new();
    };
    let id = summary.id;
    state.detail_loading = true;
    vec![Effect::LoadDetailById { id }]
}

/// Digits-only text looks up by id, anything else by lowercased name
fn lookup_effect(text: &str) -> Effect {
    if text.chars().all(|ch| ch.is_ascii_digit()) {
        if let Ok(id) = text.parse::<u32>() {
            return Effect::LoadDetailById { id };
        }
    }
    Effect::LoadDetailByName {
        name: text.to_lowercase(),
    }
}

fn cycle_detail_tab(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    let tabs = DetailTab::ALL;
    let current = tabs
        .iter()
        .position(|tab| tab == &state.detail_tab)
        .unwrap_or(0) as i16;
    let len = tabs.len() as i16;
    let mut next = current + step;
    if next < 0 {
        next = len - 1;
    } else if next >= len {
        next = 0;
    }
    let next_tab = tabs[next as usize];
    if next_tab == state.detail_tab {
        return DispatchResult::unchanged();
    }
    state.detail_tab = next_tab;
    let effects = strip_sprite_effects(state);
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}

/// Fetch the sprite under the strip cursor when the Sprites tab shows it
/// and it has not arrived yet
fn strip_sprite_effects(state: &AppState) -> Vec<Effect> {
    if state.detail_tab != DetailTab::Sprites {
        return Vec::new();
    }
    let entries = state.strip_entries();
    let Some((_, _, url)) = entries.get(state.sprite_strip_index) else {
        return Vec::new();
    };
    if state.sprite_cache.contains_key(url) {
        return Vec::new();
    }
    vec![Effect::LoadSprite { url: url.clone() }]
}

fn current_detail_references(state: &AppState, url: &str) -> bool {
    let Some(detail) = state.detail.as_ref() else {
        return false;
    };
    detail
        .sprites
        .fetchable_urls()
        .iter()
        .any(|candidate| candidate == url)
        || detail
            .sprites
            .generation_entries()
            .iter()
            .any(|(_, _, candidate)| candidate == url)
}

fn clamp_index(current: usize, len: usize, delta: i16) -> usize {
    if len == 0 {
        return 0;
    }
    let mut next = current as i32 + delta as i32;
    if next < 0 {
        next = 0;
    } else if next >= len as i32 {
        next = len as i32 - 1;
    }
    next as usize
}
