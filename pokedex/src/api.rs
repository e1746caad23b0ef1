//! HTTP client for the local Pokemon API

use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::state::{
    EvolutionStage, PokemonAbility, PokemonDetail, PokemonSummary, SpriteSet, SuggestionCard,
    VersionSprites,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

static BASE_URL: OnceLock<String> = OnceLock::new();

/// Set once at startup, before any request goes out
pub fn set_base_url(url: &str) {
    let _ = BASE_URL.set(url.trim_end_matches('/').to_string());
}

fn base_url() -> &'static str {
    BASE_URL
        .get()
        .map(|url| url.as_str())
        .unwrap_or(DEFAULT_BASE_URL)
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    data: Vec<ListEntry>,
    total_pages: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
struct ListEntry {
    id: u32,
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct SuggestionEntry {
    id: u32,
    name: String,
    #[serde(default)]
    types: Vec<String>,
    sprite: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct AbilityEntry {
    name: String,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionEntry {
    id: u32,
    name: String,
    min_level: Option<u32>,
    trigger: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct DetailResponse {
    id: u32,
    name: String,
    #[serde(default)]
    hp: u32,
    #[serde(default)]
    attack: u32,
    #[serde(default)]
    defense: u32,
    #[serde(default)]
    special_attack: u32,
    #[serde(default)]
    special_defense: u32,
    #[serde(default)]
    speed: u32,
    #[serde(default)]
    total_stats: u32,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    weight: f64,
    base_experience: Option<u32>,
    capture_rate: Option<u32>,
    base_happiness: Option<u32>,
    growth_rate: Option<String>,
    species: Option<String>,
    #[serde(default)]
    abilities: Vec<AbilityEntry>,
    #[serde(default)]
    sprites: serde_json::Value,
    #[serde(default)]
    evolutions: Vec<EvolutionEntry>,
    #[serde(default)]
    locations: Vec<String>,
}

/// One roster page. Returns the entries plus the backend's page count.
pub async fn fetch_page(page: u32, items_per_page: u32) -> Result<(Vec<PokemonSummary>, u32), String> {
    let url = format!(
        "{}/pokemon/?page={page}&items_per_page={items_per_page}",
        base_url()
    );
    let response: ListResponse = fetch_json(&url).await?;
    let total_pages = response.total_pages.unwrap_or(1).max(1);
    Ok((map_entries(response.data), total_pages))
}

/// Name-substring filter. Page metadata of this response is not meaningful
/// and is deliberately not returned.
pub async fn fetch_filtered(name: &str, items_per_page: u32) -> Result<Vec<PokemonSummary>, String> {
    let url = format!(
        "{}/pokemon/?name={}&items_per_page={items_per_page}",
        base_url(),
        urlencoding::encode(name)
    );
    let response: ListResponse = fetch_json(&url).await?;
    Ok(map_entries(response.data))
}

pub async fn fetch_suggestions(query: &str, limit: u32) -> Result<Vec<SuggestionCard>, String> {
    let url = format!(
        "{}/pokemon/search/suggestions/detailed?q={}&limit={limit}",
        base_url(),
        urlencoding::encode(query)
    );
    let response: Vec<SuggestionEntry> = fetch_json(&url).await?;
    Ok(response
        .into_iter()
        .map(|entry| SuggestionCard {
            id: entry.id,
            name: entry.name,
            types: entry.types,
            sprite: entry.sprite,
        })
        .collect())
}

pub async fn fetch_detail_by_id(id: u32) -> Result<PokemonDetail, String> {
    let url = format!("{}/pokemon/{id}", base_url());
    let response: DetailResponse = fetch_json(&url).await?;
    Ok(map_detail(response))
}

pub async fn fetch_detail_by_name(name: &str) -> Result<PokemonDetail, String> {
    let url = format!("{}/pokemon/name/{}", base_url(), urlencoding::encode(name));
    let response: DetailResponse = fetch_json(&url).await?;
    Ok(map_detail(response))
}

/// Raw bytes, for sprite images served from the public raw-content host
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    Ok(response
        .bytes()
        .await
        .map_err(|err| err.to_string())?
        .to_vec())
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    response.json::<T>().await.map_err(|err| err.to_string())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client")
    })
}

fn map_entries(entries: Vec<ListEntry>) -> Vec<PokemonSummary> {
    entries
        .into_iter()
        .map(|entry| PokemonSummary {
            id: entry.id,
            name: entry.name,
        })
        .collect()
}

fn map_detail(response: DetailResponse) -> PokemonDetail {
    PokemonDetail {
        id: response.id,
        name: response.name,
        hp: response.hp,
        attack: response.attack,
        defense: response.defense,
        special_attack: response.special_attack,
        special_defense: response.special_defense,
        speed: response.speed,
        total_stats: response.total_stats,
        height: response.height,
        weight: response.weight,
        base_experience: response.base_experience,
        capture_rate: response.capture_rate,
        base_happiness: response.base_happiness,
        growth_rate: response.growth_rate,
        species: response.species,
        abilities: response
            .abilities
            .into_iter()
            .map(|ability| PokemonAbility {
                name: ability.name,
                is_hidden: ability.is_hidden,
            })
            .collect(),
        sprites: parse_sprites(&response.sprites),
        evolutions: response
            .evolutions
            .into_iter()
            .map(|stage| EvolutionStage {
                id: stage.id,
                name: stage.name,
                min_level: stage.min_level,
                trigger: stage.trigger,
            })
            .collect(),
        locations: response.locations,
    }
}

fn parse_sprites(value: &serde_json::Value) -> SpriteSet {
    let mut generations = BTreeMap::new();
    if let Some(tree) = value.get("generations").and_then(|v| v.as_object()) {
        for (generation, versions) in tree {
            let Some(versions) = versions.as_object() else {
                continue;
            };
            let mut parsed: BTreeMap<String, VersionSprites> = BTreeMap::new();
            for (version, sprites) in versions {
                parsed.insert(
                    version.clone(),
                    VersionSprites {
                        front_default: pointer_string(sprites, "/front_default"),
                    },
                );
            }
            generations.insert(generation.clone(), parsed);
        }
    }
    SpriteSet {
        front_default: pointer_string(value, "/front_default"),
        back_default: pointer_string(value, "/back_default"),
        front_shiny: pointer_string(value, "/front_shiny"),
        back_shiny: pointer_string(value, "/back_shiny"),
        official_artwork: pointer_string(value, "/official_artwork"),
        generations,
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_payload_maps_to_entities() {
        let response: DetailResponse = serde_json::from_value(json!({
            "id": 25,
            "name": "pikachu",
            "hp": 35, "attack": 55, "defense": 40,
            "special_attack": 50, "special_defense": 50, "speed": 90,
            "total_stats": 320,
            "height": 0.4, "weight": 6.0,
            "base_experience": 112,
            "capture_rate": 190,
            "abilities": [
                {"name": "static"},
                {"name": "lightning-rod", "is_hidden": true}
            ],
            "sprites": {
                "front_default": "http://img/25.png",
                "front_shiny": "http://img/25s.png",
                "generations": {
                    "generation-i": {
                        "red-blue": {"front_default": "http://img/rb/25.png"},
                        "yellow": {"front_default": null}
                    }
                }
            },
            "evolutions": [
                {"id": 172, "name": "pichu", "trigger": "high friendship"},
                {"id": 25, "name": "pikachu", "min_level": 10},
                {"id": 26, "name": "raichu", "trigger": "thunder-stone"}
            ],
            "locations": ["viridian-forest", "power-plant"]
        }))
        .unwrap();

        let detail = map_detail(response);
        assert_eq!(detail.id, 25);
        assert_eq!(detail.total_stats, 320);
        assert!(detail.abilities[1].is_hidden);
        assert_eq!(
            detail.sprites.front_default.as_deref(),
            Some("http://img/25.png")
        );
        assert!(detail.sprites.back_default.is_none());
        assert_eq!(detail.evolutions[1].condition_label(), "Lv. 10");
        assert_eq!(detail.evolutions[0].condition_label(), "high friendship");
        assert_eq!(detail.locations.len(), 2);
    }

    #[test]
    fn versions_without_front_sprite_yield_no_strip_entry() {
        let sprites = parse_sprites(&json!({
            "generations": {
                "generation-i": {
                    "red-blue": {"front_default": "http://img/rb.png"},
                    "yellow": {"front_default": null},
                    "gold": {}
                }
            }
        }));
        let entries = sprites.generation_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1, "red-blue");
    }

    #[test]
    fn fetchable_urls_are_deduplicated() {
        let sprites = parse_sprites(&json!({
            "front_default": "http://img/a.png",
            "back_default": "http://img/a.png",
            "front_shiny": "http://img/b.png"
        }));
        let urls = sprites.fetchable_urls();
        assert_eq!(urls, vec!["http://img/a.png", "http://img/b.png"]);
    }

    #[test]
    fn missing_optional_fields_default() {
        let response: DetailResponse = serde_json::from_value(json!({
            "id": 132,
            "name": "ditto"
        }))
        .unwrap();
        let detail = map_detail(response);
        assert_eq!(detail.hp, 0);
        assert!(detail.base_experience.is_none());
        assert_eq!(detail.profile_rows()[2].1, "--");
        assert!(detail.sprites.fetchable_urls().is_empty());
    }
}
