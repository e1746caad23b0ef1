//! PokeAPI client

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::state::PokemonInfo;

const API_BASE: &str = "https://pokeapi.co/api/v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    base_experience: Option<u32>,
    stats: Vec<PokemonStatSlot>,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

/// One-shot lookup. The endpoint accepts an id or a name, so a digits-only
/// query reaches the id route with no client-side branching.
pub async fn fetch_pokemon(query: &str) -> Result<PokemonInfo, String> {
    let url = format!("{API_BASE}/pokemon/{query}");
    let response: PokemonResponse = fetch_json(&url).await?;
    Ok(map_pokemon(response))
}

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

fn map_pokemon(response: PokemonResponse) -> PokemonInfo {
    let get_stat = |stat_name: &str| -> u32 {
        response
            .stats
            .iter()
            .find(|slot| slot.stat.name == stat_name)
            .map(|slot| slot.base_stat)
            .unwrap_or(0)
    };
    let hp = get_stat("hp");
    let attack = get_stat("attack");
    let defense = get_stat("defense");
    let sp_attack = get_stat("special-attack");
    let sp_defense = get_stat("special-defense");
    let speed = get_stat("speed");

    PokemonInfo {
        id: response.id,
        name: response.name,
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        hp,
        attack,
        defense,
        sp_attack,
        sp_defense,
        speed,
        total: hp + attack + defense + sp_attack + sp_defense + speed,
        height: response.height,
        weight: response.weight,
        base_experience: response.base_experience,
        sprite_front_default: pointer_string(&response.sprites, "/front_default"),
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
