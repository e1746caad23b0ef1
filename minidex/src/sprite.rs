//! Sprite decoding and kitty graphics encoding

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

const CHUNK_SIZE: usize = 4096;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub fn decode_sprite(bytes: &[u8], url: &str) -> Result<SpriteData, String> {
    let image = image::load_from_memory(bytes).map_err(|err| format!("{url}: {err}"))?;
    let rgba = image.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    if width == 0 || height == 0 {
        return Err(format!("{url}: empty image"));
    }
    Ok(SpriteData {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Transmit-and-place kitty escape scaled to `cols` x `rows` cells
pub fn kitty_sequence(sprite: &SpriteData, cols: u16, rows: u16) -> Result<String, String> {
    if sprite.rgba.len() != (sprite.width * sprite.height * 4) as usize {
        return Err("sprite pixel buffer does not match its dimensions".to_string());
    }
    let payload = STANDARD.encode(&sprite.rgba);
    let mut sequence = String::with_capacity(payload.len() + 64);
    let mut start = 0;
    while start < payload.len() {
        let end = (start + CHUNK_SIZE).min(payload.len());
        let more = if end < payload.len() { 1 } else { 0 };
        if start == 0 {
            sequence.push_str(&format!(
                "\x1b_Gf=32,s={},v={},a=T,t=d,c={cols},r={rows},q=2,m={more};",
                sprite.width, sprite.height
            ));
        } else {
            sequence.push_str(&format!("\x1b_Gm={more};"));
        }
        sequence.push_str(&payload[start..end]);
        sequence.push_str("\x1b\\");
        start = end;
    }
    Ok(sequence)
}

/// Largest cell footprint preserving pixel aspect; a terminal cell is about
/// twice as tall as it is wide
pub fn sprite_fit(sprite: &SpriteData, max_cols: u16, max_rows: u16) -> (u16, u16) {
    const CELL_ASPECT: f32 = 2.0;
    let max_cols = max_cols.max(1);
    let max_rows = max_rows.max(1);
    let aspect = sprite.width.max(1) as f32 / sprite.height.max(1) as f32;
    let mut cols = max_cols as f32;
    let mut rows = cols / (aspect * CELL_ASPECT);
    if rows > max_rows as f32 {
        rows = max_rows as f32;
        cols = rows * aspect * CELL_ASPECT;
    }
    (
        (cols as u16).clamp(1, max_cols),
        (rows as u16).clamp(1, max_rows),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_respects_bounds() {
        let sprite = SpriteData {
            width: 96,
            height: 96,
            rgba: vec![0; 96 * 96 * 4],
        };
        let (cols, rows) = sprite_fit(&sprite, 40, 10);
        assert!(cols <= 40);
        assert!(rows <= 10);
        assert!(cols >= 1 && rows >= 1);
    }

    #[test]
    fn sequence_targets_requested_cells() {
        let sprite = SpriteData {
            width: 2,
            height: 2,
            rgba: vec![255; 16],
        };
        let sequence = kitty_sequence(&sprite, 8, 4).unwrap();
        assert!(sequence.contains("c=8,r=4"));
        assert!(sequence.starts_with("\x1b_G"));
    }
}
