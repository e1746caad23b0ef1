//! Sprite decoding and kitty graphics encoding

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Kitty caps APC payloads at 4096 bytes per escape
const CHUNK_SIZE: usize = 4096;

/// A decoded sprite held in state as raw RGBA pixels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
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

/// Kitty graphics sequence that transmits the sprite and places it over
/// `cols` x `rows` terminal cells
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

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> SpriteData {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let on = (x + y) % 2 == 0;
                rgba.extend_from_slice(if on {
                    &[255, 255, 255, 255]
                } else {
                    &[0, 0, 0, 255]
                });
            }
        }
        SpriteData {
            width,
            height,
            rgba,
        }
    }

    #[test]
    fn kitty_sequence_places_over_requested_cells() {
        let sprite = checker(4, 4);
        let sequence = kitty_sequence(&sprite, 10, 5).unwrap();
        assert!(sequence.starts_with("\x1b_Gf=32,s=4,v=4,a=T,t=d,c=10,r=5,q=2,m=0;"));
        assert!(sequence.ends_with("\x1b\\"));
    }

    #[test]
    fn kitty_sequence_chunks_large_payloads() {
        // 64x64 RGBA is 16 KiB raw, > 4096 base64 chars once encoded
        let sprite = checker(64, 64);
        let sequence = kitty_sequence(&sprite, 20, 10).unwrap();
        let escapes = sequence.matches("\x1b\\").count();
        assert!(escapes > 1, "expected chunked output, got {escapes} escape(s)");
        assert!(sequence.contains("m=1;"));
    }

    #[test]
    fn kitty_sequence_rejects_mismatched_buffer() {
        let sprite = SpriteData {
            width: 4,
            height: 4,
            rgba: vec![0; 3],
        };
        assert!(kitty_sequence(&sprite, 4, 2).is_err());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_sprite(b"not an image", "http://example/sprite.png").is_err());
    }
}
