pub mod detail_panel;
pub mod list_panel;
pub mod search_overlay;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_panel::{DetailPanel, DetailPanelProps};
pub use list_panel::{ListPanel, ListPanelProps};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};

use ratatui::style::{Color, Modifier, Style};
use tui_dispatch::HandlerResponse;

use crate::action::Action;
use crate::sprite::SpriteData;

pub const BG_BASE: Color = Color::Rgb(26, 18, 20);
pub const BG_PANEL: Color = Color::Rgb(38, 26, 30);
pub const BG_PANEL_ALT: Color = Color::Rgb(50, 34, 38);
pub const BG_HIGHLIGHT: Color = Color::Rgb(120, 44, 52);
pub const TEXT_MAIN: Color = Color::Rgb(244, 236, 232);
pub const TEXT_DIM: Color = Color::Rgb(196, 176, 172);
pub const ACCENT_RED: Color = Color::Rgb(226, 88, 80);
pub const ACCENT_YELLOW: Color = Color::Rgb(240, 196, 92);
const CELL_ASPECT: f32 = 2.0;

pub(crate) const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub(crate) fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

/// "red-blue" -> "Red Blue"
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn focus_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

/// Largest cell footprint that keeps the sprite's pixel aspect, given that a
/// terminal cell is roughly twice as tall as it is wide
pub(crate) fn sprite_fit(sprite: &SpriteData, max_cols: u16, max_rows: u16) -> (u16, u16) {
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
