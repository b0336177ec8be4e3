// CullTracker - ui/theme.rs
//
// Colour handling, visuals, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Parse a `#RRGGBB` (or `RRGGBB`) tag colour.
pub fn parse_hex_colour(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Format a colour as upper-case `#RRGGBB`.
pub fn colour_to_hex(colour: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", colour.r(), colour.g(), colour.b())
}

/// Colour swatch for a tag; unparseable colours show as neutral grey.
pub fn tag_colour(hex: &str) -> Color32 {
    parse_hex_colour(hex).unwrap_or(UNKNOWN_TAG_COLOUR)
}

/// Apply the theme and body font size to the context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        for text_style in [egui::TextStyle::Body, egui::TextStyle::Button] {
            if let Some(font) = style.text_styles.get_mut(&text_style) {
                font.size = font_size;
            }
        }
    });
}

pub const UNKNOWN_TAG_COLOUR: Color32 = Color32::from_rgb(107, 114, 128); // Gray 500
pub const TOTAL_COLOUR: Color32 = Color32::from_rgb(34, 197, 94); // Green 500
pub const DANGER_COLOUR: Color32 = Color32::from_rgb(220, 38, 38); // Red 600
pub const MUTED_TEXT: Color32 = Color32::from_rgb(156, 163, 175); // Gray 400

/// Layout constants.
pub const FORM_WIDTH: f32 = 480.0;
pub const CARD_SPACING: f32 = 8.0;
pub const WEIGHT_INPUT_WIDTH: f32 = 80.0;
pub const TOTAL_FONT_SIZE: f32 = 20.0;
