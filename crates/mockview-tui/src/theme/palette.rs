//! Color palette.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black; // Terminal background
pub const CARD_BG: Color = Color::Black; // Panel backgrounds
pub const OVERLAY_BG: Color = Color::DarkGray; // Loading overlay

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const CONTRAST_FG: Color = Color::Black; // Text on accent backgrounds

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;
pub const TEXT_BRIGHT: Color = Color::White;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green; // 2xx, clean history
pub const STATUS_BLUE: Color = Color::Blue; // 1xx/3xx
pub const STATUS_YELLOW: Color = Color::Yellow; // 4xx, autorefresh on
pub const STATUS_RED: Color = Color::Red; // 5xx, engine failures, errors

// --- Bodies ---
pub const BODY_JSON: Color = Color::LightCyan;
pub const BODY_RAW: Color = Color::Gray;
