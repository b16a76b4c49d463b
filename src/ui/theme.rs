use ratatui::style::Color;

// Green-on-black phosphor scheme
pub const BG: Color = Color::Black;
pub const TEXT: Color = Color::Green;
pub const HIGHLIGHT: Color = Color::LightGreen;
pub const ALERT: Color = Color::LightRed;

// Unfilled gauge cells
pub const DIM: Color = Color::DarkGray;
