//! Default palette and metrics of the simulation template.

use easel_engine::paint::Color;

pub const SKY_BLUE: Color = Color::rgb(135, 206, 235);
pub const BACKGROUND: Color = SKY_BLUE;
pub const WHITE: Color = Color::WHITE;

pub const PANEL: Color = Color::rgb(50, 50, 50);
pub const SHADOW: Color = Color::rgba(0, 0, 0, 60);
pub const INSTRUCTION: Color = Color::rgb(220, 220, 220);
pub const PAUSED: Color = Color::rgb(200, 80, 80);

pub const BUTTON_BASE: Color = Color::rgb(190, 190, 190);
pub const BUTTON_HOVER: Color = Color::rgb(210, 210, 210);
pub const BUTTON_BORDER: Color = Color::rgb(80, 80, 80);
pub const BUTTON_TEXT: Color = Color::rgb(30, 30, 30);
pub const BUTTON_SHADOW: Color = Color::rgba(60, 60, 60, 120);

pub const SLIDER_BAR: Color = Color::WHITE;
pub const SLIDER_KNOB: Color = Color::rgb(180, 180, 180);
pub const SLIDER_TICK: Color = Color::rgb(220, 220, 220);
pub const SLIDER_HIGHLIGHT: Color = Color::rgb(255, 255, 100);

pub const TOP_PANEL_HEIGHT: f32 = 90.0;

pub const FONT_SIZE: f32 = 16.0;
pub const FONT_SIZE_SMALL: f32 = 13.0;
