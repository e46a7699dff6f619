//! Color model shared between the UI and the rasterizer.
//!
//! Colors are straight-alpha sRGB bytes, the same representation window
//! toolkits and image formats hand around. The rasterizer premultiplies at
//! blend time.

mod color;

pub use color::{lerp, Color, ColorParseError};
