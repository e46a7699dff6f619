//! Software rasterizer.
//!
//! Draw lists are painted into an RGBA8 `Canvas` on the CPU. The canvas is
//! in physical pixels; draw commands are in logical pixels and are scaled
//! by the canvas scale factor.

mod canvas;
mod coverage;

pub use canvas::Canvas;
