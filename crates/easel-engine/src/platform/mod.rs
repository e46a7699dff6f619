//! Window/event/presentation backends.
//!
//! A `Platform` is driven pull-style by the caller: poll events, record a
//! draw list, present it. `DesktopPlatform` runs on winit + wgpu;
//! `HeadlessPlatform` replays scripted events and records frames.

mod desktop;
mod headless;

use anyhow::Result;

use crate::coords::Viewport;
use crate::input::InputEvent;
use crate::paint::Color;
use crate::scene::DrawList;
use crate::text::FontSystem;

pub use desktop::DesktopPlatform;
pub use headless::{FrameLog, FrameRecord, HeadlessPlatform};

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// Inner size in logical pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "easel".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Backend the frame loop drives.
pub trait Platform {
    /// Current drawable area in logical pixels.
    fn viewport(&self) -> Viewport;

    /// Appends every event that arrived since the last poll. Never blocks.
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<()>;

    /// Rasterizes `list` over a `background` fill and shows it.
    fn present(&mut self, list: &mut DrawList, fonts: &FontSystem, background: Color) -> Result<()>;
}

impl<P: Platform + ?Sized> Platform for Box<P> {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<()> {
        (**self).poll_events(out)
    }

    fn present(&mut self, list: &mut DrawList, fonts: &FontSystem, background: Color) -> Result<()> {
        (**self).present(list, fonts, background)
    }
}
