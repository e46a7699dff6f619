//! Easel UI: animated buttons, panels and sliders plus a simulation loop on
//! top of `easel-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use easel_ui::prelude::*;
//!
//! let config = SimulationConfig::new(800, 600, 60, "Pinball");
//! let hooks = hooks::from_fn(|ctx, dt| {
//!     // advance the world by `dt`
//!     Ok(())
//! })
//! .on_draw_dynamic(|painter, frame| {
//!     painter.fill_circle(Vec2::new(400.0, 300.0), 10.0, Color::WHITE, None);
//!     Ok(())
//! });
//!
//! let mut sim = Simulation::open(config, hooks)?;
//! sim.add_element(
//!     UiButton::new("pause", Rect::new(80.0, 30.0, 80.0, 30.0), "Pause")
//!         .on_click(|ctx| { ctx.toggle_pause(); Ok(()) }),
//! );
//! sim.run()?;
//! ```
//!
//! # Custom elements
//!
//! Implement [`Drawable`](element::Drawable) and [`Element`](element::Element);
//! add [`Hoverable`](element::Hoverable) or [`Clickable`](element::Clickable)
//! and expose them through `as_hoverable_mut` / `as_clickable_mut` to receive
//! pointer input.

pub mod element;
pub mod painter;
pub mod registry;
pub mod router;
pub mod simulation;
pub mod theme;
pub mod widgets;

pub use simulation::{Simulation, SimulationConfig};

/// Everything a simulation needs, in one import.
pub mod prelude {
    pub use crate::element::{
        Clickable, Drawable, Element, ElementBase, ElementId, ElementState, Hoverable,
    };
    pub use crate::painter::Painter;
    pub use crate::registry::UiRegistry;
    pub use crate::router::EventRouter;
    pub use crate::simulation::hooks;
    pub use crate::simulation::{
        ActionCtx, Command, ConfigError, ExitReason, FrameInfo, HookCtx, Hooks, RunSummary,
        SimError, SimState, Simulation, SimulationConfig, StopHandle,
    };
    pub use crate::theme;
    pub use crate::widgets::{DiscreteSlider, Shadow, TriggerMode, UiButton, UiPanel};

    pub use easel_engine::coords::{Rect, Vec2};
    pub use easel_engine::input::Key;
    pub use easel_engine::paint::{Color, lerp};
    pub use easel_engine::scene::{Border, ZIndex};
    pub use easel_engine::text::FontId;
}
