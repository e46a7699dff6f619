use std::any::Any;
use std::fmt;

use easel_engine::coords::{Rect, Vec2};

use crate::painter::Painter;
use crate::simulation::ActionCtx;

/// Identity handed out by the [`UiRegistry`](crate::registry::UiRegistry).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    /// Placeholder carried by elements that have not been registered yet.
    pub const UNREGISTERED: ElementId = ElementId(u32::MAX);

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interaction state of an element.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ElementState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

/// Identity fields every element embeds.
#[derive(Debug, Clone)]
pub struct ElementBase {
    pub(crate) id: ElementId,
    pub(crate) name: String,
}

impl ElementBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: ElementId::UNREGISTERED, name: name.into() }
    }
}

// ── capabilities ──────────────────────────────────────────────────────────

pub trait Drawable {
    /// Area the element occupies, in logical pixels.
    fn bounds(&self) -> Rect;

    fn draw(&self, painter: &mut Painter<'_>);
}

pub trait Hoverable {
    /// `None` means the pointer is outside the window.
    fn update_hover(&mut self, pointer: Option<Vec2>);

    fn is_hovered(&self) -> bool;
}

/// Pointer interaction. Each method returns `true` when the element's
/// callback should fire for this event.
pub trait Clickable {
    fn press(&mut self, pos: Vec2) -> bool;

    fn release(&mut self, pos: Vec2) -> bool;

    /// Pointer motion while this element holds the press.
    fn drag(&mut self, _pos: Vec2) -> bool {
        false
    }

    /// Runs the bound callback.
    fn invoke(&mut self, ctx: &mut ActionCtx<'_>) -> anyhow::Result<()>;
}

/// Object-safe access to `Any`, so registered elements can be downcast.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A UI element owned by the registry.
///
/// Capabilities beyond drawing are discovered through the `as_*_mut`
/// accessors; the defaults report none.
pub trait Element: Drawable + AsAny {
    fn base(&self) -> &ElementBase;
    fn base_mut(&mut self) -> &mut ElementBase;

    fn id(&self) -> ElementId {
        self.base().id
    }

    fn name(&self) -> &str {
        &self.base().name
    }

    /// Whether a press at `pos` belongs to this element. Defaults to the bounds.
    fn hit_test(&self, pos: Vec2) -> bool {
        self.bounds().contains(pos)
    }

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        None
    }

    fn as_clickable_mut(&mut self) -> Option<&mut dyn Clickable> {
        None
    }

    /// Advances time-based animation by `dt` seconds.
    fn animate(&mut self, _dt: f32) {}
}
