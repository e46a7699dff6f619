use anyhow::Result;

use easel_engine::input::Key;

use crate::painter::Painter;

use super::ctx::{FrameInfo, HookCtx};

/// Caller-supplied behavior, invoked by the loop at fixed points of a frame.
///
/// Every method has a no-op default, so an implementation only overrides what
/// it needs. An error from any hook ends [`Simulation::run`](super::Simulation::run).
pub trait Hooks {
    /// Before the first frame, and again after every reset.
    fn setup(&mut self, _ctx: &mut HookCtx<'_>) -> Result<()> {
        Ok(())
    }

    /// Per-frame logic. Not called while paused.
    fn update(&mut self, _ctx: &mut HookCtx<'_>, _dt: f32) -> Result<()> {
        Ok(())
    }

    /// Content drawn below the UI elements.
    fn draw_static(&mut self, _painter: &mut Painter<'_>, _frame: &FrameInfo) -> Result<()> {
        Ok(())
    }

    /// Content drawn above the UI elements.
    fn draw_dynamic(&mut self, _painter: &mut Painter<'_>, _frame: &FrameInfo) -> Result<()> {
        Ok(())
    }

    /// A named event emitted through [`HookCtx::emit`] or [`ActionCtx::emit`](super::ActionCtx::emit).
    fn on_event(&mut self, _ctx: &mut HookCtx<'_>, _name: &str) -> Result<()> {
        Ok(())
    }

    /// A key went down this frame. Key-repeat is not reported.
    fn on_key(&mut self, _ctx: &mut HookCtx<'_>, _key: Key) -> Result<()> {
        Ok(())
    }

    fn on_pause_changed(&mut self, _ctx: &mut HookCtx<'_>, _paused: bool) -> Result<()> {
        Ok(())
    }
}

impl<H: Hooks + ?Sized> Hooks for Box<H> {
    fn setup(&mut self, ctx: &mut HookCtx<'_>) -> Result<()> {
        (**self).setup(ctx)
    }

    fn update(&mut self, ctx: &mut HookCtx<'_>, dt: f32) -> Result<()> {
        (**self).update(ctx, dt)
    }

    fn draw_static(&mut self, painter: &mut Painter<'_>, frame: &FrameInfo) -> Result<()> {
        (**self).draw_static(painter, frame)
    }

    fn draw_dynamic(&mut self, painter: &mut Painter<'_>, frame: &FrameInfo) -> Result<()> {
        (**self).draw_dynamic(painter, frame)
    }

    fn on_event(&mut self, ctx: &mut HookCtx<'_>, name: &str) -> Result<()> {
        (**self).on_event(ctx, name)
    }

    fn on_key(&mut self, ctx: &mut HookCtx<'_>, key: Key) -> Result<()> {
        (**self).on_key(ctx, key)
    }

    fn on_pause_changed(&mut self, ctx: &mut HookCtx<'_>, paused: bool) -> Result<()> {
        (**self).on_pause_changed(ctx, paused)
    }
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl Hooks for NoHooks {}

// ── closures ──────────────────────────────────────────────────────────────

type CtxFn = Box<dyn FnMut(&mut HookCtx<'_>) -> Result<()>>;
type UpdateFn = Box<dyn FnMut(&mut HookCtx<'_>, f32) -> Result<()>>;
type DrawFn = Box<dyn FnMut(&mut Painter<'_>, &FrameInfo) -> Result<()>>;
type EventFn = Box<dyn FnMut(&mut HookCtx<'_>, &str) -> Result<()>>;
type KeyFn = Box<dyn FnMut(&mut HookCtx<'_>, Key) -> Result<()>>;
type PauseFn = Box<dyn FnMut(&mut HookCtx<'_>, bool) -> Result<()>>;

/// [`Hooks`] assembled from closures. Built with [`from_fn`].
#[derive(Default)]
pub struct FnHooks {
    setup: Option<CtxFn>,
    update: Option<UpdateFn>,
    draw_static: Option<DrawFn>,
    draw_dynamic: Option<DrawFn>,
    on_event: Option<EventFn>,
    on_key: Option<KeyFn>,
    on_pause_changed: Option<PauseFn>,
}

/// Starts a closure-based hook set from its per-frame logic.
///
/// ```rust,ignore
/// let hooks = hooks::from_fn(|ctx, dt| { /* step */ Ok(()) })
///     .on_draw_dynamic(|painter, frame| { /* draw */ Ok(()) });
/// ```
pub fn from_fn(update: impl FnMut(&mut HookCtx<'_>, f32) -> Result<()> + 'static) -> FnHooks {
    FnHooks { update: Some(Box::new(update)), ..FnHooks::default() }
}

impl FnHooks {
    pub fn on_setup(mut self, f: impl FnMut(&mut HookCtx<'_>) -> Result<()> + 'static) -> Self {
        self.setup = Some(Box::new(f));
        self
    }

    pub fn on_draw_static(
        mut self,
        f: impl FnMut(&mut Painter<'_>, &FrameInfo) -> Result<()> + 'static,
    ) -> Self {
        self.draw_static = Some(Box::new(f));
        self
    }

    pub fn on_draw_dynamic(
        mut self,
        f: impl FnMut(&mut Painter<'_>, &FrameInfo) -> Result<()> + 'static,
    ) -> Self {
        self.draw_dynamic = Some(Box::new(f));
        self
    }

    pub fn on_event(mut self, f: impl FnMut(&mut HookCtx<'_>, &str) -> Result<()> + 'static) -> Self {
        self.on_event = Some(Box::new(f));
        self
    }

    pub fn on_key(mut self, f: impl FnMut(&mut HookCtx<'_>, Key) -> Result<()> + 'static) -> Self {
        self.on_key = Some(Box::new(f));
        self
    }

    pub fn on_pause_changed(
        mut self,
        f: impl FnMut(&mut HookCtx<'_>, bool) -> Result<()> + 'static,
    ) -> Self {
        self.on_pause_changed = Some(Box::new(f));
        self
    }
}

impl Hooks for FnHooks {
    fn setup(&mut self, ctx: &mut HookCtx<'_>) -> Result<()> {
        self.setup.as_mut().map_or(Ok(()), |f| f(ctx))
    }

    fn update(&mut self, ctx: &mut HookCtx<'_>, dt: f32) -> Result<()> {
        self.update.as_mut().map_or(Ok(()), |f| f(ctx, dt))
    }

    fn draw_static(&mut self, painter: &mut Painter<'_>, frame: &FrameInfo) -> Result<()> {
        self.draw_static.as_mut().map_or(Ok(()), |f| f(painter, frame))
    }

    fn draw_dynamic(&mut self, painter: &mut Painter<'_>, frame: &FrameInfo) -> Result<()> {
        self.draw_dynamic.as_mut().map_or(Ok(()), |f| f(painter, frame))
    }

    fn on_event(&mut self, ctx: &mut HookCtx<'_>, name: &str) -> Result<()> {
        self.on_event.as_mut().map_or(Ok(()), |f| f(ctx, name))
    }

    fn on_key(&mut self, ctx: &mut HookCtx<'_>, key: Key) -> Result<()> {
        self.on_key.as_mut().map_or(Ok(()), |f| f(ctx, key))
    }

    fn on_pause_changed(&mut self, ctx: &mut HookCtx<'_>, paused: bool) -> Result<()> {
        self.on_pause_changed.as_mut().map_or(Ok(()), |f| f(ctx, paused))
    }
}
