use easel_engine::coords::{Rect, Vec2};
use easel_engine::paint::{Color, lerp};
use easel_engine::scene::Border;

use crate::element::{Clickable, Drawable, Element, ElementBase, ElementState, Hoverable};
use crate::painter::Painter;
use crate::simulation::ActionCtx;
use crate::theme;

/// Callback bound to a button.
pub type ActionFn = Box<dyn FnMut(&mut ActionCtx<'_>) -> anyhow::Result<()>>;

/// When a button fires its callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TriggerMode {
    /// On the primary-button press. Where the release happens does not matter.
    #[default]
    Press,
    /// On release, and only if the pointer is still over the button.
    Release,
}

const CORNER_RADIUS: f32 = 12.0;
const BORDER_WIDTH: f32 = 2.0;
const SHADOW_OFFSET: f32 = 4.0;
/// Longest animation step, in seconds.
const MAX_STEP: f32 = 0.05;

/// Rectangular push button with an animated hover color.
///
/// ```rust,ignore
/// let pause = UiButton::new("pause", Rect::new(80.0, 30.0, 80.0, 30.0), "Pause")
///     .on_click(|ctx| { ctx.toggle_pause(); Ok(()) });
/// ```
pub struct UiButton {
    base: ElementBase,
    rect: Rect,
    label: String,
    state: ElementState,
    /// Pointer over the rect, tracked separately so a held press remembers it.
    hovered: bool,
    progress: f32,
    speed: f32,
    trigger: TriggerMode,
    on_click: Option<ActionFn>,

    base_color: Color,
    hover_color: Color,
    border_color: Color,
    text_color: Color,
    shadow_color: Color,
    font_size: f32,
}

impl UiButton {
    pub fn new(name: impl Into<String>, rect: Rect, label: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new(name),
            rect,
            label: label.into(),
            state: ElementState::Idle,
            hovered: false,
            progress: 0.0,
            speed: 8.0,
            trigger: TriggerMode::Press,
            on_click: None,
            base_color: theme::BUTTON_BASE,
            hover_color: theme::BUTTON_HOVER,
            border_color: theme::BUTTON_BORDER,
            text_color: theme::BUTTON_TEXT,
            shadow_color: theme::BUTTON_SHADOW,
            font_size: theme::FONT_SIZE,
        }
    }

    pub fn on_click(
        mut self,
        f: impl FnMut(&mut ActionCtx<'_>) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn trigger_mode(mut self, mode: TriggerMode) -> Self {
        self.trigger = mode;
        self
    }

    pub fn colors(mut self, base: Color, hover: Color) -> Self {
        self.base_color = base;
        self.hover_color = hover;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Hover animation rate; higher is faster. Negative values count as 0.
    pub fn animation_speed(mut self, speed: f32) -> Self {
        self.speed = speed.max(0.0);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn state(&self) -> ElementState {
        self.state
    }

    /// Hover progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Face color for the current hover progress.
    pub fn color(&self) -> Color {
        lerp(self.base_color, self.hover_color, self.progress)
    }

    fn settle(&mut self) {
        self.state = if self.hovered {
            ElementState::Hovered
        } else {
            ElementState::Idle
        };
    }
}

impl Drawable for UiButton {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn draw(&self, painter: &mut Painter<'_>) {
        let shadow = self.rect.translate(SHADOW_OFFSET, SHADOW_OFFSET);
        painter.fill_rounded_rect(shadow, CORNER_RADIUS, self.shadow_color, None);
        painter.fill_rounded_rect(
            self.rect,
            CORNER_RADIUS,
            self.color(),
            Some(Border::new(BORDER_WIDTH, self.border_color)),
        );
        painter.text_centered(&self.label, self.font_size, self.text_color, self.rect);
    }
}

impl Hoverable for UiButton {
    fn update_hover(&mut self, pointer: Option<Vec2>) {
        self.hovered = pointer.is_some_and(|p| self.rect.contains(p));
        if self.state != ElementState::Pressed {
            self.settle();
        }
    }

    fn is_hovered(&self) -> bool {
        self.hovered
    }
}

impl Clickable for UiButton {
    fn press(&mut self, pos: Vec2) -> bool {
        if !self.rect.contains(pos) {
            return false;
        }
        self.hovered = true;
        self.state = ElementState::Pressed;
        self.trigger == TriggerMode::Press
    }

    fn release(&mut self, pos: Vec2) -> bool {
        if self.state != ElementState::Pressed {
            return false;
        }
        self.hovered = self.rect.contains(pos);
        self.settle();
        self.trigger == TriggerMode::Release && self.hovered
    }

    fn drag(&mut self, pos: Vec2) -> bool {
        self.hovered = self.rect.contains(pos);
        false
    }

    fn invoke(&mut self, ctx: &mut ActionCtx<'_>) -> anyhow::Result<()> {
        match self.on_click.as_mut() {
            Some(f) => f(ctx),
            None => Ok(()),
        }
    }
}

impl Element for UiButton {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn as_hoverable_mut(&mut self) -> Option<&mut dyn Hoverable> {
        Some(self)
    }

    fn as_clickable_mut(&mut self) -> Option<&mut dyn Clickable> {
        Some(self)
    }

    fn animate(&mut self, dt: f32) {
        if !dt.is_finite() {
            return;
        }
        let dt = dt.clamp(0.0, MAX_STEP);
        let target = if self.state == ElementState::Idle { 0.0 } else { 1.0 };
        self.progress += (target - self.progress) * (self.speed * dt).min(1.0);
        self.progress = self.progress.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> UiButton {
        UiButton::new("b", Rect::new(10.0, 10.0, 50.0, 20.0), "Go")
    }

    // ── hover ─────────────────────────────────────────────────────────────

    #[test]
    fn hover_follows_pointer() {
        let mut b = button();
        b.update_hover(Some(Vec2::new(20.0, 15.0)));
        assert_eq!(b.state(), ElementState::Hovered);
        assert!(b.is_hovered());

        b.update_hover(Some(Vec2::new(200.0, 200.0)));
        assert_eq!(b.state(), ElementState::Idle);

        b.update_hover(None);
        assert!(!b.is_hovered());
    }

    // ── press / release ───────────────────────────────────────────────────

    #[test]
    fn press_mode_fires_on_press_only() {
        let mut b = button();
        b.update_hover(Some(Vec2::new(20.0, 15.0)));
        assert!(b.press(Vec2::new(20.0, 15.0)));
        assert_eq!(b.state(), ElementState::Pressed);

        // Held across frames: hover updates do not release or re-fire.
        b.update_hover(Some(Vec2::new(20.0, 15.0)));
        assert_eq!(b.state(), ElementState::Pressed);

        assert!(!b.release(Vec2::new(20.0, 15.0)));
        assert_eq!(b.state(), ElementState::Hovered);
    }

    #[test]
    fn press_mode_release_outside_just_ends_the_press() {
        let mut b = button();
        assert!(b.press(Vec2::new(20.0, 15.0)));
        b.drag(Vec2::new(300.0, 15.0));
        assert!(!b.release(Vec2::new(300.0, 15.0)));
        assert_eq!(b.state(), ElementState::Idle);
    }

    #[test]
    fn release_mode_fires_when_released_inside() {
        let mut b = button().trigger_mode(TriggerMode::Release);
        assert!(!b.press(Vec2::new(20.0, 15.0)));
        assert!(b.release(Vec2::new(25.0, 15.0)));
        assert_eq!(b.state(), ElementState::Hovered);
    }

    #[test]
    fn release_mode_cancels_when_released_outside() {
        let mut b = button().trigger_mode(TriggerMode::Release);
        assert!(!b.press(Vec2::new(20.0, 15.0)));
        assert!(!b.release(Vec2::new(300.0, 300.0)));
        assert_eq!(b.state(), ElementState::Idle);
    }

    #[test]
    fn press_outside_is_ignored() {
        let mut b = button();
        assert!(!b.press(Vec2::new(0.0, 0.0)));
        assert_eq!(b.state(), ElementState::Idle);
        assert!(!b.release(Vec2::new(0.0, 0.0)));
    }

    // ── animation ─────────────────────────────────────────────────────────

    #[test]
    fn progress_eases_toward_target_and_stays_in_range() {
        let mut b = button();
        b.update_hover(Some(Vec2::new(20.0, 15.0)));

        b.animate(0.01);
        let first = b.progress();
        assert!((first - 0.08).abs() < 1e-5, "got {first}");

        for _ in 0..200 {
            b.animate(1.0);
        }
        assert!(b.progress() <= 1.0);
        assert!(b.progress() > 0.99);
        assert_eq!(b.color(), theme::BUTTON_HOVER);

        b.update_hover(None);
        for _ in 0..200 {
            b.animate(0.05);
        }
        assert!(b.progress() < 0.01);
        assert_eq!(b.color(), theme::BUTTON_BASE);
    }

    #[test]
    fn large_steps_are_clamped() {
        let mut b = button();
        b.update_hover(Some(Vec2::new(20.0, 15.0)));
        b.animate(10.0);
        // 8.0 * 0.05 = 0.4 of the remaining distance.
        assert!((b.progress() - 0.4).abs() < 1e-5);
        b.animate(f32::NAN);
        assert!((b.progress() - 0.4).abs() < 1e-5);
    }

    #[test]
    fn color_is_between_base_and_hover() {
        let mut b = button();
        b.update_hover(Some(Vec2::new(20.0, 15.0)));
        for _ in 0..10 {
            b.animate(0.016);
            let c = b.color();
            assert!((190..=210).contains(&c.r));
            assert!((190..=210).contains(&c.g));
            assert_eq!(c.a, 255);
        }
    }
}
