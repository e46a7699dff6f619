use easel_engine::coords::{Rect, Vec2};
use easel_engine::paint::Color;

use crate::element::{Clickable, Drawable, Element, ElementBase};
use crate::painter::Painter;
use crate::simulation::ActionCtx;
use crate::theme;

/// Callback fired with the new value after the slider moves to another tick.
pub type ChangeFn = Box<dyn FnMut(i32, &mut ActionCtx<'_>) -> anyhow::Result<()>>;

/// Rejected slider range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid slider range {min}..={max}: needs 2..={} ticks", MAX_TICKS + 1)]
pub struct SliderRangeError {
    pub min: i32,
    pub max: i32,
}

/// Most tick intervals a slider may have.
const MAX_TICKS: i64 = 100;

const WIDTH: f32 = 200.0;
const HEIGHT: f32 = 30.0;
const KNOB_RADIUS: f32 = 12.0;
/// Vertical reach of the bar hit area around its center line.
const BAR_REACH: f32 = 10.0;

/// Horizontal slider snapping to integer ticks in `[min, max]`.
pub struct DiscreteSlider {
    base: ElementBase,
    origin: Vec2,
    min: i32,
    max: i32,
    value: i32,
    dragging: bool,
    caption: Option<String>,
    on_change: Option<ChangeFn>,
    font_size: f32,
}

impl DiscreteSlider {
    /// `value` is clamped into the range.
    pub fn new(
        name: impl Into<String>,
        origin: Vec2,
        min: i32,
        max: i32,
        value: i32,
    ) -> Result<Self, SliderRangeError> {
        let span = i64::from(max) - i64::from(min);
        if !(1..=MAX_TICKS).contains(&span) {
            return Err(SliderRangeError { min, max });
        }
        Ok(Self {
            base: ElementBase::new(name),
            origin,
            min,
            max,
            value: value.clamp(min, max),
            dragging: false,
            caption: None,
            on_change: None,
            font_size: theme::FONT_SIZE,
        })
    }

    pub fn caption(mut self, text: impl Into<String>) -> Self {
        self.caption = Some(text.into());
        self
    }

    pub fn on_change(
        mut self,
        f: impl FnMut(i32, &mut ActionCtx<'_>) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Sets the value, clamped. Returns whether it changed.
    pub fn set_value(&mut self, value: i32) -> bool {
        let value = value.clamp(self.min, self.max);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    fn center_y(&self) -> f32 {
        self.origin.y + HEIGHT * 0.5
    }

    fn span(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    fn tick_x(&self, v: i32) -> f32 {
        let offset = i64::from(v) - i64::from(self.min);
        self.origin.x + offset as f32 / self.span() as f32 * WIDTH
    }

    /// Over the knob or the bar.
    pub fn is_over(&self, pos: Vec2) -> bool {
        let knob = Vec2::new(self.tick_x(self.value), self.center_y());
        pos.distance(knob) <= KNOB_RADIUS
            || (pos.x >= self.origin.x
                && pos.x <= self.origin.x + WIDTH
                && (pos.y - self.center_y()).abs() <= BAR_REACH)
    }

    /// Nearest tick to `pos` along the bar.
    pub fn value_at(&self, pos: Vec2) -> i32 {
        let t = ((pos.x - self.origin.x) / WIDTH).clamp(0.0, 1.0);
        let step = (self.span() as f32 * t).round() as i64;
        (i64::from(self.min) + step).clamp(i64::from(self.min), i64::from(self.max)) as i32
    }
}

impl Drawable for DiscreteSlider {
    /// Bar area plus the knob overhang at both ends.
    fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x - KNOB_RADIUS,
            self.origin.y,
            WIDTH + KNOB_RADIUS * 2.0,
            HEIGHT,
        )
    }

    fn draw(&self, painter: &mut Painter<'_>) {
        let cy = self.center_y();
        let bar = Rect::new(self.origin.x, cy - 4.0, WIDTH, 8.0);
        painter.fill_rounded_rect(bar, 8.0, theme::SLIDER_BAR, None);

        let knob = Vec2::new(self.tick_x(self.value), cy);
        painter.fill_circle(knob, KNOB_RADIUS, theme::SLIDER_KNOB, None);

        for v in self.min..=self.max {
            let x = self.tick_x(v);
            painter.fill_rounded_rect(Rect::new(x - 2.0, cy - 8.0, 4.0, 16.0), 2.0, theme::SLIDER_TICK, None);

            let (size, color): (f32, Color) = if v == self.value {
                (self.font_size * 1.25, theme::SLIDER_HIGHLIGHT)
            } else {
                (self.font_size, theme::WHITE)
            };
            painter.text(v.to_string(), size, color, Vec2::new(x - 5.0, self.origin.y + HEIGHT + 5.0));
        }

        if let Some(caption) = &self.caption {
            let at = Vec2::new(self.origin.x + WIDTH + 20.0, cy - 8.0);
            painter.text(caption.clone(), self.font_size, theme::WHITE, at);
        }
    }
}

impl Clickable for DiscreteSlider {
    fn press(&mut self, pos: Vec2) -> bool {
        if !self.is_over(pos) {
            return false;
        }
        self.dragging = true;
        self.set_value(self.value_at(pos))
    }

    fn release(&mut self, _pos: Vec2) -> bool {
        self.dragging = false;
        false
    }

    fn drag(&mut self, pos: Vec2) -> bool {
        self.dragging && self.set_value(self.value_at(pos))
    }

    fn invoke(&mut self, ctx: &mut ActionCtx<'_>) -> anyhow::Result<()> {
        let value = self.value;
        match self.on_change.as_mut() {
            Some(f) => f(value, ctx),
            None => Ok(()),
        }
    }
}

impl Element for DiscreteSlider {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn hit_test(&self, pos: Vec2) -> bool {
        self.is_over(pos)
    }

    fn as_clickable_mut(&mut self) -> Option<&mut dyn Clickable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> DiscreteSlider {
        DiscreteSlider::new("points", Vec2::new(100.0, 100.0), 1, 7, 3).unwrap()
    }

    #[test]
    fn empty_range_is_rejected() {
        assert_eq!(
            DiscreteSlider::new("s", Vec2::zero(), 5, 5, 5).err(),
            Some(SliderRangeError { min: 5, max: 5 })
        );
        assert!(DiscreteSlider::new("s", Vec2::zero(), 7, 1, 3).is_err());
    }

    #[test]
    fn oversized_range_is_rejected() {
        assert!(DiscreteSlider::new("s", Vec2::zero(), i32::MIN, i32::MAX, 0).is_err());
        assert!(DiscreteSlider::new("s", Vec2::zero(), 0, MAX_TICKS as i32 + 1, 0).is_err());

        let s = DiscreteSlider::new("s", Vec2::zero(), -50, 50, 0).unwrap();
        assert_eq!(s.value_at(Vec2::new(WIDTH, 0.0)), 50);
        assert_eq!(s.value_at(Vec2::new(0.0, 0.0)), -50);
    }

    #[test]
    fn initial_value_is_clamped() {
        let s = DiscreteSlider::new("s", Vec2::zero(), 1, 7, 42).unwrap();
        assert_eq!(s.value(), 7);
    }

    #[test]
    fn positions_snap_to_nearest_tick() {
        let s = slider();
        // Ticks are 200 / 6 px apart.
        assert_eq!(s.value_at(Vec2::new(100.0, 0.0)), 1);
        assert_eq!(s.value_at(Vec2::new(300.0, 0.0)), 7);
        assert_eq!(s.value_at(Vec2::new(150.0, 0.0)), 3);
        assert_eq!(s.value_at(Vec2::new(-50.0, 0.0)), 1);
        assert_eq!(s.value_at(Vec2::new(900.0, 0.0)), 7);
    }

    #[test]
    fn hit_area_covers_bar_and_knob() {
        let s = slider();
        assert!(s.is_over(Vec2::new(250.0, 115.0)));
        assert!(!s.is_over(Vec2::new(250.0, 130.0)));
        assert!(!s.is_over(Vec2::new(50.0, 115.0)));
    }

    #[test]
    fn drag_changes_value_only_while_pressed() {
        let mut s = slider();
        assert!(!s.drag(Vec2::new(300.0, 115.0)));
        assert_eq!(s.value(), 3);

        // Pressing on the current tick starts a drag without a change.
        let at_three = Vec2::new(s.tick_x(3), 115.0);
        assert!(!s.press(at_three));
        assert!(s.is_dragging());

        assert!(s.drag(Vec2::new(300.0, 400.0)));
        assert_eq!(s.value(), 7);
        assert!(!s.drag(Vec2::new(320.0, 400.0)));

        assert!(!s.release(Vec2::new(320.0, 400.0)));
        assert!(!s.is_dragging());
    }

    #[test]
    fn press_off_the_bar_does_nothing() {
        let mut s = slider();
        assert!(!s.press(Vec2::new(250.0, 200.0)));
        assert!(!s.is_dragging());
    }
}
