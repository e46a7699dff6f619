use easel_engine::coords::Vec2;
use easel_engine::input::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent};

use crate::element::ElementId;
use crate::registry::UiRegistry;

/// Turns one frame of input into element state changes.
///
/// Holds the tracked pointer and the element that captured the current
/// primary-button press.
#[derive(Debug, Default)]
pub struct EventRouter {
    pointer: Option<Vec2>,
    captured: Option<ElementId>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn captured(&self) -> Option<ElementId> {
        self.captured
    }

    /// Drops the capture if the capturing element is no longer registered.
    ///
    /// A surviving capturer keeps it, so its release still arrives.
    pub fn retain_capture(&mut self, elements: &UiRegistry) {
        if self.captured.is_some_and(|id| elements.get(id).is_none()) {
            self.captured = None;
        }
    }

    /// Routes `events` to `elements` and returns the ids whose callbacks
    /// should run, in trigger order.
    ///
    /// `pointer` is the pointer position at the start of the frame. Events
    /// with non-finite coordinates are dropped.
    pub fn route(
        &mut self,
        events: &[InputEvent],
        pointer: Option<Vec2>,
        elements: &mut UiRegistry,
    ) -> Vec<ElementId> {
        self.pointer = pointer.filter(|p| p.is_finite());
        let mut triggered = Vec::new();

        for ev in events {
            match ev {
                InputEvent::PointerMoved(m) => {
                    let pos = Vec2::new(m.x, m.y);
                    if !pos.is_finite() {
                        log::trace!("dropping pointer move with non-finite position {pos:?}");
                        continue;
                    }
                    self.pointer = Some(pos);
                    if let Some(id) = self.captured {
                        if let Some(c) = elements.get_mut(id).and_then(|e| e.as_clickable_mut()) {
                            if c.drag(pos) {
                                triggered.push(id);
                            }
                        }
                    }
                    self.update_hover(elements);
                }

                InputEvent::PointerLeft => {
                    self.pointer = None;
                    self.update_hover(elements);
                }

                InputEvent::PointerButton(b) if b.button == MouseButton::Left => {
                    let pos = Vec2::new(b.x, b.y);
                    if !pos.is_finite() {
                        log::trace!("dropping pointer button with non-finite position {pos:?}");
                        continue;
                    }
                    self.pointer = Some(pos);
                    self.update_hover(elements);
                    self.route_button(b, pos, elements, &mut triggered);
                }

                // Focus loss swallows the release; end the press where it is.
                InputEvent::Focused(false) => {
                    if let Some(id) = self.captured.take() {
                        let pos = self.pointer.unwrap_or(Vec2::new(f32::MAX, f32::MAX));
                        if let Some(c) = elements.get_mut(id).and_then(|e| e.as_clickable_mut()) {
                            c.release(pos);
                        }
                    }
                }

                _ => {}
            }
        }

        self.update_hover(elements);
        triggered
    }

    fn route_button(
        &mut self,
        b: &PointerButtonEvent,
        pos: Vec2,
        elements: &mut UiRegistry,
        triggered: &mut Vec<ElementId>,
    ) {
        match b.state {
            MouseButtonState::Pressed => {
                if self.captured.is_some() {
                    return;
                }
                // Later registrations sit on top.
                let target = elements.iter_mut().rev().find_map(|e| {
                    (e.hit_test(pos) && e.as_clickable_mut().is_some()).then(|| e.id())
                });

                let Some(id) = target else {
                    return;
                };
                self.captured = Some(id);
                if let Some(c) = elements.get_mut(id).and_then(|e| e.as_clickable_mut()) {
                    if c.press(pos) {
                        triggered.push(id);
                    }
                }
            }
            MouseButtonState::Released => {
                let Some(id) = self.captured.take() else {
                    return;
                };
                if let Some(c) = elements.get_mut(id).and_then(|e| e.as_clickable_mut()) {
                    if c.release(pos) {
                        triggered.push(id);
                    }
                }
            }
        }
    }

    fn update_hover(&self, elements: &mut UiRegistry) {
        for e in elements.iter_mut() {
            if let Some(h) = e.as_hoverable_mut() {
                h.update_hover(self.pointer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementState;
    use crate::widgets::{DiscreteSlider, TriggerMode, UiButton, UiPanel};
    use easel_engine::coords::Rect;

    fn button_at(rect: Rect) -> UiButton {
        UiButton::new("b", rect, "B")
    }

    fn setup() -> (EventRouter, UiRegistry, ElementId) {
        let mut reg = UiRegistry::new();
        let id = reg.insert(button_at(Rect::new(10.0, 10.0, 50.0, 20.0)));
        (EventRouter::new(), reg, id)
    }

    fn state(reg: &UiRegistry, id: ElementId) -> ElementState {
        reg.downcast::<UiButton>(id).unwrap().state()
    }

    // ── hover ─────────────────────────────────────────────────────────────

    #[test]
    fn hover_tracks_pointer_motion() {
        let (mut router, mut reg, id) = setup();

        router.route(&[InputEvent::pointer_moved(20.0, 15.0)], None, &mut reg);
        assert_eq!(state(&reg, id), ElementState::Hovered);

        router.route(&[InputEvent::pointer_moved(200.0, 200.0)], router.pointer(), &mut reg);
        assert_eq!(state(&reg, id), ElementState::Idle);

        router.route(&[InputEvent::PointerLeft], Some(Vec2::new(20.0, 15.0)), &mut reg);
        assert_eq!(state(&reg, id), ElementState::Idle);
    }

    #[test]
    fn frame_start_pointer_applies_without_events() {
        let (mut router, mut reg, id) = setup();
        router.route(&[], Some(Vec2::new(20.0, 15.0)), &mut reg);
        assert_eq!(state(&reg, id), ElementState::Hovered);
    }

    // ── press ─────────────────────────────────────────────────────────────

    #[test]
    fn press_triggers_once_and_holding_does_not_retrigger() {
        let (mut router, mut reg, id) = setup();

        let fired = router.route(&[InputEvent::left_press(20.0, 15.0)], None, &mut reg);
        assert_eq!(fired, vec![id]);
        assert_eq!(state(&reg, id), ElementState::Pressed);

        for _ in 0..5 {
            let fired = router.route(&[], router.pointer(), &mut reg);
            assert!(fired.is_empty());
            assert_eq!(state(&reg, id), ElementState::Pressed);
        }

        let fired = router.route(&[InputEvent::left_release(20.0, 15.0)], router.pointer(), &mut reg);
        assert!(fired.is_empty());
        assert_eq!(state(&reg, id), ElementState::Hovered);
    }

    #[test]
    fn press_outside_every_element_is_ignored() {
        let (mut router, mut reg, _) = setup();
        let fired = router.route(&[InputEvent::left_press(500.0, 500.0)], None, &mut reg);
        assert!(fired.is_empty());
        assert_eq!(router.captured(), None);
    }

    #[test]
    fn release_is_delivered_to_the_capturing_element() {
        let mut reg = UiRegistry::new();
        let id = reg.insert(button_at(Rect::new(10.0, 10.0, 50.0, 20.0)).trigger_mode(TriggerMode::Release));
        let mut router = EventRouter::new();

        router.route(&[InputEvent::left_press(20.0, 15.0)], None, &mut reg);
        let fired = router.route(
            &[InputEvent::pointer_moved(300.0, 300.0), InputEvent::left_release(300.0, 300.0)],
            router.pointer(),
            &mut reg,
        );
        assert!(fired.is_empty(), "release outside cancels in release mode");
        assert_eq!(state(&reg, id), ElementState::Idle);

        router.route(&[InputEvent::left_press(20.0, 15.0)], router.pointer(), &mut reg);
        let fired = router.route(&[InputEvent::left_release(21.0, 16.0)], router.pointer(), &mut reg);
        assert_eq!(fired, vec![id]);
    }

    #[test]
    fn topmost_clickable_wins() {
        let mut reg = UiRegistry::new();
        let below = reg.insert(button_at(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let above = reg.insert(button_at(Rect::new(10.0, 10.0, 20.0, 20.0)));
        // Panels are not clickable and never steal a press.
        reg.insert(UiPanel::new("overlay", Rect::new(0.0, 0.0, 100.0, 100.0)));
        let mut router = EventRouter::new();

        let fired = router.route(&[InputEvent::left_press(15.0, 15.0)], None, &mut reg);
        assert_eq!(fired, vec![above]);
        assert_eq!(state(&reg, below), ElementState::Hovered);
    }

    #[test]
    fn secondary_button_is_ignored() {
        use easel_engine::input::{Modifiers, PointerButtonEvent};

        let (mut router, mut reg, _) = setup();
        let right = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            x: 20.0,
            y: 15.0,
            modifiers: Modifiers::default(),
        });
        assert!(router.route(&[right], None, &mut reg).is_empty());
    }

    // ── drag ──────────────────────────────────────────────────────────────

    #[test]
    fn drags_reach_the_captured_slider() {
        let mut reg = UiRegistry::new();
        let id = reg.insert(DiscreteSlider::new("s", Vec2::new(100.0, 100.0), 1, 7, 1).unwrap());
        let mut router = EventRouter::new();

        let fired = router.route(
            &[
                InputEvent::left_press(100.0, 115.0),
                InputEvent::pointer_moved(300.0, 300.0),
                InputEvent::pointer_moved(310.0, 300.0),
                InputEvent::left_release(310.0, 300.0),
            ],
            None,
            &mut reg,
        );
        assert_eq!(fired, vec![id]);
        assert_eq!(reg.downcast::<DiscreteSlider>(id).unwrap().value(), 7);
        assert_eq!(router.captured(), None);
    }

    #[test]
    fn press_outside_slider_hit_area_reaches_element_below() {
        let mut reg = UiRegistry::new();
        let below = reg.insert(button_at(Rect::new(0.0, 100.0, 400.0, 40.0)));
        let slider = reg.insert(DiscreteSlider::new("s", Vec2::new(100.0, 100.0), 1, 7, 1).unwrap());
        let mut router = EventRouter::new();

        // Inside the slider bounds, above the bar's reach.
        let fired = router.route(&[InputEvent::left_press(250.0, 102.0)], None, &mut reg);
        assert_eq!(fired, vec![below]);
        assert_eq!(router.captured(), Some(below));
        assert!(!reg.downcast::<DiscreteSlider>(slider).unwrap().is_dragging());
    }

    // ── registry changes ──────────────────────────────────────────────────

    #[test]
    fn capture_survives_truncate_when_element_remains() {
        let (mut router, mut reg, id) = setup();
        reg.insert(button_at(Rect::new(100.0, 100.0, 10.0, 10.0)));

        router.route(&[InputEvent::left_press(20.0, 15.0)], None, &mut reg);
        reg.truncate(1);
        router.retain_capture(&reg);
        assert_eq!(router.captured(), Some(id));

        router.route(&[InputEvent::left_release(20.0, 15.0)], router.pointer(), &mut reg);
        router.route(&[InputEvent::pointer_moved(150.0, 80.0)], router.pointer(), &mut reg);
        assert_eq!(state(&reg, id), ElementState::Idle);
    }

    #[test]
    fn capture_is_dropped_with_its_element() {
        let (mut router, mut reg, id) = setup();
        router.route(&[InputEvent::left_press(20.0, 15.0)], None, &mut reg);
        assert_eq!(router.captured(), Some(id));

        reg.clear();
        router.retain_capture(&reg);
        assert_eq!(router.captured(), None);
        let fired = router.route(&[InputEvent::left_release(20.0, 15.0)], router.pointer(), &mut reg);
        assert!(fired.is_empty());
    }

    // ── malformed input ───────────────────────────────────────────────────

    #[test]
    fn non_finite_coordinates_are_dropped() {
        let (mut router, mut reg, id) = setup();
        let fired = router.route(
            &[
                InputEvent::pointer_moved(20.0, 15.0),
                InputEvent::pointer_moved(f32::NAN, 3.0),
                InputEvent::left_press(f32::INFINITY, 15.0),
            ],
            None,
            &mut reg,
        );
        assert!(fired.is_empty());
        assert_eq!(router.pointer(), Some(Vec2::new(20.0, 15.0)));
        assert_eq!(state(&reg, id), ElementState::Hovered);
    }
}
