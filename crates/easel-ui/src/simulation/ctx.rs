use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use easel_engine::coords::Viewport;
use easel_engine::input::{InputFrame, InputState, Key};
use easel_engine::text::{FontId, FontSystem};

use crate::element::{Element, ElementId};
use crate::registry::UiRegistry;

/// Lifecycle state of a simulation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SimState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// Request queued by a callback or hook.
///
/// Commands are applied by the loop after the current callback returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Pause,
    Resume,
    /// Clear setup-created elements and run setup again.
    Reset,
    Stop,
    /// Deliver a named event to [`Hooks::on_event`](super::Hooks::on_event).
    Emit(String),
}

/// Stops a running simulation from anywhere, including another thread.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Read-only facts about the frame being drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameInfo {
    pub state: SimState,
    /// Index of the frame being drawn, starting at 0.
    pub frame: u64,
    pub viewport: Viewport,
    /// Seconds since the previous frame.
    pub dt: f32,
}

impl FrameInfo {
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == SimState::Paused
    }
}

macro_rules! command_methods {
    () => {
        pub fn toggle_pause(&mut self) {
            self.commands.push(Command::TogglePause);
        }

        pub fn pause(&mut self) {
            self.commands.push(Command::Pause);
        }

        pub fn resume(&mut self) {
            self.commands.push(Command::Resume);
        }

        pub fn reset(&mut self) {
            self.commands.push(Command::Reset);
        }

        pub fn stop(&mut self) {
            self.commands.push(Command::Stop);
        }

        pub fn emit(&mut self, name: impl Into<String>) {
            self.commands.push(Command::Emit(name.into()));
        }

        pub fn state(&self) -> SimState {
            self.state
        }

        pub fn is_paused(&self) -> bool {
            self.state == SimState::Paused
        }
    };
}

/// Context handed to element callbacks.
pub struct ActionCtx<'a> {
    pub(crate) state: SimState,
    pub(crate) commands: &'a mut Vec<Command>,
}

impl<'a> ActionCtx<'a> {
    pub fn new(state: SimState, commands: &'a mut Vec<Command>) -> Self {
        Self { state, commands }
    }

    command_methods!();
}

/// Context handed to logic and lifecycle hooks.
pub struct HookCtx<'a> {
    pub(crate) state: SimState,
    pub(crate) frame: u64,
    pub(crate) viewport: Viewport,
    pub(crate) input: &'a InputState,
    pub(crate) input_frame: &'a InputFrame,
    pub(crate) elements: &'a mut UiRegistry,
    pub(crate) fonts: &'a mut FontSystem,
    pub(crate) font: &'a mut Option<FontId>,
    pub(crate) commands: &'a mut Vec<Command>,
}

impl<'a> HookCtx<'a> {
    command_methods!();

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Keys and buttons currently held.
    pub fn input(&self) -> &InputState {
        self.input
    }

    /// Transitions seen this frame.
    pub fn input_frame(&self) -> &InputFrame {
        self.input_frame
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.input_frame.key_pressed(key)
    }

    pub fn add_element<E: Element>(&mut self, element: E) -> ElementId {
        self.elements.insert(element)
    }

    pub fn elements(&self) -> &UiRegistry {
        &*self.elements
    }

    pub fn elements_mut(&mut self) -> &mut UiRegistry {
        &mut *self.elements
    }

    pub fn element<T: Element>(&self, id: ElementId) -> Option<&T> {
        self.elements.downcast(id)
    }

    pub fn element_mut<T: Element>(&mut self, id: ElementId) -> Option<&mut T> {
        self.elements.downcast_mut(id)
    }

    pub fn fonts(&mut self) -> &mut FontSystem {
        &mut *self.fonts
    }

    /// Font used by the painter for UI text.
    pub fn font(&self) -> Option<FontId> {
        *self.font
    }

    pub fn set_font(&mut self, font: FontId) {
        *self.font = Some(font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_ctx_queues_in_order() {
        let mut commands = Vec::new();
        let mut ctx = ActionCtx::new(SimState::Running, &mut commands);
        ctx.toggle_pause();
        ctx.emit("launch");
        ctx.stop();
        assert!(!ctx.is_paused());
        assert_eq!(
            commands,
            vec![Command::TogglePause, Command::Emit("launch".into()), Command::Stop]
        );
    }

    #[test]
    fn stop_handle_is_shared() {
        let handle = StopHandle::default();
        let remote = handle.clone();
        assert!(!handle.is_stopped());
        std::thread::spawn(move || remote.stop()).join().unwrap();
        assert!(handle.is_stopped());
    }
}
