//! The frame loop.
//!
//! A [`Simulation`] owns a [`Platform`], the registered elements and the
//! caller's [`Hooks`]. [`Simulation::run`] drives them one frame at a time:
//! poll, route, update, draw, present, wait.

mod config;
mod ctx;
mod error;
pub mod hooks;

use easel_engine::coords::Vec2;
use easel_engine::input::{InputEvent, InputFrame, InputState, Key, KeyState};
use easel_engine::platform::{DesktopPlatform, Platform};
use easel_engine::scene::{DrawList, ZIndex};
use easel_engine::text::{FontId, FontSystem};
use easel_engine::time::{FrameClock, FrameLimiter};

use crate::element::{Element, ElementId};
use crate::painter::Painter;
use crate::registry::UiRegistry;
use crate::router::EventRouter;

pub use config::{LogSettings, MAX_DIMENSION, MAX_FPS, SimulationConfig};
pub use ctx::{ActionCtx, Command, FrameInfo, HookCtx, SimState, StopHandle};
pub use error::{ConfigError, SimError};
pub use hooks::{FnHooks, Hooks, NoHooks};

/// Upper bound on command rounds per apply, so hooks that keep queueing
/// commands from `on_event` cannot spin forever.
const MAX_COMMAND_ROUNDS: usize = 64;

/// Why [`Simulation::run`] returned.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitReason {
    /// The platform reported a window close request.
    CloseRequested,
    /// The configured quit key was pressed.
    QuitKey,
    /// A callback or hook queued [`Command::Stop`].
    Stopped,
    /// [`StopHandle::stop`] was called.
    StopHandle,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RunSummary {
    /// Frames that were presented.
    pub frames: u64,
    pub exit: ExitReason,
}

pub struct Simulation {
    config: SimulationConfig,
    platform: Box<dyn Platform>,
    hooks: Box<dyn Hooks>,
    state: SimState,

    elements: UiRegistry,
    /// Elements below this index were added before `run` and survive resets.
    persistent: usize,
    router: EventRouter,

    fonts: FontSystem,
    font: Option<FontId>,
    draw_list: DrawList,

    clock: FrameClock,
    limiter: FrameLimiter,
    input: InputState,
    input_frame: InputFrame,

    stop: StopHandle,
    exit: Option<ExitReason>,
    commands: Vec<Command>,
    events: Vec<InputEvent>,
    frames: u64,
}

impl Simulation {
    /// Opens a desktop window for `config`.
    pub fn open(config: SimulationConfig, hooks: impl Hooks + 'static) -> Result<Self, SimError> {
        config.validate()?;
        let platform = DesktopPlatform::new(config.window()).map_err(SimError::Platform)?;
        Self::with_platform(config, platform, hooks)
    }

    /// Runs on any platform, e.g. a `HeadlessPlatform` in tests.
    pub fn with_platform(
        config: SimulationConfig,
        platform: impl Platform + 'static,
        hooks: impl Hooks + 'static,
    ) -> Result<Self, SimError> {
        config.validate()?;

        let mut fonts = FontSystem::new();
        let font = match &config.font_path {
            Some(path) => match fonts.load_font_file(path) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("{e}; text will not be drawn");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            limiter: FrameLimiter::new(config.target_fps),
            config,
            platform: Box::new(platform),
            hooks: Box::new(hooks),
            state: SimState::Stopped,
            elements: UiRegistry::new(),
            persistent: 0,
            router: EventRouter::new(),
            fonts,
            font,
            draw_list: DrawList::new(),
            clock: FrameClock::new(),
            input: InputState::default(),
            input_frame: InputFrame::default(),
            stop: StopHandle::default(),
            exit: None,
            commands: Vec::new(),
            events: Vec::new(),
            frames: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Registers an element that lives for the whole run, resets included.
    pub fn add_element<E: Element>(&mut self, element: E) -> ElementId {
        self.elements.insert(element)
    }

    pub fn elements(&self) -> &UiRegistry {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut UiRegistry {
        &mut self.elements
    }

    pub fn fonts_mut(&mut self) -> &mut FontSystem {
        &mut self.fonts
    }

    /// Replaces the UI font, e.g. with one loaded through [`fonts_mut`](Self::fonts_mut).
    pub fn set_font(&mut self, font: FontId) {
        self.font = Some(font);
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Runs until a stop is requested, then tears the platform down.
    pub fn run(mut self) -> Result<RunSummary, SimError> {
        log::info!(
            "starting simulation `{}` ({}x{} at {} fps)",
            self.config.title,
            self.config.width,
            self.config.height,
            self.config.target_fps
        );

        let result = self.run_frames();
        self.state = SimState::Stopped;

        match result {
            Ok(exit) => {
                log::info!("simulation stopped after {} frames ({exit:?})", self.frames);
                Ok(RunSummary { frames: self.frames, exit })
            }
            Err(e) => {
                log::error!("simulation failed after {} frames: {e:#}", self.frames);
                if let Err(present) =
                    self.platform.present(&mut self.draw_list, &self.fonts, self.config.background)
                {
                    log::warn!("final present failed: {present:#}");
                }
                Err(e)
            }
        }
    }

    fn run_frames(&mut self) -> Result<ExitReason, SimError> {
        if self.stop.is_stopped() {
            return Ok(ExitReason::StopHandle);
        }

        self.state = SimState::Running;
        self.persistent = self.elements.len();
        self.call_hook(0, "setup", |h, ctx| h.setup(ctx))?;
        self.apply_commands(0)?;
        self.clock.reset();

        loop {
            if let Some(exit) = self.pending_exit() {
                return Ok(exit);
            }

            let time = self.clock.tick();
            let frame = time.frame_index;
            log::trace!("frame {frame} (dt {:.4}s)", time.dt);

            // Input
            let pointer = self.pointer();
            self.input_frame.clear();
            self.events.clear();
            self.platform.poll_events(&mut self.events).map_err(SimError::Platform)?;
            for ev in self.events.drain(..) {
                self.input.apply_event(&mut self.input_frame, ev);
            }
            if self.input_frame.close_requested {
                log::info!("close requested");
                return Ok(ExitReason::CloseRequested);
            }

            // Routing and callbacks
            let triggered =
                self.router.route(&self.input_frame.events, pointer, &mut self.elements);
            for id in triggered {
                self.invoke(id)?;
            }
            self.apply_commands(frame)?;
            if let Some(exit) = self.pending_exit() {
                return Ok(exit);
            }

            for key in self.pressed_keys() {
                if let Some(exit) = self.pending_exit() {
                    return Ok(exit);
                }
                if Some(key) == self.config.quit_key {
                    log::info!("quit key {key} pressed");
                    return Ok(ExitReason::QuitKey);
                }
                if Some(key) == self.config.pause_key {
                    self.commands.push(Command::TogglePause);
                }
                self.call_hook(frame, "on_key", |h, ctx| h.on_key(ctx, key))?;
            }
            self.apply_commands(frame)?;

            if let Some(exit) = self.pending_exit() {
                return Ok(exit);
            }

            // Logic
            if self.state == SimState::Running {
                self.call_hook(frame, "update", |h, ctx| h.update(ctx, time.dt))?;
                self.apply_commands(frame)?;
                if let Some(exit) = self.pending_exit() {
                    return Ok(exit);
                }
            }

            // Draw
            for element in self.elements.iter_mut() {
                element.animate(time.dt);
            }
            let info = FrameInfo {
                state: self.state,
                frame,
                viewport: self.platform.viewport(),
                dt: time.dt,
            };
            self.draw(&info)?;

            self.platform
                .present(&mut self.draw_list, &self.fonts, self.config.background)
                .map_err(SimError::Platform)?;
            self.frames += 1;

            self.limiter.wait();
        }
    }

    fn pending_exit(&self) -> Option<ExitReason> {
        if self.stop.is_stopped() {
            return Some(ExitReason::StopHandle);
        }
        self.exit
    }

    fn pointer(&self) -> Option<Vec2> {
        self.input.pointer_pos.map(Vec2::from)
    }

    /// Keys that went down this frame, in arrival order, repeats excluded.
    fn pressed_keys(&self) -> Vec<Key> {
        self.input_frame
            .events
            .iter()
            .filter_map(|ev| match ev {
                InputEvent::Key { key, state: KeyState::Pressed, repeat: false, .. } => Some(*key),
                _ => None,
            })
            .filter(|key| self.input_frame.key_pressed(*key))
            .collect()
    }

    fn invoke(&mut self, id: ElementId) -> Result<(), SimError> {
        let state = self.state;
        let Some(element) = self.elements.get_mut(id) else {
            return Ok(());
        };
        let origin = format!("callback of `{}`", element.name());
        let Some(clickable) = element.as_clickable_mut() else {
            return Ok(());
        };

        log::debug!("invoking {origin}");
        let mut ctx = ActionCtx::new(state, &mut self.commands);
        clickable.invoke(&mut ctx).map_err(|e| SimError::callback(origin, e))
    }

    fn draw(&mut self, info: &FrameInfo) -> Result<(), SimError> {
        self.draw_list.clear();
        let mut painter = Painter::new(&mut self.draw_list, &self.fonts, self.font);

        self.hooks
            .draw_static(&mut painter, info)
            .map_err(|e| SimError::callback("draw_static", e))?;

        painter.set_layer(ZIndex::UI);
        for element in self.elements.iter() {
            element.draw(&mut painter);
        }

        painter.set_layer(ZIndex::OVERLAY);
        self.hooks
            .draw_dynamic(&mut painter, info)
            .map_err(|e| SimError::callback("draw_dynamic", e))
    }

    fn call_hook(
        &mut self,
        frame: u64,
        origin: &str,
        f: impl FnOnce(&mut dyn Hooks, &mut HookCtx<'_>) -> anyhow::Result<()>,
    ) -> Result<(), SimError> {
        let viewport = self.platform.viewport();
        let Simulation {
            hooks,
            state,
            elements,
            fonts,
            font,
            input,
            input_frame,
            commands,
            ..
        } = self;

        let mut ctx = HookCtx {
            state: *state,
            frame,
            viewport,
            input,
            input_frame,
            elements,
            fonts,
            font,
            commands,
        };
        f(hooks.as_mut(), &mut ctx).map_err(|e| SimError::callback(origin, e))
    }

    /// Applies queued commands, including ones queued while applying.
    fn apply_commands(&mut self, frame: u64) -> Result<(), SimError> {
        let mut rounds = 0;
        while !self.commands.is_empty() {
            rounds += 1;
            if rounds > MAX_COMMAND_ROUNDS {
                log::warn!("dropping {} commands queued in a feedback loop", self.commands.len());
                self.commands.clear();
                break;
            }

            for command in std::mem::take(&mut self.commands) {
                if self.exit.is_some() {
                    break;
                }
                match command {
                    Command::TogglePause => {
                        let paused = self.state != SimState::Paused;
                        self.set_paused(frame, paused)?;
                    }
                    Command::Pause => self.set_paused(frame, true)?,
                    Command::Resume => self.set_paused(frame, false)?,
                    Command::Reset => self.reset(frame)?,
                    Command::Stop => {
                        log::info!("stop requested");
                        self.exit = Some(ExitReason::Stopped);
                    }
                    Command::Emit(name) => {
                        log::debug!("event `{name}`");
                        self.call_hook(frame, "on_event", |h, ctx| h.on_event(ctx, &name))?;
                    }
                }
            }

            if self.exit.is_some() {
                self.commands.clear();
            }
        }
        Ok(())
    }

    fn set_paused(&mut self, frame: u64, paused: bool) -> Result<(), SimError> {
        let next = if paused { SimState::Paused } else { SimState::Running };
        if self.state == next {
            return Ok(());
        }
        self.state = next;
        log::info!("simulation {}", if paused { "paused" } else { "resumed" });
        self.call_hook(frame, "on_pause_changed", |h, ctx| h.on_pause_changed(ctx, paused))
    }

    fn reset(&mut self, frame: u64) -> Result<(), SimError> {
        log::info!("resetting simulation");
        self.elements.truncate(self.persistent);
        self.router.retain_capture(&self.elements);
        self.call_hook(frame, "setup", |h, ctx| h.setup(ctx))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use anyhow::anyhow;
    use easel_engine::coords::{Rect, Viewport};
    use easel_engine::platform::HeadlessPlatform;

    use super::*;
    use crate::element::{ElementState, Hoverable};
    use crate::widgets::{UiButton, UiPanel};

    fn config() -> SimulationConfig {
        SimulationConfig::new(200, 100, MAX_FPS, "test")
    }

    fn platform() -> HeadlessPlatform {
        HeadlessPlatform::new(Viewport::new(200.0, 100.0))
    }

    fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let c = Rc::new(Cell::new(0));
        (c.clone(), c)
    }

    fn button() -> UiButton {
        UiButton::new("btn", Rect::new(10.0, 10.0, 50.0, 20.0), "Go")
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn runs_until_close_requested() {
        let mut p = platform();
        p.idle(3);
        let log = p.frame_log();

        let (updates, seen) = counter();
        let hooks = hooks::from_fn(move |_, _| {
            updates.set(updates.get() + 1);
            Ok(())
        });
        let sim = Simulation::with_platform(config(), p, hooks).unwrap();
        assert_eq!(sim.state(), SimState::Stopped);

        let summary = sim.run().unwrap();
        assert_eq!(summary, RunSummary { frames: 3, exit: ExitReason::CloseRequested });
        assert_eq!(seen.get(), 3);
        assert_eq!(log.len(), 3);
        assert_eq!(log.last().unwrap().background, config().background);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let err = Simulation::with_platform(SimulationConfig::new(0, 100, 60, "x"), platform(), NoHooks)
            .err()
            .unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn missing_font_is_not_fatal() {
        let mut c = config();
        c.font_path = Some("/nonexistent/font.ttf".into());
        let sim = Simulation::with_platform(c, platform(), NoHooks).unwrap();
        assert!(sim.font.is_none());
    }

    // ── stopping ──────────────────────────────────────────────────────────

    #[test]
    fn stop_handle_ends_the_run_without_further_hooks() {
        let p = platform().close_when_exhausted(false);
        let log = p.frame_log();

        let (updates, seen) = counter();
        let (draws, drawn) = counter();
        let slot = Rc::new(RefCell::new(None::<StopHandle>));
        let handle_slot = slot.clone();
        let hooks = hooks::from_fn(move |_, _| {
            updates.set(updates.get() + 1);
            if updates.get() == 3 {
                if let Some(h) = handle_slot.borrow().as_ref() {
                    h.stop();
                }
            }
            Ok(())
        })
        .on_draw_dynamic(move |_, _| {
            draws.set(draws.get() + 1);
            Ok(())
        });

        let sim = Simulation::with_platform(config(), p, hooks).unwrap();
        *slot.borrow_mut() = Some(sim.stop_handle());

        let summary = sim.run().unwrap();
        assert_eq!(summary.exit, ExitReason::StopHandle);
        assert_eq!(seen.get(), 3);
        assert_eq!(summary.frames, 2);
        assert_eq!(drawn.get(), 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn stop_before_run_skips_setup() {
        let (setups, seen) = counter();
        let hooks = hooks::from_fn(|_, _| Ok(())).on_setup(move |_| {
            setups.set(setups.get() + 1);
            Ok(())
        });
        let sim = Simulation::with_platform(config(), platform(), hooks).unwrap();
        sim.stop_handle().stop();

        let summary = sim.run().unwrap();
        assert_eq!(summary, RunSummary { frames: 0, exit: ExitReason::StopHandle });
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn stop_command_from_update_skips_drawing() {
        let p = platform().close_when_exhausted(false);
        let log = p.frame_log();

        let (draws, drawn) = counter();
        let hooks = hooks::from_fn(|ctx, _| {
            if ctx.frame() == 1 {
                ctx.stop();
            }
            Ok(())
        })
        .on_draw_static(move |_, _| {
            draws.set(draws.get() + 1);
            Ok(())
        });

        let summary = Simulation::with_platform(config(), p, hooks).unwrap().run().unwrap();
        assert_eq!(summary, RunSummary { frames: 1, exit: ExitReason::Stopped });
        assert_eq!(drawn.get(), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn quit_key_ends_the_run_before_key_hooks() {
        let mut p = platform();
        p.push_batch([InputEvent::key_press(Key::Escape)]);

        let (keys, seen) = counter();
        let hooks = hooks::from_fn(|_, _| Ok(())).on_key(move |_, _| {
            keys.set(keys.get() + 1);
            Ok(())
        });

        let summary = Simulation::with_platform(config(), p, hooks).unwrap().run().unwrap();
        assert_eq!(summary, RunSummary { frames: 0, exit: ExitReason::QuitKey });
        assert_eq!(seen.get(), 0);
    }

    // ── pause ─────────────────────────────────────────────────────────────

    #[test]
    fn pause_stops_update_but_not_hover() {
        let mut p = platform();
        p.push_batch([InputEvent::key_press(Key::P)])
            .push_batch([InputEvent::pointer_moved(20.0, 15.0)])
            .push_batch([InputEvent::key_press(Key::A)]);

        let (updates, seen) = counter();
        let hovered = Rc::new(Cell::new(false));
        let hovered_in_hook = hovered.clone();
        let pauses = Rc::new(RefCell::new(Vec::new()));
        let pauses_in_hook = pauses.clone();

        let mut sim = Simulation::with_platform(config(), p, NoHooks).unwrap();
        let id = sim.add_element(button());
        sim.hooks = Box::new(
            hooks::from_fn(move |_, _| {
                updates.set(updates.get() + 1);
                Ok(())
            })
            .on_key(move |ctx, key| {
                if key == Key::A {
                    let b = ctx.element::<UiButton>(id).unwrap();
                    hovered_in_hook.set(b.is_hovered());
                }
                Ok(())
            })
            .on_pause_changed(move |_, paused| {
                pauses_in_hook.borrow_mut().push(paused);
                Ok(())
            }),
        );

        let summary = sim.run().unwrap();
        assert_eq!(summary.frames, 3);
        assert_eq!(seen.get(), 0);
        assert!(hovered.get());
        assert_eq!(*pauses.borrow(), vec![true]);
    }

    #[test]
    fn button_toggles_pause_twice() {
        let mut p = platform();
        p.push_batch([InputEvent::left_press(20.0, 15.0), InputEvent::left_release(20.0, 15.0)])
            .idle(1)
            .push_batch([InputEvent::left_press(20.0, 15.0), InputEvent::left_release(20.0, 15.0)])
            .idle(1);

        let (updates, seen) = counter();
        let hooks = hooks::from_fn(move |_, _| {
            updates.set(updates.get() + 1);
            Ok(())
        });
        let mut sim = Simulation::with_platform(config(), p, hooks).unwrap();
        sim.add_element(button().on_click(|ctx| {
            ctx.toggle_pause();
            Ok(())
        }));

        let summary = sim.run().unwrap();
        assert_eq!(summary.frames, 4);
        // Paused for frames 0 and 1, running again for 2 and 3.
        assert_eq!(seen.get(), 2);
    }

    // ── commands ──────────────────────────────────────────────────────────

    #[test]
    fn reset_keeps_persistent_elements_and_reruns_setup() {
        let mut p = platform();
        p.push_batch([InputEvent::left_press(20.0, 15.0), InputEvent::left_release(20.0, 15.0)])
            .idle(1);

        let (setups, setup_count) = counter();
        let counts = Rc::new(RefCell::new(Vec::new()));
        let counts_in_hook = counts.clone();
        let hooks = hooks::from_fn(move |ctx, _| {
            counts_in_hook.borrow_mut().push(ctx.elements().len());
            Ok(())
        })
        .on_setup(move |ctx| {
            setups.set(setups.get() + 1);
            ctx.add_element(UiPanel::new("panel", Rect::new(0.0, 50.0, 200.0, 50.0)));
            Ok(())
        });

        let mut sim = Simulation::with_platform(config(), p, hooks).unwrap();
        sim.add_element(button().on_click(|ctx| {
            ctx.reset();
            Ok(())
        }));

        sim.run().unwrap();
        assert_eq!(setup_count.get(), 2);
        assert_eq!(*counts.borrow(), vec![2, 2]);
    }

    #[test]
    fn persistent_button_settles_after_reset() {
        let mut p = platform();
        p.push_batch([InputEvent::left_press(20.0, 15.0)])
            .push_batch([InputEvent::left_release(20.0, 15.0)])
            .push_batch([InputEvent::pointer_moved(150.0, 80.0)]);

        let mut sim = Simulation::with_platform(config(), p, NoHooks).unwrap();
        let id = sim.add_element(button().on_click(|ctx| {
            ctx.reset();
            Ok(())
        }));

        let states = Rc::new(RefCell::new(Vec::new()));
        let states_in_hook = states.clone();
        sim.hooks = Box::new(hooks::from_fn(move |ctx, _| {
            let b = ctx.element::<UiButton>(id).unwrap();
            states_in_hook.borrow_mut().push(b.state());
            Ok(())
        }));

        sim.run().unwrap();
        assert_eq!(
            *states.borrow(),
            vec![ElementState::Pressed, ElementState::Hovered, ElementState::Idle]
        );
    }

    #[test]
    fn stop_from_callback_skips_key_hooks() {
        let mut p = platform();
        p.push_batch([InputEvent::left_press(20.0, 15.0), InputEvent::key_press(Key::A)]);

        let (keys, seen) = counter();
        let hooks = hooks::from_fn(|_, _| Ok(())).on_key(move |_, _| {
            keys.set(keys.get() + 1);
            Ok(())
        });
        let mut sim = Simulation::with_platform(config(), p, hooks).unwrap();
        sim.add_element(button().on_click(|ctx| {
            ctx.stop();
            Ok(())
        }));

        let summary = sim.run().unwrap();
        assert_eq!(summary, RunSummary { frames: 0, exit: ExitReason::Stopped });
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn emitted_events_reach_on_event() {
        let mut p = platform();
        p.push_batch([InputEvent::left_press(20.0, 15.0)]);

        let names = Rc::new(RefCell::new(Vec::new()));
        let names_in_hook = names.clone();
        let hooks = hooks::from_fn(|_, _| Ok(())).on_event(move |_, name| {
            names_in_hook.borrow_mut().push(name.to_string());
            Ok(())
        });

        let mut sim = Simulation::with_platform(config(), p, hooks).unwrap();
        sim.add_element(button().on_click(|ctx| {
            ctx.emit("launch");
            Ok(())
        }));

        sim.run().unwrap();
        assert_eq!(*names.borrow(), vec!["launch".to_string()]);
    }

    #[test]
    fn runaway_event_chain_is_cut_off() {
        let mut p = platform();
        p.push_batch([InputEvent::left_press(20.0, 15.0)]);

        let (events, seen) = counter();
        let hooks = hooks::from_fn(|_, _| Ok(())).on_event(move |ctx, name| {
            events.set(events.get() + 1);
            ctx.emit(name);
            Ok(())
        });

        let mut sim = Simulation::with_platform(config(), p, hooks).unwrap();
        sim.add_element(button().on_click(|ctx| {
            ctx.emit("again");
            Ok(())
        }));

        let summary = sim.run().unwrap();
        assert_eq!(summary.exit, ExitReason::CloseRequested);
        assert_eq!(seen.get(), MAX_COMMAND_ROUNDS as u32);
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn callback_error_ends_run_after_final_present() {
        let mut p = platform();
        p.idle(1).push_batch([InputEvent::left_press(20.0, 15.0)]).idle(5);
        let log = p.frame_log();

        let mut sim = Simulation::with_platform(config(), p, NoHooks).unwrap();
        sim.add_element(button().on_click(|_| Err(anyhow!("boom"))));

        let err = sim.run().unwrap_err();
        match err {
            SimError::Callback { origin, source } => {
                assert!(origin.contains("btn"));
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        // One regular frame plus the final present.
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn hook_error_names_the_hook() {
        let mut p = platform();
        p.idle(1);
        let log = p.frame_log();

        let hooks = hooks::from_fn(|_, _| Err(anyhow!("bad step")));
        let err = Simulation::with_platform(config(), p, hooks)
            .unwrap()
            .run()
            .unwrap_err();
        assert!(matches!(err, SimError::Callback { ref origin, .. } if origin == "update"));
        assert_eq!(log.len(), 1);
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn layers_are_static_then_ui_then_dynamic() {
        let mut p = platform();
        p.idle(1);
        let log = p.frame_log();

        let hooks = hooks::from_fn(|_, _| Ok(()))
            .on_draw_static(|painter, _| {
                painter.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), easel_engine::paint::Color::BLACK);
                Ok(())
            })
            .on_draw_dynamic(|painter, _| {
                painter.fill_rect(Rect::new(0.0, 0.0, 3.0, 3.0), easel_engine::paint::Color::WHITE);
                Ok(())
            });
        let mut sim = Simulation::with_platform(config(), p, hooks).unwrap();
        sim.add_element(UiPanel::new("panel", Rect::new(0.0, 0.0, 2.0, 2.0)));
        sim.run().unwrap();

        let frame = log.last().unwrap();
        let widths: Vec<f32> = frame.commands.iter().map(|c| c.bounds().width()).collect();
        assert_eq!(widths.first(), Some(&1.0));
        assert_eq!(widths.last(), Some(&3.0));
    }
}
