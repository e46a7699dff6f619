mod translate;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, GpuInit, Presenter};
use crate::input::InputEvent;
use crate::paint::Color;
use crate::render::Canvas;
use crate::scene::DrawList;
use crate::text::FontSystem;

use super::{Platform, WindowConfig};
use translate::Translator;

/// Polls made while waiting for the window to come up.
const STARTUP_PUMPS: usize = 64;

/// winit + wgpu platform.
///
/// The window and GPU are acquired in [`DesktopPlatform::new`] and released
/// when the platform is dropped.
pub struct DesktopPlatform {
    event_loop: EventLoop<()>,
    handler: Handler,
}

struct Surface {
    // Field order is drop order: GPU resources go before the window.
    presenter: Presenter,
    gpu: Gpu,
    canvas: Canvas,
    window: Arc<Window>,
}

struct Handler {
    config: WindowConfig,
    surface: Option<Surface>,
    translator: Translator,
    pending: Vec<InputEvent>,
    init_error: Option<anyhow::Error>,
}

impl DesktopPlatform {
    pub fn new(config: WindowConfig) -> Result<Self> {
        let mut event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut handler = Handler {
            config,
            surface: None,
            translator: Translator::default(),
            pending: Vec::new(),
            init_error: None,
        };

        for _ in 0..STARTUP_PUMPS {
            let status = event_loop.pump_app_events(Some(Duration::from_millis(5)), &mut handler);
            if let Some(err) = handler.init_error.take() {
                return Err(err);
            }
            if handler.surface.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                return Err(anyhow!("event loop exited during startup (code {code})"));
            }
        }
        anyhow::ensure!(handler.surface.is_some(), "window was not created");

        log::info!("window `{}` ready", handler.config.title);
        Ok(Self { event_loop, handler })
    }
}

impl Platform for DesktopPlatform {
    fn viewport(&self) -> Viewport {
        match &self.handler.surface {
            Some(s) => {
                let scale = s.window.scale_factor();
                let size: LogicalSize<f32> = s.window.inner_size().to_logical(scale);
                Viewport::new(size.width, size.height).with_scale(scale as f32)
            }
            None => Viewport::new(self.handler.config.width as f32, self.handler.config.height as f32),
        }
    }

    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<()> {
        let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.handler);
        out.append(&mut self.handler.pending);
        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with code {code}");
            out.push(InputEvent::CloseRequested);
        }
        Ok(())
    }

    fn present(&mut self, list: &mut DrawList, fonts: &FontSystem, background: Color) -> Result<()> {
        let Some(s) = self.handler.surface.as_mut() else {
            return Ok(());
        };
        let size = s.gpu.size();
        if size.width == 0 || size.height == 0 {
            // Minimized.
            return Ok(());
        }

        s.canvas.resize(size.width, size.height);
        s.canvas.set_scale(s.window.scale_factor() as f32);
        s.canvas.clear(background);
        s.canvas.render(list, fonts);

        s.window.pre_present_notify();
        s.presenter.present(&mut s.gpu, &s.canvas)
    }
}

impl Drop for DesktopPlatform {
    fn drop(&mut self) {
        if self.handler.surface.take().is_some() {
            log::info!("window `{}` closed", self.handler.config.title);
        }
    }
}

impl Handler {
    fn create_surface(&self, event_loop: &ActiveEventLoop) -> Result<Surface> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width as f64, self.config.height as f64))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), GpuInit::default()))
            .context("GPU initialization failed")?;
        let presenter = Presenter::new(&gpu);
        let size = gpu.size();
        let mut canvas = Canvas::new(size.width, size.height);
        canvas.set_scale(window.scale_factor() as f32);

        Ok(Surface { presenter, gpu, canvas, window })
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }
        match self.create_surface(event_loop) {
            Ok(s) => self.surface = Some(s),
            Err(e) => {
                log::error!("failed to open window: {e:#}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(s) = self.surface.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::Resized(size) => s.gpu.resize(*size),
            WindowEvent::ScaleFactorChanged { .. } => s.gpu.resize(s.window.inner_size()),
            _ => {}
        }

        if let Some(ev) = self.translator.translate(s.window.scale_factor(), &event) {
            self.pending.push(ev);
        }
    }
}
