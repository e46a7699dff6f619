use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use easel_engine::logging::{LoggingConfig, init_logging};
use easel_ui::prelude::*;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

const GROUND_HEIGHT: f32 = 40.0;
const BALL_RADIUS: f32 = 10.0;
const MAX_CHARGE: f32 = 1.5;
const RESTITUTION: f32 = 0.7;
const GROUND: Color = Color::rgb(90, 160, 80);
const BALL: Color = Color::rgb(230, 90, 60);
const CHARGE: Color = Color::rgb(255, 200, 60);

#[derive(Debug, Default, Clone, Copy)]
struct Ball {
    pos: Vec2,
    vel: Vec2,
}

/// The template scene: hold SPACE to charge, release to launch a ball.
#[derive(Default)]
struct Launcher {
    pause_button: Option<ElementId>,
    gravity: Option<ElementId>,
    ball: Option<Ball>,
    charge: f32,
    launches: u32,
}

impl Launcher {
    fn floor(viewport_height: f32) -> f32 {
        viewport_height - GROUND_HEIGHT
    }

    fn pad(viewport_height: f32) -> Vec2 {
        Vec2::new(60.0, Self::floor(viewport_height) - BALL_RADIUS)
    }
}

impl Hooks for Launcher {
    fn setup(&mut self, ctx: &mut HookCtx<'_>) -> Result<()> {
        self.ball = None;
        self.charge = 0.0;

        let width = ctx.viewport().width;
        ctx.add_element(
            UiPanel::new("top_panel", Rect::new(0.0, 0.0, width, theme::TOP_PANEL_HEIGHT)).shadow(
                Shadow {
                    offset: Vec2::new(0.0, 6.0),
                    radius: 8.0,
                    color: theme::SHADOW,
                },
            ),
        );

        let button_y = (theme::TOP_PANEL_HEIGHT - 30.0) / 2.0;
        let label = if ctx.is_paused() { "Resume" } else { "Pause" };
        self.pause_button = Some(ctx.add_element(
            UiButton::new("pause", Rect::new(80.0, button_y, 80.0, 30.0), label).on_click(|ctx| {
                ctx.toggle_pause();
                Ok(())
            }),
        ));
        ctx.add_element(
            UiButton::new("restart", Rect::new(170.0, button_y, 80.0, 30.0), "Restart").on_click(
                |ctx| {
                    ctx.reset();
                    Ok(())
                },
            ),
        );

        let slider = DiscreteSlider::new("gravity", Vec2::new(width - 240.0, 40.0), 1, 5, 3)?
            .caption("Gravity")
            .on_change(|_, ctx| {
                ctx.emit("gravity_changed");
                Ok(())
            });
        self.gravity = Some(ctx.add_element(slider));
        Ok(())
    }

    fn update(&mut self, ctx: &mut HookCtx<'_>, dt: f32) -> Result<()> {
        let viewport = ctx.viewport();
        let floor = Self::floor(viewport.height);

        if ctx.key_down(Key::Space) {
            self.charge = (self.charge + dt).min(MAX_CHARGE);
        } else if self.charge > 0.0 {
            let power = self.charge / MAX_CHARGE;
            self.ball = Some(Ball {
                pos: Self::pad(viewport.height),
                vel: Vec2::new(120.0 + 280.0 * power, -250.0 - 550.0 * power),
            });
            self.charge = 0.0;
            self.launches += 1;
            log::info!("launch #{} at {:.0}% power", self.launches, power * 100.0);
        }

        let level = self
            .gravity
            .and_then(|id| ctx.element::<DiscreteSlider>(id))
            .map_or(3, |s| s.value());
        let gravity = 200.0 * level as f32;

        if let Some(ball) = self.ball.as_mut() {
            ball.vel.y += gravity * dt;
            ball.pos = ball.pos + ball.vel * dt;

            if ball.pos.y + BALL_RADIUS > floor {
                ball.pos.y = floor - BALL_RADIUS;
                ball.vel.y = -ball.vel.y * RESTITUTION;
                ball.vel.x *= 0.98;
            }
            if ball.pos.x - BALL_RADIUS < 0.0 || ball.pos.x + BALL_RADIUS > viewport.width {
                ball.pos.x = ball.pos.x.clamp(BALL_RADIUS, viewport.width - BALL_RADIUS);
                ball.vel.x = -ball.vel.x * RESTITUTION;
            }
        }
        Ok(())
    }

    fn draw_static(&mut self, painter: &mut Painter<'_>, frame: &FrameInfo) -> Result<()> {
        let floor = Self::floor(frame.viewport.height);
        painter.fill_rect(Rect::new(0.0, floor, frame.viewport.width, GROUND_HEIGHT), GROUND);
        let pad = Self::pad(frame.viewport.height);
        painter.fill_rounded_rect(
            Rect::new(pad.x - 20.0, floor - 4.0, 40.0, 8.0),
            4.0,
            theme::PANEL,
            None,
        );
        Ok(())
    }

    fn draw_dynamic(&mut self, painter: &mut Painter<'_>, frame: &FrameInfo) -> Result<()> {
        let (text, color) = if frame.is_paused() {
            ("Simulation paused", theme::PAUSED)
        } else {
            ("Hold SPACE to launch!", theme::INSTRUCTION)
        };
        painter.text(text, theme::FONT_SIZE_SMALL, color, Vec2::new(85.0, theme::TOP_PANEL_HEIGHT - 20.0));

        let pad = Self::pad(frame.viewport.height);
        if self.charge > 0.0 {
            let width = 60.0 * self.charge / MAX_CHARGE;
            painter.fill_rounded_rect(Rect::new(pad.x - 30.0, pad.y - 40.0, width, 6.0), 3.0, CHARGE, None);
        }

        let ball = self.ball.map_or(pad, |b| b.pos);
        painter.fill_circle(
            ball,
            BALL_RADIUS,
            BALL,
            Some(Border { width: 2.0, color: theme::BUTTON_BORDER }),
        );
        Ok(())
    }

    fn on_event(&mut self, ctx: &mut HookCtx<'_>, name: &str) -> Result<()> {
        if name == "gravity_changed" {
            if let Some(slider) = self.gravity.and_then(|id| ctx.element::<DiscreteSlider>(id)) {
                log::info!("gravity set to {}", slider.value());
            }
        }
        Ok(())
    }

    fn on_pause_changed(&mut self, ctx: &mut HookCtx<'_>, paused: bool) -> Result<()> {
        if let Some(button) = self.pause_button.and_then(|id| ctx.element_mut::<UiButton>(id)) {
            button.set_label(if paused { "Resume" } else { "Pause" });
        }
        Ok(())
    }
}

fn find_font() -> Option<PathBuf> {
    FONT_CANDIDATES.iter().map(Path::new).find(|p| p.exists()).map(Path::to_path_buf)
}

fn main() -> ExitCode {
    let config = match std::env::args_os().nth(1) {
        Some(path) => SimulationConfig::load(path),
        None => Ok(SimulationConfig::default()),
    };

    let logging = config
        .as_ref()
        .map(|c| c.logging.to_logging_config())
        .unwrap_or_else(|_| LoggingConfig::default());
    init_logging(logging);

    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::from(2);
        }
    };
    if config.font_path.is_none() {
        config.font_path = find_font();
    }
    if config.font_path.is_none() {
        log::warn!("no system font found; labels will not be drawn");
    }

    let result = Simulation::open(config, Launcher::default()).and_then(Simulation::run);
    match result {
        Ok(summary) => {
            log::info!("exited after {} frames ({:?})", summary.frames, summary.exit);
            ExitCode::SUCCESS
        }
        Err(e) if e.is_config() => {
            log::error!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            log::error!("{:#}", anyhow::Error::from(e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_engine::coords::Viewport;
    use easel_engine::input::InputEvent;
    use easel_engine::platform::HeadlessPlatform;

    fn run(platform: HeadlessPlatform) -> RunSummary {
        let config = SimulationConfig::new(800, 600, 1000, "demo");
        Simulation::with_platform(config, platform, Launcher::default())
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn template_draws_panel_buttons_and_scene() {
        let mut p = HeadlessPlatform::new(Viewport::new(800.0, 600.0));
        p.idle(2);
        let log = p.frame_log();

        let summary = run(p);
        assert_eq!(summary.frames, 2);
        let frame = log.last().unwrap();
        assert_eq!(frame.background, theme::SKY_BLUE);
        assert!(frame.commands.len() > 6);
    }

    #[test]
    fn pause_and_restart_buttons_work() {
        let mut p = HeadlessPlatform::new(Viewport::new(800.0, 600.0));
        // Pause, then restart while paused, then resume.
        p.push_batch([InputEvent::left_press(100.0, 45.0), InputEvent::left_release(100.0, 45.0)])
            .push_batch([InputEvent::left_press(200.0, 45.0), InputEvent::left_release(200.0, 45.0)])
            .push_batch([InputEvent::left_press(100.0, 45.0), InputEvent::left_release(100.0, 45.0)])
            .idle(1);

        let summary = run(p);
        assert_eq!(summary.frames, 4);
        assert_eq!(summary.exit, ExitReason::CloseRequested);
    }
}
