use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::coords::Viewport;
use crate::input::InputEvent;
use crate::paint::Color;
use crate::render::Canvas;
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::Platform;

/// What one `present` call received.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub background: Color,
    /// Commands in paint order.
    pub commands: Vec<DrawCmd>,
}

/// Shared view of the frames a [`HeadlessPlatform`] presented.
///
/// Stays readable after the platform itself was moved into a loop and dropped.
#[derive(Debug, Clone, Default)]
pub struct FrameLog(Arc<Mutex<Vec<FrameRecord>>>);

impl FrameLog {
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn last(&self) -> Option<FrameRecord> {
        self.lock().last().cloned()
    }

    pub fn get(&self, index: usize) -> Option<FrameRecord> {
        self.lock().get(index).cloned()
    }

    fn push(&self, record: FrameRecord) {
        self.lock().push(record);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<FrameRecord>> {
        // A poisoned log only means a test thread panicked mid-push.
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Scripted platform without a window.
///
/// Each poll hands out the next scripted batch of events. Once the script is
/// exhausted it either stays silent or asks to close, depending on
/// [`close_when_exhausted`](Self::close_when_exhausted).
pub struct HeadlessPlatform {
    viewport: Viewport,
    script: VecDeque<Vec<InputEvent>>,
    close_when_exhausted: bool,
    log: FrameLog,
    canvas: Option<Canvas>,
    polls: u64,
}

impl HeadlessPlatform {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            script: VecDeque::new(),
            close_when_exhausted: true,
            log: FrameLog::default(),
            canvas: None,
            polls: 0,
        }
    }

    /// Queues one poll's worth of events.
    pub fn push_batch(&mut self, events: impl IntoIterator<Item = InputEvent>) -> &mut Self {
        self.script.push_back(events.into_iter().collect());
        self
    }

    /// Queues `n` polls that deliver nothing.
    pub fn idle(&mut self, n: usize) -> &mut Self {
        for _ in 0..n {
            self.script.push_back(Vec::new());
        }
        self
    }

    pub fn close_when_exhausted(mut self, close: bool) -> Self {
        self.close_when_exhausted = close;
        self
    }

    /// Rasterizes every presented frame into an internal canvas.
    pub fn with_rasterizer(mut self) -> Self {
        let (w, h) = self.viewport.physical_size();
        let mut canvas = Canvas::new(w, h);
        canvas.set_scale(self.viewport.scale_factor);
        self.canvas = Some(canvas);
        self
    }

    pub fn frame_log(&self) -> FrameLog {
        self.log.clone()
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl Platform for HeadlessPlatform {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<()> {
        self.polls += 1;
        match self.script.pop_front() {
            Some(batch) => out.extend(batch),
            None if self.close_when_exhausted => out.push(InputEvent::CloseRequested),
            None => {}
        }
        Ok(())
    }

    fn present(&mut self, list: &mut DrawList, fonts: &FontSystem, background: Color) -> Result<()> {
        let commands = list.iter_in_paint_order().map(|i| i.cmd.clone()).collect();
        self.log.push(FrameRecord { background, commands });

        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear(background);
            canvas.render(list, fonts);
        }
        Ok(())
    }
}
