//! Time subsystem.
//!
//! - `FrameClock` measures the delta between loop iterations
//! - `FrameLimiter` sleeps out the rest of a frame to hold a target rate

mod frame_clock;
mod limiter;

pub use frame_clock::{FrameClock, FrameTime};
pub use limiter::FrameLimiter;
