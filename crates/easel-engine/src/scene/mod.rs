//! Recorded draw stream.
//!
//! The UI records shapes into a `DrawList` once per frame; a platform hands
//! the list to the rasterizer. Paint order is deterministic: z-index first,
//! then insertion order.

mod cmd;
mod list;
mod z_index;

pub use cmd::{Border, CircleCmd, DrawCmd, RectCmd, RoundedRectCmd, TextCmd};
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;
