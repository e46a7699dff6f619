mod button;
mod panel;
mod slider;

pub use button::{ActionFn, TriggerMode, UiButton};
pub use panel::{Shadow, UiPanel};
pub use slider::{ChangeFn, DiscreteSlider, SliderRangeError};
