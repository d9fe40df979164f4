pub mod pointer;
pub mod window;

pub use pointer::wire_knob_pointer;
pub use window::{wire_bpm_input, wire_resize};
