mod lifecycle;
mod pointer;

pub use lifecycle::{wire_lifecycle, Lifecycle};
pub use pointer::{detect_input_source, wire_pointer};
