//! Platform abstraction layer
//!
//! Turns what the host delivers into what the simulation consumes:
//! - Frame timestamps into per-frame deltas
//! - Key events into per-frame input

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{InputState, Intent};
