//! Render sink
//!
//! The core never draws. Each frame it hands the drawing layer a
//! `RenderFrame`: the camera offset plus everything to draw, already
//! converted to screen space, and GPU-ready instance data for it.

pub mod frame;
pub mod instance;

pub use frame::{DrawItem, Hud, RenderFrame, Visual};
pub use instance::Instance;
