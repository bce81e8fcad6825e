//! Rendering projection
//!
//! Turns game state into flat 2D primitives; the platform shell rasterizes them.

pub mod frame;
pub mod shapes;

pub use frame::{Drawable, DrawableKind, RenderFrame, build_frame, drawables};
pub use shapes::DrawCmd;
