//! Rendering module
//!
//! `shapes` builds a display list for a session; `canvas` draws it with the
//! Canvas 2D API in the browser.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::Shape;
