//! Explorer Core - path growth and viewport rescaling for the 3D explorer view
//!
//! A simulated explorer random-walks away from the origin through a cube that
//! also holds a fixed set of landmarks. Each frame:
//! 1. **Path Generator** appends the newest position plus a bounded uniform
//!    displacement (`[-1, 1]` per axis by default)
//! 2. **Viewport Controller** checks the newest position against the visible
//!    cube and, when it gets within 5 units of the edge, resets the half-width
//!    to the path's largest absolute coordinate plus 10
//!
//! All randomness comes through an injected [`rand::Rng`], so a seed fully
//! determines a run. Drawing is delegated to a [`RenderAdapter`].

pub mod config;
pub mod error;
pub mod explorer;
pub mod landmarks;
pub mod path;
pub mod render;
pub mod viewport;

// Re-export key types for convenience
pub use config::ExplorerConfig;
pub use error::CoreError;
pub use explorer::{Explorer, ExplorerState, FrameUpdate};
pub use landmarks::LandmarkSet;
pub use path::{CoordinateArrays, Path, PathGenerator, Position};
pub use render::{FrameControl, FrameRecorder, Marker, NullRenderer, RenderAdapter, RenderStyle, Rgba};
pub use viewport::{Boundary, ThresholdBasis, ViewportController};
