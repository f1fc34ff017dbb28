//! Explorer Simulation Harness
//!
//! Drives the explorer core frame by frame, the way a plotting library's
//! animation loop would, but with every source of non-determinism pinned:
//! - **Randomness**: path and landmark RNGs derived from one 64-bit seed
//! - **Time**: a virtual clock advanced by the frame interval; wall-clock
//!   pacing is opt-in through [`RealTimePacer`]
//! - **Rendering**: any [`explorer_core::RenderAdapter`], from a headless
//!   recorder to the Rerun viewer
//!
//! # Usage
//!
//! ```ignore
//! use explorer_sim::AnimationDriver;
//! use explorer_core::ExplorerConfig;
//!
//! let config = ExplorerConfig {
//!     seed: 42,
//!     frame_count: 100,
//!     ..Default::default()
//! };
//!
//! let report = AnimationDriver::new(config)?.run_headless()?;
//! assert_eq!(report.path.len(), 101);
//! ```

mod context;
mod driver;
mod error;
mod exporter;
mod pacing;
mod visualizer;

pub use context::SimContext;
pub use driver::{AnimationDriver, RunReport};
pub use error::SimError;
pub use exporter::{ExplorerExport, ExportFrame, PointRecord};
pub use pacing::{FramePacer, RealTimePacer, VirtualPacer};
pub use visualizer::RerunRenderer;
