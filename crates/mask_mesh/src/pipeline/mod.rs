//! Regenerate pass: sample grid in, finalized meshes out.
//!
//! ```text
//! ┌──────────┐     ┌──────┐     ┌───────────────┐     ┌────────────┐     ┌──────────┐
//! │ Grid<f32>├────►│ Mask ├────►│ Trees         ├────►│ Extraction ├────►│ Finalize │
//! └──────────┘     └──────┘     └───────────────┘     └────────────┘     └──────────┘
//!                      │          packed (opt.)         marching squares     Mesh
//!                  Grid<i32>      adaptive              leaf quads (opt.)    quad Mesh
//! ```
//!
//! # Stages
//!
//! 1. **Mask**: threshold samples into 0/1 cells
//! 2. **Trees**: optional packed sum tree over the mask, adaptive tree over
//!    the occupied cells
//! 3. **Extraction**: marching squares over the configured field source, and
//!    optional coarse quads from adaptive leaves
//! 4. **Finalize**: each `MeshData` is consumed exactly once into a `Mesh`
//!
//! Every pass owns its accumulators, so independent grids can run in
//! parallel through [`regenerate_batch`].

mod batch;
mod process;

pub use batch::regenerate_batch;
pub use process::{regenerate, tree_side, Generated, GenerationTiming};
