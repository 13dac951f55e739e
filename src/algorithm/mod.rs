/// Sequential tile numbering threaded through tiling calls
pub mod numbering;
/// Overlap-aware grid tiling
pub mod tiler;

pub use numbering::TileCounter;
pub use tiler::{GridTiler, TilingConfig, TilingObserver, TilingOutcome, Unobserved};
