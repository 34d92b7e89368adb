mod constrained_ops;
mod shortest_ops;

pub use constrained_ops::{derive_sense, via_checkpoint_path, ConstrainedPath};
pub use shortest_ops::free_flow_length_m;
