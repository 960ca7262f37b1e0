pub mod neighbor_graph;
pub mod traversal;


pub use neighbor_graph::{NeighborGraph, MIN_SHARED_POINTS};
