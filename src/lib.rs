pub mod area;
pub mod bisect;
pub mod dataset;
pub mod error;
pub mod export;
pub mod graph;
pub mod nested;
pub mod partition;
pub mod ring;
pub mod shapes;

pub use dataset::Dataset;
pub use error::{DivideError, Result};
pub use partition::{Partition, Partitioner};
