pub mod edges;
pub mod extraction;
pub mod preprocessing;
pub mod simplification;

pub use edges::*;
pub use extraction::*;
pub use preprocessing::*;
pub use simplification::*;
