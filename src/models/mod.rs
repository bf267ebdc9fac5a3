mod build;
mod stats;

pub use build::*;
pub use stats::*;
