mod start;

pub use start::*;
