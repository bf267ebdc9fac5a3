mod extract;
mod runner;
mod vk;

pub use extract::*;
pub use runner::*;
pub use vk::*;
