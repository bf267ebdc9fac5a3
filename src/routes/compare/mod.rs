mod price;
mod specs;

pub use price::*;
pub use specs::*;
