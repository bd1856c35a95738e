mod algorithm;
mod stump;

pub use algorithm::*;
pub use stump::*;
