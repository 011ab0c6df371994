pub mod evaluation;
pub mod evaluator;

pub use evaluation::{CrossoverType, MacdCrossover, MomentumStrength};
pub use evaluator::*;
