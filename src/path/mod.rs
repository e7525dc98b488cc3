pub mod expression;
pub mod normalize;

pub use expression::*;
pub use normalize::*;
