pub mod json;
pub mod object;
pub mod value;

pub use json::*;
pub use object::*;
pub use value::*;
