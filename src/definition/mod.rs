pub mod conversion;
pub mod kind;
pub mod node;
pub mod tree;
pub mod wire;

pub use conversion::*;
pub use kind::*;
pub use node::*;
pub use tree::*;
pub use wire::*;
