pub mod product;
pub mod seed;
pub mod status;

pub use product::*;
pub use seed::*;
pub use status::*;
