pub mod easing;
pub mod precision;
pub mod vec;

pub use easing::*;
pub use precision::*;
pub use vec::*;
