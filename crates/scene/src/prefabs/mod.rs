pub mod storefront;

pub use storefront::*;
