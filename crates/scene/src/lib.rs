pub mod animators;
pub mod camera;
pub mod gate;
pub mod interactable;
pub mod picking;
pub mod prefabs;
pub mod travel;
pub mod world;
pub mod zones;

pub use world::*;
