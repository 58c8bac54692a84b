pub mod physics;
pub mod rng;
pub mod time;
