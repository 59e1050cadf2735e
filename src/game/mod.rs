pub mod angle;
pub mod components;
pub mod controller;
pub mod decay;
pub mod intent;
pub mod maneuver;
pub mod physics;
pub mod types;
