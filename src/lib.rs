pub mod config;
pub mod constants;
pub mod constellation;
pub mod coordinates;
pub mod errors;
pub mod integrators;
pub mod models;
pub mod physics;
pub mod propagation;
pub mod rendering;
pub mod simulation;
