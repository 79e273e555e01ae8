pub mod config;
pub mod ctmc;
pub mod engine;
pub mod rng;
pub mod summary;
