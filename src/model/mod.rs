pub mod demand;
pub mod generator;
pub mod inventory;
pub mod trajectory;
pub mod transition;
