pub mod alphabet;
pub mod strategy;
