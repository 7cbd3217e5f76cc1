pub mod activator;
pub mod focus_cycler;
pub mod hint_config;
pub mod hinter;
pub mod match_engine;
pub mod search_engine;
pub mod session_model;
