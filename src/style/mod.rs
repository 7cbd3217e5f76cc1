pub mod marker;
pub mod stylesheet;
