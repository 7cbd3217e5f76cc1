pub mod candidate;
pub mod scanner;
