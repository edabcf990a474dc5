pub mod results;
pub mod scanner;
