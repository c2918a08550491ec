pub mod ast;
pub mod parser;
pub mod executor;
pub mod cache;
