pub mod stopword;
pub mod conflate;
