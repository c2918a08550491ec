pub mod posting;
pub mod inverted;
