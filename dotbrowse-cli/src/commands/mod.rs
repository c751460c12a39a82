pub mod common;
pub mod tree;
pub mod types;
