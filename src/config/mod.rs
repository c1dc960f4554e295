pub mod catalog;
pub mod env;
