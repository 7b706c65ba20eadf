pub mod dialect;
pub mod factory;
