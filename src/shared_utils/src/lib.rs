//! Small helpers shared by the forecast crates.

pub mod config;
pub mod env;
