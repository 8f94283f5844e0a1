//! Command implementations

pub mod build;
pub mod completions;
pub mod toolchain;
pub mod types;
