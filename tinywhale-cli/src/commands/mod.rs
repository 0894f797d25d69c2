//! Command modules for the tinywhale CLI.

pub mod common;
pub mod traits;

pub mod build;

pub use build::{run_build, BuildArgs};
