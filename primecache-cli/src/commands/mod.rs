//! CLI command implementations.

pub mod cache;
pub mod check;
pub mod common;
pub mod run;
