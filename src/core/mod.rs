//! Core types and utilities

pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod orbit;
pub mod types;

pub use error::Error;
pub use types::*;
