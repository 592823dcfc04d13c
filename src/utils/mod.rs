//! Utility modules: logging and JSON persistence.

pub mod logging;
pub mod persistence;
