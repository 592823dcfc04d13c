//! Arcade - Terminal Game Portal Library
//!
//! This module exposes the games, stores and settings for testing and
//! external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod build_info;
pub mod core;
pub mod games;
pub mod portal;
pub mod scores;
pub mod settings;
pub mod utils;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;
