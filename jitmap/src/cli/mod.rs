//! Command-line interface for jitmap
//!
//! This module contains CLI argument parsing and configuration

pub mod args;

pub use args::{Args, DumpFormat};
